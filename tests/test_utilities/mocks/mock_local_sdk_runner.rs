use dvm::prelude::*;
use std::sync::{Arc, Mutex};

/// Mock LocalSdkRunner reporting a fixed set of installed SDKs
#[derive(Default, Clone)]
pub struct MockLocalSdkRunner {
    pub sdks: Vec<String>,
    pub commands: Arc<Mutex<Vec<String>>>,
}

impl MockLocalSdkRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sdks(sdks: &[&str]) -> Self {
        Self {
            sdks: sdks.iter().map(|s| s.to_string()).collect(),
            commands: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn get_commands(&self) -> Vec<String> {
        self.commands.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl LocalSdkRunner for MockLocalSdkRunner {
    async fn list_installed_sdks(&self) -> Result<LocalInventory> {
        Ok(LocalInventory::new(self.sdks.clone()))
    }

    async fn run_command(
        &self,
        executable: &str,
        args: &[&str],
        _requires_elevation: bool,
    ) -> Result<String> {
        let mut command = vec![executable];
        command.extend_from_slice(args);
        self.commands.lock().unwrap().push(command.join(" "));
        Ok(String::new())
    }
}
