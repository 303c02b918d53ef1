use dvm::prelude::*;
use dvm::sdk_management::domain::Release;
use std::sync::{Arc, Mutex};

/// Mock SdkInstaller recording `install <v>` / `uninstall <v>` calls in order
#[derive(Default, Clone)]
pub struct MockSdkInstaller {
    pub calls: Arc<Mutex<Vec<String>>>,
    pub failing_installs: Vec<String>,
}

impl MockSdkInstaller {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installing `sdk_version` fails with a non-zero installer exit
    pub fn with_failing_install(mut self, sdk_version: &str) -> Self {
        self.failing_installs.push(sdk_version.to_string());
        self
    }

    pub fn get_calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl SdkInstaller for MockSdkInstaller {
    async fn install(&self, sdk_version: &str, _release: &Release) -> Result<()> {
        let command = format!("install {}", sdk_version);
        self.calls.lock().unwrap().push(command.clone());

        if self.failing_installs.iter().any(|v| v == sdk_version) {
            return Err(DvmError::ProcessExecutionFailed {
                command,
                exit_code: Some(1),
                stderr: "mock installer failure".to_string(),
            }
            .into());
        }
        Ok(())
    }

    async fn uninstall(&self, sdk_version: &SdkVersion) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("uninstall {}", sdk_version));
        Ok(())
    }
}
