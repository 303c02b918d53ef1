use crate::ports::outbound::LocalSdkRunner;
use crate::sdk_management::domain::LocalInventory;
use crate::shared::error::DvmError;
use crate::shared::Result;
use async_trait::async_trait;
use std::io::ErrorKind;
use tokio::process::Command;
use tracing::debug;

fn command_line(executable: &str, args: &[&str]) -> String {
    std::iter::once(executable)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}

/// ProcessSdkRunner adapter executing local programs with tokio
///
/// This adapter implements the LocalSdkRunner port. Elevation is checked
/// with `id -u` immediately before the privileged command is spawned.
pub struct ProcessSdkRunner {
    dotnet_command: String,
}

impl ProcessSdkRunner {
    pub fn new(dotnet_command: impl Into<String>) -> Self {
        Self {
            dotnet_command: dotnet_command.into(),
        }
    }

    async fn is_elevated() -> Result<bool> {
        let output = Command::new("id").arg("-u").output().await.map_err(|e| {
            DvmError::ProcessExecutionFailed {
                command: "id -u".to_string(),
                exit_code: None,
                stderr: e.to_string(),
            }
        })?;
        Ok(String::from_utf8_lossy(&output.stdout).trim() == "0")
    }
}

#[async_trait]
impl LocalSdkRunner for ProcessSdkRunner {
    async fn list_installed_sdks(&self) -> Result<LocalInventory> {
        let output = match Command::new(&self.dotnet_command)
            .arg("--list-sdks")
            .output()
            .await
        {
            Ok(output) => output,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(command = %self.dotnet_command, "dotnet not found, no SDKs installed");
                return Ok(LocalInventory::default());
            }
            Err(e) => {
                return Err(DvmError::ProcessExecutionFailed {
                    command: command_line(&self.dotnet_command, &["--list-sdks"]),
                    exit_code: None,
                    stderr: e.to_string(),
                }
                .into())
            }
        };

        if !output.status.success() {
            return Err(DvmError::ProcessExecutionFailed {
                command: command_line(&self.dotnet_command, &["--list-sdks"]),
                exit_code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }
            .into());
        }

        let inventory = LocalInventory::from_list_sdks_output(&String::from_utf8_lossy(&output.stdout));
        debug!(count = inventory.len(), "installed SDKs listed");
        Ok(inventory)
    }

    async fn run_command(
        &self,
        executable: &str,
        args: &[&str],
        requires_elevation: bool,
    ) -> Result<String> {
        let command = command_line(executable, args);

        if requires_elevation && !Self::is_elevated().await? {
            return Err(DvmError::ElevationRequired { command }.into());
        }

        debug!(%command, requires_elevation, "running");
        let output = Command::new(executable)
            .args(args)
            .output()
            .await
            .map_err(|e| DvmError::ProcessExecutionFailed {
                command: command.clone(),
                exit_code: None,
                stderr: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(DvmError::ProcessExecutionFailed {
                command,
                exit_code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            }
            .into());
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
