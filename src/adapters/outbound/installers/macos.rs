use crate::ports::outbound::{LocalSdkRunner, ReleaseRepository, SdkInstaller};
use crate::sdk_management::domain::{Release, RuntimeIdentifier, SdkVersion};
use crate::shared::error::DvmError;
use crate::shared::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

const INSTALLER_PATH: &str = "/usr/sbin/installer";
const UNINSTALL_TOOL_DIR: &str = "dotnet-core-uninstall";
const UNINSTALL_TOOL: &str = "dotnet-core-uninstall";

/// Installs SDKs from the `.pkg` packages of the release catalog and removes
/// them with the `dotnet-core-uninstall` tool
pub struct MacOsSdkInstaller {
    runner: Arc<dyn LocalSdkRunner>,
    releases: Arc<dyn ReleaseRepository>,
    runtime_identifier: RuntimeIdentifier,
}

impl MacOsSdkInstaller {
    pub fn new(
        runner: Arc<dyn LocalSdkRunner>,
        releases: Arc<dyn ReleaseRepository>,
        runtime_identifier: RuntimeIdentifier,
    ) -> Self {
        Self {
            runner,
            releases,
            runtime_identifier,
        }
    }
}

#[async_trait]
impl SdkInstaller for MacOsSdkInstaller {
    async fn install(&self, sdk_version: &str, release: &Release) -> Result<()> {
        let not_found = || DvmError::InstallerFileNotFound {
            sdk_version: sdk_version.to_string(),
            runtime_identifier: self.runtime_identifier.to_string(),
        };

        let file = release
            .find_sdk_file(self.runtime_identifier.as_str(), ".pkg")
            .ok_or_else(not_found)?;
        let url = file.url.as_deref().ok_or_else(not_found)?;

        let package = self.releases.download_artifact(url, &file.name).await?;
        let package = package.to_string_lossy();

        self.runner
            .run_command(INSTALLER_PATH, &["-pkg", &package, "-target", "/"], true)
            .await?;

        info!(sdk_version, package = %package, "SDK installed");
        Ok(())
    }

    async fn uninstall(&self, sdk_version: &SdkVersion) -> Result<()> {
        let archive = self.releases.download_macos_uninstaller().await?;
        let tool_dir = archive
            .parent()
            .map(|parent| parent.join(UNINSTALL_TOOL_DIR))
            .unwrap_or_else(|| UNINSTALL_TOOL_DIR.into());

        tokio::fs::create_dir_all(&tool_dir)
            .await
            .map_err(|e| DvmError::ProcessExecutionFailed {
                command: format!("mkdir {}", tool_dir.display()),
                exit_code: None,
                stderr: e.to_string(),
            })?;

        let archive = archive.to_string_lossy();
        let tool_dir_str = tool_dir.to_string_lossy();
        self.runner
            .run_command("tar", &["-zxf", &archive, "--directory", &tool_dir_str], false)
            .await?;

        let tool = tool_dir.join(UNINSTALL_TOOL);
        self.runner
            .run_command(
                &tool.to_string_lossy(),
                &["remove", "--sdk", sdk_version.as_str(), "--yes"],
                true,
            )
            .await?;

        info!(sdk_version = %sdk_version, "SDK removed");
        Ok(())
    }
}
