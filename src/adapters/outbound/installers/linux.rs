use crate::ports::outbound::{LocalSdkRunner, ReleaseRepository, SdkInstaller};
use crate::sdk_management::domain::{Release, SdkVersion};
use crate::shared::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// Directories under the install root that hold files of one SDK version
const SDK_COMPONENT_DIRS: [&str; 5] = [
    "sdk",
    "shared/Microsoft.NETCore.App",
    "shared/Microsoft.AspNetCore.All",
    "shared/Microsoft.AspNetCore.App",
    "host/fxr",
];

/// Paths removed when uninstalling `sdk_version` from `install_dir`
pub fn component_paths(install_dir: &Path, sdk_version: &str) -> Vec<PathBuf> {
    SDK_COMPONENT_DIRS
        .iter()
        .map(|dir| install_dir.join(dir).join(sdk_version))
        .collect()
}

/// Installs SDKs with the official `dotnet-install.sh` script
pub struct LinuxSdkInstaller {
    runner: Arc<dyn LocalSdkRunner>,
    releases: Arc<dyn ReleaseRepository>,
    install_dir: PathBuf,
}

impl LinuxSdkInstaller {
    pub fn new(
        runner: Arc<dyn LocalSdkRunner>,
        releases: Arc<dyn ReleaseRepository>,
        install_dir: PathBuf,
    ) -> Self {
        Self {
            runner,
            releases,
            install_dir,
        }
    }
}

#[async_trait]
impl SdkInstaller for LinuxSdkInstaller {
    async fn install(&self, sdk_version: &str, _release: &Release) -> Result<()> {
        let script = self.releases.download_linux_installer().await?;
        let script = script.to_string_lossy();
        let install_dir = self.install_dir.to_string_lossy();

        self.runner
            .run_command("chmod", &["+x", &script], false)
            .await?;
        self.runner
            .run_command(
                &script,
                &["--version", sdk_version, "--install-dir", &install_dir],
                true,
            )
            .await?;

        info!(sdk_version, install_dir = %install_dir, "SDK installed");
        Ok(())
    }

    async fn uninstall(&self, sdk_version: &SdkVersion) -> Result<()> {
        let paths: Vec<String> = component_paths(&self.install_dir, sdk_version.as_str())
            .iter()
            .map(|path| path.to_string_lossy().into_owned())
            .collect();

        let mut args = vec!["-rf"];
        args.extend(paths.iter().map(String::as_str));
        self.runner.run_command("rm", &args, true).await?;

        info!(sdk_version = %sdk_version, "SDK removed");
        Ok(())
    }
}
