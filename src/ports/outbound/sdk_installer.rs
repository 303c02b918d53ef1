use crate::sdk_management::domain::{Release, SdkVersion};
use crate::shared::Result;
use async_trait::async_trait;

/// SdkInstaller port for the platform-specific install and uninstall paths
///
/// One implementation exists per operating-system family; the right one is
/// selected once at startup from the runtime identifier.
#[async_trait]
pub trait SdkInstaller: Send + Sync {
    /// Installs the SDK `sdk_version` published in `release`
    ///
    /// # Errors
    /// Returns an error if:
    /// - The release carries no installer for this platform (`InstallerFileNotFound`)
    /// - Downloading the installer fails (`DownloadFailed`)
    /// - The process is not elevated (`ElevationRequired`)
    /// - The installer exits non-zero (`ProcessExecutionFailed`)
    async fn install(&self, sdk_version: &str, release: &Release) -> Result<()>;

    /// Removes an installed SDK
    async fn uninstall(&self, sdk_version: &SdkVersion) -> Result<()>;
}

#[async_trait]
impl<T: SdkInstaller + ?Sized> SdkInstaller for Box<T> {
    async fn install(&self, sdk_version: &str, release: &Release) -> Result<()> {
        (**self).install(sdk_version, release).await
    }

    async fn uninstall(&self, sdk_version: &SdkVersion) -> Result<()> {
        (**self).uninstall(sdk_version).await
    }
}
