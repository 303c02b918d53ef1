use crate::adapters::outbound::installers::{
    LinuxSdkInstaller, MacOsSdkInstaller, UnsupportedPlatformInstaller,
};
use crate::config::AppConfig;
use crate::ports::outbound::{LocalSdkRunner, ReleaseRepository, SdkInstaller};
use crate::sdk_management::domain::OsFamily;
use std::sync::Arc;

/// Factory selecting the platform installer from the runtime identifier
///
/// The choice is made once at startup; the use case only sees the
/// [`SdkInstaller`] port.
pub struct InstallerFactory;

impl InstallerFactory {
    pub fn create(
        config: &AppConfig,
        runner: Arc<dyn LocalSdkRunner>,
        releases: Arc<dyn ReleaseRepository>,
    ) -> Box<dyn SdkInstaller> {
        match config.runtime_identifier.os_family() {
            OsFamily::Linux => Box::new(LinuxSdkInstaller::new(
                runner,
                releases,
                config.install_dir.clone(),
            )),
            OsFamily::MacOs => Box::new(MacOsSdkInstaller::new(
                runner,
                releases,
                config.runtime_identifier,
            )),
            OsFamily::Windows => Box::new(UnsupportedPlatformInstaller::new(
                config.runtime_identifier,
            )),
        }
    }
}
