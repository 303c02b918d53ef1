use crate::ports::outbound::SdkInstaller;
use crate::sdk_management::domain::{Release, RuntimeIdentifier, SdkVersion};
use crate::shared::error::DvmError;
use crate::shared::Result;
use async_trait::async_trait;

/// Installer for platforms without an install path (Windows)
pub struct UnsupportedPlatformInstaller {
    runtime_identifier: String,
}

impl UnsupportedPlatformInstaller {
    pub fn new(runtime_identifier: RuntimeIdentifier) -> Self {
        Self {
            runtime_identifier: runtime_identifier.to_string(),
        }
    }

    fn unsupported(&self) -> anyhow::Error {
        DvmError::PlatformUnsupported {
            runtime_identifier: self.runtime_identifier.clone(),
        }
        .into()
    }
}

#[async_trait]
impl SdkInstaller for UnsupportedPlatformInstaller {
    async fn install(&self, _sdk_version: &str, _release: &Release) -> Result<()> {
        Err(self.unsupported())
    }

    async fn uninstall(&self, _sdk_version: &SdkVersion) -> Result<()> {
        Err(self.unsupported())
    }
}
