use crate::sdk_management::domain::Channel;
use serde::Serialize;

/// Result of `install`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum InstallOutcome {
    AlreadyInstalled { sdk_version: String },
    Installed { channel: Channel, sdk_version: String },
}

impl InstallOutcome {
    pub fn sdk_version(&self) -> &str {
        match self {
            InstallOutcome::AlreadyInstalled { sdk_version }
            | InstallOutcome::Installed { sdk_version, .. } => sdk_version,
        }
    }
}

/// Result of `uninstall`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UninstallResponse {
    pub sdk_version: String,
}
