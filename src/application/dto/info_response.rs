use crate::sdk_management::domain::{CveEntry, Release};
use chrono::NaiveDate;
use serde::Serialize;

/// Result of `info`: metadata of one resolved release
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InfoResponse {
    pub sdk_version: String,
    pub channel_version: String,
    pub release_date: NaiveDate,
    pub release_version: Option<String>,
    pub runtime_version: Option<String>,
    pub csharp_version: Option<String>,
    pub fsharp_version: Option<String>,
    pub vb_version: Option<String>,
    pub vs_version: Option<String>,
    pub vs_support: Option<String>,
    pub vs_mac_version: Option<String>,
    pub vs_mac_support: Option<String>,
    pub release_notes: Option<String>,
    pub security: bool,
    /// Only filled for security releases
    pub cves: Vec<CveEntry>,
}

impl InfoResponse {
    pub fn from_release(sdk_version: &str, channel_version: &str, release: &Release) -> Self {
        let sdk = release.sdk.clone().unwrap_or_default();
        Self {
            sdk_version: sdk_version.to_string(),
            channel_version: channel_version.to_string(),
            release_date: release.release_date,
            release_version: release.release_version.clone(),
            runtime_version: sdk.runtime_version,
            csharp_version: sdk.csharp_version,
            fsharp_version: sdk.fsharp_version,
            vb_version: sdk.vb_version,
            vs_version: sdk.vs_version,
            vs_support: sdk.vs_support,
            vs_mac_version: sdk.vs_mac_version,
            vs_mac_support: sdk.vs_mac_support,
            release_notes: release.release_notes.clone(),
            security: release.security,
            cves: release.security_cves().to_vec(),
        }
    }
}
