use crate::sdk_management::domain::Channel;
use crate::sdk_management::services::UpdateNotice;
use chrono::NaiveDate;
use serde::Serialize;

/// One installed SDK, annotated with the update available for its channel
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InstalledSdk {
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update: Option<UpdateNotice>,
}

/// Result of `list`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListResponse {
    pub installed: Vec<InstalledSdk>,
    pub updates: Vec<UpdateNotice>,
    /// Installed channels the release index no longer tracks
    pub untracked_channels: Vec<Channel>,
}

impl ListResponse {
    pub fn is_up_to_date(&self) -> bool {
        self.updates.is_empty()
    }
}

/// One published release of a channel
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AvailableRelease {
    pub version: String,
    pub release_date: NaiveDate,
    pub security: bool,
    pub installed: bool,
}

/// One channel of `list-available`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AvailableChannel {
    pub channel_version: String,
    pub latest_sdk: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub support_phase: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_type: Option<String>,
    pub releases: Vec<AvailableRelease>,
}

/// Result of `list-available`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AvailableResponse {
    pub channels: Vec<AvailableChannel>,
}
