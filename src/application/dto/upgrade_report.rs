use crate::sdk_management::domain::Channel;
use crate::shared::error::DvmError;
use crate::shared::Result;
use serde::Serialize;

/// A removal of a superseded SDK that failed after the new SDK was installed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailedRemoval {
    pub sdk_version: String,
    pub reason: String,
}

/// What happened to one channel during `upgrade`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ChannelOutcome {
    UpToDate {
        channel: Channel,
        latest_sdk: String,
    },
    Upgraded {
        channel: Channel,
        installed: String,
        removed: Vec<String>,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        failed_removals: Vec<FailedRemoval>,
    },
    /// The new SDK did not install; nothing was removed
    InstallFailed {
        channel: Channel,
        sdk_version: String,
        reason: String,
    },
    Untracked {
        channel: Channel,
    },
}

impl ChannelOutcome {
    pub fn channel(&self) -> &Channel {
        match self {
            ChannelOutcome::UpToDate { channel, .. }
            | ChannelOutcome::Upgraded { channel, .. }
            | ChannelOutcome::InstallFailed { channel, .. }
            | ChannelOutcome::Untracked { channel } => channel,
        }
    }

    pub fn is_failure(&self) -> bool {
        match self {
            ChannelOutcome::InstallFailed { .. } => true,
            ChannelOutcome::Upgraded {
                failed_removals, ..
            } => !failed_removals.is_empty(),
            _ => false,
        }
    }
}

/// Result of `upgrade`, one outcome per channel in scope
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct UpgradeReport {
    pub channels: Vec<ChannelOutcome>,
}

impl UpgradeReport {
    pub fn failed_channels(&self) -> Vec<&Channel> {
        self.channels
            .iter()
            .filter(|outcome| outcome.is_failure())
            .map(ChannelOutcome::channel)
            .collect()
    }

    /// Turns a report with failed channels into an `UpgradeIncomplete` error
    pub fn ensure_complete(&self) -> Result<()> {
        let failed = self.failed_channels();
        if failed.is_empty() {
            return Ok(());
        }
        Err(DvmError::UpgradeIncomplete {
            channels: failed.iter().map(|c| c.to_string()).collect(),
        }
        .into())
    }
}
