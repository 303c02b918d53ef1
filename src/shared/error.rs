use std::fmt;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow scripts to distinguish a mistyped version string
/// from a failed download or installer run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - the command completed (including "already installed" no-ops)
    Success = 0,
    /// User error - malformed version string or a version missing from the catalog
    UserError = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (network error, installer failure, missing privileges, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::UserError => write!(f, "User Error (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors for SDK management.
///
/// Uses thiserror to derive Display and Error traits automatically.
/// Variants carrying a hint are the ones the user can act on directly.
#[derive(Debug, Error)]
pub enum DvmError {
    #[error("Invalid SDK version format: '{input}'\nReason: {reason}\n\n💡 Hint: Use a channel like 7.0 (or net7.0) or a full SDK version like 7.0.102")]
    InvalidVersionFormat { input: String, reason: String },

    #[error("No release channel found for {channel}\n\n💡 Hint: Run `dvm list-available` to see the supported channels")]
    ChannelNotFound { channel: String },

    #[error("No release found for SDK {sdk_version}\n\n💡 Hint: Run `dvm list-available -f {channel}` to see the published SDKs")]
    ReleaseNotFound { sdk_version: String, channel: String },

    #[error("SDK {sdk_version} has no installer file for {runtime_identifier}")]
    InstallerFileNotFound {
        sdk_version: String,
        runtime_identifier: String,
    },

    #[error("This command must be run as root: {command}\n\n💡 Hint: Re-run the command with sudo")]
    ElevationRequired { command: String },

    #[error("Command failed: {command} (exit code: {})\nDetails: {stderr}", exit_code.map_or_else(|| "none".to_string(), |c| c.to_string()))]
    ProcessExecutionFailed {
        command: String,
        exit_code: Option<i32>,
        stderr: String,
    },

    #[error("Failed to download {url}\nDetails: {details}\n\n💡 Hint: Check your internet connection and try again")]
    DownloadFailed { url: String, details: String },

    #[error("Runtime identifier {runtime_identifier} is not supported at this time")]
    PlatformUnsupported { runtime_identifier: String },

    #[error("Cache error: {details}\n\n💡 Hint: Run `dvm update` to rebuild the cache")]
    CacheError { details: String },

    #[error("Upgrade did not complete for: {}", channels.join(", "))]
    UpgradeIncomplete { channels: Vec<String> },
}

impl DvmError {
    /// Returns true for errors caused by the user's input rather than the environment.
    ///
    /// These are reported without an error chain and map to [`ExitCode::UserError`].
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            DvmError::InvalidVersionFormat { .. }
                | DvmError::ChannelNotFound { .. }
                | DvmError::ReleaseNotFound { .. }
        )
    }

    /// Returns true for errors that make every further privileged step pointless.
    pub fn is_fatal_for_session(&self) -> bool {
        matches!(
            self,
            DvmError::ElevationRequired { .. } | DvmError::PlatformUnsupported { .. }
        )
    }

    pub(crate) fn invalid_version(input: &str, reason: impl Into<String>) -> Self {
        DvmError::InvalidVersionFormat {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

/// Maps an application error to the process exit code.
pub fn exit_code_for(error: &anyhow::Error) -> ExitCode {
    match error.downcast_ref::<DvmError>() {
        Some(e) if e.is_user_error() => ExitCode::UserError,
        _ => ExitCode::ApplicationError,
    }
}
