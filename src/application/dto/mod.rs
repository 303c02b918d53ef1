/// Data Transfer Objects for application layer
///
/// DTOs carry each command's result from the use case to the formatters,
/// keeping the domain layer isolated from presentation.
mod info_response;
mod install_outcome;
mod list_response;
mod output_format;
mod update_response;
mod upgrade_report;

pub use info_response::InfoResponse;
pub use install_outcome::{InstallOutcome, UninstallResponse};
pub use list_response::{
    AvailableChannel, AvailableRelease, AvailableResponse, InstalledSdk, ListResponse,
};
pub use output_format::OutputFormat;
pub use update_response::UpdateResponse;
pub use upgrade_report::{ChannelOutcome, FailedRemoval, UpgradeReport};
