use crate::application::dto::{
    AvailableResponse, InfoResponse, InstallOutcome, ListResponse, UninstallResponse,
    UpdateResponse, UpgradeReport,
};
use crate::shared::Result;

/// ReportFormatter port for rendering command results
///
/// This port abstracts the rendering of each command's response
/// (human-readable text, JSON, etc.).
///
/// # Errors
/// Every method returns an error if serialization fails
pub trait ReportFormatter {
    fn format_list(&self, response: &ListResponse) -> Result<String>;

    fn format_available(&self, response: &AvailableResponse) -> Result<String>;

    fn format_install(&self, outcome: &InstallOutcome) -> Result<String>;

    fn format_uninstall(&self, response: &UninstallResponse) -> Result<String>;

    fn format_upgrade(&self, report: &UpgradeReport) -> Result<String>;

    fn format_info(&self, response: &InfoResponse) -> Result<String>;

    fn format_update(&self, response: &UpdateResponse) -> Result<String>;
}
