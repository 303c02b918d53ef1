use crate::application::dto::{
    AvailableResponse, InfoResponse, InstallOutcome, ListResponse, UninstallResponse,
    UpdateResponse, UpgradeReport,
};
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;
use serde::Serialize;

/// JsonFormatter adapter rendering command results as pretty-printed JSON
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn new() -> Self {
        Self
    }

    fn render<T: Serialize>(value: &T) -> Result<String> {
        let mut json = serde_json::to_string_pretty(value)?;
        json.push('\n');
        Ok(json)
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for JsonFormatter {
    fn format_list(&self, response: &ListResponse) -> Result<String> {
        Self::render(response)
    }

    fn format_available(&self, response: &AvailableResponse) -> Result<String> {
        Self::render(response)
    }

    fn format_install(&self, outcome: &InstallOutcome) -> Result<String> {
        Self::render(outcome)
    }

    fn format_uninstall(&self, response: &UninstallResponse) -> Result<String> {
        Self::render(response)
    }

    fn format_upgrade(&self, report: &UpgradeReport) -> Result<String> {
        Self::render(report)
    }

    fn format_info(&self, response: &InfoResponse) -> Result<String> {
        Self::render(response)
    }

    fn format_update(&self, response: &UpdateResponse) -> Result<String> {
        Self::render(response)
    }
}
