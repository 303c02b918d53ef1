use crate::application::dto::{
    AvailableResponse, ChannelOutcome, InfoResponse, InstallOutcome, ListResponse,
    UninstallResponse, UpdateResponse, UpgradeReport,
};
use crate::ports::outbound::ReportFormatter;
use crate::sdk_management::services::UpdateNotice;
use crate::shared::Result;

/// Marker in front of installed releases in `list-available`
const INSTALLED_MARKER: &str = "* ";
const NOT_INSTALLED_MARKER: &str = "  ";

/// TextFormatter adapter rendering command results for a terminal
pub struct TextFormatter;

impl TextFormatter {
    pub fn new() -> Self {
        Self
    }

    fn update_line(notice: &UpdateNotice) -> String {
        format!(
            "SDK {} was released on {}. Run `dvm upgrade net{}` to install it.",
            notice.latest_sdk,
            notice.latest_release_date.format("%Y-%m-%d"),
            notice.channel
        )
    }

    fn field(output: &mut String, label: &str, value: Option<&str>) {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            output.push_str(&format!("{:<18}{}\n", label, value));
        }
    }
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for TextFormatter {
    fn format_list(&self, response: &ListResponse) -> Result<String> {
        let mut output = String::new();

        if response.installed.is_empty() {
            output.push_str("No .NET SDKs installed\n");
        }
        for sdk in &response.installed {
            output.push_str(&sdk.version);
            output.push('\n');
        }

        if response.is_up_to_date() {
            if !response.installed.is_empty() {
                output.push_str("\nEverything is up to date!\n");
            }
        } else {
            output.push_str("\nUPDATES AVAILABLE\n");
            for notice in &response.updates {
                output.push_str(&Self::update_line(notice));
                output.push('\n');
            }
        }

        if !response.untracked_channels.is_empty() {
            let channels: Vec<String> = response
                .untracked_channels
                .iter()
                .map(|c| c.to_string())
                .collect();
            output.push_str(&format!(
                "\nNo longer tracked by the release index: {}\n",
                channels.join(", ")
            ));
        }

        Ok(output)
    }

    fn format_available(&self, response: &AvailableResponse) -> Result<String> {
        let mut output = String::new();

        for (index, channel) in response.channels.iter().enumerate() {
            if index > 0 {
                output.push('\n');
            }
            let phase = channel.support_phase.as_deref().unwrap_or("unknown");
            output.push_str(&format!(
                ".NET {} ({}, latest {})\n",
                channel.channel_version, phase, channel.latest_sdk
            ));

            for release in &channel.releases {
                let marker = if release.installed {
                    INSTALLED_MARKER
                } else {
                    NOT_INSTALLED_MARKER
                };
                let security = if release.security { "  [security]" } else { "" };
                output.push_str(&format!(
                    "{}{:<28}{}{}\n",
                    marker,
                    release.version,
                    release.release_date.format("%Y-%m-%d"),
                    security
                ));
            }
        }

        Ok(output)
    }

    fn format_install(&self, outcome: &InstallOutcome) -> Result<String> {
        Ok(match outcome {
            InstallOutcome::AlreadyInstalled { sdk_version } => {
                format!("SDK version {} is already installed\n", sdk_version)
            }
            InstallOutcome::Installed {
                channel,
                sdk_version,
            } => format!("Installed SDK {} (.NET {})\n", sdk_version, channel),
        })
    }

    fn format_uninstall(&self, response: &UninstallResponse) -> Result<String> {
        Ok(format!("Removed SDK {}\n", response.sdk_version))
    }

    fn format_upgrade(&self, report: &UpgradeReport) -> Result<String> {
        let mut output = String::new();

        if report.channels.is_empty() {
            output.push_str("No installed SDKs to upgrade\n");
        }

        for outcome in &report.channels {
            let line = match outcome {
                ChannelOutcome::UpToDate {
                    channel,
                    latest_sdk,
                } => format!("{}: already up to date ({})", channel, latest_sdk),
                ChannelOutcome::Upgraded {
                    channel,
                    installed,
                    removed,
                    failed_removals,
                } => {
                    let mut line = format!("{}: upgraded to {}", channel, installed);
                    if !removed.is_empty() {
                        line.push_str(&format!(", removed {}", removed.join(", ")));
                    }
                    for failed in failed_removals {
                        line.push_str(&format!(
                            "\n    could not remove {}: {}",
                            failed.sdk_version, failed.reason
                        ));
                    }
                    line
                }
                ChannelOutcome::InstallFailed {
                    channel,
                    sdk_version,
                    reason,
                } => format!(
                    "{}: install of {} failed, nothing removed\n    {}",
                    channel,
                    sdk_version,
                    reason.lines().next().unwrap_or_default()
                ),
                ChannelOutcome::Untracked { channel } => {
                    format!("{}: not in the release index, skipped", channel)
                }
            };
            output.push_str(&line);
            output.push('\n');
        }

        Ok(output)
    }

    fn format_info(&self, response: &InfoResponse) -> Result<String> {
        let mut output = String::new();
        let release_date = response.release_date.format("%Y-%m-%d").to_string();

        output.push_str(&format!(
            "SDK {} (.NET {})\n",
            response.sdk_version, response.channel_version
        ));
        Self::field(&mut output, "Release date:", Some(release_date.as_str()));
        Self::field(&mut output, "Release:", response.release_version.as_deref());
        Self::field(&mut output, "Runtime:", response.runtime_version.as_deref());
        Self::field(&mut output, "C#:", response.csharp_version.as_deref());
        Self::field(&mut output, "F#:", response.fsharp_version.as_deref());
        Self::field(&mut output, "Visual Basic:", response.vb_version.as_deref());
        Self::field(&mut output, "Visual Studio:", response.vs_version.as_deref());
        Self::field(&mut output, "VS support:", response.vs_support.as_deref());
        Self::field(&mut output, "VS for Mac:", response.vs_mac_version.as_deref());
        Self::field(&mut output, "VS Mac support:", response.vs_mac_support.as_deref());
        Self::field(&mut output, "Release notes:", response.release_notes.as_deref());

        if response.security {
            output.push_str("\nSecurity release, fixes:\n");
            for cve in &response.cves {
                let id = cve.cve_id.as_deref().unwrap_or("unknown CVE");
                match cve.cve_url.as_deref() {
                    Some(url) => output.push_str(&format!("  {} {}\n", id, url)),
                    None => output.push_str(&format!("  {}\n", id)),
                }
            }
        }

        Ok(output)
    }

    fn format_update(&self, response: &UpdateResponse) -> Result<String> {
        let newest = response
            .newest_release_date
            .map(|date| format!(", newest release {}", date.format("%Y-%m-%d")))
            .unwrap_or_default();
        Ok(format!(
            "Release index refreshed: {} channels{}\n",
            response.channel_count, newest
        ))
    }
}
