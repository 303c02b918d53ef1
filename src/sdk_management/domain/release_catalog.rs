use super::version::Channel;
use crate::shared::error::DvmError;
use crate::shared::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Channel prefixes of end-of-life major versions that are never offered
const UNSUPPORTED_CHANNEL_PREFIXES: [&str; 2] = ["1.", "2."];

/// Treats an explicit JSON `null` like a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One entry of the remote release index: the summary of a single channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ReleaseIndexEntry {
    pub channel_version: String,
    #[serde(default)]
    pub latest_release: Option<String>,
    pub latest_release_date: NaiveDate,
    #[serde(default)]
    pub latest_runtime: Option<String>,
    pub latest_sdk: String,
    #[serde(default)]
    pub release_type: Option<String>,
    #[serde(default)]
    pub support_phase: Option<String>,
    #[serde(default)]
    pub eol_date: Option<NaiveDate>,
    /// Locator of the channel's detailed release list
    #[serde(rename = "releases.json")]
    pub releases_json: String,
}

/// The release index with legacy channels removed.
///
/// Construction (including deserialization from the cache) always goes
/// through [`ReleaseCatalog::new`], so the legacy filter is applied exactly once.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Vec<ReleaseIndexEntry>", into = "Vec<ReleaseIndexEntry>")]
pub struct ReleaseCatalog {
    entries: Vec<ReleaseIndexEntry>,
}

impl ReleaseCatalog {
    pub fn new(entries: Vec<ReleaseIndexEntry>) -> Self {
        let entries = entries
            .into_iter()
            .filter(|entry| {
                !UNSUPPORTED_CHANNEL_PREFIXES
                    .iter()
                    .any(|prefix| entry.channel_version.starts_with(prefix))
            })
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[ReleaseIndexEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exact lookup of a channel's entry.
    ///
    /// # Errors
    /// Fails with `ChannelNotFound` when the catalog has no such channel
    pub fn lookup_channel(&self, channel: &Channel) -> Result<&ReleaseIndexEntry> {
        self.find_channel(channel).ok_or_else(|| {
            DvmError::ChannelNotFound {
                channel: channel.to_string(),
            }
            .into()
        })
    }

    pub fn find_channel(&self, channel: &Channel) -> Option<&ReleaseIndexEntry> {
        self.entries
            .iter()
            .find(|entry| entry.channel_version == channel.as_str())
    }

    /// Entries to show for `list-available`: one channel, or all when `None`
    pub fn filter(&self, channel: Option<&Channel>) -> Vec<&ReleaseIndexEntry> {
        match channel {
            Some(channel) => self.find_channel(channel).into_iter().collect(),
            None => self.entries.iter().collect(),
        }
    }

    /// Most recent release date across all channels
    pub fn newest_release_date(&self) -> Option<NaiveDate> {
        self.entries.iter().map(|e| e.latest_release_date).max()
    }
}

impl From<Vec<ReleaseIndexEntry>> for ReleaseCatalog {
    fn from(entries: Vec<ReleaseIndexEntry>) -> Self {
        Self::new(entries)
    }
}

impl From<ReleaseCatalog> for Vec<ReleaseIndexEntry> {
    fn from(catalog: ReleaseCatalog) -> Self {
        catalog.entries
    }
}

/// An installer artifact published for one platform
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SdkFile {
    #[serde(default)]
    pub name: String,
    /// Runtime identifier of the platform (`osx-arm64`, `linux-x64`, ...)
    #[serde(default)]
    pub rid: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub hash: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CveEntry {
    #[serde(default)]
    pub cve_id: Option<String>,
    #[serde(default)]
    pub cve_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RuntimeInfo {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub version_display: Option<String>,
    #[serde(default)]
    pub vs_version: Option<String>,
    #[serde(default)]
    pub vs_mac_version: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub files: Vec<SdkFile>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SdkInfo {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub version_display: Option<String>,
    #[serde(default)]
    pub runtime_version: Option<String>,
    #[serde(default)]
    pub vs_version: Option<String>,
    #[serde(default)]
    pub vs_mac_version: Option<String>,
    #[serde(default)]
    pub vs_support: Option<String>,
    #[serde(default)]
    pub vs_mac_support: Option<String>,
    #[serde(default)]
    pub csharp_version: Option<String>,
    #[serde(default)]
    pub fsharp_version: Option<String>,
    #[serde(default)]
    pub vb_version: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub files: Vec<SdkFile>,
}

/// One published SDK build within a channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Release {
    pub release_date: NaiveDate,
    #[serde(default)]
    pub release_version: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub security: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cve_list: Vec<CveEntry>,
    #[serde(default)]
    pub release_notes: Option<String>,
    #[serde(default)]
    pub runtime: Option<RuntimeInfo>,
    #[serde(default)]
    pub sdk: Option<SdkInfo>,
}

impl Release {
    /// The SDK version of this build, absent for runtime-only releases
    pub fn sdk_version(&self) -> Option<&str> {
        self.sdk.as_ref().and_then(|sdk| sdk.version.as_deref())
    }

    /// Display form of the SDK version, falling back to the plain version
    pub fn display_version(&self) -> Option<&str> {
        let sdk = self.sdk.as_ref()?;
        sdk.version_display.as_deref().or(sdk.version.as_deref())
    }

    /// CVEs fixed by this release; empty unless the release is flagged as a security release
    pub fn security_cves(&self) -> &[CveEntry] {
        if self.security {
            &self.cve_list
        } else {
            &[]
        }
    }

    /// Finds the SDK installer for a platform by runtime identifier and file-name suffix.
    ///
    /// Both comparisons are case-insensitive.
    pub fn find_sdk_file(&self, runtime_identifier: &str, suffix: &str) -> Option<&SdkFile> {
        let suffix = suffix.to_ascii_lowercase();
        self.sdk.as_ref()?.files.iter().find(|file| {
            file.rid.eq_ignore_ascii_case(runtime_identifier)
                && file.name.to_ascii_lowercase().ends_with(&suffix)
        })
    }
}

/// The detailed release list of one channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReleaseList {
    pub channel_version: String,
    pub releases: Vec<Release>,
}

impl ReleaseList {
    pub fn new(channel_version: impl Into<String>, releases: Vec<Release>) -> Self {
        Self {
            channel_version: channel_version.into(),
            releases,
        }
    }

    /// First release whose SDK version equals `sdk_version` exactly.
    ///
    /// # Errors
    /// Fails with `ReleaseNotFound` when no release matches, including when
    /// every candidate lacks an SDK version
    pub fn lookup_release(&self, sdk_version: &str) -> Result<&Release> {
        self.releases
            .iter()
            .find(|release| release.sdk_version() == Some(sdk_version))
            .ok_or_else(|| {
                DvmError::ReleaseNotFound {
                    sdk_version: sdk_version.to_string(),
                    channel: self.channel_version.clone(),
                }
                .into()
            })
    }

    /// Releases that carry an SDK version, in catalog order
    pub fn with_sdk(&self) -> impl Iterator<Item = &Release> {
        self.releases
            .iter()
            .filter(|release| release.sdk_version().is_some())
    }
}
