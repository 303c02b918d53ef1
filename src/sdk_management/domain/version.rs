use crate::shared::error::DvmError;
use crate::shared::Result;
use serde::Serialize;

/// Framework-name prefix accepted in front of a channel (`net7.0`)
pub const FRAMEWORK_PREFIX: &str = "net";

/// Maximum length for a version string (security limit)
const MAX_VERSION_LENGTH: usize = 100;

/// Strips the optional framework prefix and rejects empty, oversized or
/// whitespace-containing input.
fn normalize_input(input: &str) -> Result<&str> {
    if input.trim().is_empty() {
        return Err(DvmError::invalid_version(input, "version must not be empty").into());
    }

    if input.len() > MAX_VERSION_LENGTH {
        return Err(DvmError::invalid_version(
            input,
            format!("version is longer than {} bytes", MAX_VERSION_LENGTH),
        )
        .into());
    }

    if input.chars().any(char::is_whitespace) {
        return Err(DvmError::invalid_version(input, "version must not contain whitespace").into());
    }

    Ok(input.strip_prefix(FRAMEWORK_PREFIX).unwrap_or(input))
}

fn is_numeric(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_digit())
}

/// Number of `.` separators in a user-supplied version string
pub fn dot_count(input: &str) -> usize {
    input.matches('.').count()
}

/// NewType wrapper for a framework channel (`major.minor`, e.g. `7.0`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Channel(String);

impl Channel {
    /// Derives the channel of any version string: a bare major, a channel,
    /// a full SDK version or a preview build reported by the local runtime.
    ///
    /// No cardinality check is applied here; callers that need one use
    /// [`VersionRequest::parse`] or [`SdkVersion::parse`].
    ///
    /// # Examples
    /// ```
    /// use dvm::sdk_management::domain::Channel;
    ///
    /// assert_eq!(Channel::parse("7.0.102").unwrap().as_str(), "7.0");
    /// assert_eq!(Channel::parse("net6").unwrap().as_str(), "6.0");
    /// assert!(Channel::parse("  ").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self> {
        let version = normalize_input(input)?;
        let tokens: Vec<&str> = version.split('.').filter(|t| !t.is_empty()).collect();

        let channel = match tokens.as_slice() {
            [] => {
                return Err(DvmError::invalid_version(input, "no version components found").into())
            }
            [major] => format!("{}.0", major),
            [major, minor, ..] => format!("{}.{}", major, minor),
        };

        let (major, minor) = channel
            .split_once('.')
            .ok_or_else(|| DvmError::invalid_version(input, "no version components found"))?;
        if !is_numeric(major) || !is_numeric(minor) {
            return Err(DvmError::invalid_version(
                input,
                "major and minor components must be numeric",
            )
            .into());
        }

        Ok(Self(channel))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// NewType wrapper for a full SDK version (`major.minor.patch`, e.g. `7.0.102`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SdkVersion(String);

impl SdkVersion {
    /// Parses a full SDK version: exactly two dots, no whitespace.
    ///
    /// This is the cardinality required by operations acting on one exact
    /// SDK, such as uninstall.
    pub fn parse(input: &str) -> Result<Self> {
        let version = normalize_input(input)?;

        if dot_count(version) != 2 {
            return Err(DvmError::invalid_version(
                input,
                "a full SDK version with exactly two dots is required (e.g. 7.0.102)",
            )
            .into());
        }

        if version.split('.').any(str::is_empty) {
            return Err(DvmError::invalid_version(input, "empty version component").into());
        }

        Channel::parse(version)?;
        Ok(Self(version.to_string()))
    }

    pub fn channel(&self) -> Channel {
        let (major, rest) = self.0.split_once('.').unwrap_or((&self.0, "0"));
        let minor = rest.split('.').next().unwrap_or("0");
        Channel(format!("{}.{}", major, minor))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SdkVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A version requested on the command line for install or info.
///
/// Fewer than two dots selects a channel (and therefore its latest SDK);
/// exactly two dots selects one SDK build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionRequest {
    Channel(Channel),
    Exact(SdkVersion),
}

impl VersionRequest {
    /// # Errors
    /// Fails with `InvalidVersionFormat` on whitespace, empty input, or more than two dots
    pub fn parse(input: &str) -> Result<Self> {
        let version = normalize_input(input)?;

        match dot_count(version) {
            0 | 1 => Ok(VersionRequest::Channel(Channel::parse(version)?)),
            2 => Ok(VersionRequest::Exact(SdkVersion::parse(version)?)),
            _ => Err(DvmError::invalid_version(input, "more than two dots").into()),
        }
    }

    pub fn channel(&self) -> Channel {
        match self {
            VersionRequest::Channel(channel) => channel.clone(),
            VersionRequest::Exact(version) => version.channel(),
        }
    }
}
