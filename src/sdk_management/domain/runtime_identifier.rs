use crate::shared::error::DvmError;
use crate::shared::Result;
use serde::Serialize;

/// Operating-system family of a runtime identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsFamily {
    Linux,
    MacOs,
    Windows,
}

/// .NET runtime identifier of the machine (`linux-x64`, `osx-arm64`, ...).
///
/// The string form matches the `rid` field of installer files in the release catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RuntimeIdentifier {
    #[serde(rename = "linux-x64")]
    LinuxX64,
    #[serde(rename = "linux-arm64")]
    LinuxArm64,
    #[serde(rename = "linux-arm")]
    LinuxArm,
    #[serde(rename = "osx-x64")]
    OsxX64,
    #[serde(rename = "osx-arm64")]
    OsxArm64,
    #[serde(rename = "win-x64")]
    WinX64,
    #[serde(rename = "win-x86")]
    WinX86,
    #[serde(rename = "win-arm64")]
    WinArm64,
}

impl RuntimeIdentifier {
    /// Detects the runtime identifier of the current process
    ///
    /// # Errors
    /// Fails with `PlatformUnsupported` for operating systems .NET does not ship SDKs for
    pub fn detect() -> Result<Self> {
        Self::from_os_arch(std::env::consts::OS, std::env::consts::ARCH)
    }

    /// Maps an `(os, arch)` pair as reported by `std::env::consts` to a runtime identifier
    pub fn from_os_arch(os: &str, arch: &str) -> Result<Self> {
        let rid = match (os, arch) {
            ("linux", "aarch64") => Self::LinuxArm64,
            ("linux", "arm") => Self::LinuxArm,
            ("linux", "x86_64") => Self::LinuxX64,
            ("macos", "aarch64") => Self::OsxArm64,
            ("macos", "x86_64") => Self::OsxX64,
            ("windows", "aarch64") => Self::WinArm64,
            ("windows", "x86") => Self::WinX86,
            ("windows", "x86_64") => Self::WinX64,
            _ => {
                return Err(DvmError::PlatformUnsupported {
                    runtime_identifier: format!("{}-{}", os, arch),
                }
                .into())
            }
        };
        Ok(rid)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LinuxX64 => "linux-x64",
            Self::LinuxArm64 => "linux-arm64",
            Self::LinuxArm => "linux-arm",
            Self::OsxX64 => "osx-x64",
            Self::OsxArm64 => "osx-arm64",
            Self::WinX64 => "win-x64",
            Self::WinX86 => "win-x86",
            Self::WinArm64 => "win-arm64",
        }
    }

    pub fn os_family(&self) -> OsFamily {
        match self {
            Self::LinuxX64 | Self::LinuxArm64 | Self::LinuxArm => OsFamily::Linux,
            Self::OsxX64 | Self::OsxArm64 => OsFamily::MacOs,
            Self::WinX64 | Self::WinX86 | Self::WinArm64 => OsFamily::Windows,
        }
    }
}

impl std::fmt::Display for RuntimeIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
