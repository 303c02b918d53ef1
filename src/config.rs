//! Configuration for dvm.
//!
//! [`AppConfig`] is built once at startup from the detected platform and an
//! optional YAML settings file (`dvm.config.yml`), then passed by reference
//! to every component that needs it.

use anyhow::{bail, Context};
use chrono::Duration;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::sdk_management::domain::{OsFamily, RuntimeIdentifier};
use crate::shared::Result;

pub const CONFIG_FILENAME: &str = "dvm.config.yml";

/// Directory under the platform config/cache directories owned by dvm
const APP_DIR_NAME: &str = "dvm";

pub const DEFAULT_CACHE_EXPIRY_MINUTES: i64 = 10;

/// One year
pub const MAX_CACHE_EXPIRY_MINUTES: i64 = 365 * 24 * 60;

pub const RELEASE_INDEX_URL: &str =
    "https://raw.githubusercontent.com/dotnet/core/main/release-notes/releases-index.json";
pub const LINUX_INSTALL_SCRIPT_URL: &str = "https://dot.net/v1/dotnet-install.sh";
pub const MACOS_UNINSTALLER_URL: &str =
    "https://github.com/dotnet/cli-lab/releases/download/1.6.0/dotnet-core-uninstall.tar.gz";

/// Remote locations of the release catalog and the platform tools
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseSources {
    pub release_index_url: String,
    pub linux_install_script_url: String,
    pub macos_uninstaller_url: String,
}

impl Default for ReleaseSources {
    fn default() -> Self {
        Self {
            release_index_url: RELEASE_INDEX_URL.to_string(),
            linux_install_script_url: LINUX_INSTALL_SCRIPT_URL.to_string(),
            macos_uninstaller_url: MACOS_UNINSTALLER_URL.to_string(),
        }
    }
}

/// Settings file schema. Every field is optional and overrides the platform default.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub dotnet_command: Option<String>,
    pub install_dir: Option<PathBuf>,
    pub cache_dir: Option<PathBuf>,
    pub cache_expiry_minutes: Option<i64>,
    pub release_index_url: Option<String>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Immutable application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub runtime_identifier: RuntimeIdentifier,
    pub dotnet_command: String,
    pub install_dir: PathBuf,
    pub cache_dir: PathBuf,
    pub cache_expiry: Duration,
    pub download_dir: PathBuf,
    pub sources: ReleaseSources,
}

impl AppConfig {
    /// Platform defaults for a runtime identifier
    pub fn for_platform(runtime_identifier: RuntimeIdentifier) -> Self {
        let (dotnet_command, install_dir) = match runtime_identifier.os_family() {
            OsFamily::Linux => ("/usr/bin/dotnet", "/usr/share/dotnet"),
            OsFamily::MacOs => ("/usr/local/share/dotnet/dotnet", "/usr/local/share/dotnet"),
            OsFamily::Windows => ("dotnet", r"C:\Program Files\dotnet"),
        };

        let cache_dir = dirs::cache_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join(APP_DIR_NAME);

        Self {
            runtime_identifier,
            dotnet_command: dotnet_command.to_string(),
            install_dir: PathBuf::from(install_dir),
            cache_dir,
            cache_expiry: Duration::minutes(DEFAULT_CACHE_EXPIRY_MINUTES),
            download_dir: std::env::temp_dir(),
            sources: ReleaseSources::default(),
        }
    }

    /// Applies the fields set in a settings file on top of `self`
    pub fn with_overrides(mut self, file: ConfigFile) -> Self {
        if let Some(dotnet_command) = file.dotnet_command {
            self.dotnet_command = dotnet_command;
        }
        if let Some(install_dir) = file.install_dir {
            self.install_dir = install_dir;
        }
        if let Some(cache_dir) = file.cache_dir {
            self.cache_dir = cache_dir;
        }
        if let Some(expiry) = file.cache_expiry_minutes.and_then(Duration::try_minutes) {
            self.cache_expiry = expiry;
        }
        if let Some(url) = file.release_index_url {
            self.sources.release_index_url = url;
        }
        self
    }

    /// Builds the configuration for the current machine.
    ///
    /// An explicit settings path must exist; otherwise the default location
    /// is used when a file is present there.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let config = Self::for_platform(RuntimeIdentifier::detect()?);

        let file = match explicit_path {
            Some(path) => Some(load_config_from_path(path)?),
            None => match default_config_dir() {
                Some(dir) => discover_config(&dir)?,
                None => None,
            },
        };

        Ok(match file {
            Some(file) => config.with_overrides(file),
            None => config,
        })
    }
}

/// `<platform config dir>/dvm`
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME))
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);

    if !config_path.exists() {
        return Ok(None);
    }

    let config = load_config_from_path(&config_path)?;
    Ok(Some(config))
}

/// Validate the loaded configuration.
fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(minutes) = config.cache_expiry_minutes {
        if minutes <= 0 {
            bail!(
                "Invalid config: cache_expiry_minutes must be greater than 0 (got {}).\n\n\
                 💡 Hint: Run `dvm update` to refresh the release index on demand instead.",
                minutes
            );
        }
        if minutes > MAX_CACHE_EXPIRY_MINUTES {
            bail!(
                "Invalid config: cache_expiry_minutes must be at most {} (got {}).",
                MAX_CACHE_EXPIRY_MINUTES,
                minutes
            );
        }
    }

    if let Some(ref command) = config.dotnet_command {
        if command.trim().is_empty() {
            bail!(
                "Invalid config: dotnet_command must not be empty.\n\n\
                 💡 Hint: Remove the field to use the platform default."
            );
        }
    }

    if let Some(ref url) = config.release_index_url {
        if !url.starts_with("https://") && !url.starts_with("http://") {
            bail!(
                "Invalid config: release_index_url must be an http(s) URL (got '{}').",
                url
            );
        }
    }

    Ok(())
}

/// Warn about unknown fields in the config file.
fn warn_unknown_fields(config: &ConfigFile) {
    for key in config.unknown_fields.keys() {
        eprintln!(
            "⚠️  Warning: Unknown config field '{}' will be ignored.",
            key
        );
    }
}
