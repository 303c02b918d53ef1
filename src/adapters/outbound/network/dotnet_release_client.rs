use crate::config::ReleaseSources;
use crate::ports::outbound::ReleaseRepository;
use crate::sdk_management::domain::{Release, ReleaseCatalog, ReleaseIndexEntry, ReleaseList};
use crate::shared::error::DvmError;
use crate::shared::security::validate_file_name;
use crate::shared::Result;
use anyhow::Context;
use async_trait::async_trait;
use indicatif::{ProgressBar, ProgressStyle};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

const LINUX_INSTALL_SCRIPT_NAME: &str = "dotnet-install.sh";
const MACOS_UNINSTALLER_NAME: &str = "dotnet-core-uninstall.tar.gz";

#[derive(Debug, Deserialize)]
struct ReleaseIndexDocument {
    #[serde(rename = "releases-index")]
    releases_index: Vec<ReleaseIndexEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct ReleaseListDocument {
    channel_version: String,
    #[serde(default)]
    releases: Vec<Release>,
}

/// DotnetReleaseClient adapter for the published .NET release metadata
///
/// This adapter implements the ReleaseRepository port over HTTPS, reading
/// `releases-index.json` and the per-channel `releases.json` documents and
/// streaming installer artifacts into a private directory created for this
/// client and removed when it is dropped.
pub struct DotnetReleaseClient {
    client: reqwest::Client,
    sources: ReleaseSources,
    download_dir: TempDir,
}

impl DotnetReleaseClient {
    /// Creates a new client reading from `sources`.
    ///
    /// Downloads land in a fresh owner-only directory under `download_root`,
    /// never directly in `download_root`, since that is usually the shared
    /// system temp dir and the artifact names are fixed.
    pub fn new(sources: ReleaseSources, download_root: PathBuf) -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("dvm/{}", version);
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .read_timeout(Duration::from_secs(60))
            .user_agent(user_agent)
            .build()?;

        let download_dir = tempfile::Builder::new()
            .prefix("dvm-")
            .tempdir_in(&download_root)
            .with_context(|| {
                format!(
                    "Failed to create download directory in {}",
                    download_root.display()
                )
            })?;
        debug!(path = %download_dir.path().display(), "download directory created");

        Ok(Self {
            client,
            sources,
            download_dir,
        })
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response> {
        let download_failed = |details: String| DvmError::DownloadFailed {
            url: url.to_string(),
            details,
        };

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| download_failed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(download_failed(format!("server returned {}", response.status())).into());
        }

        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!(url, "fetching");
        let response = self.get(url).await?;
        let document = response
            .json::<T>()
            .await
            .map_err(|e| DvmError::DownloadFailed {
                url: url.to_string(),
                details: format!("invalid response body: {}", e),
            })?;
        Ok(document)
    }

    fn progress_bar(total: Option<u64>, file_name: &str) -> ProgressBar {
        let pb = match total {
            Some(len) => {
                let pb = ProgressBar::new(len);
                pb.set_style(
                    ProgressStyle::default_bar()
                        .template("   {spinner:.green} [{bar:40.cyan/blue}] {bytes}/{total_bytes} - {msg}")
                        .unwrap_or_else(|_| ProgressStyle::default_bar())
                        .progress_chars("=>-"),
                );
                pb
            }
            None => ProgressBar::new_spinner(),
        };
        pb.set_message(file_name.to_string());
        pb
    }
}

#[async_trait]
impl ReleaseRepository for DotnetReleaseClient {
    async fn fetch_release_index(&self) -> Result<ReleaseCatalog> {
        let document: ReleaseIndexDocument =
            self.get_json(&self.sources.release_index_url).await?;
        info!(
            channels = document.releases_index.len(),
            "release index downloaded"
        );
        Ok(ReleaseCatalog::new(document.releases_index))
    }

    async fn fetch_release_list(&self, entry: &ReleaseIndexEntry) -> Result<ReleaseList> {
        let document: ReleaseListDocument = self.get_json(&entry.releases_json).await?;
        info!(
            channel = %document.channel_version,
            releases = document.releases.len(),
            "release list downloaded"
        );
        Ok(ReleaseList::new(document.channel_version, document.releases))
    }

    async fn download_artifact(&self, url: &str, file_name: &str) -> Result<PathBuf> {
        validate_file_name(file_name)?;
        let path = self.download_dir.path().join(file_name);
        let write_failed = |e: std::io::Error| DvmError::DownloadFailed {
            url: url.to_string(),
            details: format!("cannot write {}: {}", path.display(), e),
        };

        let mut response = self.get(url).await?;
        let pb = Self::progress_bar(response.content_length(), file_name);

        // Only this process can write here; drop our own earlier copy
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(write_failed(e).into()),
        }
        let mut file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(write_failed)?;
        loop {
            let chunk = match response.chunk().await {
                Ok(Some(chunk)) => chunk,
                Ok(None) => break,
                Err(e) => {
                    pb.abandon();
                    return Err(DvmError::DownloadFailed {
                        url: url.to_string(),
                        details: e.to_string(),
                    }
                    .into());
                }
            };
            file.write_all(&chunk).await.map_err(write_failed)?;
            pb.inc(chunk.len() as u64);
        }
        file.flush().await.map_err(write_failed)?;
        pb.finish_and_clear();

        info!(url, path = %path.display(), "artifact downloaded");
        Ok(path)
    }

    async fn download_linux_installer(&self) -> Result<PathBuf> {
        self.download_artifact(
            &self.sources.linux_install_script_url,
            LINUX_INSTALL_SCRIPT_NAME,
        )
        .await
    }

    async fn download_macos_uninstaller(&self) -> Result<PathBuf> {
        self.download_artifact(&self.sources.macos_uninstaller_url, MACOS_UNINSTALLER_NAME)
            .await
    }
}
