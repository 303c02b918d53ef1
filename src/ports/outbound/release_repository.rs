use crate::sdk_management::domain::{ReleaseCatalog, ReleaseIndexEntry, ReleaseList};
use crate::shared::Result;
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;

/// ReleaseRepository port for the remote release catalog
///
/// This port abstracts the published .NET release metadata and the
/// download of installer artifacts.
#[async_trait]
pub trait ReleaseRepository: Send + Sync {
    /// Fetches the release index, one entry per supported channel
    async fn fetch_release_index(&self) -> Result<ReleaseCatalog>;

    /// Fetches the detailed release list of one channel
    ///
    /// # Arguments
    /// * `entry` - Index entry of the channel; its `releases_json` locates the list
    async fn fetch_release_list(&self, entry: &ReleaseIndexEntry) -> Result<ReleaseList>;

    /// Downloads an artifact into the temporary directory
    ///
    /// # Arguments
    /// * `url` - Location of the artifact
    /// * `file_name` - Suggested local file name; must not contain path separators
    ///
    /// # Returns
    /// Path of the downloaded file
    ///
    /// # Errors
    /// Returns `DownloadFailed` if the transfer fails or the file cannot be written
    async fn download_artifact(&self, url: &str, file_name: &str) -> Result<PathBuf>;

    /// Downloads the `dotnet-install.sh` script used on Linux
    async fn download_linux_installer(&self) -> Result<PathBuf>;

    /// Downloads the `dotnet-core-uninstall` archive used on macOS
    async fn download_macos_uninstaller(&self) -> Result<PathBuf>;

    /// Discards any locally retained catalog data so the next read refetches
    async fn invalidate(&self) -> Result<()> {
        Ok(())
    }
}

#[async_trait]
impl<T: ReleaseRepository + ?Sized> ReleaseRepository for Arc<T> {
    async fn fetch_release_index(&self) -> Result<ReleaseCatalog> {
        (**self).fetch_release_index().await
    }

    async fn fetch_release_list(&self, entry: &ReleaseIndexEntry) -> Result<ReleaseList> {
        (**self).fetch_release_list(entry).await
    }

    async fn download_artifact(&self, url: &str, file_name: &str) -> Result<PathBuf> {
        (**self).download_artifact(url, file_name).await
    }

    async fn download_linux_installer(&self) -> Result<PathBuf> {
        (**self).download_linux_installer().await
    }

    async fn download_macos_uninstaller(&self) -> Result<PathBuf> {
        (**self).download_macos_uninstaller().await
    }

    async fn invalidate(&self) -> Result<()> {
        (**self).invalidate().await
    }
}
