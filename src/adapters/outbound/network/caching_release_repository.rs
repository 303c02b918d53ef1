use crate::ports::outbound::{get_or_create, ReleaseRepository, ResultCache};
use crate::sdk_management::domain::{ReleaseCatalog, ReleaseIndexEntry, ReleaseList};
use crate::shared::Result;
use async_trait::async_trait;
use std::path::PathBuf;

/// Cache key of the release index
pub const RELEASE_INDEX_KEY: &str = "ReleaseIndexes";

/// Cache key of one channel's release list
pub fn release_list_key(channel_version: &str) -> String {
    format!("ReleaseIndex{}", channel_version)
}

/// CachingReleaseRepository wraps a ReleaseRepository and adds a persistent result cache.
///
/// This adapter implements the decorator pattern: catalog reads are served
/// from the cache while it is fresh, downloads always go to the inner repository.
pub struct CachingReleaseRepository<R: ReleaseRepository, C: ResultCache> {
    inner: R,
    cache: C,
}

impl<R: ReleaseRepository, C: ResultCache> CachingReleaseRepository<R, C> {
    /// Creates a new caching repository wrapping the given inner repository
    pub fn new(inner: R, cache: C) -> Self {
        Self { inner, cache }
    }
}

#[async_trait]
impl<R: ReleaseRepository, C: ResultCache> ReleaseRepository for CachingReleaseRepository<R, C> {
    async fn fetch_release_index(&self) -> Result<ReleaseCatalog> {
        get_or_create(&self.cache, RELEASE_INDEX_KEY, || {
            self.inner.fetch_release_index()
        })
        .await
    }

    async fn fetch_release_list(&self, entry: &ReleaseIndexEntry) -> Result<ReleaseList> {
        let key = release_list_key(&entry.channel_version);
        get_or_create(&self.cache, &key, || self.inner.fetch_release_list(entry)).await
    }

    async fn download_artifact(&self, url: &str, file_name: &str) -> Result<PathBuf> {
        self.inner.download_artifact(url, file_name).await
    }

    async fn download_linux_installer(&self) -> Result<PathBuf> {
        self.inner.download_linux_installer().await
    }

    async fn download_macos_uninstaller(&self) -> Result<PathBuf> {
        self.inner.download_macos_uninstaller().await
    }

    async fn invalidate(&self) -> Result<()> {
        self.cache.clear()?;
        self.inner.invalidate().await
    }
}
