use dvm::prelude::*;
use dvm::sdk_management::domain::{Release, ReleaseIndexEntry, ReleaseList};
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Deserialize)]
struct IndexFixture {
    #[serde(rename = "releases-index")]
    releases_index: Vec<ReleaseIndexEntry>,
}

#[derive(Deserialize)]
struct ReleasesFixture {
    #[serde(rename = "channel-version")]
    channel_version: String,
    releases: Vec<Release>,
}

fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read fixture {}: {}", path.display(), e))
}

/// Mock ReleaseRepository serving the JSON fixtures under `tests/fixtures/`
///
/// Counts index fetches so tests can observe caching.
#[derive(Clone)]
pub struct MockReleaseRepository {
    pub index_fetches: Arc<AtomicUsize>,
    pub list_fetches: Arc<AtomicUsize>,
    pub invalidations: Arc<AtomicUsize>,
    pub should_fail: bool,
}

impl MockReleaseRepository {
    pub fn new() -> Self {
        Self {
            index_fetches: Arc::new(AtomicUsize::new(0)),
            list_fetches: Arc::new(AtomicUsize::new(0)),
            invalidations: Arc::new(AtomicUsize::new(0)),
            should_fail: false,
        }
    }

    /// Every fetch fails as if the network were down
    pub fn with_failure() -> Self {
        Self {
            should_fail: true,
            ..Self::new()
        }
    }

    pub fn index_fetch_count(&self) -> usize {
        self.index_fetches.load(Ordering::SeqCst)
    }

    pub fn list_fetch_count(&self) -> usize {
        self.list_fetches.load(Ordering::SeqCst)
    }

    pub fn invalidation_count(&self) -> usize {
        self.invalidations.load(Ordering::SeqCst)
    }

    fn fail(&self, url: &str) -> Result<()> {
        if self.should_fail {
            return Err(DvmError::DownloadFailed {
                url: url.to_string(),
                details: "mock network failure".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

impl Default for MockReleaseRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl ReleaseRepository for MockReleaseRepository {
    async fn fetch_release_index(&self) -> Result<ReleaseCatalog> {
        self.index_fetches.fetch_add(1, Ordering::SeqCst);
        self.fail("releases-index.json")?;

        let index: IndexFixture = serde_json::from_str(&fixture("releases-index.json"))?;
        Ok(ReleaseCatalog::new(index.releases_index))
    }

    async fn fetch_release_list(&self, entry: &ReleaseIndexEntry) -> Result<ReleaseList> {
        self.list_fetches.fetch_add(1, Ordering::SeqCst);
        self.fail(&entry.releases_json)?;

        let name = format!("releases-{}.json", entry.channel_version);
        let list: ReleasesFixture = serde_json::from_str(&fixture(&name))?;
        Ok(ReleaseList::new(list.channel_version, list.releases))
    }

    async fn download_artifact(&self, _url: &str, file_name: &str) -> Result<PathBuf> {
        Ok(std::env::temp_dir().join(file_name))
    }

    async fn download_linux_installer(&self) -> Result<PathBuf> {
        Ok(std::env::temp_dir().join("dotnet-install.sh"))
    }

    async fn download_macos_uninstaller(&self) -> Result<PathBuf> {
        Ok(std::env::temp_dir().join("dotnet-core-uninstall.tar.gz"))
    }

    async fn invalidate(&self) -> Result<()> {
        self.invalidations.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
