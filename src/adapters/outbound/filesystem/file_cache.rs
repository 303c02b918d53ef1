use crate::ports::outbound::ResultCache;
use crate::shared::error::DvmError;
use crate::shared::security::{
    validate_file_name, validate_file_size, validate_not_symlink, MAX_FILE_SIZE,
};
use crate::shared::Result;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// On-disk layout of one cache entry
#[derive(Debug, Serialize, Deserialize)]
struct CacheEnvelope {
    written_at: DateTime<Utc>,
    value: serde_json::Value,
}

/// Returns true if an entry written at `written_at` is still usable at `now`.
///
/// Entries stamped in the future are stale.
pub fn is_fresh(written_at: DateTime<Utc>, now: DateTime<Utc>, expiry: Duration) -> bool {
    let age = now.signed_duration_since(written_at);
    age >= Duration::zero() && age < expiry
}

/// FileSystemCache adapter storing one JSON file per key
///
/// Each entry lives in `<cache_dir>/<key>.json` together with its write
/// timestamp. The directory is created on first write.
pub struct FileSystemCache {
    cache_dir: PathBuf,
    expiry: Duration,
}

impl FileSystemCache {
    pub fn new(cache_dir: PathBuf, expiry: Duration) -> Self {
        Self { cache_dir, expiry }
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    fn entry_path(&self, key: &str) -> Result<PathBuf> {
        validate_file_name(key)?;
        Ok(self.cache_dir.join(format!("{}.json", key)))
    }

    fn read_envelope(path: &Path) -> Result<Option<CacheEnvelope>> {
        let metadata = match fs::metadata(path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(DvmError::CacheError {
                    details: format!("{}: {}", path.display(), e),
                }
                .into())
            }
        };

        validate_not_symlink(path, "cache read")?;
        validate_file_size(metadata.len(), path, MAX_FILE_SIZE)?;

        let content = fs::read_to_string(path).map_err(|e| DvmError::CacheError {
            details: format!("{}: {}", path.display(), e),
        })?;

        match serde_json::from_str(&content) {
            Ok(envelope) => Ok(Some(envelope)),
            Err(e) => {
                debug!(path = %path.display(), error = %e, "corrupt cache entry ignored");
                Ok(None)
            }
        }
    }
}

impl ResultCache for FileSystemCache {
    fn load(&self, key: &str) -> Result<Option<String>> {
        let path = self.entry_path(key)?;
        let Some(envelope) = Self::read_envelope(&path)? else {
            return Ok(None);
        };

        if !is_fresh(envelope.written_at, Utc::now(), self.expiry) {
            debug!(key, written_at = %envelope.written_at, "cache entry expired");
            return Ok(None);
        }

        Ok(Some(envelope.value.to_string()))
    }

    fn store(&self, key: &str, payload: &str) -> Result<()> {
        let path = self.entry_path(key)?;

        fs::create_dir_all(&self.cache_dir).map_err(|e| DvmError::CacheError {
            details: format!("cannot create {}: {}", self.cache_dir.display(), e),
        })?;

        if path.exists() {
            validate_not_symlink(&path, "cache write")?;
        }

        let envelope = CacheEnvelope {
            written_at: Utc::now(),
            value: serde_json::from_str(payload)?,
        };
        let content = serde_json::to_string(&envelope)?;

        fs::write(&path, content).map_err(|e| DvmError::CacheError {
            details: format!("{}: {}", path.display(), e),
        })?;
        debug!(key, path = %path.display(), "cache entry written");
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let entries = match fs::read_dir(&self.cache_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
            Err(e) => {
                return Err(DvmError::CacheError {
                    details: format!("{}: {}", self.cache_dir.display(), e),
                }
                .into())
            }
        };

        let mut removed = 0usize;
        for entry in entries {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                fs::remove_file(&path).map_err(|e| DvmError::CacheError {
                    details: format!("{}: {}", path.display(), e),
                })?;
                removed += 1;
            }
        }
        debug!(removed, dir = %self.cache_dir.display(), "cache cleared");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn cache(dir: &TempDir) -> FileSystemCache {
        FileSystemCache::new(dir.path().join("dvm"), Duration::minutes(10))
    }

    #[test]
    fn test_is_fresh_window() {
        let now = Utc::now();
        let expiry = Duration::minutes(10);
        assert!(is_fresh(now, now, expiry));
        assert!(is_fresh(now - Duration::minutes(9), now, expiry));
        assert!(!is_fresh(now - Duration::minutes(10), now, expiry));
        assert!(!is_fresh(now - Duration::hours(3), now, expiry));
        assert!(!is_fresh(now + Duration::minutes(1), now, expiry));
    }

    #[test]
    fn test_store_then_load() {
        let dir = TempDir::new().unwrap();
        let cache = cache(&dir);

        cache.store("ReleaseIndexes", r#"[{"a":1}]"#).unwrap();
        let loaded = cache.load("ReleaseIndexes").unwrap().unwrap();
        assert_eq!(loaded, r#"[{"a":1}]"#);
        assert!(dir.path().join("dvm/ReleaseIndexes.json").exists());
    }

    #[test]
    fn test_load_missing_entry_and_missing_dir() {
        let dir = TempDir::new().unwrap();
        let cache = cache(&dir);
        assert!(cache.load("ReleaseIndex7.0").unwrap().is_none());
    }

    #[test]
    fn test_expired_entry_is_a_miss() {
        let dir = TempDir::new().unwrap();
        let cache = cache(&dir);
        fs::create_dir_all(cache.cache_dir()).unwrap();

        let envelope = CacheEnvelope {
            written_at: Utc::now() - Duration::minutes(11),
            value: serde_json::json!({"channel": "7.0"}),
        };
        fs::write(
            cache.cache_dir().join("ReleaseIndex7.0.json"),
            serde_json::to_string(&envelope).unwrap(),
        )
        .unwrap();

        assert!(cache.load("ReleaseIndex7.0").unwrap().is_none());
    }

    #[test]
    fn test_corrupt_entry_is_a_miss() {
        let dir = TempDir::new().unwrap();
        let cache = cache(&dir);
        fs::create_dir_all(cache.cache_dir()).unwrap();
        fs::write(cache.cache_dir().join("ReleaseIndexes.json"), "garbage").unwrap();

        assert!(cache.load("ReleaseIndexes").unwrap().is_none());
    }

    #[test]
    fn test_clear_removes_entries() {
        let dir = TempDir::new().unwrap();
        let cache = cache(&dir);
        cache.store("ReleaseIndexes", "[]").unwrap();
        cache.store("ReleaseIndex6.0", "{}").unwrap();

        cache.clear().unwrap();

        assert!(cache.load("ReleaseIndexes").unwrap().is_none());
        assert!(cache.load("ReleaseIndex6.0").unwrap().is_none());
    }

    #[test]
    fn test_clear_without_cache_dir() {
        let dir = TempDir::new().unwrap();
        assert!(cache(&dir).clear().is_ok());
    }

    #[test]
    fn test_key_with_path_separator_is_rejected() {
        let dir = TempDir::new().unwrap();
        let cache = cache(&dir);
        assert!(cache.store("../escape", "1").is_err());
        assert!(cache.load("a/b").is_err());
    }

    #[test]
    fn test_zero_expiry_never_hits() {
        let dir = TempDir::new().unwrap();
        let cache = FileSystemCache::new(dir.path().to_path_buf(), Duration::zero());
        cache.store("ReleaseIndexes", "[]").unwrap();
        assert!(cache.load("ReleaseIndexes").unwrap().is_none());
    }
}
