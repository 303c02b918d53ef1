use crate::shared::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use tracing::{debug, warn};

/// ResultCache port for a keyed store of serialized results with a staleness window
///
/// Payloads are opaque JSON strings; [`get_or_create`] layers typed access on top.
pub trait ResultCache: Send + Sync {
    /// Returns the payload stored under `key` if it is younger than the expiry window
    fn load(&self, key: &str) -> Result<Option<String>>;

    /// Stores `payload` under `key`, stamped with the current time
    fn store(&self, key: &str, payload: &str) -> Result<()>;

    /// Deletes every cached entry
    fn clear(&self) -> Result<()>;
}

/// Returns the cached value for `key`, or runs `producer`, caches its result and returns it.
///
/// The cache never turns a successful fetch into a failure: unreadable or
/// unwritable entries are logged and treated as misses.
///
/// # Errors
/// Returns the producer's error on a miss; nothing is cached in that case
pub async fn get_or_create<C, T, F, Fut>(cache: &C, key: &str, producer: F) -> Result<T>
where
    C: ResultCache + ?Sized,
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    match cache.load(key) {
        Ok(Some(payload)) => match serde_json::from_str::<T>(&payload) {
            Ok(value) => {
                debug!(key, "cache hit");
                return Ok(value);
            }
            Err(e) => warn!(key, error = %e, "discarding undecodable cache entry"),
        },
        Ok(None) => debug!(key, "cache miss"),
        Err(e) => warn!(key, error = %e, "cache read failed"),
    }

    let value = producer().await?;

    match serde_json::to_string(&value) {
        Ok(payload) => {
            if let Err(e) = cache.store(key, &payload) {
                warn!(key, error = %e, "cache write failed");
            }
        }
        Err(e) => warn!(key, error = %e, "value not cacheable"),
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryCache {
        entries: Mutex<HashMap<String, String>>,
        fail_writes: bool,
    }

    impl ResultCache for MemoryCache {
        fn load(&self, key: &str) -> Result<Option<String>> {
            Ok(self.entries.lock().unwrap().get(key).cloned())
        }

        fn store(&self, key: &str, payload: &str) -> Result<()> {
            if self.fail_writes {
                anyhow::bail!("disk full");
            }
            self.entries
                .lock()
                .unwrap()
                .insert(key.to_string(), payload.to_string());
            Ok(())
        }

        fn clear(&self) -> Result<()> {
            self.entries.lock().unwrap().clear();
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_get_or_create_invokes_producer_once() {
        let cache = MemoryCache::default();
        let calls = AtomicUsize::new(0);
        let counter = &calls;

        for _ in 0..3 {
            let value: Vec<String> = get_or_create(&cache, "ReleaseIndexes", || async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(vec!["7.0".to_string()])
            })
            .await
            .unwrap();
            assert_eq!(value, vec!["7.0".to_string()]);
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_get_or_create_keys_are_independent() {
        let cache = MemoryCache::default();

        let a: u32 = get_or_create(&cache, "ReleaseIndex7.0", || async { Ok(7) })
            .await
            .unwrap();
        let b: u32 = get_or_create(&cache, "ReleaseIndex6.0", || async { Ok(6) })
            .await
            .unwrap();

        assert_eq!((a, b), (7, 6));
    }

    #[tokio::test]
    async fn test_get_or_create_producer_error_is_not_cached() {
        let cache = MemoryCache::default();

        let result: Result<u32> =
            get_or_create(&cache, "key", || async { Err(anyhow::anyhow!("offline")) }).await;
        assert!(result.is_err());
        assert!(cache.load("key").unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_or_create_refetches_after_clear() {
        let cache = MemoryCache::default();
        let calls = AtomicUsize::new(0);
        let counter = &calls;
        let produce = || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(1u32)
        };

        get_or_create(&cache, "key", produce).await.unwrap();
        cache.clear().unwrap();
        get_or_create(&cache, "key", produce).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_get_or_create_undecodable_entry_is_a_miss() {
        let cache = MemoryCache::default();
        cache.store("key", "{not json").unwrap();

        let value: u32 = get_or_create(&cache, "key", || async { Ok(42) })
            .await
            .unwrap();
        assert_eq!(value, 42);
        assert_eq!(cache.load("key").unwrap().as_deref(), Some("42"));
    }

    #[tokio::test]
    async fn test_get_or_create_write_failure_still_returns_value() {
        let cache = MemoryCache {
            fail_writes: true,
            ..MemoryCache::default()
        };

        let value: u32 = get_or_create(&cache, "key", || async { Ok(5) })
            .await
            .unwrap();
        assert_eq!(value, 5);
    }
}
