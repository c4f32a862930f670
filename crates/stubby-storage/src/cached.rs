use async_trait::async_trait;
use moka::future::Cache;
use std::sync::atomic::{AtomicBool, Ordering};
use stubby_core::error::{StorageError, StorageResult};
use stubby_core::{InsertOutcome, MappingStore, ReadStore, Token, UrlMapping};
use tracing::{debug, trace};

/// Default number of mappings kept in memory.
pub const DEFAULT_CACHE_CAPACITY: u64 = 10_000;

/// Why the single-flight fetch produced no cacheable value.
#[derive(Debug)]
enum Miss {
    NotFound,
    Storage(StorageError),
}

/// A read-through store decorator backed by a Moka cache.
///
/// Mappings never change once created, so a cached hit is always current and
/// entries only leave the cache through capacity eviction. Misses are not
/// cached: a token looked up before its insertion becomes visible as soon as
/// the insert commits. Concurrent lookups of the same token coalesce into a
/// single fetch from the inner store, but only a hit is shared. A caller that
/// joined someone else's fetch and got a miss reads the inner store itself.
#[derive(Debug, Clone)]
pub struct CachedStore<S> {
    inner: S,
    cache: Cache<Token, UrlMapping>,
}

impl<S: ReadStore> CachedStore<S> {
    /// Wraps `inner` with a cache of [`DEFAULT_CACHE_CAPACITY`] entries.
    pub fn new(inner: S) -> Self {
        Self::with_capacity(inner, DEFAULT_CACHE_CAPACITY)
    }

    /// Wraps `inner` with a cache holding at most `max_capacity` entries.
    pub fn with_capacity(inner: S, max_capacity: u64) -> Self {
        let cache = Cache::builder().max_capacity(max_capacity).build();
        Self { inner, cache }
    }

    /// Returns a reference to the inner store.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Returns the cached mapping without touching the inner store.
    pub async fn cached(&self, token: &Token) -> Option<UrlMapping> {
        self.cache.get(token).await
    }
}

#[async_trait]
impl<S: ReadStore> ReadStore for CachedStore<S> {
    async fn lookup(&self, token: &Token) -> StorageResult<Option<UrlMapping>> {
        trace!(token = %token, "looking up mapping with cache");

        let fetched = AtomicBool::new(false);
        let result = self
            .cache
            .try_get_with(token.clone(), async {
                fetched.store(true, Ordering::Relaxed);
                trace!(token = %token, "cache miss, fetching from inner store");
                match self.inner.lookup(token).await {
                    Ok(Some(mapping)) => Ok(mapping),
                    Ok(None) => Err(Miss::NotFound),
                    Err(e) => Err(Miss::Storage(e)),
                }
            })
            .await;

        match result {
            Ok(mapping) => Ok(Some(mapping)),
            Err(miss) => match miss.as_ref() {
                Miss::NotFound if fetched.load(Ordering::Relaxed) => Ok(None),
                // the shared fetch may have started before an insert this caller can already see
                Miss::NotFound => {
                    trace!(token = %token, "joined a miss, re-reading inner store");
                    let mapping = self.inner.lookup(token).await?;
                    if let Some(mapping) = &mapping {
                        self.cache.insert(token.clone(), mapping.clone()).await;
                    }
                    Ok(mapping)
                }
                Miss::Storage(e) => {
                    debug!(token = %token, error = %e, "inner store lookup failed");
                    Err(e.clone())
                }
            },
        }
    }
}

#[async_trait]
impl<S: MappingStore> MappingStore for CachedStore<S> {
    async fn try_insert(&self, token: &Token, original_url: &str) -> StorageResult<InsertOutcome> {
        self.inner.try_insert(token, original_url).await
    }
}
