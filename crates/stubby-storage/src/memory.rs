use async_trait::async_trait;
use dashmap::mapref::entry::Entry as MapEntry;
use dashmap::DashMap;
use jiff::Timestamp;
use stubby_core::error::StorageResult;
use stubby_core::{InsertOutcome, MappingStore, ReadStore, Token, UrlMapping};
use tracing::trace;

/// In-memory storage entry for a URL mapping.
#[derive(Debug, Clone)]
struct Entry {
    original_url: String,
    created_at: Timestamp,
}

impl Entry {
    fn to_mapping(&self, token: &Token) -> UrlMapping {
        UrlMapping {
            token: token.clone(),
            original_url: self.original_url.clone(),
            created_at: self.created_at,
        }
    }
}

/// In-memory implementation of the mapping store using DashMap.
///
/// DashMap shards its locks, so inserts and lookups on different tokens
/// rarely contend. `try_insert` goes through the entry API: the existence
/// check and the write happen under the same shard lock.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    storage: DashMap<Token, Entry>,
}

impl InMemoryStore {
    /// Creates a new in-memory store.
    pub fn new() -> Self {
        Self {
            storage: DashMap::new(),
        }
    }

    /// Creates a new in-memory store with the specified capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: DashMap::with_capacity(capacity),
        }
    }

    /// Number of stored mappings.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }
}

#[async_trait]
impl ReadStore for InMemoryStore {
    async fn lookup(&self, token: &Token) -> StorageResult<Option<UrlMapping>> {
        Ok(self.storage.get(token).map(|entry| entry.to_mapping(token)))
    }
}

#[async_trait]
impl MappingStore for InMemoryStore {
    async fn try_insert(&self, token: &Token, original_url: &str) -> StorageResult<InsertOutcome> {
        match self.storage.entry(token.clone()) {
            MapEntry::Occupied(_) => {
                trace!(token = %token, "token already taken");
                Ok(InsertOutcome::AlreadyExists)
            }
            MapEntry::Vacant(slot) => {
                slot.insert(Entry {
                    original_url: original_url.to_owned(),
                    created_at: Timestamp::now(),
                });
                Ok(InsertOutcome::Created)
            }
        }
    }
}
