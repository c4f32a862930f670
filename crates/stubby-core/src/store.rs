use crate::error::StorageResult;
use crate::token::Token;
use async_trait::async_trait;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A stored mapping from a token to the URL it stands for.
///
/// Mappings are created once and never change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlMapping {
    pub token: Token,
    /// The original URL that was shortened.
    pub original_url: String,
    /// When the mapping was committed by the store.
    pub created_at: Timestamp,
}

/// Result of an insert-if-absent attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The mapping was persisted.
    Created,
    /// Another mapping already owns the token; nothing was written.
    AlreadyExists,
}

/// A read-only view of a mapping store.
#[async_trait]
pub trait ReadStore: Send + Sync + 'static {
    /// Retrieves the mapping for a given token.
    /// Returns `None` if the token does not exist.
    ///
    /// Every mapping committed by a prior successful
    /// [`MappingStore::try_insert`] is visible here.
    async fn lookup(&self, token: &Token) -> StorageResult<Option<UrlMapping>>;
}

#[async_trait]
pub trait MappingStore: ReadStore {
    /// Atomically inserts a mapping if `token` is free.
    ///
    /// Under concurrent calls with the same token exactly one caller observes
    /// [`InsertOutcome::Created`]. An existing mapping is never overwritten.
    async fn try_insert(&self, token: &Token, original_url: &str) -> StorageResult<InsertOutcome>;
}
