//! Mapping store backends.
//!
//! Every backend implements [`MappingStore`] with a single atomic
//! insert-if-absent primitive; none of them checks for existence first.

pub mod cached;
pub mod memory;
pub mod mysql;

pub use cached::CachedStore;
pub use memory::InMemoryStore;
pub use mysql::MySqlStore;
pub use stubby_core::error::{StorageError, StorageResult};
pub use stubby_core::{InsertOutcome, MappingStore, ReadStore};
