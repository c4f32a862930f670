//! Core types and traits for the stubby URL shortener.
//!
//! This crate provides the token type, the mapping store contract and the
//! shortener trait shared by the storage backends, the shortener service
//! and the HTTP gateway.

pub mod error;
pub mod shortener;
pub mod store;
pub mod token;

pub use error::{ShortenerError, StorageError, TokenError};
pub use shortener::Shortener;
pub use store::{InsertOutcome, MappingStore, ReadStore, UrlMapping};
pub use token::Token;
