//! URL shortener service implementation.
//!
//! This crate ties a [`Generator`][stubby_generator::Generator] to a
//! [`MappingStore`][stubby_core::MappingStore] through a bounded collision
//! retry loop. Core types are re-exported from `stubby_core`.

pub mod policy;
pub mod service;
pub mod validate;

pub use policy::RetryPolicy;
pub use service::ShortenerService;
pub use stubby_core::{Shortener, ShortenerError, Token, UrlMapping};
pub use validate::validate_url;
