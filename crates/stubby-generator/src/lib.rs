//! Token generators.
//!
//! Generators know nothing about storage: they only propose candidates.
//! Uniqueness is settled by the mapping store's insert-if-absent.

pub mod random;
pub mod scripted;

pub use random::RandomGenerator;
pub use scripted::ScriptedGenerator;

use stubby_core::token::MAX_TOKEN_LENGTH;
use stubby_core::Token;

/// Trait for generating candidate tokens.
///
/// Implementations are pure generators that don't interact with storage.
pub trait Generator: Send + Sync + 'static {
    type Output: Into<Token>;

    /// Proposes a candidate token of `length` characters.
    ///
    /// Lengths outside `1..=MAX_TOKEN_LENGTH` are clamped.
    fn generate(&self, length: usize) -> Self::Output;
}

impl<G: Generator> Generator for std::sync::Arc<G> {
    type Output = G::Output;

    fn generate(&self, length: usize) -> Self::Output {
        (**self).generate(length)
    }
}

pub(crate) fn clamp_length(length: usize) -> usize {
    length.clamp(1, MAX_TOKEN_LENGTH)
}
