use crate::error::Result;
use crate::store::UrlMapping;
use crate::token::Token;
use async_trait::async_trait;

#[async_trait]
pub trait Shortener: Send + Sync + 'static {
    /// Validates `original_url`, stores it under a fresh token and returns
    /// that token.
    async fn shorten(&self, original_url: &str) -> Result<Token>;

    /// Resolves a token to its stored mapping.
    /// Returns `None` if the token does not exist.
    async fn resolve(&self, token: &Token) -> Result<Option<UrlMapping>>;
}
