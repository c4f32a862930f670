use std::sync::Arc;

use stubby_core::{Shortener, Token};

#[derive(Clone)]
pub struct AppState {
    shortener: Arc<dyn Shortener>,
    base_url: String,
}

impl AppState {
    pub fn new(shortener: Arc<dyn Shortener>, public_base_url: impl Into<String>) -> Self {
        Self {
            shortener,
            base_url: public_base_url.into(),
        }
    }

    pub fn shortener(&self) -> &dyn Shortener {
        self.shortener.as_ref()
    }

    /// Renders `token` as a full shortened URL under the public base URL.
    pub fn short_url(&self, token: &Token) -> String {
        token.to_url(&self.base_url)
    }
}
