use crate::policy::RetryPolicy;
use crate::validate::validate_url;
use async_trait::async_trait;
use std::sync::Arc;
use stubby_core::{InsertOutcome, MappingStore, Shortener, ShortenerError, Token, UrlMapping};
use stubby_generator::Generator;
use tracing::{debug, trace, warn};

/// A concrete implementation of the `Shortener` trait.
///
/// This service wraps a `MappingStore` and a `Generator` to handle:
/// - URL validation, before any token is generated
/// - the collision retry loop, bounded by a [`RetryPolicy`]
///
/// Uniqueness is decided by the store's atomic insert, never by a prior
/// existence check, so any number of services may share one store.
#[derive(Debug)]
pub struct ShortenerService<S, G> {
    store: Arc<S>,
    generator: Arc<G>,
    policy: RetryPolicy,
}

impl<S, G> Clone for ShortenerService<S, G> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            generator: Arc::clone(&self.generator),
            policy: self.policy,
        }
    }
}

impl<S: MappingStore, G: Generator> ShortenerService<S, G> {
    /// Creates a new `ShortenerService` with the default retry policy.
    pub fn new(store: S, generator: G) -> Self {
        Self::assemble(Arc::new(store), Arc::new(generator), RetryPolicy::default())
    }

    /// Creates a new `ShortenerService` with a custom retry policy.
    pub fn with_policy(store: S, generator: G, policy: RetryPolicy) -> Result<Self, ShortenerError> {
        policy.validate()?;
        Ok(Self::assemble(Arc::new(store), Arc::new(generator), policy))
    }

    /// Creates a service over a store handle shared with other components.
    pub fn from_shared(
        store: Arc<S>,
        generator: Arc<G>,
        policy: RetryPolicy,
    ) -> Result<Self, ShortenerError> {
        policy.validate()?;
        Ok(Self::assemble(store, generator, policy))
    }

    fn assemble(store: Arc<S>, generator: Arc<G>, policy: RetryPolicy) -> Self {
        Self {
            store,
            generator,
            policy,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Tries candidates until the store accepts one or the policy runs out.
    async fn allocate(&self, original_url: &str) -> Result<Token, ShortenerError> {
        let mut attempts = 0u32;

        for length in self.policy.lengths() {
            for _ in 0..self.policy.attempts_per_length {
                attempts += 1;
                let token: Token = self.generator.generate(length).into();

                match self.store.try_insert(&token, original_url).await? {
                    InsertOutcome::Created => {
                        debug!(token = %token, attempts, "stored new mapping");
                        return Ok(token);
                    }
                    InsertOutcome::AlreadyExists => {
                        debug!(token = %token, attempt = attempts, "token collision, retrying");
                    }
                }
            }

            if length < self.policy.max_token_length {
                warn!(
                    length,
                    attempts = self.policy.attempts_per_length,
                    "every candidate of this length collided, escalating token length"
                );
            }
        }

        warn!(attempts, "token space exhausted");
        Err(ShortenerError::RetryExhausted { attempts })
    }
}

#[async_trait]
impl<S: MappingStore, G: Generator> Shortener for ShortenerService<S, G> {
    async fn shorten(&self, original_url: &str) -> Result<Token, ShortenerError> {
        let original_url = validate_url(original_url)?;
        self.allocate(original_url).await
    }

    async fn resolve(&self, token: &Token) -> Result<Option<UrlMapping>, ShortenerError> {
        trace!(token = %token, "resolving token");

        let mapping = self.store.lookup(token).await?;
        match &mapping {
            Some(mapping) => {
                debug!(token = %token, url = %mapping.original_url, "resolved token")
            }
            None => trace!(token = %token, "token not found"),
        }

        Ok(mapping)
    }
}
