use std::ops::RangeInclusive;
use stubby_core::token::{DEFAULT_TOKEN_LENGTH, MAX_TOKEN_LENGTH};
use stubby_core::ShortenerError;
use typed_builder::TypedBuilder;

/// Bounds the collision retry loop of [`ShortenerService`][crate::ShortenerService].
///
/// Candidates start at `token_length` characters. After
/// `attempts_per_length` collisions at one length the loop moves on to the
/// next longer length, and gives up once `max_token_length` is exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, TypedBuilder)]
pub struct RetryPolicy {
    #[builder(default = DEFAULT_TOKEN_LENGTH)]
    pub token_length: usize,
    #[builder(default = 5)]
    pub attempts_per_length: u32,
    #[builder(default = DEFAULT_TOKEN_LENGTH + 2)]
    pub max_token_length: usize,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl RetryPolicy {
    pub fn validate(&self) -> Result<(), ShortenerError> {
        if self.token_length == 0 {
            return Err(ShortenerError::InvalidPolicy(
                "token length must be at least 1".to_string(),
            ));
        }

        if self.attempts_per_length == 0 {
            return Err(ShortenerError::InvalidPolicy(
                "attempts per length must be at least 1".to_string(),
            ));
        }

        if self.max_token_length < self.token_length {
            return Err(ShortenerError::InvalidPolicy(format!(
                "max token length {} is shorter than token length {}",
                self.max_token_length, self.token_length
            )));
        }

        if self.max_token_length > MAX_TOKEN_LENGTH {
            return Err(ShortenerError::InvalidPolicy(format!(
                "max token length must be at most {}, got {}",
                MAX_TOKEN_LENGTH, self.max_token_length
            )));
        }

        Ok(())
    }

    /// Token lengths tried, in order.
    pub fn lengths(&self) -> RangeInclusive<usize> {
        self.token_length..=self.max_token_length
    }

    /// Upper bound on insert attempts for a single shorten call.
    pub fn max_attempts(&self) -> u32 {
        let lengths = self.lengths().count() as u32;
        lengths.saturating_mul(self.attempts_per_length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let policy = RetryPolicy::default();

        assert_eq!(policy.token_length, 8);
        assert_eq!(policy.attempts_per_length, 5);
        assert_eq!(policy.max_token_length, 10);
        assert!(policy.validate().is_ok());
        assert_eq!(policy.max_attempts(), 15);
    }

    #[test]
    fn lengths_escalate_by_one() {
        let policy = RetryPolicy::builder()
            .token_length(6)
            .max_token_length(9)
            .build();

        assert_eq!(policy.lengths().collect::<Vec<_>>(), vec![6, 7, 8, 9]);
    }

    #[test]
    fn fixed_length_policy() {
        let policy = RetryPolicy::builder()
            .token_length(8)
            .max_token_length(8)
            .attempts_per_length(3)
            .build();

        assert!(policy.validate().is_ok());
        assert_eq!(policy.max_attempts(), 3);
    }

    #[test]
    fn rejects_zero_length() {
        let policy = RetryPolicy::builder()
            .token_length(0)
            .max_token_length(4)
            .build();
        assert!(matches!(
            policy.validate(),
            Err(ShortenerError::InvalidPolicy(_))
        ));
    }

    #[test]
    fn rejects_zero_attempts() {
        let policy = RetryPolicy::builder().attempts_per_length(0).build();
        assert!(policy.validate().is_err());
    }

    #[test]
    fn rejects_inverted_lengths() {
        let policy = RetryPolicy::builder()
            .token_length(10)
            .max_token_length(8)
            .build();
        assert!(policy.validate().is_err());
    }

    #[test]
    fn rejects_lengths_beyond_token_limit() {
        let policy = RetryPolicy::builder()
            .max_token_length(MAX_TOKEN_LENGTH + 1)
            .build();
        assert!(policy.validate().is_err());
    }
}
