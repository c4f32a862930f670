use crate::{clamp_length, Generator};
use rand::distr::Alphanumeric;
use rand::Rng;
use stubby_core::Token;

/// Draws every symbol uniformly from the 62 ASCII letters and digits.
///
/// Backed by `rand::rng()`, a thread-local CSPRNG seeded from the operating
/// system, so tokens cannot be predicted from earlier ones.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomGenerator;

impl RandomGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl Generator for RandomGenerator {
    type Output = Token;

    fn generate(&self, length: usize) -> Self::Output {
        let token: String = rand::rng()
            .sample_iter(&Alphanumeric)
            .take(clamp_length(length))
            .map(char::from)
            .collect();

        Token::new_unchecked(token)
    }
}
