use crate::random::RandomGenerator;
use crate::Generator;
use parking_lot::Mutex;
use std::collections::VecDeque;
use stubby_core::{Token, TokenError};

/// A generator that replays a fixed sequence of tokens before handing over
/// to an inner generator.
///
/// Each scripted token is handed out exactly once, in order, regardless of
/// which thread asks. Scripted tokens ignore the requested length. This is
/// how collisions are forced in tests: script the same token several times
/// and every caller after the first has to retry.
#[derive(Debug)]
pub struct ScriptedGenerator<G = RandomGenerator> {
    script: Mutex<VecDeque<Token>>,
    fallback: G,
}

impl ScriptedGenerator<RandomGenerator> {
    /// Replays `tokens`, then falls back to [`RandomGenerator`].
    pub fn new<I, S>(tokens: I) -> Result<Self, TokenError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_fallback(tokens, RandomGenerator::new())
    }
}

impl<G: Generator> ScriptedGenerator<G> {
    /// Replays `tokens`, then delegates to `fallback`.
    pub fn with_fallback<I, S>(tokens: I, fallback: G) -> Result<Self, TokenError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let script = tokens
            .into_iter()
            .map(Token::new)
            .collect::<Result<VecDeque<_>, _>>()?;

        Ok(Self {
            script: Mutex::new(script),
            fallback,
        })
    }

    /// Number of scripted tokens not yet handed out.
    pub fn remaining(&self) -> usize {
        self.script.lock().len()
    }
}

impl<G: Generator> Generator for ScriptedGenerator<G> {
    type Output = Token;

    fn generate(&self, length: usize) -> Self::Output {
        if let Some(token) = self.script.lock().pop_front() {
            return token;
        }
        self.fallback.generate(length).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    /// Always proposes the same token.
    struct Constant(&'static str);

    impl Generator for Constant {
        type Output = Token;

        fn generate(&self, _length: usize) -> Token {
            Token::new_unchecked(self.0)
        }
    }

    #[test]
    fn replays_script_in_order() {
        let generator = ScriptedGenerator::new(["AAAAAAAA", "BBBBBBBB", "AAAAAAAA"]).unwrap();

        assert_eq!(generator.generate(8).as_str(), "AAAAAAAA");
        assert_eq!(generator.generate(8).as_str(), "BBBBBBBB");
        assert_eq!(generator.generate(8).as_str(), "AAAAAAAA");
        assert_eq!(generator.remaining(), 0);
    }

    #[test]
    fn falls_back_after_script() {
        let generator = ScriptedGenerator::with_fallback(["first"], Constant("fallback")).unwrap();

        assert_eq!(generator.generate(8).as_str(), "first");
        assert_eq!(generator.generate(8).as_str(), "fallback");
        assert_eq!(generator.generate(8).as_str(), "fallback");
    }

    #[test]
    fn random_fallback_honours_length() {
        let generator = ScriptedGenerator::new(Vec::<String>::new()).unwrap();

        assert_eq!(generator.generate(11).len(), 11);
    }

    #[test]
    fn rejects_invalid_script() {
        assert!(ScriptedGenerator::new(["ok", "not ok"]).is_err());
        assert!(ScriptedGenerator::new([""]).is_err());
    }

    #[test]
    fn each_scripted_token_is_handed_out_once_across_threads() {
        let generator = Arc::new(
            ScriptedGenerator::with_fallback((0..64).map(|i| format!("t{i}")), Constant("done"))
                .unwrap(),
        );

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let generator = Arc::clone(&generator);
                std::thread::spawn(move || {
                    (0..8).map(|_| generator.generate(8)).collect::<Vec<_>>()
                })
            })
            .collect();

        let mut tokens: Vec<Token> = handles
            .into_iter()
            .flat_map(|handle| handle.join().unwrap())
            .collect();
        tokens.sort();
        tokens.dedup();

        assert_eq!(tokens.len(), 64);
        assert_eq!(generator.generate(8).as_str(), "done");
    }
}
