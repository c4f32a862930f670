use crate::error::TokenError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Symbols a token may contain: unreserved in every URL component, so a
/// token can sit in a path segment without escaping.
pub const ALPHABET: &[u8; 62] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Length of a freshly generated token.
pub const DEFAULT_TOKEN_LENGTH: usize = 8;

/// Upper bound on token length, including escalated lengths.
pub const MAX_TOKEN_LENGTH: usize = 32;

/// A validated short identifier for a shortened URL.
///
/// Tokens are non-empty, at most [`MAX_TOKEN_LENGTH`] characters long and
/// drawn from [`ALPHABET`]. Comparison is case-sensitive.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Token(String);

impl Token {
    /// Creates a new `Token` after validating the input.
    pub fn new(token: impl Into<String>) -> Result<Self, TokenError> {
        let token = token.into();
        Self::validate(&token)?;
        Ok(Self(token))
    }

    /// Creates a `Token` without validation.
    ///
    /// Use this only for tokens produced by trusted internal sources
    /// (e.g. generators that only ever emit [`ALPHABET`] symbols).
    pub fn new_unchecked(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Generates the full shortened URL based on the provided base URL.
    pub fn to_url(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self.0)
    }

    /// Returns the token as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the number of characters in the token.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false` for a validated token.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    fn validate(token: &str) -> Result<(), TokenError> {
        if token.is_empty() {
            return Err(TokenError::Empty);
        }

        if token.len() > MAX_TOKEN_LENGTH {
            return Err(TokenError::TooLong {
                len: token.len(),
                max: MAX_TOKEN_LENGTH,
            });
        }

        if !token.bytes().all(|b| ALPHABET.contains(&b)) {
            return Err(TokenError::InvalidCharacter(token.to_string()));
        }

        Ok(())
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Token {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for Token {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Token {
    type Error = TokenError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl<'de> Deserialize<'de> for Token {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Token::new(s).map_err(serde::de::Error::custom)
    }
}
