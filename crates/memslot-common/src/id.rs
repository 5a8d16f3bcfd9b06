use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tokens are drawn from the 53-bit integer range.
const TOKEN_SPACE: u64 = 1 << 53;

/// Generate a fresh call token of the form `_<decimal>`.
pub fn new_call_token() -> CallToken {
    let n = rand::thread_rng().gen_range(0..TOKEN_SPACE);
    CallToken(format!("_{n}"))
}

/// Opaque identifier correlating one outbound call with its single reply.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CallToken(String);

impl CallToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for CallToken {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for CallToken {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for CallToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn token_has_underscore_prefix() {
        let token = new_call_token();
        let digits = token.as_str().strip_prefix('_').unwrap();
        assert!(!digits.is_empty());
        assert!(digits.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn token_stays_in_53_bit_space() {
        for _ in 0..1_000 {
            let token = new_call_token();
            let n: u64 = token.as_str()[1..].parse().unwrap();
            assert!(n < TOKEN_SPACE);
        }
    }

    #[test]
    fn tokens_do_not_collide() {
        let mut seen = HashSet::new();
        for _ in 0..100_000 {
            assert!(seen.insert(new_call_token()));
        }
    }

    #[test]
    fn token_serializes_as_plain_string() {
        let token = CallToken::from("_42");
        assert_eq!(serde_json::to_string(&token).unwrap(), "\"_42\"");
        let parsed: CallToken = serde_json::from_str("\"_42\"").unwrap();
        assert_eq!(parsed, token);
    }

    #[test]
    fn token_display() {
        let token = CallToken::from("_7");
        assert_eq!(token.to_string(), "_7");
    }
}
