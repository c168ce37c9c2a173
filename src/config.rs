//! Lexer configuration
//!
//! Hosts embedding the lexer can keep these settings next to their own
//! highlighter configuration and load them from JSON.

use serde::{Deserialize, Serialize};

use crate::frontend::token::TokenKind;
use crate::utils::Result;

/// Runtime options for a [`Lexer`](crate::Lexer)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LexerConfig {
    /// Kind of the one-character token emitted when no rule matches
    pub fallback: TokenKind,
}

impl Default for LexerConfig {
    fn default() -> Self {
        Self {
            fallback: TokenKind::Error,
        }
    }
}

impl LexerConfig {
    /// Parse a configuration from JSON; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn with_fallback(mut self, kind: TokenKind) -> Self {
        self.fallback = kind;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::Error;

    #[test]
    fn test_defaults() {
        assert_eq!(LexerConfig::from_json("{}").unwrap(), LexerConfig::default());
        assert_eq!(LexerConfig::default().fallback, TokenKind::Error);
    }

    #[test]
    fn test_fallback_by_qualified_name() {
        let config = LexerConfig::from_json(r#"{ "fallback": "Text" }"#).unwrap();
        assert_eq!(config.fallback, TokenKind::Text);
    }

    #[test]
    fn test_rejects_unknown_fields() {
        let err = LexerConfig::from_json(r#"{ "colour": "red" }"#).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert_eq!(err.state(), None);
    }
}
