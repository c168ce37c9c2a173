//! Error handling for the XBSL lexer
//!
//! Tokenization itself never fails. These errors come from building a
//! state table or loading a lexer configuration.

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Grammar and configuration error
#[derive(Error, Debug)]
pub enum Error {
    // ==================== Grammar Errors ====================

    #[error("Invalid pattern in state `{state}`: {source}")]
    InvalidPattern {
        state: &'static str,
        #[source]
        source: regex::Error,
    },

    #[error("Rule in state `{state}` pushes unknown state `{target}`")]
    UnknownState {
        state: &'static str,
        target: &'static str,
    },

    #[error("State table has no `{0}` state")]
    MissingRoot(&'static str),

    #[error("Rule in state `{state}` emits group {group}, but its pattern has {available} groups")]
    GroupOutOfRange {
        state: &'static str,
        group: usize,
        available: usize,
    },

    #[error("State `{0}` is defined twice")]
    DuplicateState(&'static str),

    // ==================== Configuration Errors ====================

    #[error("Invalid lexer configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl Error {
    /// Get the state whose rules caused this error
    pub fn state(&self) -> Option<&'static str> {
        match *self {
            Self::InvalidPattern { state, .. } => Some(state),
            Self::UnknownState { state, .. } => Some(state),
            Self::MissingRoot(state) => Some(state),
            Self::GroupOutOfRange { state, .. } => Some(state),
            Self::DuplicateState(state) => Some(state),
            Self::Config(_) => None,
        }
    }
}
