//! XBSL Lexer
//!
//! Tokenizes source code of the 1C:Enterprise Element language (XBSL) for
//! syntax highlighting. The scanner is a generic, table-driven regex engine
//! with a state stack; the XBSL grammar is one such table.
//!
//! ```
//! for token in xbsl_lexer::lex("если x > 0 { возврат \"да\" }") {
//!     println!("{:<24} {:?}", token.kind, token.text);
//! }
//! ```
//!
//! Every byte of the input ends up in exactly one token, in order, so the
//! token texts concatenate back to the source. Tokenization never fails:
//! characters no rule understands come out as single-character fallback
//! tokens.

pub mod config;
pub mod frontend;
pub mod utils;

pub use config::LexerConfig;
pub use frontend::grammar::{lex, states as xbsl_states, LexerInfo, INFO, KEYWORDS, XBSL};
pub use frontend::lexer::{Lexer, ScanContext, Tokens};
pub use frontend::rule::{Anchor, Emission, RuleDef, Transition};
pub use frontend::state::{StateDef, StateTable, ROOT};
pub use frontend::token::{Token, TokenKind};
pub use utils::{Error, Result, Span};
