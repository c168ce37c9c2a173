//! Frontend module - tokens, rules, state tables, scanner and the XBSL grammar

pub mod token;
pub mod rule;
pub mod state;
pub mod lexer;
pub mod grammar;
