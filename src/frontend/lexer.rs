//! Lexer for XBSL
//!
//! A generic, table-driven scanner. At every step it takes the state on
//! top of the stack, tries that state's rules at the cursor in declared
//! order and applies the first match: emit its tokens, apply its stack
//! transition, move the cursor past the match. When nothing matches it
//! emits one fallback character and moves on, so scanning is total over
//! any input and never revisits a byte.

use std::collections::VecDeque;
use std::iter::FusedIterator;

use crate::config::LexerConfig;
use crate::frontend::rule::{StateId, Transition};
use crate::frontend::state::{StateDef, StateTable};
use crate::frontend::token::{Token, TokenKind};
use crate::utils::{Result, Span};

/// A compiled grammar together with its runtime options.
///
/// Immutable after construction; one lexer can serve any number of
/// concurrent tokenization runs.
#[derive(Debug)]
pub struct Lexer {
    table: StateTable,
    config: LexerConfig,
}

impl Lexer {
    /// Compile a grammar from its state declarations
    pub fn new(states: Vec<StateDef>) -> Result<Self> {
        Ok(Self {
            table: StateTable::build(states)?,
            config: LexerConfig::default(),
        })
    }

    pub fn with_config(mut self, config: LexerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &LexerConfig {
        &self.config
    }

    pub fn table(&self) -> &StateTable {
        &self.table
    }

    /// Lazily tokenize `source`
    pub fn tokenize<'l, 's>(&'l self, source: &'s str) -> Tokens<'l, 's> {
        Tokens {
            lexer: self,
            context: ScanContext::new(source, self.table.root()),
        }
    }

    /// Tokenize the entire source and return all tokens
    pub fn tokenize_all<'s>(&self, source: &'s str) -> Vec<Token<'s>> {
        self.tokenize(source).collect()
    }
}

// ==================== Scan Context ====================

/// Per-run scanner state: the buffer, cursor, state stack and tokens
/// produced by the last step but not yet handed out.
#[derive(Debug, Clone)]
pub struct ScanContext<'s> {
    source: &'s str,
    cursor: usize,
    stack: Vec<StateId>,
    pending: VecDeque<Token<'s>>,
}

impl<'s> ScanContext<'s> {
    fn new(source: &'s str, root: StateId) -> Self {
        Self {
            source,
            cursor: 0,
            stack: vec![root],
            pending: VecDeque::new(),
        }
    }

    /// Byte offset of the next unscanned character
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of states on the stack, root included
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// The active state
    pub fn top(&self) -> StateId {
        // The root is never popped
        self.stack[self.stack.len() - 1]
    }

    /// Unscanned remainder of the source
    pub fn remaining(&self) -> &'s str {
        &self.source[self.cursor..]
    }

    fn is_at_end(&self) -> bool {
        self.cursor >= self.source.len()
    }

    /// Run one rule application (or one fallback character)
    fn step(&mut self, lexer: &Lexer) {
        let table = &lexer.table;

        for rule in table.rules(self.top()) {
            let Some(found) = rule.apply(self.source, self.cursor) else {
                continue;
            };
            let transition = rule.transition();

            // An empty match only counts when it unwinds the stack;
            // anything else would stall the cursor.
            if found.end == self.cursor && !(transition == Transition::Pop && self.depth() > 1) {
                continue;
            }

            for (span, kind) in found.pieces {
                self.pending.push_back(Token::new(kind, span.slice(self.source), span));
            }
            self.apply(transition, table);
            self.cursor = found.end;
            return;
        }

        self.fallback(lexer.config.fallback, table);
    }

    fn apply(&mut self, transition: Transition<StateId>, table: &StateTable) {
        match transition {
            Transition::None => {}
            Transition::Push(state) => {
                log::trace!("push `{}` at {}", table.name(state), self.cursor);
                self.stack.push(state);
            }
            Transition::Pop => {
                if self.depth() > 1 {
                    let state = self.stack.pop();
                    log::trace!(
                        "pop `{}` at {}",
                        state.map_or("", |s| table.name(s)),
                        self.cursor
                    );
                }
            }
        }
    }

    fn fallback(&mut self, kind: TokenKind, table: &StateTable) {
        let width = self.remaining().chars().next().map_or(1, char::len_utf8);
        let span = Span::new(self.cursor, self.cursor + width);
        log::trace!(
            "no rule in `{}` matches {:?} at {}",
            table.name(self.top()),
            span.slice(self.source),
            self.cursor
        );
        self.pending.push_back(Token::new(kind, span.slice(self.source), span));
        self.cursor = span.end;
    }
}

// ==================== Token Stream ====================

/// Lazy token stream over one source buffer
#[derive(Debug, Clone)]
pub struct Tokens<'l, 's> {
    lexer: &'l Lexer,
    context: ScanContext<'s>,
}

impl<'l, 's> Tokens<'l, 's> {
    /// Scanner state of this run
    pub fn context(&self) -> &ScanContext<'s> {
        &self.context
    }

    /// Number of states on the stack, root included
    pub fn depth(&self) -> usize {
        self.context.depth()
    }

    /// Name of the active state
    pub fn state(&self) -> &'static str {
        self.lexer.table.name(self.context.top())
    }

    /// Names of all stacked states, bottom first
    pub fn stack(&self) -> Vec<&'static str> {
        self.context
            .stack
            .iter()
            .map(|&s| self.lexer.table.name(s))
            .collect()
    }
}

impl<'l, 's> Iterator for Tokens<'l, 's> {
    type Item = Token<'s>;

    fn next(&mut self) -> Option<Token<'s>> {
        loop {
            if let Some(token) = self.context.pending.pop_front() {
                return Some(token);
            }
            if self.context.is_at_end() {
                return None;
            }
            self.context.step(self.lexer);
        }
    }
}

impl FusedIterator for Tokens<'_, '_> {}
