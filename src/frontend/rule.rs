//! Lexing rules
//!
//! A rule pairs a pattern with what to emit when it matches and how the
//! state stack changes afterwards. Rules are declared as [`RuleDef`] values
//! (plain data) and compiled into [`Rule`]s by the state table.

use regex::Regex;

use crate::frontend::token::TokenKind;
use crate::utils::{Error, Result, Span};

// ==================== Declarations ====================

/// What a matching rule emits
#[derive(Debug, Clone, PartialEq)]
pub enum Emission {
    /// One token covering the whole match
    Single(TokenKind),
    /// One token per listed capture group, in the listed order
    Groups(Vec<(usize, TokenKind)>),
}

/// State stack operation applied after a match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition<S> {
    None,
    Push(S),
    Pop,
}

/// Zero-width condition on the text before the cursor.
///
/// Patterns only see the text after the cursor, so look-behind context
/// lives here instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// No condition
    Any,
    /// The cursor sits on a word boundary
    WordBoundary,
    /// The cursor is at the start of input or right after a newline
    LineStart,
}

/// Declarative form of a rule, as written in a grammar
#[derive(Debug, Clone)]
pub struct RuleDef {
    pub pattern: String,
    pub emission: Emission,
    pub anchor: Anchor,
    /// Require a word boundary right after the match
    pub word_end: bool,
    pub transition: Transition<&'static str>,
}

impl RuleDef {
    /// Rule emitting a single token of `kind`
    pub fn token(pattern: impl Into<String>, kind: TokenKind) -> Self {
        Self {
            pattern: pattern.into(),
            emission: Emission::Single(kind),
            anchor: Anchor::Any,
            word_end: false,
            transition: Transition::None,
        }
    }

    /// Rule emitting one token per capture group
    pub fn groups(pattern: impl Into<String>, groups: &[(usize, TokenKind)]) -> Self {
        Self {
            emission: Emission::Groups(groups.to_vec()),
            ..Self::token(pattern, TokenKind::Text)
        }
    }

    /// Push `state` after matching
    pub fn push(mut self, state: &'static str) -> Self {
        self.transition = Transition::Push(state);
        self
    }

    /// Pop the current state after matching
    pub fn pop(mut self) -> Self {
        self.transition = Transition::Pop;
        self
    }

    /// Only match when the text before the cursor satisfies `anchor`
    pub fn anchored(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Match only whole words: word boundaries on both ends
    pub fn bounded(mut self) -> Self {
        self.anchor = Anchor::WordBoundary;
        self.word_end = true;
        self
    }
}

// ==================== Compiled Rules ====================

/// Identifier of a state within a compiled table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StateId(pub(crate) usize);

/// A compiled rule
#[derive(Debug, Clone)]
pub struct Rule {
    regex: Regex,
    emission: Emission,
    anchor: Anchor,
    word_end: bool,
    transition: Transition<StateId>,
}

/// Result of applying a rule at the cursor
#[derive(Debug, Clone, PartialEq)]
pub struct RuleMatch {
    /// Byte offset where the full match ends
    pub end: usize,
    /// Pieces tiling `cursor..end`, in order
    pub pieces: Vec<(Span, TokenKind)>,
}

impl Rule {
    /// Compile a declared rule. `resolve` maps pushed state names to ids.
    pub(crate) fn compile(
        state: &'static str,
        def: RuleDef,
        resolve: impl Fn(&'static str) -> Option<StateId>,
    ) -> Result<Self> {
        let regex = Regex::new(&format!(r"\A(?:{})", def.pattern))
            .map_err(|source| Error::InvalidPattern { state, source })?;

        if let Emission::Groups(groups) = &def.emission {
            let available = regex.captures_len() - 1;
            if let Some(&(group, _)) = groups.iter().find(|(g, _)| *g == 0 || *g > available) {
                return Err(Error::GroupOutOfRange { state, group, available });
            }
        }

        let transition = match def.transition {
            Transition::None => Transition::None,
            Transition::Pop => Transition::Pop,
            Transition::Push(target) => Transition::Push(
                resolve(target).ok_or(Error::UnknownState { state, target })?,
            ),
        };

        Ok(Self {
            regex,
            emission: def.emission,
            anchor: def.anchor,
            word_end: def.word_end,
            transition,
        })
    }

    pub fn transition(&self) -> Transition<StateId> {
        self.transition
    }

    /// Try the rule with the match starting exactly at `cursor`.
    ///
    /// Bytes of the match not covered by an emitted group come back as
    /// `Text` pieces, so the pieces always tile the whole match.
    pub fn apply(&self, source: &str, cursor: usize) -> Option<RuleMatch> {
        if !self.anchor_holds(source, cursor) {
            return None;
        }

        let rest = &source[cursor..];
        let caps = self.regex.captures(rest)?;
        let whole = caps.get(0)?;
        let end = cursor + whole.end();

        if self.word_end && !is_boundary(source, end) {
            return None;
        }

        let pieces = match &self.emission {
            Emission::Single(_) if end == cursor => Vec::new(),
            Emission::Single(kind) => vec![(Span::new(cursor, end), *kind)],
            Emission::Groups(groups) => {
                let mut pieces = Vec::with_capacity(groups.len() + 1);
                let mut pos = cursor;
                for &(index, kind) in groups {
                    let Some(group) = caps.get(index) else { continue };
                    let (start, stop) = (cursor + group.start(), cursor + group.end());
                    // Overlapping or out-of-order groups would break tiling
                    if start == stop || start < pos {
                        continue;
                    }
                    if start > pos {
                        pieces.push((Span::new(pos, start), TokenKind::Text));
                    }
                    pieces.push((Span::new(start, stop), kind));
                    pos = stop;
                }
                if pos < end {
                    pieces.push((Span::new(pos, end), TokenKind::Text));
                }
                pieces
            }
        };

        Some(RuleMatch { end, pieces })
    }

    fn anchor_holds(&self, source: &str, cursor: usize) -> bool {
        match self.anchor {
            Anchor::Any => true,
            Anchor::WordBoundary => is_boundary(source, cursor),
            Anchor::LineStart => cursor == 0 || source.as_bytes()[cursor - 1] == b'\n',
        }
    }
}

// ==================== Word Boundaries ====================

/// Word characters for boundary checks: ASCII letters, digits, underscore
/// and the Russian alphabet including `Ё`/`ё`.
pub fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || ('А'..='я').contains(&c) || c == 'Ё' || c == 'ё'
}

/// Whether byte offset `pos` sits between a word and a non-word character.
/// The edges of the input count as non-word.
pub fn is_boundary(source: &str, pos: usize) -> bool {
    let before = source[..pos].chars().next_back().is_some_and(is_word_char);
    let after = source[pos..].chars().next().is_some_and(is_word_char);
    before != after
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn compile(def: RuleDef) -> Rule {
        Rule::compile("root", def, |_| Some(StateId(0))).unwrap()
    }

    #[test]
    fn test_cyrillic_word_chars() {
        assert!(is_word_char('ё'));
        assert!(is_word_char('Ё'));
        assert!(is_word_char('Ж'));
        assert!(is_word_char('_'));
        assert!(!is_word_char('-'));
        assert!(!is_word_char('λ'));
    }

    #[test]
    fn test_boundaries() {
        assert!(is_boundary("если x", 0));
        assert!(is_boundary("если x", "если".len()));
        assert!(!is_boundary("еслиx", "если".len()));
        assert!(is_boundary("x", 1));
        assert!(!is_boundary("", 0));
    }

    #[test]
    fn test_match_is_anchored_at_cursor() {
        let rule = compile(RuleDef::token(r"\d+", TokenKind::LiteralNumber));

        assert_eq!(rule.apply("ab 12", 0), None);
        let m = rule.apply("ab 12", 3).unwrap();
        assert_eq!(m.end, 5);
        assert_eq!(m.pieces, vec![(Span::new(3, 5), TokenKind::LiteralNumber)]);
    }

    #[test]
    fn test_groups_fill_gaps_with_text() {
        let rule = compile(RuleDef::groups(
            r"(a)(\s+)(b)",
            &[(1, TokenKind::Keyword), (3, TokenKind::NameVariable)],
        ));

        let m = rule.apply("a  b", 0).unwrap();
        assert_eq!(
            m.pieces,
            vec![
                (Span::new(0, 1), TokenKind::Keyword),
                (Span::new(1, 3), TokenKind::Text),
                (Span::new(3, 4), TokenKind::NameVariable),
            ]
        );
    }

    #[test]
    fn test_empty_groups_are_skipped() {
        let rule = compile(RuleDef::groups(
            r"(x)(\s*)(\{)",
            &[(1, TokenKind::KeywordType), (2, TokenKind::LiteralStringOther), (3, TokenKind::Punctuation)],
        ));

        let m = rule.apply("x{", 0).unwrap();
        assert_eq!(m.pieces.len(), 2);
    }

    #[test]
    fn test_bounded_rule() {
        let rule = compile(RuleDef::token("(?i:если|if)", TokenKind::Keyword).bounded());

        assert!(rule.apply("если x", 0).is_some());
        assert!(rule.apply("еслиx", 0).is_none());
        assert!(rule.apply("xесли", 1).is_none());
        assert!(rule.apply("IF", 0).is_some());
    }

    #[test]
    fn test_line_start_anchor() {
        let rule = compile(RuleDef::token("s", TokenKind::Keyword).anchored(Anchor::LineStart));

        assert!(rule.apply("s", 0).is_some());
        assert!(rule.apply("a\ns", 2).is_some());
        assert!(rule.apply("a s", 2).is_none());
    }

    #[test]
    fn test_compile_errors() {
        let err = Rule::compile("root", RuleDef::token("(", TokenKind::Text), |_| None).unwrap_err();
        assert!(matches!(err, Error::InvalidPattern { state: "root", .. }));

        let err = Rule::compile("root", RuleDef::token("x", TokenKind::Text).push("nowhere"), |_| None)
            .unwrap_err();
        assert!(matches!(err, Error::UnknownState { target: "nowhere", .. }));

        let err = Rule::compile("root", RuleDef::groups("(x)", &[(2, TokenKind::Text)]), |_| None)
            .unwrap_err();
        assert!(matches!(err, Error::GroupOutOfRange { group: 2, available: 1, .. }));
    }
}
