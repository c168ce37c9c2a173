//! Token definitions for the XBSL lexer

use serde::{Deserialize, Serialize};

use crate::utils::Span;

/// A token produced by the lexer.
///
/// `text` always borrows from the scanned source and equals
/// `span.slice(source)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub span: Span,
}

impl<'a> Token<'a> {
    pub fn new(kind: TokenKind, text: &'a str, span: Span) -> Self {
        Self { kind, text, span }
    }
}

/// Token kinds.
///
/// The set is closed and hierarchical: `Literal.String.Interpol` is a
/// `Literal.String`, which is a `Literal`. The hierarchy only matters to
/// renderers that inherit styles from a parent kind; the scanner never
/// inspects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    // ============ Plain ============
    #[serde(rename = "Text")]
    Text,
    /// Characters no rule could match
    #[serde(rename = "Error")]
    Error,

    // ============ Keywords ============
    #[serde(rename = "Keyword")]
    Keyword,
    /// знч / val / конст / const
    #[serde(rename = "Keyword.Constant")]
    KeywordConstant,
    /// новый / new
    #[serde(rename = "Keyword.Declaration")]
    KeywordDeclaration,
    /// импорт / import
    #[serde(rename = "Keyword.Namespace")]
    KeywordNamespace,
    /// Запрос / Query
    #[serde(rename = "Keyword.Type")]
    KeywordType,
    /// пер / var / исп / use
    #[serde(rename = "Keyword.Variable")]
    KeywordVariable,

    // ============ Names ============
    #[serde(rename = "Name")]
    Name,
    #[serde(rename = "Name.Class")]
    NameClass,
    #[serde(rename = "Name.Constant")]
    NameConstant,
    /// Structure names
    #[serde(rename = "Name.Entity")]
    NameEntity,
    /// попытка / try and friends
    #[serde(rename = "Name.Exception")]
    NameException,
    #[serde(rename = "Name.Function")]
    NameFunction,
    #[serde(rename = "Name.Namespace")]
    NameNamespace,
    /// @annotations
    #[serde(rename = "Name.Tag")]
    NameTag,
    #[serde(rename = "Name.Variable")]
    NameVariable,

    // ============ Literals ============
    #[serde(rename = "Literal")]
    Literal,
    /// Inner text of Дата{...} / Время{...} blocks
    #[serde(rename = "Literal.Date")]
    LiteralDate,
    #[serde(rename = "Literal.Number")]
    LiteralNumber,
    /// Inner text of Байты{...} / Ууид{...} blocks
    #[serde(rename = "Literal.Number.Bin")]
    LiteralNumberBin,
    #[serde(rename = "Literal.String")]
    LiteralString,
    /// Braces around an embedded query
    #[serde(rename = "Literal.String.Delimiter")]
    LiteralStringDelimiter,
    /// Backslash escapes inside strings and queries
    #[serde(rename = "Literal.String.Escape")]
    LiteralStringEscape,
    /// %name and ${expr}
    #[serde(rename = "Literal.String.Interpol")]
    LiteralStringInterpol,
    #[serde(rename = "Literal.String.Other")]
    LiteralStringOther,

    // ============ Operators and Punctuation ============
    #[serde(rename = "Operator")]
    Operator,
    #[serde(rename = "Punctuation")]
    Punctuation,

    // ============ Comments ============
    #[serde(rename = "Comment")]
    Comment,
    #[serde(rename = "Comment.Single")]
    CommentSingle,
    #[serde(rename = "Comment.Multiline")]
    CommentMultiline,
    /// область / scope
    #[serde(rename = "Comment.Preproc")]
    CommentPreproc,

    // ============ Generic ============
    #[serde(rename = "Generic")]
    Generic,
    /// Text of an embedded query
    #[serde(rename = "Generic.Emph")]
    GenericEmph,
}

impl TokenKind {
    /// The kind this one inherits styling from, `None` for top-level kinds
    pub fn parent(self) -> Option<TokenKind> {
        use TokenKind::*;
        match self {
            Text | Error | Keyword | Name | Literal | Operator | Punctuation | Comment
            | Generic => None,
            KeywordConstant | KeywordDeclaration | KeywordNamespace | KeywordType
            | KeywordVariable => Some(Keyword),
            NameClass | NameConstant | NameEntity | NameException | NameFunction
            | NameNamespace | NameTag | NameVariable => Some(Name),
            LiteralDate | LiteralNumber | LiteralString => Some(Literal),
            LiteralNumberBin => Some(LiteralNumber),
            LiteralStringDelimiter | LiteralStringEscape | LiteralStringInterpol
            | LiteralStringOther => Some(LiteralString),
            CommentSingle | CommentMultiline | CommentPreproc => Some(Comment),
            GenericEmph => Some(Generic),
        }
    }

    /// Whether `self` is `other` or one of its descendants
    pub fn is_a(self, other: TokenKind) -> bool {
        let mut current = Some(self);
        while let Some(kind) = current {
            if kind == other {
                return true;
            }
            current = kind.parent();
        }
        false
    }

    /// Dotted qualified name, e.g. `Literal.String.Interpol`
    pub fn qualname(self) -> &'static str {
        use TokenKind::*;
        match self {
            Text => "Text",
            Error => "Error",
            Keyword => "Keyword",
            KeywordConstant => "Keyword.Constant",
            KeywordDeclaration => "Keyword.Declaration",
            KeywordNamespace => "Keyword.Namespace",
            KeywordType => "Keyword.Type",
            KeywordVariable => "Keyword.Variable",
            Name => "Name",
            NameClass => "Name.Class",
            NameConstant => "Name.Constant",
            NameEntity => "Name.Entity",
            NameException => "Name.Exception",
            NameFunction => "Name.Function",
            NameNamespace => "Name.Namespace",
            NameTag => "Name.Tag",
            NameVariable => "Name.Variable",
            Literal => "Literal",
            LiteralDate => "Literal.Date",
            LiteralNumber => "Literal.Number",
            LiteralNumberBin => "Literal.Number.Bin",
            LiteralString => "Literal.String",
            LiteralStringDelimiter => "Literal.String.Delimiter",
            LiteralStringEscape => "Literal.String.Escape",
            LiteralStringInterpol => "Literal.String.Interpol",
            LiteralStringOther => "Literal.String.Other",
            Operator => "Operator",
            Punctuation => "Punctuation",
            Comment => "Comment",
            CommentSingle => "Comment.Single",
            CommentMultiline => "Comment.Multiline",
            CommentPreproc => "Comment.Preproc",
            Generic => "Generic",
            GenericEmph => "Generic.Emph",
        }
    }

    /// Short CSS class name used by HTML renderers (`kd`, `si`, ...)
    pub fn short_name(self) -> &'static str {
        use TokenKind::*;
        match self {
            Text => "",
            Error => "err",
            Keyword => "k",
            KeywordConstant => "kc",
            KeywordDeclaration => "kd",
            KeywordNamespace => "kn",
            KeywordType => "kt",
            KeywordVariable => "kv",
            Name => "n",
            NameClass => "nc",
            NameConstant => "no",
            NameEntity => "ni",
            NameException => "ne",
            NameFunction => "nf",
            NameNamespace => "nn",
            NameTag => "nt",
            NameVariable => "nv",
            Literal => "l",
            LiteralDate => "ld",
            LiteralNumber => "m",
            LiteralNumberBin => "mb",
            LiteralString => "s",
            LiteralStringDelimiter => "dl",
            LiteralStringEscape => "se",
            LiteralStringInterpol => "si",
            LiteralStringOther => "sx",
            Operator => "o",
            Punctuation => "p",
            Comment => "c",
            CommentSingle => "c1",
            CommentMultiline => "cm",
            CommentPreproc => "cp",
            Generic => "g",
            GenericEmph => "ge",
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.qualname())
    }
}
