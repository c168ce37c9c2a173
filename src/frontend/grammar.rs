//! XBSL grammar
//!
//! State table for the 1C:Enterprise Element language. Every construct has
//! a Russian and an English spelling; both are listed side by side.
//!
//! States:
//! - `root`: top-level code
//! - `typestate`: a type expression after `<`, `:` or `как`/`as`
//! - `stringinter`: inside a double-quoted string
//! - `queryinter`: inside an embedded `Запрос{ ... }` block
//!
//! Within a state rules are tried top to bottom, so specific forms
//! (`Дата{...}`, `новый Тип`) precede the generic ones they would
//! otherwise be swallowed by (punctuation, identifiers).

use once_cell::sync::Lazy;

use crate::frontend::lexer::{Lexer, Tokens};
use crate::frontend::rule::{Anchor, RuleDef};
use crate::frontend::state::{StateDef, ROOT};
use crate::frontend::token::TokenKind::{self, *};

const TYPE_STATE: &str = "typestate";
const STRING_STATE: &str = "stringinter";
const QUERY_STATE: &str = "queryinter";

/// Body of a character class matching one word character
const WORD: &str = "A-Za-z0-9_А-Яа-яЁё";

/// Bilingual keyword table: (Russian, English)
pub const KEYWORDS: &[(&str, &str)] = &[
    ("вконце", "finally"),
    ("возврат", "return"),
    ("выбор", "case"),
    ("выбросить", "throw"),
    ("для", "for"),
    ("если", "if"),
    ("знч", "val"),
    ("и", "and"),
    ("из", "in"),
    ("или", "or"),
    ("импорт", "import"),
    ("иначе", "else"),
    ("исключение", "exception"),
    ("исп", "use"),
    ("как", "as"),
    ("когда", "when"),
    ("конст", "const"),
    ("конструктор", "constructor"),
    ("метод", "method"),
    ("не", "not"),
    ("неизвестно", "unknown"),
    ("новый", "new"),
    ("обз", "req"),
    ("область", "scope"),
    ("пер", "var"),
    ("перечисление", "enum"),
    ("по", "to"),
    ("поймать", "catch"),
    ("пока", "while"),
    ("попытка", "try"),
    ("прервать", "break"),
    ("продолжить", "continue"),
    ("статический", "static"),
    ("структура", "structure"),
    ("умолчание", "default"),
    ("это", "is"),
    ("этот", "this"),
];

/// Registration data for highlighting frameworks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexerInfo {
    pub title: &'static str,
    pub description: &'static str,
    /// Short name used to request the lexer explicitly
    pub tag: &'static str,
    /// File name globs the lexer should be selected for
    pub filenames: &'static [&'static str],
}

pub const INFO: LexerInfo = LexerInfo {
    title: "XBSL",
    description: "The 1C:Enterprise Element programming language",
    tag: "xbsl",
    filenames: &["*.xbsl"],
};

/// The compiled XBSL lexer, built on first use
pub static XBSL: Lazy<Lexer> =
    Lazy::new(|| Lexer::new(states()).expect("built-in XBSL grammar must compile"));

/// Lazily tokenize XBSL source with the built-in grammar
pub fn lex(source: &str) -> Tokens<'static, '_> {
    XBSL.tokenize(source)
}

/// Keyword alternation, longest spelling first so that a word-boundary
/// failure on `иначе` is never masked by its prefix `и`
fn keyword_pattern() -> String {
    let mut words: Vec<&str> = KEYWORDS.iter().flat_map(|&(ru, en)| [ru, en]).collect();
    words.sort_by_key(|w| std::cmp::Reverse(w.chars().count()));
    format!("(?i:{})", words.join("|"))
}

/// `Name{...}` literal block: type name, braces and raw inner text
fn literal_block(names: &str, inner: TokenKind) -> RuleDef {
    RuleDef::groups(
        format!(r"({names})(\{{)(.*)(\}})"),
        &[(1, NameClass), (2, Punctuation), (3, inner), (4, Punctuation)],
    )
}

/// Keyword followed by whitespace and a name
fn declaration(keywords: &str, name: &str, keyword: TokenKind, kind: TokenKind) -> RuleDef {
    RuleDef::groups(
        format!(r"({keywords})(\s+)({name})"),
        &[(1, keyword), (2, Text), (3, kind)],
    )
}

/// Escapes, lone sigils and interpolations shared by strings and queries.
///
/// A lone sigil takes the character after it along, except for a
/// backslash, which still starts an escape.
fn interpolation_rules(plain: &str, text: TokenKind) -> Vec<RuleDef> {
    vec![
        RuleDef::token(r"(?s)\\.", LiteralStringEscape),
        RuleDef::token(format!(r"[^$%{plain}\\]+"), text),
        RuleDef::groups(r"([%$])(\\(?s:.))", &[(1, text), (2, LiteralStringEscape)]),
        RuleDef::token(format!(r#"(?i)[%$](?:[^a-zа-яё_{{{plain}\\]|\\?\z)"#), text),
        RuleDef::token(format!(r"[%$](?:[{WORD}]+|\{{[^}}]+\}})"), LiteralStringInterpol),
    ]
}

/// State declarations of the XBSL grammar
pub fn states() -> Vec<StateDef> {
    let ident = format!("[{WORD}]+");
    let dotted = format!("[{WORD}.]+");

    let root = vec![
        // Literal blocks
        literal_block("Дата|Date|Время|Time|ДатаВремя|DateTime|ЧасовойПояс", LiteralDate),
        literal_block("Байты|Bytes|Ууид|Uuid", LiteralNumberBin),
        // Strings
        RuleDef::token("\"", LiteralString).push(STRING_STATE),
        // Numbers
        RuleDef::token(r"-*\d+\.\d+", LiteralNumber).bounded(),
        RuleDef::token(r"-*\d+\.", LiteralNumber).bounded(),
        RuleDef::token(r"-*\d+", LiteralNumber).bounded(),
        RuleDef::token(r"-*0[xX][0-9a-fA-F]+", LiteralNumber).bounded(),
        RuleDef::token(r"-*0[bB][01]+", LiteralNumber).bounded(),
        // Construction
        declaration("(?i:новый|new)", &dotted, KeywordDeclaration, NameClass),
        // Type annotations, generics and casts
        RuleDef::token("[<:]", Punctuation).push(TYPE_STATE),
        RuleDef::token("(?i:как|as)", Keyword).bounded().push(TYPE_STATE),
        // Declarations
        declaration("(?i:метод|method)", &ident, Keyword, NameFunction),
        RuleDef::groups(
            format!(r"(\s*)((?i:структура|structure))(\s+)({ident})"),
            &[(1, Text), (2, Keyword), (3, Text), (4, NameEntity)],
        )
        .anchored(Anchor::LineStart),
        declaration("(?i:импорт|import)", &dotted, KeywordNamespace, NameNamespace),
        RuleDef::token("(?i:область|scope)", CommentPreproc).bounded(),
        RuleDef::token(
            r"(?:попытка|поймать|исключение|try|catch|exception|вконце|finally)\s",
            NameException,
        ),
        declaration("(?i:конст|const)", &ident, KeywordConstant, NameConstant),
        // Comments
        RuleDef::token("//.*", CommentSingle),
        RuleDef::token(r"(?s)/\*.*?\*/", CommentMultiline),
        // Embedded queries
        RuleDef::groups(
            r"(Запрос|Query)(\s*)(\{)",
            &[(1, KeywordType), (2, LiteralStringOther), (3, LiteralStringDelimiter)],
        )
        .push(QUERY_STATE),
        // Bindings
        declaration("знч|val", &ident, KeywordConstant, NameConstant).anchored(Anchor::WordBoundary),
        declaration("пер|var|исп|use", &ident, KeywordVariable, NameVariable)
            .anchored(Anchor::WordBoundary),
        // Whitespace
        RuleDef::token(r"\n", Text),
        RuleDef::token(r"[^\S\n]+", Text),
        // Symbols
        RuleDef::token(r"[\[\](){},;:|]", Punctuation),
        RuleDef::token(r"[-+/*%=<>.?&!]", Operator),
        // Words
        RuleDef::token(keyword_pattern(), Keyword).bounded(),
        RuleDef::token(ident.clone(), NameVariable),
        RuleDef::token(format!("@{ident}"), NameTag),
    ];

    let typestate = vec![
        RuleDef::token("=", Operator).pop(),
        RuleDef::token(r"\s*(?:0[xX][0-9a-fA-F]+|0[bB][01]+|\d[\d.]*)", LiteralNumber).pop(),
        RuleDef::token(format!(r"[{WORD} \t|?.]+"), NameClass),
        RuleDef::token("<", Punctuation).push(TYPE_STATE),
        RuleDef::token(r"[>,()\n]", Punctuation).pop(),
        // Anything else ends the type expression
        RuleDef::token("", Text).pop(),
    ];

    let mut stringinter = vec![RuleDef::token(r#"[%$]*""#, LiteralString).pop()];
    stringinter.extend(interpolation_rules("\"", LiteralString));

    let mut queryinter = vec![RuleDef::token(r"[%$]*\}", LiteralStringDelimiter).pop()];
    queryinter.extend(interpolation_rules("}", GenericEmph));

    vec![
        StateDef::new(ROOT, root),
        StateDef::new(TYPE_STATE, typestate),
        StateDef::new(STRING_STATE, stringinter),
        StateDef::new(QUERY_STATE, queryinter),
    ]
}
