//! Syntax kinds and the `rowan` language binding.
//!
//! Tokens, trivia and nodes share one kind space. Trivia (whitespace,
//! newlines, comments and a leading byte order mark) is stored in the tree as
//! ordinary tokens, so rendering the root reproduces the source exactly.

use std::fmt;

use rowan::Language;

/// Swift keywords that the lexer reports as [`SyntaxKind::Keyword`].
pub const KEYWORDS: &[&str] = &[
    "Any",
    "Self",
    "as",
    "associatedtype",
    "await",
    "break",
    "case",
    "catch",
    "class",
    "continue",
    "default",
    "defer",
    "deinit",
    "do",
    "else",
    "enum",
    "extension",
    "fallthrough",
    "false",
    "fileprivate",
    "for",
    "func",
    "guard",
    "if",
    "import",
    "in",
    "init",
    "inout",
    "internal",
    "is",
    "let",
    "nil",
    "open",
    "operator",
    "precedencegroup",
    "private",
    "protocol",
    "public",
    "repeat",
    "rethrows",
    "return",
    "self",
    "static",
    "struct",
    "subscript",
    "super",
    "switch",
    "throw",
    "throws",
    "true",
    "try",
    "typealias",
    "var",
    "where",
    "while",
];

/// Keywords that behave like references in expression position
/// (`self.foo`, `Self(...)`, `super.init(...)`, `true`).
pub const REFERENCE_KEYWORDS: &[&str] = &["self", "Self", "super", "init", "true", "false", "nil"];

/// Returns `true` if `word` is a reserved Swift keyword.
pub fn is_keyword(word: &str) -> bool {
    KEYWORDS.contains(&word)
}

/// The identifier name with surrounding backticks removed.
pub fn unescaped_name(text: &str) -> &str {
    text.strip_prefix('`')
        .and_then(|s| s.strip_suffix('`'))
        .unwrap_or(text)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum SyntaxKind {
    // Trivia
    /// Spaces and tabs.
    Whitespace = 0,
    /// A single line break (`\n`, `\r\n` or `\r`).
    Newline,
    LineComment,
    BlockComment,
    /// `U+FEFF` at the very start of a file.
    ByteOrderMark,

    // Tokens
    Identifier,
    Keyword,
    StringLiteral,
    NumberLiteral,
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Comma,
    Colon,
    Semicolon,
    Dot,
    Pound,
    At,
    Operator,
    /// Lookahead past the last token. Never stored in a tree.
    EndOfFile,

    // Nodes
    SourceFile,
    /// `callee(arguments)`
    CallExpr,
    /// `#name` or `#name(arguments)`
    MacroExpansionExpr,
    /// `( argument, ... )`, parens included.
    ArgumentList,
    /// `label: value,` with optional label and comma.
    Argument,
    /// A parenthesized group that is not a call.
    TupleExpr,
    /// `[ element, ... ]`
    ArrayLiteral,
    /// `value,` with an optional comma.
    ArrayElement,
    /// `base.member`, or `.member` with an implicit base.
    MemberAccessExpr,
    /// A plain identifier or reference keyword used as a value.
    DeclReference,
    /// The sequence of items making up one argument or element value.
    Expr,
    /// `{ ... }`
    Block,
}

impl SyntaxKind {
    const ALL: [SyntaxKind; 35] = [
        Self::Whitespace,
        Self::Newline,
        Self::LineComment,
        Self::BlockComment,
        Self::ByteOrderMark,
        Self::Identifier,
        Self::Keyword,
        Self::StringLiteral,
        Self::NumberLiteral,
        Self::LParen,
        Self::RParen,
        Self::LBracket,
        Self::RBracket,
        Self::LBrace,
        Self::RBrace,
        Self::Comma,
        Self::Colon,
        Self::Semicolon,
        Self::Dot,
        Self::Pound,
        Self::At,
        Self::Operator,
        Self::EndOfFile,
        Self::SourceFile,
        Self::CallExpr,
        Self::MacroExpansionExpr,
        Self::ArgumentList,
        Self::Argument,
        Self::TupleExpr,
        Self::ArrayLiteral,
        Self::ArrayElement,
        Self::MemberAccessExpr,
        Self::DeclReference,
        Self::Expr,
        Self::Block,
    ];

    fn from_raw(raw: u16) -> Option<Self> {
        Self::ALL
            .get(usize::from(raw))
            .copied()
            .filter(|kind| *kind as u16 == raw)
    }

    /// An identifier, or a keyword if `text` is reserved.
    pub fn for_word(text: &str) -> Self {
        if is_keyword(text) {
            Self::Keyword
        } else {
            Self::Identifier
        }
    }

    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            Self::Whitespace
                | Self::Newline
                | Self::LineComment
                | Self::BlockComment
                | Self::ByteOrderMark
        )
    }

    /// The delimiter character for bracket kinds.
    pub fn delimiter(self) -> Option<char> {
        match self {
            Self::LParen => Some('('),
            Self::RParen => Some(')'),
            Self::LBracket => Some('['),
            Self::RBracket => Some(']'),
            Self::LBrace => Some('{'),
            Self::RBrace => Some('}'),
            _ => None,
        }
    }

    pub fn is_closing_delimiter(self) -> bool {
        matches!(self, Self::RParen | Self::RBracket | Self::RBrace)
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

impl fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Whitespace => "whitespace",
            Self::Newline => "newline",
            Self::LineComment => "line comment",
            Self::BlockComment => "block comment",
            Self::ByteOrderMark => "byte order mark",
            Self::Identifier => "identifier",
            Self::Keyword => "keyword",
            Self::StringLiteral => "string literal",
            Self::NumberLiteral => "number literal",
            Self::LParen => "'('",
            Self::RParen => "')'",
            Self::LBracket => "'['",
            Self::RBracket => "']'",
            Self::LBrace => "'{'",
            Self::RBrace => "'}'",
            Self::Comma => "','",
            Self::Colon => "':'",
            Self::Semicolon => "';'",
            Self::Dot => "'.'",
            Self::Pound => "'#'",
            Self::At => "'@'",
            Self::Operator => "operator",
            Self::EndOfFile => "end of file",
            Self::SourceFile => "source file",
            Self::CallExpr => "call expression",
            Self::MacroExpansionExpr => "macro expansion",
            Self::ArgumentList => "argument list",
            Self::Argument => "argument",
            Self::TupleExpr => "tuple expression",
            Self::ArrayLiteral => "array literal",
            Self::ArrayElement => "array element",
            Self::MemberAccessExpr => "member access expression",
            Self::DeclReference => "reference",
            Self::Expr => "expression",
            Self::Block => "block",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SwiftLanguage;

impl Language for SwiftLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        // Trees are only ever built from `SyntaxKind` values.
        SyntaxKind::from_raw(raw.0).unwrap_or(SyntaxKind::EndOfFile)
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

pub type SyntaxNode = rowan::SyntaxNode<SwiftLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<SwiftLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<SwiftLanguage>;
