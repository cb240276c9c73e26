//! Recursive-descent parser producing a lossless [`SyntaxTree`].
//!
//! Only the shapes the engine needs are given structure: calls, macro
//! expansions, argument lists, array literals, member accesses, references
//! and brace blocks. Every other token is kept as a plain child so the tree
//! still covers the whole file.
//!
//! Trivia is emitted next to the token that owns it: leading trivia just
//! before it and trailing trivia just after, inside whichever node is open
//! at the time.

use std::collections::VecDeque;

use rowan::GreenNodeBuilder;
use tracing::trace;

use super::error::{ParseError, ParseErrorReason};
use super::kind::{REFERENCE_KEYWORDS, SyntaxKind};
use super::lexer::{Lexed, Trivia, tokenize};
use super::tree::SyntaxTree;

/// Parse Swift source into a syntax tree that renders back to `source`.
pub fn parse(source: &str) -> Result<SyntaxTree, ParseError> {
    let lexed = tokenize(source)?;
    trace!(tokens = lexed.tokens.len(), "tokenized source");
    let mut parser = Parser {
        tokens: lexed.tokens.into(),
        builder: GreenNodeBuilder::new(),
    };
    parser.source_file(&lexed.tail)?;
    Ok(SyntaxTree::new(parser.builder.finish()))
}

/// An opened bracket waiting for its partner.
#[derive(Debug, Clone, Copy)]
struct Opener {
    close: SyntaxKind,
    close_char: char,
    open_char: char,
    offset: usize,
}

/// Where a run of items ends.
#[derive(Debug, Clone, Copy)]
struct Stop {
    opener: Option<Opener>,
    /// Commas separate entries instead of being plain items.
    comma: bool,
}

/// What a primary expression turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Primary {
    Node,
    /// A string or number literal, which can still take `.member`.
    Literal,
    Token,
}

struct Parser<'a> {
    tokens: VecDeque<Lexed<'a>>,
    builder: GreenNodeBuilder<'static>,
}

impl Parser<'_> {
    fn peek_kind(&self) -> SyntaxKind {
        self.peek_nth_kind(0)
    }

    fn peek_nth_kind(&self, n: usize) -> SyntaxKind {
        self.tokens
            .get(n)
            .map_or(SyntaxKind::EndOfFile, |lexed| lexed.kind)
    }

    fn newline_before_next(&self) -> bool {
        self.tokens.front().is_some_and(Lexed::has_newline_before)
    }

    fn trivia(&mut self, trivia: &[Trivia]) {
        for piece in trivia {
            self.builder.token(piece.kind.into(), piece.text);
        }
    }

    /// Emit the next token with its trivia and return its kind.
    fn bump(&mut self) -> SyntaxKind {
        let Some(lexed) = self.tokens.pop_front() else {
            return SyntaxKind::EndOfFile;
        };
        self.trivia(&lexed.leading);
        self.builder.token(lexed.kind.into(), lexed.text);
        self.trivia(&lexed.trailing);
        lexed.kind
    }

    fn source_file(&mut self, tail: &[Trivia]) -> Result<(), ParseError> {
        self.builder.start_node(SyntaxKind::SourceFile.into());
        self.items(Stop {
            opener: None,
            comma: false,
        })?;
        self.trivia(tail);
        self.builder.finish_node();
        Ok(())
    }

    /// Parse expressions until the stop condition. The terminating token is
    /// left in place.
    fn items(&mut self, stop: Stop) -> Result<(), ParseError> {
        loop {
            let Some(next) = self.tokens.front() else {
                return match stop.opener {
                    Some(opener) => Err(ParseError::new(
                        opener.offset,
                        ParseErrorReason::UnclosedDelimiter(opener.open_char),
                    )),
                    None => Ok(()),
                };
            };
            let (kind, offset) = (next.kind, next.offset);
            match kind {
                kind if kind.is_closing_delimiter() => {
                    let found = kind.delimiter().unwrap_or_default();
                    return match stop.opener {
                        Some(opener) if opener.close == kind => Ok(()),
                        Some(opener) => Err(ParseError::new(
                            offset,
                            ParseErrorReason::MismatchedDelimiter {
                                expected: opener.close_char,
                                found,
                            },
                        )),
                        None => Err(ParseError::new(
                            offset,
                            ParseErrorReason::UnexpectedClosingDelimiter(found),
                        )),
                    };
                }
                SyntaxKind::Comma if stop.comma => return Ok(()),
                _ => self.expression()?,
            }
        }
    }

    fn expression(&mut self) -> Result<(), ParseError> {
        let checkpoint = self.builder.checkpoint();
        let mut current = self.primary()?;
        loop {
            match self.peek_kind() {
                SyntaxKind::Dot
                    if is_member_name(self.peek_nth_kind(1)) && current != Primary::Token =>
                {
                    self.builder
                        .start_node_at(checkpoint, SyntaxKind::MemberAccessExpr.into());
                    self.bump();
                    self.bump();
                    self.builder.finish_node();
                }
                SyntaxKind::LParen if current == Primary::Node && !self.newline_before_next() => {
                    self.builder
                        .start_node_at(checkpoint, SyntaxKind::CallExpr.into());
                    self.separated(SyntaxKind::ArgumentList, SyntaxKind::Argument)?;
                    self.builder.finish_node();
                }
                _ => return Ok(()),
            }
            current = Primary::Node;
        }
    }

    fn primary(&mut self) -> Result<Primary, ParseError> {
        let Some(front) = self.tokens.front() else {
            return Ok(Primary::Token);
        };
        let (kind, text, attached) = (front.kind, front.text, front.trailing.is_empty());
        match kind {
            SyntaxKind::Identifier => self.reference(),
            SyntaxKind::Keyword if REFERENCE_KEYWORDS.contains(&text) => self.reference(),
            SyntaxKind::Dot if is_member_name(self.peek_nth_kind(1)) => {
                self.builder.start_node(SyntaxKind::MemberAccessExpr.into());
                self.bump();
                self.bump();
                self.builder.finish_node();
                Ok(Primary::Node)
            }
            SyntaxKind::Pound
                if attached
                    && matches!(
                        self.peek_nth_kind(1),
                        SyntaxKind::Identifier | SyntaxKind::Keyword
                    ) =>
            {
                self.macro_expansion()?;
                Ok(Primary::Node)
            }
            SyntaxKind::LParen => {
                self.separated(SyntaxKind::TupleExpr, SyntaxKind::Argument)?;
                Ok(Primary::Node)
            }
            SyntaxKind::LBracket => {
                self.separated(SyntaxKind::ArrayLiteral, SyntaxKind::ArrayElement)?;
                Ok(Primary::Node)
            }
            SyntaxKind::LBrace => {
                self.block()?;
                Ok(Primary::Node)
            }
            SyntaxKind::StringLiteral | SyntaxKind::NumberLiteral => {
                self.bump();
                Ok(Primary::Literal)
            }
            _ => {
                self.bump();
                Ok(Primary::Token)
            }
        }
    }

    fn reference(&mut self) -> Result<Primary, ParseError> {
        self.builder.start_node(SyntaxKind::DeclReference.into());
        self.bump();
        self.builder.finish_node();
        Ok(Primary::Node)
    }

    fn macro_expansion(&mut self) -> Result<(), ParseError> {
        self.builder
            .start_node(SyntaxKind::MacroExpansionExpr.into());
        self.bump();
        self.bump();
        if self.peek_kind() == SyntaxKind::LParen && !self.newline_before_next() {
            self.separated(SyntaxKind::ArgumentList, SyntaxKind::Argument)?;
        }
        self.builder.finish_node();
        Ok(())
    }

    fn open(&mut self) -> Opener {
        let offset = self.tokens.front().map_or(0, |lexed| lexed.offset);
        let kind = self.bump();
        let (close, close_char) = match kind {
            SyntaxKind::LParen => (SyntaxKind::RParen, ')'),
            SyntaxKind::LBracket => (SyntaxKind::RBracket, ']'),
            _ => (SyntaxKind::RBrace, '}'),
        };
        Opener {
            close,
            close_char,
            open_char: kind.delimiter().unwrap_or_default(),
            offset,
        }
    }

    /// A bracketed, comma-separated group such as `(a: 1, b)` or `[x, y,]`.
    fn separated(&mut self, kind: SyntaxKind, entry: SyntaxKind) -> Result<(), ParseError> {
        self.builder.start_node(kind.into());
        let opener = self.open();
        let stop = Stop {
            opener: Some(opener),
            comma: true,
        };
        while self.peek_kind() != opener.close {
            self.builder.start_node(entry.into());
            if entry == SyntaxKind::Argument && self.at_label() {
                self.bump();
                self.bump();
            }
            self.builder.start_node(SyntaxKind::Expr.into());
            self.items(stop)?;
            self.builder.finish_node();
            if self.peek_kind() == SyntaxKind::Comma {
                self.bump();
            }
            self.builder.finish_node();
        }
        self.bump();
        self.builder.finish_node();
        Ok(())
    }

    fn block(&mut self) -> Result<(), ParseError> {
        self.builder.start_node(SyntaxKind::Block.into());
        let opener = self.open();
        self.items(Stop {
            opener: Some(opener),
            comma: false,
        })?;
        self.bump();
        self.builder.finish_node();
        Ok(())
    }

    fn at_label(&self) -> bool {
        matches!(
            self.peek_kind(),
            SyntaxKind::Identifier | SyntaxKind::Keyword
        ) && self.peek_nth_kind(1) == SyntaxKind::Colon
    }
}

fn is_member_name(kind: SyntaxKind) -> bool {
    matches!(
        kind,
        SyntaxKind::Identifier | SyntaxKind::Keyword | SyntaxKind::NumberLiteral
    )
}
