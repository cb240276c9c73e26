//! Errors raised by the patching engine.

use thiserror::Error;

/// Malformed source text. Fatal to the operation that parsed it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("parse error at byte {position}: {reason}")]
pub struct ParseError {
    /// Byte offset into the source text.
    pub position: usize,
    pub reason: ParseErrorReason,
}

impl ParseError {
    pub fn new(position: usize, reason: ParseErrorReason) -> Self {
        Self { position, reason }
    }

    /// 1-based line and column (in characters) of the error in `source`.
    pub fn line_col(&self, source: &str) -> (usize, usize) {
        let upto = &source[..self.position.min(source.len())];
        let line = upto.matches('\n').count() + 1;
        let column = match upto.rfind('\n') {
            Some(nl) => upto[nl + 1..].chars().count() + 1,
            None => upto.chars().count() + 1,
        };
        (line, column)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseErrorReason {
    #[error("unterminated string literal")]
    UnterminatedString,

    #[error("unterminated block comment")]
    UnterminatedBlockComment,

    #[error("unexpected character {0:?}")]
    UnexpectedCharacter(char),

    #[error("unclosed delimiter '{0}'")]
    UnclosedDelimiter(char),

    #[error("mismatched closing delimiter: expected '{expected}', found '{found}'")]
    MismatchedDelimiter { expected: char, found: char },

    #[error("unexpected closing delimiter '{0}'")]
    UnexpectedClosingDelimiter(char),
}

/// Failure to apply a structural edit.
///
/// The source text is never modified when one of these is returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RewriteError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The expected `call(label: [...])` pattern is absent.
    #[error("no '{label}:' list found inside '{call}(...)'")]
    NotFound { call: String, label: String },

    /// The pattern was found but a node has the wrong kind.
    #[error("expected {expected}, found {found}")]
    Shape {
        expected: &'static str,
        found: String,
    },

    #[error("'{0}' is not a valid Swift identifier")]
    InvalidIdentifier(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_col_counts_from_one() {
        let source = "let a = 1\nlet b = \"oops";
        let err = ParseError::new(18, ParseErrorReason::UnterminatedString);
        assert_eq!(err.line_col(source), (2, 9));
        assert_eq!(ParseError::new(0, ParseErrorReason::UnterminatedString).line_col(source), (1, 1));
    }

    #[test]
    fn messages_are_readable() {
        let err = ParseError::new(4, ParseErrorReason::UnclosedDelimiter('('));
        assert_eq!(err.to_string(), "parse error at byte 4: unclosed delimiter '('");

        let err = RewriteError::NotFound {
            call: "initSwiftExtension".into(),
            label: "types".into(),
        };
        assert_eq!(
            err.to_string(),
            "no 'types:' list found inside 'initSwiftExtension(...)'"
        );
    }
}
