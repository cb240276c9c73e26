//! Unified error handling for SwiftGodot Core.
//!
//! Wraps domain, application and syntax errors behind one type that can
//! produce suggestions and a display category.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;
use crate::syntax::{ParseError, RewriteError};

/// Root error type for SwiftGodot Core operations.
#[derive(Debug, Error, Clone)]
pub enum ForgeError {
    /// Errors from the domain layer (invalid names, paths, templates).
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (I/O, build, patching).
    #[error("{0}")]
    Application(#[from] ApplicationError),

    /// A source file could not be patched.
    #[error("{0}")]
    Syntax(#[from] RewriteError),

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl From<ParseError> for ForgeError {
    fn from(err: ParseError) -> Self {
        Self::Syntax(RewriteError::Parse(err))
    }
}

impl ForgeError {
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Syntax(RewriteError::Parse(_)) => vec![
                "The file is not valid Swift".into(),
                "Fix the reported position and try again".into(),
            ],
            Self::Syntax(RewriteError::NotFound { call, label }) => vec![format!(
                "Add a '{label}: []' argument to '#{call}(...)'"
            )],
            Self::Syntax(RewriteError::Shape { .. }) => vec![
                "The registration list has an unexpected shape".into(),
                "Only 'Type.self' entries inside a literal array are supported".into(),
            ],
            Self::Syntax(RewriteError::InvalidIdentifier(_)) => {
                vec!["Names must be valid Swift identifiers".into()]
            }
            Self::Configuration { message } => vec![
                format!("Configuration issue: {message}"),
                "Run 'swiftgodot config path' to locate the config file".into(),
            ],
            Self::Internal { .. } => vec!["This appears to be a bug in swiftgodot".into()],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => e.category(),
            Self::Application(e) => e.category(),
            Self::Syntax(RewriteError::NotFound { .. }) => ErrorCategory::NotFound,
            Self::Syntax(_) => ErrorCategory::Validation,
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }
}

/// Error categories for UI display and exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Configuration,
    /// An external tool (the Swift toolchain) failed.
    External,
    Internal,
}

pub type ForgeResult<T> = Result<T, ForgeError>;

/// Extension trait for adding context to errors.
pub trait Context<T> {
    fn context(self, msg: impl Into<String>) -> ForgeResult<T>;
}

impl<T, E> Context<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, msg: impl Into<String>) -> ForgeResult<T> {
        self.map_err(|e| ForgeError::Internal {
            message: format!("{}: {}", msg.into(), e),
        })
    }
}
