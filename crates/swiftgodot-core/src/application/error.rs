//! Application layer errors.
//!
//! These errors represent failures in orchestration: I/O, the external
//! build, and applying patches to files on disk. Invalid names and paths
//! are `DomainError`s.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;
use crate::syntax::{ParseErrorReason, RewriteError};

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Template rendering failed.
    #[error("Template rendering failed: {reason}")]
    RenderingFailed { reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// Store access failed (lock poisoned, etc.).
    #[error("Template store error")]
    StoreLockError,

    #[error("Template not found: {name}")]
    TemplateNotFound { name: String },

    /// Validation failed (application-level, not domain).
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    /// Project already exists at target location.
    #[error("Project already exists at {path}")]
    ProjectExists { path: PathBuf },

    #[error("File already exists: {path}")]
    FileExists { path: PathBuf },

    /// Rollback failed (best-effort cleanup failed).
    #[error("Rollback failed for {path}: {reason}")]
    RollbackFailed { path: PathBuf, reason: String },

    /// A directory or file the project layout requires is missing.
    #[error("{what} not found at {path}")]
    PathNotFound { path: PathBuf, what: &'static str },

    #[error("No project name declared in {manifest}")]
    ProjectNameNotFound { manifest: PathBuf },

    #[error("{path}:{line}:{column}: {reason}")]
    SourceParse {
        path: PathBuf,
        line: usize,
        column: usize,
        reason: ParseErrorReason,
    },

    #[error("Cannot patch {path}: {source}")]
    Patch {
        path: PathBuf,
        #[source]
        source: RewriteError,
    },

    #[error("Failed to run '{program}': {reason}")]
    BuildToolUnavailable { program: String, reason: String },

    #[error("Build failed ({status})")]
    BuildFailed { status: String },

    #[error("Build product missing: {path}")]
    ArtifactMissing { path: PathBuf },
}

impl ApplicationError {
    /// Turn a patching failure on `path` into an error that points at the
    /// offending line when the file did not parse.
    pub fn from_rewrite(path: impl Into<PathBuf>, text: &str, err: RewriteError) -> Self {
        let path = path.into();
        match err {
            RewriteError::Parse(parse) => {
                let (line, column) = parse.line_col(text);
                Self::SourceParse {
                    path,
                    line,
                    column,
                    reason: parse.reason,
                }
            }
            source => Self::Patch { path, source },
        }
    }

    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::StoreLockError => vec![
                "The template store is locked".into(),
                "Try again in a moment".into(),
            ],
            Self::TemplateNotFound { .. } => vec![
                "Check the templates.local_path setting".into(),
                "Remove it to use the built-in templates".into(),
            ],
            Self::ProjectExists { path } => vec![
                format!("Directory already exists: {}", path.display()),
                "Use --force to overwrite (destructive)".into(),
                "Choose a different project name".into(),
            ],
            Self::FileExists { path } => vec![
                format!("Remove {} or pick another class name", path.display()),
            ],
            Self::PathNotFound { .. } => vec![
                "Run this command from the Swift package directory".into(),
                "Or pass --run-from-godot from the Godot project directory".into(),
            ],
            Self::ProjectNameNotFound { .. } => vec![
                "Package.swift must contain Package(name: \"...\") with a literal name".into(),
            ],
            Self::SourceParse { .. } => vec![
                "Fix the syntax error at the reported position".into(),
            ],
            Self::Patch {
                source: RewriteError::NotFound { call, label },
                ..
            } => vec![format!("Add a '{label}: []' argument to '#{call}(...)'")],
            Self::Patch { .. } => vec![
                "Only 'Type.self' entries inside a literal array are supported".into(),
                "Register the class by hand instead".into(),
            ],
            Self::BuildToolUnavailable { program, .. } => vec![
                format!("Make sure '{program}' is installed and on PATH"),
                "Or set build.program in the configuration".into(),
            ],
            Self::BuildFailed { .. } => vec!["See the compiler output above".into()],
            Self::ArtifactMissing { .. } => vec![
                "Check that the package declares a dynamic library product".into(),
                "Set build.library_extension if your platform differs".into(),
            ],
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FilesystemError { .. } | Self::RollbackFailed { .. } => ErrorCategory::Internal,
            Self::StoreLockError | Self::RenderingFailed { .. } => ErrorCategory::Internal,
            Self::TemplateNotFound { .. } => ErrorCategory::Configuration,
            Self::ValidationFailed(_)
            | Self::ProjectExists { .. }
            | Self::FileExists { .. }
            | Self::PathNotFound { .. }
            | Self::SourceParse { .. } => ErrorCategory::Validation,
            Self::ProjectNameNotFound { .. } => ErrorCategory::NotFound,
            Self::Patch {
                source: RewriteError::NotFound { .. },
                ..
            } => ErrorCategory::NotFound,
            Self::Patch { .. } => ErrorCategory::Validation,
            Self::BuildToolUnavailable { .. }
            | Self::BuildFailed { .. }
            | Self::ArtifactMissing { .. } => ErrorCategory::External,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::ParseError;

    #[test]
    fn parse_failures_point_at_line_and_column() {
        let text = "import SwiftGodot\nlet x = \"oops\n";
        let err = ApplicationError::from_rewrite(
            "Demo.swift",
            text,
            RewriteError::Parse(ParseError::new(26, ParseErrorReason::UnterminatedString)),
        );
        assert_eq!(err.to_string(), "Demo.swift:2:9: unterminated string literal");
        assert_eq!(err.category(), ErrorCategory::Validation);
    }

    #[test]
    fn missing_registry_is_not_found() {
        let err = ApplicationError::from_rewrite(
            "Demo.swift",
            "",
            RewriteError::NotFound {
                call: "initSwiftExtension".into(),
                label: "types".into(),
            },
        );
        assert_eq!(err.category(), ErrorCategory::NotFound);
        assert!(err.suggestions()[0].contains("types: []"));
    }

    #[test]
    fn build_errors_are_external() {
        let err = ApplicationError::BuildFailed {
            status: "exit status: 1".into(),
        };
        assert_eq!(err.category(), ErrorCategory::External);
    }
}
