use thiserror::Error;

use crate::error::ErrorCategory;

/// Root domain error type.
///
/// All errors are cloneable, categorizable for CLI display and carry
/// suggestions the user can act on.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: String },

    #[error("invalid class name '{name}': {reason}")]
    InvalidClassName { name: String, reason: String },

    #[error("invalid class path '{path}': {reason}")]
    InvalidClassPath { path: String, reason: String },

    #[error("Invalid template: {0}")]
    InvalidTemplate(String),

    #[error("Template '{template}' has no content")]
    EmptyTemplate { template: String },

    #[error("Duplicate path in template: {path}")]
    DuplicatePath { path: String },

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },
}

impl DomainError {
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidProjectName { .. } | Self::InvalidClassName { .. } => vec![
                "Names must be valid Swift identifiers".into(),
                "Use letters, digits and '_', and do not start with a digit".into(),
                "Reserved words such as 'class' or 'self' are not allowed".into(),
            ],
            Self::InvalidClassPath { .. } => vec![
                "Pass a path relative to the project's Sources directory".into(),
                "Example: swiftgodot new class Enemies/Slime".into(),
            ],
            Self::EmptyTemplate { template } => vec![
                format!("Template '{template}' is empty"),
                "Check the templates.local_path setting".into(),
            ],
            Self::InvalidTemplate(_)
            | Self::DuplicatePath { .. }
            | Self::AbsolutePathNotAllowed { .. } => vec![
                "The project template is malformed".into(),
                "Remove templates.local_path to fall back to the built-in template".into(),
            ],
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidProjectName { .. }
            | Self::InvalidClassName { .. }
            | Self::InvalidClassPath { .. } => ErrorCategory::Validation,
            Self::InvalidTemplate(_)
            | Self::EmptyTemplate { .. }
            | Self::DuplicatePath { .. }
            | Self::AbsolutePathNotAllowed { .. } => ErrorCategory::Configuration,
        }
    }
}
