use std::fmt;
use std::path::{Component, Path, PathBuf};

use super::DomainError;

/// A UTF-8 path that stays inside whatever root it is joined to.
///
/// Never absolute, never rooted, and never contains `..`.  Template paths
/// are rendered as text, so the path is stored as a `String`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelativePath(String);

impl RelativePath {
    pub fn try_new(path: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let path = path.into();
        let escapes = path
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)));
        if path.is_absolute() || path.has_root() || escapes {
            return Err(DomainError::AbsolutePathNotAllowed {
                path: path.display().to_string(),
            });
        }
        match path.into_os_string().into_string() {
            Ok(text) => Ok(Self(text)),
            Err(raw) => Err(DomainError::InvalidTemplate(format!(
                "path '{}' is not valid UTF-8",
                raw.to_string_lossy()
            ))),
        }
    }

    pub fn as_path(&self) -> &Path {
        Path::new(&self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<Path> for RelativePath {
    fn as_ref(&self) -> &Path {
        self.as_path()
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Mode a written file ends up with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Permissions {
    #[default]
    ReadWrite,
    /// Scripts shipped with a template, e.g. export helpers.
    Executable,
}

impl Permissions {
    pub const fn read_write() -> Self {
        Self::ReadWrite
    }

    pub const fn executable() -> Self {
        Self::Executable
    }

    pub const fn executable_flag(&self) -> bool {
        matches!(self, Self::Executable)
    }
}
