//! Where things live inside a SwiftGodot project.
//!
//! ```text
//! <godot>/               Godot project
//!   bin/                 built libraries are copied here
//!   src/                 Swift package
//!     Package.swift
//!     Sources/<Project>/<Project>.swift   initializer file
//!     .build/<configuration>/              build products
//! ```

use std::fmt;
use std::path::{Component, Path, PathBuf};

use crate::domain::error::DomainError;
use crate::syntax::is_identifier;

pub const PACKAGE_MANIFEST: &str = "Package.swift";
pub const SOURCES_DIR: &str = "Sources";
pub const BIN_DIR: &str = "bin";
pub const SWIFT_DIR: &str = "src";
pub const BUILD_DIR: &str = ".build";
pub const SWIFT_GODOT_LIBRARY: &str = "SwiftGodot";
pub const SWIFT_EXTENSION: &str = "swift";

/// Resolved directories of a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    swift_dir: PathBuf,
    godot_dir: PathBuf,
}

impl ProjectLayout {
    /// Resolve from the working directory.
    ///
    /// With `run_from_godot` the working directory is the Godot project and
    /// the package is its `src/`; otherwise the working directory is the
    /// package and the Godot project is its parent.
    pub fn resolve(cwd: &Path, run_from_godot: bool) -> Self {
        if run_from_godot {
            Self::from_dirs(cwd.join(SWIFT_DIR), cwd)
        } else {
            let godot = cwd.parent().unwrap_or(cwd);
            Self::from_dirs(cwd, godot)
        }
    }

    pub fn from_dirs(swift_dir: impl Into<PathBuf>, godot_dir: impl Into<PathBuf>) -> Self {
        Self {
            swift_dir: swift_dir.into(),
            godot_dir: godot_dir.into(),
        }
    }

    pub fn swift_dir(&self) -> &Path {
        &self.swift_dir
    }

    pub fn godot_dir(&self) -> &Path {
        &self.godot_dir
    }

    pub fn bin_dir(&self) -> PathBuf {
        self.godot_dir.join(BIN_DIR)
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.swift_dir.join(PACKAGE_MANIFEST)
    }

    pub fn classes_dir(&self, project: &str) -> PathBuf {
        self.swift_dir.join(SOURCES_DIR).join(project)
    }

    pub fn init_file(&self, project: &str) -> PathBuf {
        self.classes_dir(project)
            .join(format!("{project}.{SWIFT_EXTENSION}"))
    }

    pub fn build_products_dir(&self, configuration: &str) -> PathBuf {
        self.swift_dir.join(BUILD_DIR).join(configuration)
    }
}

/// `lib<name>.<extension>`
pub fn library_file_name(name: &str, extension: &str) -> String {
    format!("lib{name}.{extension}")
}

/// Dynamic library extension of the host platform.
pub fn host_library_extension() -> &'static str {
    if cfg!(target_os = "macos") {
        "dylib"
    } else if cfg!(target_os = "windows") {
        "dll"
    } else {
        "so"
    }
}

/// A class location relative to the classes directory, like `Enemies/Slime`.
///
/// The class name is the final component up to its first `.`, so
/// `Enemies/Slime.swift` and `Enemies/Slime` name the same class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassPath {
    dirs: Vec<String>,
    name: String,
}

impl ClassPath {
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let invalid = |reason: &str| DomainError::InvalidClassPath {
            path: input.to_string(),
            reason: reason.to_string(),
        };

        let path = Path::new(input);
        if input.trim().is_empty() {
            return Err(invalid("path is empty"));
        }
        if path.has_root() {
            return Err(invalid("path must be relative to the classes directory"));
        }

        let mut components = Vec::new();
        for component in path.components() {
            match component {
                Component::Normal(part) => match part.to_str() {
                    Some(part) => components.push(part.to_string()),
                    None => return Err(invalid("path is not valid UTF-8")),
                },
                Component::CurDir => {}
                _ => return Err(invalid("path must stay inside the classes directory")),
            }
        }

        let last = components.pop().ok_or_else(|| invalid("path is empty"))?;
        let name = last.split('.').next().unwrap_or_default().to_string();
        if !is_identifier(&name) {
            return Err(DomainError::InvalidClassName {
                name,
                reason: "not a valid Swift identifier".into(),
            });
        }

        Ok(Self {
            dirs: components,
            name,
        })
    }

    pub fn class_name(&self) -> &str {
        &self.name
    }

    /// Path of the source file, relative to the classes directory.
    pub fn relative(&self) -> PathBuf {
        let mut path: PathBuf = self.dirs.iter().collect();
        path.push(format!("{}.{SWIFT_EXTENSION}", self.name));
        path
    }
}

impl fmt::Display for ClassPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.relative().display())
    }
}
