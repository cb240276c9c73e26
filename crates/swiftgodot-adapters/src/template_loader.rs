//! Templates loaded from a local directory.
//!
//! # Directory layout expected
//!
//! ```text
//! my-templates/
//! ├── template.toml               ← optional manifest
//! ├── project/                    ← copied by `swiftgodot init`
//! │   ├── project.godot
//! │   ├── bin/<#ProjectName#>.gdextension
//! │   └── src/
//! │       ├── Package.swift
//! │       └── Sources/<#ProjectName#>/<#ProjectName#>.swift
//! └── class/
//!     └── ClassTemplate.swift     ← used by `swiftgodot new class`
//! ```
//!
//! Either half may be missing, in which case the built-in template is used
//! for that half.
//!
//! # `template.toml` format
//!
//! ```toml
//! [template]
//! name = "my-game"
//!
//! # Marks files as executable after they are written.
//! [[files]]
//! path       = "tools/export.sh"
//! executable = true
//! ```

use std::{
    collections::HashSet,
    fs, io,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use swiftgodot_core::{
    application::ports::TemplateStore,
    domain::{ClassTemplate, DomainError, Permissions, ProjectTemplate, RelativePath, TemplateFile},
    error::ForgeResult,
};

use crate::builtin_templates;

pub const MANIFEST_FILE: &str = "template.toml";
pub const PROJECT_DIR: &str = "project";
pub const CLASS_TEMPLATE_FILE: &str = "class/ClassTemplate.swift";

#[derive(Debug, Default, Deserialize)]
pub struct TemplateManifest {
    #[serde(default)]
    pub template: TemplateSection,
    #[serde(default)]
    pub files: Vec<FileEntry>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TemplateSection {
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct FileEntry {
    pub path: String,
    #[serde(default)]
    pub executable: bool,
}

/// Reasons a template directory cannot be loaded.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("directory walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("failed to parse '{path}': {source}")]
    Manifest {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("template file '{0}' is not UTF-8 text")]
    NotText(PathBuf),
}

impl From<LoadError> for DomainError {
    fn from(err: LoadError) -> Self {
        DomainError::InvalidTemplate(err.to_string())
    }
}

/// A [`TemplateStore`] backed by a directory on disk.
#[derive(Debug, Clone)]
pub struct DirectoryTemplateLoader {
    dir: PathBuf,
}

impl DirectoryTemplateLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn manifest(&self) -> Result<TemplateManifest, LoadError> {
        let path = self.dir.join(MANIFEST_FILE);
        if !path.is_file() {
            return Ok(TemplateManifest::default());
        }
        let raw = read_text(&path)?;
        toml::from_str(&raw).map_err(|source| LoadError::Manifest { path, source })
    }

    /// Load `<dir>/project`, or `None` if it does not exist.
    #[instrument(skip(self), fields(dir = %self.dir.display()))]
    pub fn load_project(&self) -> Result<Option<ProjectTemplate>, DomainError> {
        let root = self.dir.join(PROJECT_DIR);
        if !root.is_dir() {
            debug!("no project directory, using built-in project template");
            return Ok(None);
        }

        let manifest = self.manifest()?;
        let executables: HashSet<String> = manifest
            .files
            .iter()
            .filter(|f| f.executable)
            .map(|f| normalize_path(&f.path))
            .collect();

        let name = manifest
            .template
            .name
            .unwrap_or_else(|| self.dir.display().to_string());
        let mut template = ProjectTemplate::new(name);

        for entry in WalkDir::new(&root).min_depth(1).sort_by_file_name() {
            let entry = entry.map_err(LoadError::from)?;
            let rel = entry.path().strip_prefix(&root).map_err(|_| {
                DomainError::InvalidTemplate(format!(
                    "failed to relativise '{}'",
                    entry.path().display()
                ))
            })?;
            let rel_str = normalize_path(&rel.to_string_lossy());

            if entry.file_type().is_dir() {
                template.add_directory(RelativePath::try_new(&rel_str)?);
                continue;
            }
            if !entry.file_type().is_file() {
                warn!(path = %entry.path().display(), "skipping non-regular file");
                continue;
            }

            let content = read_text(entry.path())?;
            let permissions = if executables.contains(&rel_str) {
                Permissions::executable()
            } else {
                Permissions::read_write()
            };
            template.add_file(TemplateFile {
                path: RelativePath::try_new(&rel_str)?,
                content: content.into(),
                permissions,
            });
        }

        template.validate()?;
        debug!(files = template.files().len(), "loaded project template");
        Ok(Some(template))
    }

    /// Load `<dir>/class/ClassTemplate.swift`, or `None` if it does not exist.
    pub fn load_class(&self) -> Result<Option<ClassTemplate>, DomainError> {
        let path = self.dir.join(CLASS_TEMPLATE_FILE);
        if !path.is_file() {
            debug!("no class template, using built-in class template");
            return Ok(None);
        }
        Ok(Some(ClassTemplate::new(read_text(&path)?)))
    }
}

impl TemplateStore for DirectoryTemplateLoader {
    fn project_template(&self) -> ForgeResult<ProjectTemplate> {
        match self.load_project()? {
            Some(template) => Ok(template),
            None => Ok(builtin_templates::project_template()?),
        }
    }

    fn class_template(&self) -> ForgeResult<ClassTemplate> {
        Ok(self
            .load_class()?
            .unwrap_or_else(builtin_templates::class_template))
    }
}

fn read_text(path: &Path) -> Result<String, LoadError> {
    let bytes = fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    String::from_utf8(bytes).map_err(|_| LoadError::NotText(path.to_path_buf()))
}

/// Forward slashes so manifest paths compare equal on every platform.
fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn loads_project_tree_and_class() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path();
        write(dir, "project/src/Package.swift", "Package(name: \"<#ProjectName#>\")");
        write(dir, "project/tools/export.sh", "#!/bin/sh\n");
        write(dir, "class/ClassTemplate.swift", "class <#ClassName#> {}");
        write(
            dir,
            "template.toml",
            "[template]\nname = \"mine\"\n\n[[files]]\npath = \"tools/export.sh\"\nexecutable = true\n",
        );

        let loader = DirectoryTemplateLoader::new(dir);
        let template = loader.project_template().unwrap();
        assert_eq!(template.name(), "mine");
        assert_eq!(template.files().len(), 2);

        let script = template
            .files()
            .iter()
            .find(|f| f.path.as_str() == "tools/export.sh")
            .unwrap();
        assert!(script.permissions.executable_flag());
        assert!(template.directories().iter().any(|d| d.as_str() == "src"));

        assert_eq!(
            loader.class_template().unwrap().content(),
            "class <#ClassName#> {}"
        );
    }

    #[test]
    fn falls_back_to_builtins() {
        let temp = TempDir::new().unwrap();
        let loader = DirectoryTemplateLoader::new(temp.path());

        assert_eq!(
            loader.project_template().unwrap().name(),
            builtin_templates::PROJECT_TEMPLATE_NAME
        );
        assert_eq!(
            loader.class_template().unwrap(),
            builtin_templates::class_template()
        );
    }

    #[test]
    fn malformed_manifest_is_an_error() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "project/a.txt", "a");
        write(temp.path(), "template.toml", "[template\n");

        let err = DirectoryTemplateLoader::new(temp.path())
            .load_project()
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidTemplate(msg) if msg.contains("template.toml")));
    }

    #[test]
    fn empty_project_directory_is_an_error() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("project")).unwrap();

        assert!(matches!(
            DirectoryTemplateLoader::new(temp.path()).load_project(),
            Err(DomainError::EmptyTemplate { .. })
        ));
    }

    #[test]
    fn normalizes_separators() {
        assert_eq!(normalize_path(r"src\Sources\Demo.swift"), "src/Sources/Demo.swift");
    }
}
