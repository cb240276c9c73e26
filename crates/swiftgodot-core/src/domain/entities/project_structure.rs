//! A rendered project tree, ready to be written under its root.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::domain::{
    entities::common::{Permissions, RelativePath},
    error::DomainError,
};

/// Output of rendering a project template: every placeholder in paths and
/// contents is already substituted.
///
/// Entry paths are [`RelativePath`]s, so nothing can be written outside
/// [`root`](Self::root).
#[derive(Debug, Clone)]
pub struct ProjectStructure {
    root: PathBuf,
    entries: Vec<FsEntry>,
}

impl ProjectStructure {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            entries: Vec::new(),
        }
    }

    pub fn add_directory(&mut self, path: RelativePath) {
        self.entries
            .push(FsEntry::Directory(DirectoryToCreate { path }));
    }

    pub fn add_file(&mut self, path: RelativePath, content: String, permissions: Permissions) {
        self.entries.push(FsEntry::File(FileToWrite {
            path,
            content,
            permissions,
        }));
    }

    /// Rejects an empty tree, the same path twice, and a file that another
    /// entry would need as its parent directory.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.entries.is_empty() {
            return Err(DomainError::InvalidTemplate(format!(
                "nothing to create under {}",
                self.root.display()
            )));
        }

        let mut seen = BTreeSet::new();
        for entry in &self.entries {
            if !seen.insert(entry.path().as_path()) {
                return Err(DomainError::DuplicatePath {
                    path: entry.path().to_string(),
                });
            }
        }

        for file in self.files() {
            let as_dir = file.path.as_path();
            if let Some(child) = self
                .entries
                .iter()
                .find(|e| e.path().as_path() != as_dir && e.path().as_path().starts_with(as_dir))
            {
                return Err(DomainError::InvalidTemplate(format!(
                    "'{}' is a file but '{}' needs it as a directory",
                    file.path,
                    child.path()
                )));
            }
        }

        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn entries(&self) -> &[FsEntry] {
        &self.entries
    }

    pub fn files(&self) -> impl Iterator<Item = &FileToWrite> {
        self.entries.iter().filter_map(|e| match e {
            FsEntry::File(f) => Some(f),
            FsEntry::Directory(_) => None,
        })
    }

    pub fn directories(&self) -> impl Iterator<Item = &DirectoryToCreate> {
        self.entries.iter().filter_map(|e| match e {
            FsEntry::Directory(d) => Some(d),
            FsEntry::File(_) => None,
        })
    }

    /// The file rendered at `path`, if any.
    pub fn file(&self, path: impl AsRef<Path>) -> Option<&FileToWrite> {
        let path = path.as_ref();
        self.files().find(|f| f.path.as_path() == path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone)]
pub enum FsEntry {
    File(FileToWrite),
    Directory(DirectoryToCreate),
}

impl FsEntry {
    pub fn path(&self) -> &RelativePath {
        match self {
            Self::File(f) => &f.path,
            Self::Directory(d) => &d.path,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FileToWrite {
    pub path: RelativePath,
    pub content: String,
    pub permissions: Permissions,
}

#[derive(Debug, Clone)]
pub struct DirectoryToCreate {
    pub path: RelativePath,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rel(path: &str) -> RelativePath {
        RelativePath::try_new(path).unwrap()
    }

    fn demo() -> ProjectStructure {
        let mut structure = ProjectStructure::new("/games/Demo");
        structure.add_directory(rel("bin"));
        structure.add_file(
            rel("src/Package.swift"),
            "let package = Package(name: \"Demo\")".into(),
            Permissions::read_write(),
        );
        structure
    }

    #[test]
    fn lookups() {
        let structure = demo();
        assert_eq!(structure.len(), 2);
        assert_eq!(structure.directories().count(), 1);
        assert!(structure.file("src/Package.swift").unwrap().content.contains("Demo"));
        assert!(structure.file("bin").is_none());
        assert!(structure.validate().is_ok());
    }

    #[test]
    fn rejects_empty_and_duplicates() {
        assert!(ProjectStructure::new("/games/Demo").validate().is_err());

        let mut structure = demo();
        structure.add_directory(rel("bin"));
        assert!(matches!(
            structure.validate(),
            Err(DomainError::DuplicatePath { path }) if path == "bin"
        ));
    }

    #[test]
    fn rejects_file_used_as_directory() {
        let mut structure = demo();
        structure.add_file(rel("src/Package.swift/extra"), String::new(), Permissions::read_write());
        assert!(matches!(
            structure.validate(),
            Err(DomainError::InvalidTemplate(msg)) if msg.contains("needs it as a directory")
        ));
    }
}
