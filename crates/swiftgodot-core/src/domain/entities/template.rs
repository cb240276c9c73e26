//! Template entities and placeholder substitution.
//!
//! Templates use Xcode-style placeholders: `<#ProjectName#>` in a file's
//! path or content is replaced by the value of the `ProjectName` variable.
//! Unknown placeholders are left as they are.

use std::collections::{BTreeMap, HashSet};

use chrono::Datelike;

use super::common::{Permissions, RelativePath};
use crate::domain::error::DomainError;

pub const PROJECT_NAME_VAR: &str = "ProjectName";
pub const CLASS_NAME_VAR: &str = "ClassName";
pub const YEAR_VAR: &str = "Year";

/// Template content, either compiled into the binary or loaded at run time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    Static(&'static str),
    Owned(String),
}

impl TemplateSource {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Static(s) => s,
            Self::Owned(s) => s,
        }
    }
}

impl From<&'static str> for TemplateSource {
    fn from(s: &'static str) -> Self {
        Self::Static(s)
    }
}

impl From<String> for TemplateSource {
    fn from(s: String) -> Self {
        Self::Owned(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFile {
    /// Path relative to the project root; may contain placeholders.
    pub path: RelativePath,
    pub content: TemplateSource,
    pub permissions: Permissions,
}

/// The tree copied by `swiftgodot init`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectTemplate {
    name: String,
    directories: Vec<RelativePath>,
    files: Vec<TemplateFile>,
}

impl ProjectTemplate {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            directories: Vec::new(),
            files: Vec::new(),
        }
    }

    pub fn with_directory(mut self, path: RelativePath) -> Self {
        self.directories.push(path);
        self
    }

    pub fn with_file(mut self, path: RelativePath, content: impl Into<TemplateSource>) -> Self {
        self.files.push(TemplateFile {
            path,
            content: content.into(),
            permissions: Permissions::default(),
        });
        self
    }

    pub fn add_file(&mut self, file: TemplateFile) {
        self.files.push(file);
    }

    pub fn add_directory(&mut self, path: RelativePath) {
        self.directories.push(path);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn directories(&self) -> &[RelativePath] {
        &self.directories
    }

    pub fn files(&self) -> &[TemplateFile] {
        &self.files
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.files.is_empty() {
            return Err(DomainError::EmptyTemplate {
                template: self.name.clone(),
            });
        }
        let mut seen = HashSet::new();
        let paths = self
            .directories
            .iter()
            .chain(self.files.iter().map(|f| &f.path));
        for path in paths {
            if !seen.insert(path) {
                return Err(DomainError::DuplicatePath {
                    path: path.to_string(),
                });
            }
        }
        Ok(())
    }
}

/// The Swift source written by `swiftgodot new class`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassTemplate {
    content: TemplateSource,
}

impl ClassTemplate {
    pub fn new(content: impl Into<TemplateSource>) -> Self {
        Self {
            content: content.into(),
        }
    }

    pub fn content(&self) -> &str {
        self.content.as_str()
    }
}

/// Variables available to placeholders.
///
/// `Year` is always defined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderContext {
    variables: BTreeMap<String, String>,
}

impl Default for RenderContext {
    fn default() -> Self {
        let mut variables = BTreeMap::new();
        variables.insert(YEAR_VAR.to_string(), chrono::Local::now().year().to_string());
        Self { variables }
    }
}

impl RenderContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_project(name: impl Into<String>) -> Self {
        Self::new().with_variable(PROJECT_NAME_VAR, name)
    }

    pub fn for_class(project: impl Into<String>, class: impl Into<String>) -> Self {
        Self::for_project(project).with_variable(CLASS_NAME_VAR, class)
    }

    pub fn with_variable(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    /// Replace every `<#Key#>` whose key is defined.
    pub fn render(&self, template: &str) -> String {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;
        while let Some(start) = rest.find("<#") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            match after.find("#>") {
                Some(end) => match self.get(&after[..end]) {
                    Some(value) => {
                        out.push_str(value);
                        rest = &after[end + 2..];
                    }
                    None => {
                        out.push_str("<#");
                        rest = after;
                    }
                },
                None => {
                    out.push_str(&rest[start..]);
                    rest = "";
                }
            }
        }
        out.push_str(rest);
        out
    }

    /// Substitute placeholders in a template path.  The rendered path must
    /// still be relative, so a variable cannot smuggle in `..`.
    pub fn render_path(&self, path: &RelativePath) -> Result<RelativePath, DomainError> {
        RelativePath::try_new(self.render(path.as_str()))
    }
}
