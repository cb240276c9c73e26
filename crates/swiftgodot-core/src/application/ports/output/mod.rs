//! Driven (output) ports - implemented by infrastructure.
//!
//! The `swiftgodot-adapters` crate provides implementations.

use std::path::{Path, PathBuf};

use crate::domain::{ClassTemplate, ProjectStructure, ProjectTemplate, RenderContext};
use crate::error::ForgeResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `swiftgodot_adapters::filesystem::LocalFilesystem` (production)
/// - `swiftgodot_adapters::filesystem::MemoryFilesystem` (testing)
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> ForgeResult<()>;

    /// Write content to a file, replacing it if present.
    fn write_file(&self, path: &Path, content: &str) -> ForgeResult<()>;

    fn read_file(&self, path: &Path) -> ForgeResult<String>;

    /// Copy a file, overwriting the destination.
    fn copy_file(&self, from: &Path, to: &Path) -> ForgeResult<()>;

    fn set_permissions(&self, path: &Path, executable: bool) -> ForgeResult<()>;

    fn exists(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> ForgeResult<()>;
}

/// Port for template retrieval.
///
/// Implemented by:
/// - `swiftgodot_adapters::template_store::InMemoryStore` (built-in templates)
/// - `swiftgodot_adapters::template_loader::DirectoryTemplateLoader` (user templates)
pub trait TemplateStore: Send + Sync {
    fn project_template(&self) -> ForgeResult<ProjectTemplate>;

    fn class_template(&self) -> ForgeResult<ClassTemplate>;
}

/// Port for template rendering.
pub trait TemplateRenderer: Send + Sync {
    /// Render a project template into a structure rooted at `output_root`.
    fn render_project(
        &self,
        template: &ProjectTemplate,
        context: &RenderContext,
        output_root: &Path,
    ) -> ForgeResult<ProjectStructure>;

    fn render_text(&self, text: &str, context: &RenderContext) -> ForgeResult<String>;
}

/// One invocation of the Swift build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildRequest {
    pub program: String,
    pub package_path: PathBuf,
    pub configuration: String,
}

impl BuildRequest {
    /// Arguments passed to `program`.
    pub fn args(&self) -> Vec<String> {
        vec![
            "build".into(),
            "--configuration".into(),
            self.configuration.clone(),
            "--package-path".into(),
            self.package_path.display().to_string(),
        ]
    }
}

/// Port for running the Swift toolchain.
///
/// Implemented by `swiftgodot_adapters::build::SwiftBuildRunner`.
pub trait BuildRunner: Send + Sync {
    /// Run the build to completion. Compiler output goes to the user.
    fn build(&self, request: &BuildRequest) -> ForgeResult<()>;
}
