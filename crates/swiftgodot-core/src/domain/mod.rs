//! Core domain layer.
//!
//! Pure logic with no I/O: templates and their placeholders, the layout of
//! a SwiftGodot project, and name validation. Filesystem and process access
//! happen through the ports in `crate::application`.

pub mod entities;
pub mod error;
pub mod layout;

mod validation;

pub use entities::{
    common::{Permissions, RelativePath},
    project_structure::{DirectoryToCreate, FileToWrite, FsEntry, ProjectStructure},
    template::{
        CLASS_NAME_VAR, ClassTemplate, PROJECT_NAME_VAR, ProjectTemplate, RenderContext,
        TemplateFile, TemplateSource, YEAR_VAR,
    },
};
pub use error::DomainError;
pub use layout::{ClassPath, ProjectLayout, host_library_extension, library_file_name};
pub use validation::DomainValidator;

pub use crate::error::ErrorCategory;
