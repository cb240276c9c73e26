//! Infrastructure adapters for swiftgodot.
//!
//! This crate implements the ports defined in
//! `swiftgodot_core::application::ports`. All disk and process access lives
//! here.

pub mod build;
pub mod builtin_templates;
pub mod filesystem;
pub mod renderer;
pub mod template_loader;
pub mod template_store;

// Re-export commonly used adapters
pub use build::SwiftBuildRunner;
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use renderer::PlaceholderRenderer;
pub use template_loader::DirectoryTemplateLoader;
pub use template_store::InMemoryStore;
