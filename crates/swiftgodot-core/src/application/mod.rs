//! Application layer.
//!
//! This layer contains:
//! - **Services**: use case orchestration (init, new class, build, name)
//! - **Ports**: interface definitions (traits) for external dependencies
//! - **Errors**: application-specific error types
//!
//! Services coordinate the domain layer and the patching engine but hold
//! no rules of their own about names or layouts.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{
    BuildReport, BuildService, BuildSettings, ClassReport, ClassService, InitOptions, InitReport,
    InitService, PatchSettings, ProjectService,
};

pub use ports::{BuildRequest, BuildRunner, Filesystem, TemplateRenderer, TemplateStore};

pub use error::ApplicationError;
