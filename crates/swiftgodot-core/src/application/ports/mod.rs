//! Application ports (traits) for external dependencies.
//!
//! Ports define what the application needs from the outside world.
//! Adapters in `swiftgodot-adapters` implement them.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: called by services, implemented by infrastructure
//!   - `Filesystem`: file operations
//!   - `TemplateStore`: project and class templates
//!   - `TemplateRenderer`: placeholder substitution
//!   - `BuildRunner`: the Swift toolchain

pub mod output;

pub use output::{BuildRequest, BuildRunner, Filesystem, TemplateRenderer, TemplateStore};
