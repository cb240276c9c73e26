//! SwiftGodot Core - patching engine, domain and use cases
//!
//! This crate holds everything that does not touch the outside world
//! directly, following a hexagonal (ports and adapters) layout.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          swiftgodot-cli (CLI)           │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (InitService, ClassService, Build...)  │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │       Application Ports (Traits)        │
//! │ (Filesystem, TemplateStore, BuildRunner)│
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     swiftgodot-adapters (Infra)         │
//! └─────────────────────────────────────────┘
//!
//!   syntax: lossless Swift parser + rewriter (pure, no I/O)
//!   domain: templates, project layout, validation (pure, no I/O)
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use swiftgodot_core::syntax::{extract_project_name, register_new_entry};
//!
//! let manifest = std::fs::read_to_string("Package.swift").unwrap();
//! let name = extract_project_name(&manifest).unwrap().expect("no project name");
//!
//! let path = format!("Sources/{name}/{name}.swift");
//! let init = std::fs::read_to_string(&path).unwrap();
//! std::fs::write(&path, register_new_entry(&init, "Player").unwrap()).unwrap();
//! ```

pub mod application;
pub mod domain;
pub mod error;
pub mod syntax;

pub mod prelude {
    pub use crate::application::{
        BuildService, ClassService, InitOptions, InitService, ProjectService,
        ports::{BuildRunner, Filesystem, TemplateRenderer, TemplateStore},
    };
    pub use crate::domain::{
        ClassTemplate, ProjectLayout, ProjectStructure, ProjectTemplate, RenderContext,
    };
    pub use crate::error::{ForgeError, ForgeResult};
    pub use crate::syntax::{
        ManifestPattern, RegistryPattern, extract_project_name, register_new_entry,
    };
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
