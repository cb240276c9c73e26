//! Command handlers.
//!
//! Each handler translates parsed arguments into a call on one core
//! service, wired to the real adapters, and renders the result.

use std::path::PathBuf;

use tracing::debug;

use swiftgodot_adapters::{DirectoryTemplateLoader, InMemoryStore};
use swiftgodot_core::{application::ports::TemplateStore, domain::ProjectLayout};

use crate::{
    cli::GlobalArgs,
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
};

pub mod build;
pub mod completions;
pub mod config;
pub mod init;
pub mod name;
pub mod new;

fn current_dir() -> CliResult<PathBuf> {
    std::env::current_dir().with_cli_context(|| "cannot determine the working directory")
}

/// Locate the Swift package and Godot project from the working directory.
pub(crate) fn resolve_layout(global: &GlobalArgs) -> CliResult<ProjectLayout> {
    let layout = ProjectLayout::resolve(&current_dir()?, global.run_from_godot);
    debug!(
        swift_dir = %layout.swift_dir().display(),
        godot_dir = %layout.godot_dir().display(),
        "layout resolved"
    );

    if !layout.swift_dir().is_dir() {
        return Err(CliError::MissingDirectory {
            path: layout.swift_dir().to_path_buf(),
            what: "Swift package directory",
        });
    }
    Ok(layout)
}

/// The configured local template directory, or the built-in templates.
pub(crate) fn template_store(config: &AppConfig) -> CliResult<Box<dyn TemplateStore>> {
    match config.template_dir() {
        Some(dir) if !dir.is_dir() => Err(CliError::ConfigError {
            message: format!(
                "templates.local_path '{}' is not a directory",
                dir.display()
            ),
            source: None,
        }),
        Some(dir) => {
            debug!(dir = %dir.display(), "using local templates");
            Ok(Box::new(DirectoryTemplateLoader::new(dir)))
        }
        None => Ok(Box::new(InMemoryStore::with_builtin()?)),
    }
}
