//! `swiftgodot config`: inspect and initialise configuration.

use std::path::Path;

use crate::{
    cli::{ConfigCommands, GlobalArgs, OutputFormat},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
pub fn execute(
    cmd: ConfigCommands,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    match cmd {
        ConfigCommands::Get { key } => {
            let value = get_config_value(&config, &key)?;
            output.result(&value)?;
        }

        ConfigCommands::List => {
            if output.format() == OutputFormat::Json {
                output.json(&config)?;
            } else {
                output.header("Current Configuration:")?;
                output.print(&to_toml(&config)?)?;
            }
        }

        ConfigCommands::Path => {
            let path = global.config.unwrap_or_else(AppConfig::config_path);
            output.result(&path.display().to_string())?;
        }

        ConfigCommands::Init { force } => {
            let path = global.config.unwrap_or_else(AppConfig::config_path);
            if path.exists() && !force {
                output.warning(&format!(
                    "Config already exists at {}  (use --force to overwrite)",
                    path.display(),
                ))?;
                return Ok(());
            }
            write_default_config(&path)?;
            output.success(&format!("Configuration created at {}", path.display()))?;
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

fn to_toml(config: &AppConfig) -> CliResult<String> {
    toml::to_string_pretty(config).map_err(|e| CliError::ConfigError {
        message: format!("Failed to serialise config: {e}"),
        source: Some(Box::new(e)),
    })
}

fn write_default_config(path: &Path) -> CliResult<()> {
    let text = to_toml(&AppConfig::default())?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).with_cli_context(|| {
            format!("Failed to create config directory '{}'", parent.display())
        })?;
    }
    std::fs::write(path, text)
        .with_cli_context(|| format!("Failed to write config to '{}'", path.display()))
}

fn get_config_value(config: &AppConfig, key: &str) -> CliResult<String> {
    let path_or_empty =
        |p: &Option<std::path::PathBuf>| p.as_ref().map(|p| p.display().to_string()).unwrap_or_default();

    match key {
        "patch.manifest.callee" => Ok(config.patch.manifest.callee.clone()),
        "patch.manifest.label" => Ok(config.patch.manifest.label.clone()),
        "patch.registry.macro_name" => Ok(config.patch.registry.macro_name.clone()),
        "patch.registry.label" => Ok(config.patch.registry.label.clone()),
        "patch.registry.accessor" => Ok(config.patch.registry.accessor.clone()),
        "build.program" => Ok(config.build.program.clone()),
        "build.configuration" => Ok(config.build.configuration.clone()),
        "build.library_extension" => Ok(config.build.library_extension.clone()),
        "templates.local_path" => Ok(path_or_empty(&config.templates.local_path)),
        "output.no_color" => Ok(config.output.no_color.to_string()),
        "output.format" => Ok(config.output.format.clone()),
        "logging.file" => Ok(path_or_empty(&config.logging.file)),
        _ => Err(CliError::ConfigError {
            message: format!("Unknown config key: '{key}'"),
            source: None,
        }),
    }
}
