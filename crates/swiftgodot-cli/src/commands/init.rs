//! `swiftgodot init`: create a new SwiftGodot project.
//!
//! Responsibility: resolve the destination, confirm destructive `--force`
//! runs, call [`InitService`], and display results.

use std::io::IsTerminal as _;
use std::path::Path;

use serde_json::json;
use tracing::{info, instrument};

use swiftgodot_adapters::{LocalFilesystem, PlaceholderRenderer};
use swiftgodot_core::application::{InitOptions, InitReport, InitService};

use crate::{
    cli::{GlobalArgs, InitArgs, OutputFormat},
    commands::{current_dir, template_store},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute `swiftgodot init`.
///
/// 1. Resolve `./NAME`
/// 2. Ask before replacing an existing directory with `--force`
/// 3. Render the project template and write it (or list it on `--dry-run`)
/// 4. Print next-steps guidance
#[instrument(skip_all, fields(project = %args.name))]
pub fn execute(
    args: InitArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let parent = current_dir()?;
    let destination = parent.join(&args.name);

    if args.force && !args.dry_run && destination.exists() && !args.yes {
        if global.quiet || !std::io::stdin().is_terminal() {
            return Err(CliError::InvalidInput {
                message: format!(
                    "--force would replace {}; pass --yes to confirm",
                    destination.display()
                ),
                source: None,
            });
        }
        if !confirm_replace(&destination)? {
            return Err(CliError::Cancelled);
        }
    }

    let service = InitService::new(
        template_store(&config)?,
        Box::new(PlaceholderRenderer::new()),
        Box::new(LocalFilesystem::new()),
    );
    let options = InitOptions {
        force: args.force,
        dry_run: args.dry_run,
    };

    if !args.dry_run && output.format() != OutputFormat::Json {
        output.header(&format!("Creating '{}'...", args.name))?;
    }
    let report = service.init(&args.name, &parent, options)?;

    if output.format() == OutputFormat::Json {
        return Ok(output.json(&report_json(&report))?);
    }

    if args.dry_run {
        output.info(&format!(
            "Dry run: would create '{}' at {}",
            args.name,
            report.root.display()
        ))?;
        if destination.exists() && !args.force {
            output.warning("The destination already exists; init would fail without --force")?;
        }
        for dir in &report.directories {
            output.print(&format!("  {}/", dir.display()))?;
        }
        for file in &report.files {
            output.print(&format!("  {}", file.display()))?;
        }
        return Ok(());
    }

    info!(root = %report.root.display(), files = report.files.len(), "Project written");
    output.success(&format!(
        "Project '{}' created at {}",
        args.name,
        report.root.display()
    ))?;

    if !global.quiet {
        output.print("")?;
        output.print("Next steps:")?;
        output.print(&format!("  cd {}/src", args.name))?;
        output.print("  swiftgodot new class Player")?;
        output.print("  swiftgodot build")?;
    }

    Ok(())
}

fn report_json(report: &InitReport) -> serde_json::Value {
    let list = |paths: &[std::path::PathBuf]| -> Vec<String> {
        paths.iter().map(|p| p.display().to_string()).collect()
    };
    json!({
        "root": report.root.display().to_string(),
        "written": report.written,
        "directories": list(&report.directories),
        "files": list(&report.files),
    })
}

#[cfg(feature = "interactive")]
fn confirm_replace(path: &Path) -> CliResult<bool> {
    dialoguer::Confirm::new()
        .with_prompt(format!("Replace everything in {}?", path.display()))
        .default(false)
        .interact()
        .map_err(|e| CliError::IoError {
            message: "failed to read confirmation input".into(),
            source: std::io::Error::other(e),
        })
}

#[cfg(not(feature = "interactive"))]
fn confirm_replace(_path: &Path) -> CliResult<bool> {
    Err(CliError::FeatureNotAvailable {
        feature: "interactive",
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn json_report_lists_entries() {
        let report = InitReport {
            root: PathBuf::from("/games/Demo"),
            directories: vec![PathBuf::from("bin")],
            files: vec![PathBuf::from("project.godot"), PathBuf::from("src/Package.swift")],
            written: false,
        };
        let value = report_json(&report);
        assert_eq!(value["root"], "/games/Demo");
        assert_eq!(value["written"], false);
        assert_eq!(value["directories"][0], "bin");
        assert_eq!(value["files"][1], "src/Package.swift");
    }
}
