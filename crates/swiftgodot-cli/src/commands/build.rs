//! `swiftgodot build`: compile the package and install it into `bin/`.

use serde_json::json;
use tracing::instrument;

use swiftgodot_adapters::{LocalFilesystem, SwiftBuildRunner};
use swiftgodot_core::application::{BuildService, BuildSettings};

use crate::{
    cli::{BuildArgs, GlobalArgs, OutputFormat},
    commands::resolve_layout,
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all)]
pub fn execute(
    args: BuildArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let layout = resolve_layout(&global)?;
    let settings = settings_for(&args, config.build);

    // Compiler progress goes to stdout; keep it unless the user asked for
    // quiet or machine-readable output.  Diagnostics on stderr always show.
    let quiet_compiler =
        global.quiet || global.verbose == 0 || output.format() == OutputFormat::Json;
    let runner = SwiftBuildRunner::new().quiet(quiet_compiler);

    let service = BuildService::new(Box::new(LocalFilesystem::new()), Box::new(runner))
        .with_settings(settings.clone())
        .with_manifest_pattern(config.patch.manifest);

    let spinner = if quiet_compiler {
        output.spinner(&format!("Building ({})", settings.configuration))
    } else {
        indicatif::ProgressBar::hidden()
    };
    let result = service.build(&layout);
    spinner.finish_and_clear();
    let report = result?;

    if output.format() == OutputFormat::Json {
        let installed: Vec<String> = report
            .installed
            .iter()
            .map(|p| p.display().to_string())
            .collect();
        return Ok(output.json(&json!({
            "project": report.project,
            "configuration": settings.configuration,
            "installed": installed,
        }))?);
    }

    output.success(&format!(
        "Built {} ({})",
        report.project, settings.configuration
    ))?;
    for path in &report.installed {
        output.print(&format!("  installed {}", path.display()))?;
    }
    Ok(())
}

/// Command-line flags take precedence over the configured build settings.
fn settings_for(args: &BuildArgs, mut settings: BuildSettings) -> BuildSettings {
    if let Some(configuration) = &args.configuration {
        settings.configuration = configuration.clone();
    }
    if let Some(program) = &args.swift {
        settings.program = program.clone();
    }
    settings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let args = BuildArgs {
            configuration: Some("release".into()),
            swift: None,
        };
        let configured = BuildSettings {
            program: "/opt/swift/bin/swift".into(),
            ..Default::default()
        };
        let settings = settings_for(&args, configured);
        assert_eq!(settings.configuration, "release");
        assert_eq!(settings.program, "/opt/swift/bin/swift");
    }

    #[test]
    fn config_is_kept_without_flags() {
        let args = BuildArgs {
            configuration: None,
            swift: None,
        };
        assert_eq!(settings_for(&args, BuildSettings::default()), BuildSettings::default());
    }
}
