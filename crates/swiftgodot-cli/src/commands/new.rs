//! `swiftgodot new class`: add a `@Godot` class to the project.

use serde_json::json;
use tracing::instrument;

use swiftgodot_adapters::{LocalFilesystem, PlaceholderRenderer};
use swiftgodot_core::application::{ClassReport, ClassService};

use crate::{
    cli::{GlobalArgs, NewClassArgs, NewCommands, OutputFormat},
    commands::{resolve_layout, template_store},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

pub fn execute(
    cmd: NewCommands,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    match cmd {
        NewCommands::Class(args) => new_class(args, &global, config, &output),
    }
}

#[instrument(skip_all, fields(path = %args.path))]
fn new_class(
    args: NewClassArgs,
    global: &GlobalArgs,
    config: AppConfig,
    output: &OutputManager,
) -> CliResult<()> {
    let layout = resolve_layout(global)?;

    let service = ClassService::new(
        template_store(&config)?,
        Box::new(PlaceholderRenderer::new()),
        Box::new(LocalFilesystem::new()),
    )
    .with_patch_settings(config.patch);

    let report = service.create_class(&layout, &args.path)?;

    if output.format() == OutputFormat::Json {
        return Ok(output.json(&report_json(&report))?);
    }

    output.success(&format!(
        "Created class {} at {}",
        report.class_name,
        report.file.display()
    ))?;
    if report.registered {
        output.success(&format!(
            "Registered {}.self in {}",
            report.class_name,
            report.init_file.display()
        ))?;
    } else {
        output.warning(&format!(
            "{} is already registered in {}; left it unchanged",
            report.class_name,
            report.init_file.display()
        ))?;
    }
    Ok(())
}

fn report_json(report: &ClassReport) -> serde_json::Value {
    json!({
        "project": report.project,
        "class": report.class_name,
        "file": report.file.display().to_string(),
        "initializer": report.init_file.display().to_string(),
        "registered": report.registered,
    })
}
