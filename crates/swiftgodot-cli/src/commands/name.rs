//! `swiftgodot name`: print the project name from `Package.swift`.

use serde_json::json;

use swiftgodot_adapters::LocalFilesystem;
use swiftgodot_core::application::ProjectService;

use crate::{
    cli::{GlobalArgs, NameArgs, NameFormat, OutputFormat},
    commands::resolve_layout,
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

pub fn execute(
    args: NameArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let layout = resolve_layout(&global)?;
    let service = ProjectService::new(Box::new(LocalFilesystem::new()))
        .with_patterns(config.patch.manifest, config.patch.registry);

    let name = service.project_name(&layout)?;
    let classes = if args.classes {
        Some(service.registered_classes(&layout)?)
    } else {
        None
    };

    if args.format == NameFormat::Json || output.format() == OutputFormat::Json {
        let mut value = json!({ "name": name });
        if let Some(classes) = classes {
            value["classes"] = json!(classes);
        }
        output.json(&value)?;
        return Ok(());
    }

    output.result(&name)?;
    for class in classes.iter().flatten() {
        output.result(&format!("  {class}"))?;
    }
    Ok(())
}
