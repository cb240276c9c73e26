//! `<#Key#>` placeholder substitution renderer.

use std::path::Path;

use swiftgodot_core::{
    application::{ApplicationError, ports::TemplateRenderer},
    domain::{DomainValidator as validator, ProjectStructure, ProjectTemplate, RenderContext},
    error::ForgeResult,
};
use tracing::{debug, instrument};

/// Substitutes placeholders in file contents and in every path component.
///
/// A placeholder left unresolved in a path is an error: it would otherwise
/// produce a file literally named `<#ProjectName#>.swift`.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlaceholderRenderer;

impl PlaceholderRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateRenderer for PlaceholderRenderer {
    #[instrument(skip_all, fields(template = template.name()))]
    fn render_project(
        &self,
        template: &ProjectTemplate,
        context: &RenderContext,
        output_root: &Path,
    ) -> ForgeResult<ProjectStructure> {
        validator::validate_template(template)?;

        let mut structure = ProjectStructure::new(output_root);

        for dir in template.directories() {
            let path = context.render_path(dir)?;
            check_resolved(path.as_str())?;
            structure.add_directory(path);
        }

        for file in template.files() {
            let path = context.render_path(&file.path)?;
            check_resolved(path.as_str())?;
            let content = context.render(file.content.as_str());
            structure.add_file(path, content, file.permissions);
        }

        validator::validate_project_structure(&structure)?;
        debug!(entries = structure.len(), "rendered project template");

        Ok(structure)
    }

    fn render_text(&self, text: &str, context: &RenderContext) -> ForgeResult<String> {
        Ok(context.render(text))
    }
}

fn check_resolved(path: &str) -> ForgeResult<()> {
    if path.contains("<#") && path.contains("#>") {
        return Err(ApplicationError::RenderingFailed {
            reason: format!("unresolved placeholder in path '{path}'"),
        }
        .into());
    }
    Ok(())
}
