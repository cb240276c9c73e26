//! Init Service - creates a new project from the project template.
//!
//! Workflow:
//! 1. Validate the project name
//! 2. Render the template with the name substituted in paths and contents
//! 3. Write to the filesystem, rolling back on failure

use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, TemplateRenderer, TemplateStore},
    },
    domain::{DomainValidator as validator, FsEntry, ProjectStructure, RenderContext},
    error::ForgeResult,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InitOptions {
    /// Replace an existing destination directory.
    pub force: bool,
    /// Render only; write nothing.
    pub dry_run: bool,
}

/// What `init` produced (or would produce, for a dry run).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitReport {
    pub root: PathBuf,
    pub directories: Vec<PathBuf>,
    pub files: Vec<PathBuf>,
    pub written: bool,
}

pub struct InitService {
    store: Box<dyn TemplateStore>,
    renderer: Box<dyn TemplateRenderer>,
    filesystem: Box<dyn Filesystem>,
}

impl InitService {
    pub fn new(
        store: Box<dyn TemplateStore>,
        renderer: Box<dyn TemplateRenderer>,
        filesystem: Box<dyn Filesystem>,
    ) -> Self {
        Self {
            store,
            renderer,
            filesystem,
        }
    }

    /// Create `parent/name` from the project template.
    #[instrument(
        skip_all,
        fields(project = %name, parent = %parent.display())
    )]
    pub fn init(&self, name: &str, parent: &Path, options: InitOptions) -> ForgeResult<InitReport> {
        validator::validate_project_name(name)?;

        let template = self.store.project_template()?;
        validator::validate_template(&template)?;
        info!(template = template.name(), "Template loaded");

        let context = RenderContext::for_project(name);
        let structure = self
            .renderer
            .render_project(&template, &context, &parent.join(name))?;
        validator::validate_project_structure(&structure)?;

        let report = InitReport {
            root: structure.root().to_path_buf(),
            directories: structure.directories().map(|d| d.path.as_path().to_path_buf()).collect(),
            files: structure.files().map(|f| f.path.as_path().to_path_buf()).collect(),
            written: !options.dry_run,
        };

        if options.dry_run {
            info!(entries = structure.len(), "Dry run, nothing written");
            return Ok(report);
        }

        self.write_structure(&structure, options.force)?;
        info!("Project created");
        Ok(report)
    }

    /// Write project structure to filesystem with rollback on failure.
    fn write_structure(&self, structure: &ProjectStructure, force: bool) -> ForgeResult<()> {
        let root = structure.root();
        if self.filesystem.exists(root) {
            if !force {
                return Err(ApplicationError::ProjectExists {
                    path: root.to_path_buf(),
                }
                .into());
            }
            warn!(path = %root.display(), "Replacing existing directory");
            self.filesystem.remove_dir_all(root)?;
        }

        match self.write_all(structure) {
            Ok(()) => {
                info!("Successfully wrote all files");
                Ok(())
            }
            Err(e) => {
                warn!("Write failed, attempting rollback");
                self.rollback(root);
                Err(e)
            }
        }
    }

    fn write_all(&self, structure: &ProjectStructure) -> ForgeResult<()> {
        let root = structure.root();
        self.filesystem.create_dir_all(root)?;

        for entry in structure.entries() {
            match entry {
                FsEntry::Directory(dir) => {
                    self.filesystem.create_dir_all(&root.join(&dir.path))?;
                }
                FsEntry::File(file) => {
                    let path = root.join(&file.path);
                    if let Some(parent) = path.parent() {
                        self.filesystem.create_dir_all(parent)?;
                    }

                    self.filesystem.write_file(&path, &file.content)?;

                    if file.permissions.executable_flag() {
                        self.filesystem.set_permissions(&path, true)?;
                    }
                }
            }
        }

        Ok(())
    }

    /// Best-effort rollback on failure.
    fn rollback(&self, root: &Path) {
        if let Err(e) = self.filesystem.remove_dir_all(root) {
            warn!(
                error = %e,
                path = %root.display(),
                "Rollback failed"
            );
        } else {
            info!("Rollback successful");
        }
    }
}
