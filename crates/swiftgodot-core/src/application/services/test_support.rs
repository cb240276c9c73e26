//! In-process fakes shared by the service tests.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use mockall::mock;

use crate::{
    application::{
        ApplicationError,
        ports::{BuildRequest, BuildRunner, Filesystem, TemplateRenderer, TemplateStore},
    },
    domain::{ClassTemplate, ProjectStructure, ProjectTemplate, RenderContext},
    error::ForgeResult,
};

mock! {
    pub Runner {}
    impl BuildRunner for Runner {
        fn build(&self, request: &BuildRequest) -> ForgeResult<()>;
    }
}

mock! {
    pub Store {}
    impl TemplateStore for Store {
        fn project_template(&self) -> ForgeResult<ProjectTemplate>;
        fn class_template(&self) -> ForgeResult<ClassTemplate>;
    }
}

#[derive(Default)]
struct State {
    files: BTreeMap<PathBuf, String>,
    dirs: BTreeSet<PathBuf>,
    fail_writes_under: Option<PathBuf>,
}

/// Filesystem kept in a map. Clones share state so a test can inspect it
/// after handing a boxed copy to a service.
#[derive(Clone, Default)]
pub struct FakeFilesystem {
    state: Arc<Mutex<State>>,
}

impl FakeFilesystem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(self, path: impl Into<PathBuf>, content: &str) -> Self {
        let path = path.into();
        {
            let mut state = self.state.lock().unwrap();
            add_parents(&mut state.dirs, &path);
            state.files.insert(path, content.to_string());
        }
        self
    }

    pub fn with_dir(self, path: impl Into<PathBuf>) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            let path = path.into();
            add_parents(&mut state.dirs, &path);
            state.dirs.insert(path);
        }
        self
    }

    /// Make every write below `path` fail.
    pub fn failing_writes_under(self, path: impl Into<PathBuf>) -> Self {
        self.state.lock().unwrap().fail_writes_under = Some(path.into());
        self
    }

    pub fn file(&self, path: impl AsRef<Path>) -> Option<String> {
        self.state.lock().unwrap().files.get(path.as_ref()).cloned()
    }

    pub fn file_count(&self) -> usize {
        self.state.lock().unwrap().files.len()
    }
}

fn add_parents(dirs: &mut BTreeSet<PathBuf>, path: &Path) {
    for ancestor in path.ancestors().skip(1) {
        if ancestor.as_os_str().is_empty() {
            break;
        }
        dirs.insert(ancestor.to_path_buf());
    }
}

fn missing(path: &Path) -> crate::error::ForgeError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: "not found".into(),
    }
    .into()
}

impl Filesystem for FakeFilesystem {
    fn create_dir_all(&self, path: &Path) -> ForgeResult<()> {
        let mut state = self.state.lock().unwrap();
        add_parents(&mut state.dirs, path);
        state.dirs.insert(path.to_path_buf());
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> ForgeResult<()> {
        let mut state = self.state.lock().unwrap();
        if let Some(prefix) = &state.fail_writes_under {
            if path.starts_with(prefix) {
                return Err(ApplicationError::FilesystemError {
                    path: path.to_path_buf(),
                    reason: "disk full".into(),
                }
                .into());
            }
        }
        state.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn read_file(&self, path: &Path) -> ForgeResult<String> {
        self.file(path).ok_or_else(|| missing(path))
    }

    fn copy_file(&self, from: &Path, to: &Path) -> ForgeResult<()> {
        let content = self.read_file(from)?;
        self.write_file(to, &content)
    }

    fn set_permissions(&self, _path: &Path, _executable: bool) -> ForgeResult<()> {
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        let state = self.state.lock().unwrap();
        state.files.contains_key(path) || state.dirs.contains(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.state.lock().unwrap().dirs.contains(path)
    }

    fn remove_dir_all(&self, path: &Path) -> ForgeResult<()> {
        let mut state = self.state.lock().unwrap();
        state.files.retain(|p, _| !p.starts_with(path));
        state.dirs.retain(|p| !p.starts_with(path));
        Ok(())
    }
}

/// Renders with `RenderContext` directly.
pub struct ContextRenderer;

impl TemplateRenderer for ContextRenderer {
    fn render_project(
        &self,
        template: &ProjectTemplate,
        context: &RenderContext,
        output_root: &Path,
    ) -> ForgeResult<ProjectStructure> {
        let mut structure = ProjectStructure::new(output_root);
        for dir in template.directories() {
            let path = context.render_path(dir)?;
            structure.add_directory(path);
        }
        for file in template.files() {
            let path = context.render_path(&file.path)?;
            structure.add_file(path, context.render(file.content.as_str()), file.permissions);
        }
        Ok(structure)
    }

    fn render_text(&self, text: &str, context: &RenderContext) -> ForgeResult<String> {
        Ok(context.render(text))
    }
}
