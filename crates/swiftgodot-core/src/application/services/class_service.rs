//! Class Service - adds a Godot class to the Swift package.
//!
//! The class source is rendered from the class template and the type is
//! registered in the initializer file's `#initSwiftExtension(types: [...])`
//! list. The initializer is patched in memory before anything is written,
//! so a file the engine cannot patch leaves the project untouched.

use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, TemplateRenderer, TemplateStore},
        services::{PatchSettings, read_project_name},
    },
    domain::{ClassPath, ProjectLayout, RenderContext},
    error::ForgeResult,
    syntax::{register_new_entry_with, registered_entries},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassReport {
    pub project: String,
    pub class_name: String,
    pub file: PathBuf,
    pub init_file: PathBuf,
    /// False when the class was already registered.
    pub registered: bool,
}

pub struct ClassService {
    store: Box<dyn TemplateStore>,
    renderer: Box<dyn TemplateRenderer>,
    filesystem: Box<dyn Filesystem>,
    patch: PatchSettings,
}

impl ClassService {
    pub fn new(
        store: Box<dyn TemplateStore>,
        renderer: Box<dyn TemplateRenderer>,
        filesystem: Box<dyn Filesystem>,
    ) -> Self {
        Self {
            store,
            renderer,
            filesystem,
            patch: PatchSettings::default(),
        }
    }

    pub fn with_patch_settings(mut self, patch: PatchSettings) -> Self {
        self.patch = patch;
        self
    }

    #[instrument(skip_all, fields(class = %class_path))]
    pub fn create_class(&self, layout: &ProjectLayout, class_path: &str) -> ForgeResult<ClassReport> {
        let class_path = ClassPath::parse(class_path)?;
        let class_name = class_path.class_name().to_string();

        let project = read_project_name(self.filesystem.as_ref(), layout, &self.patch.manifest)?;

        let init_file = layout.init_file(&project);
        if !self.filesystem.exists(&init_file) {
            return Err(ApplicationError::PathNotFound {
                path: init_file,
                what: "Initializer file",
            }
            .into());
        }
        let init_text = self.filesystem.read_file(&init_file)?;
        let patched = self.patch_initializer(&init_file, &init_text, &class_name)?;

        let file = layout.classes_dir(&project).join(class_path.relative());
        if self.filesystem.exists(&file) {
            return Err(ApplicationError::FileExists { path: file }.into());
        }

        let template = self.store.class_template()?;
        let context = RenderContext::for_class(&project, &class_name);
        let source = self.renderer.render_text(template.content(), &context)?;

        if let Some(parent) = file.parent() {
            self.filesystem.create_dir_all(parent)?;
        }
        self.filesystem.write_file(&file, &source)?;
        info!(path = %file.display(), "Class file written");

        let registered = patched.is_some();
        if let Some(patched) = patched {
            self.filesystem.write_file(&init_file, &patched)?;
            info!(path = %init_file.display(), "Class registered");
        }

        Ok(ClassReport {
            project,
            class_name,
            file,
            init_file,
            registered,
        })
    }

    /// The patched initializer text, or `None` if `class_name` is already
    /// registered.
    fn patch_initializer(
        &self,
        path: &Path,
        text: &str,
        class_name: &str,
    ) -> ForgeResult<Option<String>> {
        let registry = &self.patch.registry;
        let existing = registered_entries(registry, text)
            .map_err(|e| ApplicationError::from_rewrite(path, text, e))?;

        if existing.iter().any(|entry| entry == class_name) {
            warn!(
                class = class_name,
                path = %path.display(),
                "Class is already registered, leaving the initializer unchanged"
            );
            return Ok(None);
        }

        register_new_entry_with(registry, text, class_name)
            .map(Some)
            .map_err(|e| ApplicationError::from_rewrite(path, text, e).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::test_support::{ContextRenderer, FakeFilesystem, MockStore};
    use crate::domain::ClassTemplate;
    use crate::error::{ErrorCategory, ForgeError};
    use crate::syntax::RegistryPattern;

    const MANIFEST: &str = "let package = Package(name: \"Demo\")\n";
    const INIT: &str = "import SwiftGodot\n\n#initSwiftExtension(cdecl: \"swift_entry_point\", types: [Player.self])\n";
    const INIT_PATH: &str = "/p/src/Sources/Demo/Demo.swift";

    fn layout() -> ProjectLayout {
        ProjectLayout::from_dirs("/p/src", "/p")
    }

    fn project(init: &str) -> FakeFilesystem {
        FakeFilesystem::new()
            .with_file("/p/src/Package.swift", MANIFEST)
            .with_file(INIT_PATH, init)
    }

    fn store() -> MockStore {
        let mut store = MockStore::new();
        store.expect_class_template().returning(|| {
            Ok(ClassTemplate::new(
                "import SwiftGodot\n\n@Godot\nclass <#ClassName#>: Node {\n}\n",
            ))
        });
        store
    }

    fn service(fs: &FakeFilesystem) -> ClassService {
        ClassService::new(Box::new(store()), Box::new(ContextRenderer), Box::new(fs.clone()))
    }

    #[test]
    fn writes_class_and_registers_it() {
        let fs = project(INIT);
        let report = service(&fs).create_class(&layout(), "Enemies/Slime").unwrap();

        assert_eq!(report.class_name, "Slime");
        assert!(report.registered);
        assert_eq!(
            fs.file("/p/src/Sources/Demo/Enemies/Slime.swift").unwrap(),
            "import SwiftGodot\n\n@Godot\nclass Slime: Node {\n}\n"
        );
        assert_eq!(
            fs.file(INIT_PATH).unwrap(),
            INIT.replace("[Player.self]", "[Player.self, Slime.self]")
        );
    }

    #[test]
    fn already_registered_class_is_not_added_twice() {
        let fs = project(INIT);
        let report = service(&fs).create_class(&layout(), "Player").unwrap();

        assert!(!report.registered);
        assert_eq!(fs.file(INIT_PATH).unwrap(), INIT);
        assert!(fs.file("/p/src/Sources/Demo/Player.swift").is_some());
    }

    #[test]
    fn refuses_to_overwrite_existing_class() {
        let fs = project(INIT).with_file("/p/src/Sources/Demo/Slime.swift", "mine");
        let err = service(&fs).create_class(&layout(), "Slime").unwrap_err();

        assert!(matches!(
            err,
            ForgeError::Application(ApplicationError::FileExists { .. })
        ));
        assert_eq!(fs.file("/p/src/Sources/Demo/Slime.swift").unwrap(), "mine");
        assert_eq!(fs.file(INIT_PATH).unwrap(), INIT);
    }

    #[test]
    fn unpatchable_initializer_writes_nothing() {
        let fs = project("import SwiftGodot\n");
        let service = ClassService::new(
            Box::new(MockStore::new()),
            Box::new(ContextRenderer),
            Box::new(fs.clone()),
        );
        let err = service.create_class(&layout(), "Slime").unwrap_err();

        assert_eq!(err.category(), ErrorCategory::NotFound);
        assert!(fs.file("/p/src/Sources/Demo/Slime.swift").is_none());
    }

    #[test]
    fn broken_initializer_reports_location() {
        let fs = project("#initSwiftExtension(types: [Player.self)\n");
        let err = service(&fs).create_class(&layout(), "Slime").unwrap_err();
        assert!(err.to_string().starts_with(&format!("{INIT_PATH}:1:40")));
    }

    #[test]
    fn invalid_class_name() {
        let fs = project(INIT);
        let err = service(&fs).create_class(&layout(), "Enemies/my-slime").unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert_eq!(fs.file_count(), 2);
    }

    #[test]
    fn missing_initializer() {
        let fs = FakeFilesystem::new().with_file("/p/src/Package.swift", MANIFEST);
        let err = service(&fs).create_class(&layout(), "Slime").unwrap_err();
        assert!(matches!(
            err,
            ForgeError::Application(ApplicationError::PathNotFound { .. })
        ));
    }

    #[test]
    fn custom_registry_pattern() {
        let fs = project("#registerTypes(list: [Player.self])\n");
        let service = service(&fs).with_patch_settings(PatchSettings {
            registry: RegistryPattern {
                macro_name: "registerTypes".into(),
                label: "list".into(),
                ..Default::default()
            },
            ..Default::default()
        });
        service.create_class(&layout(), "Slime").unwrap();
        assert_eq!(
            fs.file(INIT_PATH).unwrap(),
            "#registerTypes(list: [Player.self, Slime.self])\n"
        );
    }
}
