//! Build Service - compiles the Swift package and installs the libraries
//! into the Godot project's `bin/` directory.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{BuildRequest, BuildRunner, Filesystem},
        services::read_project_name,
    },
    domain::{
        ProjectLayout, host_library_extension, layout::SWIFT_GODOT_LIBRARY, library_file_name,
    },
    error::ForgeResult,
    syntax::ManifestPattern,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSettings {
    /// The Swift driver to invoke.
    pub program: String,
    pub configuration: String,
    /// Extension of the built dynamic libraries, without the dot.
    pub library_extension: String,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            program: "swift".into(),
            configuration: "debug".into(),
            library_extension: host_library_extension().into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    pub project: String,
    /// Libraries copied into `bin/`.
    pub installed: Vec<PathBuf>,
}

pub struct BuildService {
    filesystem: Box<dyn Filesystem>,
    runner: Box<dyn BuildRunner>,
    settings: BuildSettings,
    manifest: ManifestPattern,
}

impl BuildService {
    pub fn new(filesystem: Box<dyn Filesystem>, runner: Box<dyn BuildRunner>) -> Self {
        Self {
            filesystem,
            runner,
            settings: BuildSettings::default(),
            manifest: ManifestPattern::default(),
        }
    }

    pub fn with_settings(mut self, settings: BuildSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_manifest_pattern(mut self, manifest: ManifestPattern) -> Self {
        self.manifest = manifest;
        self
    }

    #[instrument(skip_all, fields(package = %layout.swift_dir().display()))]
    pub fn build(&self, layout: &ProjectLayout) -> ForgeResult<BuildReport> {
        let bin = layout.bin_dir();
        if !self.filesystem.is_dir(&bin) {
            return Err(ApplicationError::PathNotFound {
                path: bin,
                what: "Godot bin directory",
            }
            .into());
        }

        let project = read_project_name(self.filesystem.as_ref(), layout, &self.manifest)?;

        let request = BuildRequest {
            program: self.settings.program.clone(),
            package_path: layout.swift_dir().to_path_buf(),
            configuration: self.settings.configuration.clone(),
        };
        info!(%project, configuration = %request.configuration, "Building");
        self.runner.build(&request)?;

        let products = layout.build_products_dir(&self.settings.configuration);
        let mut installed = Vec::new();
        for library in [SWIFT_GODOT_LIBRARY, project.as_str()] {
            let file_name = library_file_name(library, &self.settings.library_extension);
            let built = products.join(&file_name);
            if !self.filesystem.exists(&built) {
                return Err(ApplicationError::ArtifactMissing { path: built }.into());
            }
            let target = bin.join(&file_name);
            self.filesystem.copy_file(&built, &target)?;
            info!(path = %target.display(), "Installed");
            installed.push(target);
        }

        Ok(BuildReport { project, installed })
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::application::services::test_support::{FakeFilesystem, MockRunner};
    use crate::error::{ErrorCategory, ForgeError};

    const MANIFEST: &str = "let package = Package(name: \"Demo\")\n";

    fn layout() -> ProjectLayout {
        ProjectLayout::from_dirs("/p/src", "/p")
    }

    fn settings() -> BuildSettings {
        BuildSettings {
            library_extension: "dylib".into(),
            ..Default::default()
        }
    }

    fn built_project() -> FakeFilesystem {
        FakeFilesystem::new()
            .with_dir("/p/bin")
            .with_file("/p/src/Package.swift", MANIFEST)
            .with_file("/p/src/.build/debug/libSwiftGodot.dylib", "godot")
            .with_file("/p/src/.build/debug/libDemo.dylib", "demo")
    }

    #[test]
    fn builds_and_installs_libraries() {
        let fs = built_project().with_file("/p/bin/libDemo.dylib", "stale");
        let mut runner = MockRunner::new();
        runner
            .expect_build()
            .withf(|request| {
                request.program == "swift"
                    && request.configuration == "debug"
                    && request.package_path == Path::new("/p/src")
            })
            .times(1)
            .returning(|_| Ok(()));

        let report = BuildService::new(Box::new(fs.clone()), Box::new(runner))
            .with_settings(settings())
            .build(&layout())
            .unwrap();

        assert_eq!(report.project, "Demo");
        assert_eq!(
            report.installed,
            vec![
                PathBuf::from("/p/bin/libSwiftGodot.dylib"),
                PathBuf::from("/p/bin/libDemo.dylib")
            ]
        );
        assert_eq!(fs.file("/p/bin/libDemo.dylib").as_deref(), Some("demo"));
    }

    #[test]
    fn missing_bin_directory_stops_before_building() {
        let fs = FakeFilesystem::new().with_file("/p/src/Package.swift", MANIFEST);
        let mut runner = MockRunner::new();
        runner.expect_build().never();

        let err = BuildService::new(Box::new(fs), Box::new(runner))
            .build(&layout())
            .unwrap_err();
        assert!(matches!(
            err,
            ForgeError::Application(ApplicationError::PathNotFound { .. })
        ));
    }

    #[test]
    fn build_failure_is_external() {
        let mut runner = MockRunner::new();
        runner.expect_build().returning(|_| {
            Err(ApplicationError::BuildFailed {
                status: "exit status: 1".into(),
            }
            .into())
        });

        let fs = built_project();
        let err = BuildService::new(Box::new(fs.clone()), Box::new(runner))
            .with_settings(settings())
            .build(&layout())
            .unwrap_err();
        assert_eq!(err.category(), ErrorCategory::External);
        assert!(fs.file("/p/bin/libDemo.dylib").is_none());
    }

    #[test]
    fn missing_product_is_reported() {
        let fs = FakeFilesystem::new()
            .with_dir("/p/bin")
            .with_file("/p/src/Package.swift", MANIFEST)
            .with_file("/p/src/.build/release/libSwiftGodot.so", "godot");
        let mut runner = MockRunner::new();
        runner.expect_build().returning(|_| Ok(()));

        let err = BuildService::new(Box::new(fs), Box::new(runner))
            .with_settings(BuildSettings {
                program: "swift".into(),
                configuration: "release".into(),
                library_extension: "so".into(),
            })
            .build(&layout())
            .unwrap_err();
        match err {
            ForgeError::Application(ApplicationError::ArtifactMissing { path }) => {
                assert_eq!(path, Path::new("/p/src/.build/release/libDemo.so"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn request_arguments() {
        let request = BuildRequest {
            program: "swift".into(),
            package_path: PathBuf::from("/p/src"),
            configuration: "debug".into(),
        };
        assert_eq!(
            request.args(),
            ["build", "--configuration", "debug", "--package-path", "/p/src"]
        );
    }
}
