//! Application services - orchestrate use cases.

pub mod build_service;
pub mod class_service;
pub mod init_service;
pub mod project_service;

#[cfg(test)]
pub(crate) mod test_support;

use serde::{Deserialize, Serialize};
use tracing::debug;

pub use build_service::{BuildReport, BuildService, BuildSettings};
pub use class_service::{ClassReport, ClassService};
pub use init_service::{InitOptions, InitReport, InitService};
pub use project_service::ProjectService;

use crate::{
    application::{ApplicationError, ports::Filesystem},
    domain::{DomainValidator, ProjectLayout},
    error::ForgeResult,
    syntax::{ManifestPattern, RegistryPattern, extract_project_name_with},
};

/// Which calls the patching engine looks for.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatchSettings {
    pub manifest: ManifestPattern,
    pub registry: RegistryPattern,
}

/// Read `Package.swift` and extract the declared project name.
///
/// The name ends up in build output paths, so anything that is not a plain
/// Swift identifier is rejected.
pub(crate) fn read_project_name(
    filesystem: &dyn Filesystem,
    layout: &ProjectLayout,
    pattern: &ManifestPattern,
) -> ForgeResult<String> {
    let manifest = layout.manifest_path();
    if !filesystem.exists(&manifest) {
        return Err(ApplicationError::PathNotFound {
            path: manifest,
            what: "Package.swift",
        }
        .into());
    }

    let text = filesystem.read_file(&manifest)?;
    let name = extract_project_name_with(pattern, &text)
        .map_err(|e| ApplicationError::from_rewrite(&manifest, &text, e.into()))?;

    match name {
        Some(name) => {
            DomainValidator::validate_project_name(&name)?;
            debug!(%name, manifest = %manifest.display(), "project name");
            Ok(name)
        }
        None => Err(ApplicationError::ProjectNameNotFound { manifest }.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;
    use crate::error::{ErrorCategory, ForgeError};
    use test_support::FakeFilesystem;

    fn layout() -> ProjectLayout {
        ProjectLayout::from_dirs("/p/src", "/p")
    }

    #[test]
    fn reads_name_from_manifest() {
        let fs = FakeFilesystem::new().with_file(
            "/p/src/Package.swift",
            "let package = Package(\n    name: \"Demo\",\n    products: [.library(name: \"Other\")]\n)\n",
        );
        let name = read_project_name(&fs, &layout(), &ManifestPattern::default()).unwrap();
        assert_eq!(name, "Demo");
    }

    #[test]
    fn missing_manifest() {
        let fs = FakeFilesystem::new();
        let err = read_project_name(&fs, &layout(), &ManifestPattern::default()).unwrap_err();
        assert!(matches!(
            err,
            ForgeError::Application(ApplicationError::PathNotFound { .. })
        ));
    }

    #[test]
    fn missing_name_is_not_found() {
        let fs = FakeFilesystem::new().with_file("/p/src/Package.swift", "let package = 1\n");
        let err = read_project_name(&fs, &layout(), &ManifestPattern::default()).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::NotFound);
    }

    #[test]
    fn path_like_name_is_rejected() {
        for name in ["../x", "a/b", "Demo App", ""] {
            let manifest = format!("let package = Package(name: \"{name}\")\n");
            let fs = FakeFilesystem::new().with_file("/p/src/Package.swift", &manifest);
            let err = read_project_name(&fs, &layout(), &ManifestPattern::default()).unwrap_err();
            assert!(
                matches!(
                    err,
                    ForgeError::Domain(DomainError::InvalidProjectName { .. })
                ),
                "{name}: {err:?}"
            );
            assert_eq!(err.category(), ErrorCategory::Validation);
        }
    }

    #[test]
    fn unicode_name_is_accepted() {
        let fs = FakeFilesystem::new()
            .with_file("/p/src/Package.swift", "let package = Package(name: \"Café\")\n");
        let name = read_project_name(&fs, &layout(), &ManifestPattern::default()).unwrap();
        assert_eq!(name, "Café");
    }

    #[test]
    fn broken_manifest_reports_position() {
        let fs = FakeFilesystem::new()
            .with_file("/p/src/Package.swift", "let package = Package(name: \"Demo)\n");
        let err = read_project_name(&fs, &layout(), &ManifestPattern::default()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "/p/src/Package.swift:1:29: unterminated string literal"
        );
    }
}
