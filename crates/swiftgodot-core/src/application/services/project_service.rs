//! Project Service - read-only queries about an existing project.

use crate::{
    application::{ApplicationError, ports::Filesystem, services::read_project_name},
    domain::ProjectLayout,
    error::ForgeResult,
    syntax::{ManifestPattern, RegistryPattern, registered_entries},
};

pub struct ProjectService {
    filesystem: Box<dyn Filesystem>,
    manifest: ManifestPattern,
    registry: RegistryPattern,
}

impl ProjectService {
    pub fn new(filesystem: Box<dyn Filesystem>) -> Self {
        Self {
            filesystem,
            manifest: ManifestPattern::default(),
            registry: RegistryPattern::default(),
        }
    }

    pub fn with_patterns(mut self, manifest: ManifestPattern, registry: RegistryPattern) -> Self {
        self.manifest = manifest;
        self.registry = registry;
        self
    }

    /// The name declared in `Package.swift`.
    pub fn project_name(&self, layout: &ProjectLayout) -> ForgeResult<String> {
        read_project_name(self.filesystem.as_ref(), layout, &self.manifest)
    }

    /// Types listed in the initializer file, in registration order.
    pub fn registered_classes(&self, layout: &ProjectLayout) -> ForgeResult<Vec<String>> {
        let project = self.project_name(layout)?;
        let init_file = layout.init_file(&project);
        let text = self.filesystem.read_file(&init_file)?;
        registered_entries(&self.registry, &text)
            .map_err(|e| ApplicationError::from_rewrite(&init_file, &text, e).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::test_support::FakeFilesystem;

    #[test]
    fn name_and_classes() {
        let fs = FakeFilesystem::new()
            .with_file("/p/src/Package.swift", "let package = Package(name: \"Demo\")\n")
            .with_file(
                "/p/src/Sources/Demo/Demo.swift",
                "#initSwiftExtension(cdecl: \"swift_entry_point\", types: [\n    Player.self,\n    Slime.self,\n])\n",
            );
        let service = ProjectService::new(Box::new(fs));
        let layout = ProjectLayout::from_dirs("/p/src", "/p");

        assert_eq!(service.project_name(&layout).unwrap(), "Demo");
        assert_eq!(
            service.registered_classes(&layout).unwrap(),
            vec!["Player".to_string(), "Slime".to_string()]
        );
    }
}
