//! In-memory template store.

use std::sync::{Arc, RwLock};

use swiftgodot_core::{
    application::{ApplicationError, ports::TemplateStore},
    domain::{ClassTemplate, DomainValidator as validator, ProjectTemplate},
    error::ForgeResult,
};

use crate::builtin_templates;

#[derive(Debug, Default)]
struct Templates {
    project: Option<ProjectTemplate>,
    class: Option<ClassTemplate>,
}

/// Thread-safe in-memory template store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<RwLock<Templates>>,
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the built-in templates.
    pub fn with_builtin() -> ForgeResult<Self> {
        let store = Self::new();
        store.set_project_template(builtin_templates::project_template()?)?;
        store.set_class_template(builtin_templates::class_template())?;
        Ok(store)
    }

    pub fn set_project_template(&self, template: ProjectTemplate) -> ForgeResult<()> {
        validator::validate_template(&template)?;

        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;
        inner.project = Some(template);
        Ok(())
    }

    pub fn set_class_template(&self, template: ClassTemplate) -> ForgeResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StoreLockError)?;
        inner.class = Some(template);
        Ok(())
    }
}

impl TemplateStore for InMemoryStore {
    fn project_template(&self) -> ForgeResult<ProjectTemplate> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;

        inner.project.clone().ok_or_else(|| {
            ApplicationError::TemplateNotFound {
                name: "project".into(),
            }
            .into()
        })
    }

    fn class_template(&self) -> ForgeResult<ClassTemplate> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::StoreLockError)?;

        inner.class.clone().ok_or_else(|| {
            ApplicationError::TemplateNotFound {
                name: "class".into(),
            }
            .into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_store_serves_both_templates() {
        let store = InMemoryStore::with_builtin().unwrap();
        assert_eq!(
            store.project_template().unwrap().name(),
            builtin_templates::PROJECT_TEMPLATE_NAME
        );
        assert!(store.class_template().unwrap().content().contains("<#ClassName#>"));
    }

    #[test]
    fn empty_store_reports_missing_templates() {
        let store = InMemoryStore::new();
        assert!(store.project_template().is_err());
        assert!(store.class_template().is_err());
    }

    #[test]
    fn rejects_empty_project_template() {
        let store = InMemoryStore::new();
        assert!(
            store
                .set_project_template(ProjectTemplate::new("empty"))
                .is_err()
        );
    }
}
