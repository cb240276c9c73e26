use crate::domain::{
    entities::{ProjectStructure, ProjectTemplate},
    error::DomainError,
};
use crate::syntax::is_identifier;

/// Centralized domain validation.
pub struct DomainValidator;

impl DomainValidator {
    /// Project names become Swift module and target names.
    pub fn validate_project_name(name: &str) -> Result<(), DomainError> {
        if name.is_empty() {
            return Err(DomainError::InvalidProjectName {
                name: name.into(),
                reason: "name is empty".into(),
            });
        }
        if !is_identifier(name) {
            return Err(DomainError::InvalidProjectName {
                name: name.into(),
                reason: "not a valid Swift identifier".into(),
            });
        }
        Ok(())
    }

    pub fn validate_template(template: &ProjectTemplate) -> Result<(), DomainError> {
        template.validate()
    }

    pub fn validate_project_structure(structure: &ProjectStructure) -> Result<(), DomainError> {
        structure.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_names() {
        assert!(DomainValidator::validate_project_name("Demo").is_ok());
        assert!(DomainValidator::validate_project_name("my_game2").is_ok());
        assert!(DomainValidator::validate_project_name("").is_err());
        assert!(DomainValidator::validate_project_name("my-game").is_err());
        assert!(DomainValidator::validate_project_name("3D").is_err());
        assert!(DomainValidator::validate_project_name("struct").is_err());
    }
}
