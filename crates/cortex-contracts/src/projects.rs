//! Project details contract
//!
//! Creation and editing share this contract, so both reject the same
//! input with the same messages.

use cortex_models::ProjectDetails;

use crate::base::{check_present, check_tags, field_errors, Contract, ValidationResult};

#[derive(Debug, Default, Clone, Copy)]
pub struct ProjectDetailsContract;

impl Contract<ProjectDetails> for ProjectDetailsContract {
    fn validate(&self, details: &ProjectDetails) -> ValidationResult {
        let mut errors = field_errors(details);
        check_present("name", &details.name, &mut errors);
        check_tags("skills_needed", &details.skills_needed, &mut errors);
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cortex_models::{
        LocationPreference, ProjectDuration, ProjectGoal, ProjectStage, ProjectType, UserRole,
    };

    fn details() -> ProjectDetails {
        ProjectDetails {
            name: "Tide tables".into(),
            project_type: ProjectType::Startup,
            stage: ProjectStage::InProgress,
            roles_needed: [UserRole::Developer, UserRole::Designer].into(),
            skills_needed: Default::default(),
            hours_per_week: 12,
            duration: ProjectDuration::EightPlusWeeks,
            goal: ProjectGoal::Revenue,
            location: LocationPreference::Remote,
        }
    }

    #[test]
    fn test_empty_skills_allowed() {
        assert!(ProjectDetailsContract.validate(&details()).is_ok());
    }

    #[test]
    fn test_whitespace_name_rejected() {
        let mut input = details();
        input.name = "   ".into();
        let errors = ProjectDetailsContract.validate(&input).unwrap_err();
        assert_eq!(errors.get("name").unwrap(), &vec!["can't be blank".to_string()]);
    }

    #[test]
    fn test_missing_roles_and_hours_rejected() {
        let mut input = details();
        input.roles_needed.clear();
        input.hours_per_week = 0;
        input.skills_needed.insert(" ".into());
        let errors = ProjectDetailsContract.validate(&input).unwrap_err();
        assert!(errors.has_error("roles_needed"));
        assert!(errors.has_error("hours_per_week"));
        assert!(errors.has_error("skills_needed"));
    }
}
