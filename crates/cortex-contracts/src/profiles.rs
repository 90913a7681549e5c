//! Profile update contract

use cortex_matching::is_known_timezone;
use cortex_models::ProfileUpdate;

use crate::base::{check_present, check_tags, field_errors, Contract, ValidationResult};

/// Validates a profile update before it marks the profile complete
///
/// The timezone must be a real IANA name here even though the matcher
/// tolerates unknown names on profiles written before this check.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProfileContract;

impl Contract<ProfileUpdate> for ProfileContract {
    fn validate(&self, update: &ProfileUpdate) -> ValidationResult {
        let mut errors = field_errors(update);
        check_present("name", &update.name, &mut errors);
        check_tags("skills", &update.skills, &mut errors);
        if !errors.has_error("timezone") && !is_known_timezone(update.timezone.trim()) {
            errors.add("timezone", "is not a recognized timezone");
        }
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cortex_models::{UserRole, WorkPreference};

    fn update(timezone: &str) -> ProfileUpdate {
        ProfileUpdate {
            name: "Grace".into(),
            role: UserRole::Developer,
            skills: ["COBOL".to_string()].into(),
            availability: 30,
            timezone: timezone.into(),
            work_preference: WorkPreference::Freelance,
            portfolio: None,
        }
    }

    #[test]
    fn test_known_timezone_accepted() {
        assert!(ProfileContract.validate(&update("America/Chicago")).is_ok());
    }

    #[test]
    fn test_unknown_timezone_rejected() {
        let errors = ProfileContract.validate(&update("Moon/Tranquility")).unwrap_err();
        assert_eq!(
            errors.get("timezone").unwrap(),
            &vec!["is not a recognized timezone".to_string()]
        );
    }

    #[test]
    fn test_empty_timezone_reports_once() {
        let errors = ProfileContract.validate(&update("")).unwrap_err();
        assert_eq!(errors.get("timezone").unwrap().len(), 1);
    }
}
