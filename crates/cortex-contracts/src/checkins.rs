//! Check-in contract

use cortex_models::NewCheckin;

use crate::base::{check_present, field_errors, Contract, ValidationResult};

#[derive(Debug, Default, Clone, Copy)]
pub struct CheckinContract;

impl Contract<NewCheckin> for CheckinContract {
    fn validate(&self, checkin: &NewCheckin) -> ValidationResult {
        let mut errors = field_errors(checkin);
        check_present("completed", &checkin.completed, &mut errors);
        check_present("next_steps", &checkin.next_steps, &mut errors);
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_fields_rejected() {
        let checkin = NewCheckin {
            completed: " ".into(),
            blocked: String::new(),
            next_steps: "\n".into(),
        };
        let errors = CheckinContract.validate(&checkin).unwrap_err();
        assert!(errors.has_error("completed"));
        assert!(errors.has_error("next_steps"));
        assert!(!errors.has_error("blocked"));
    }
}
