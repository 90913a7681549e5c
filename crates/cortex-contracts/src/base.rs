//! Base contract system

use cortex_core::error::ValidationErrors;
use validator::{Validate, ValidationError};

/// Result of contract validation
pub type ValidationResult = Result<(), ValidationErrors>;

/// Base contract trait
pub trait Contract<T>: Send + Sync {
    /// Validate the entity
    fn validate(&self, entity: &T) -> ValidationResult;
}

/// Run the derived field rules of `entity` and collect them as
/// [`ValidationErrors`]
pub fn field_errors<T: Validate>(entity: &T) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    if let Err(derived) = entity.validate() {
        let mut fields: Vec<_> = derived.field_errors().into_iter().collect();
        fields.sort_by_key(|(field, _)| *field);
        for (field, failures) in fields {
            for failure in failures {
                errors.add(field, describe(failure));
            }
        }
    }
    errors
}

fn describe(failure: &ValidationError) -> String {
    if let Some(message) = &failure.message {
        return message.to_string();
    }
    let param = |key: &str| failure.params.get(key).map(|v| v.to_string());
    match failure.code.as_ref() {
        "length" => match (param("min"), param("max")) {
            (Some(min), Some(max)) => format!("must be between {} and {} characters long", min, max),
            (Some(min), None) if min == "1" => "can't be blank".to_string(),
            (Some(min), None) => format!("must have at least {} entries", min),
            (None, Some(max)) => format!("is too long (maximum is {} characters)", max),
            (None, None) => "has an invalid length".to_string(),
        },
        "range" => match (param("min"), param("max")) {
            (Some(min), Some(max)) => format!("must be between {} and {}", min, max),
            _ => "is out of range".to_string(),
        },
        other => format!("is invalid ({})", other),
    }
}

/// Required text that is empty once trimmed
pub(crate) fn check_present(field: &str, value: &str, errors: &mut ValidationErrors) {
    if value.trim().is_empty() && !errors.has_error(field) {
        errors.add(field, "can't be blank");
    }
}

/// Tag sets (skills) may not contain blank entries
pub(crate) fn check_tags<'a>(
    field: &str,
    tags: impl IntoIterator<Item = &'a String>,
    errors: &mut ValidationErrors,
) {
    if tags.into_iter().any(|tag| tag.trim().is_empty()) {
        errors.add(field, "can't contain blank entries");
    }
}
