//! Core error types for Cortex
//!
//! Every failure a caller can observe is one of four domain categories
//! (validation, authorization, not found, conflict) or an infrastructure
//! failure. Domain errors are never retried; `Unavailable` is the only
//! category that can succeed on a second attempt with the same input.

use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Core error type for all Cortex operations
#[derive(Error, Debug)]
pub enum OpError {
    #[error("Not found: {entity} with id={id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Forbidden: {0}")]
    Forbidden(Denial),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Conflict: {0}")]
    Conflict(ConflictKind),

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// The relationship a caller was missing
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denial {
    #[error("not the project owner")]
    NotOwner,

    #[error("not the recipient of this request")]
    NotRecipient,

    #[error("not a participant of this collaboration")]
    NotParticipant,
}

/// Conflicts between the requested change and the current state
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConflictKind {
    #[error("cannot send a collaboration request to your own project")]
    SelfRequest,

    #[error("a pending request already exists for this candidate")]
    DuplicatePending,

    #[error("candidate already collaborates on this project")]
    AlreadyCollaborator,

    #[error("request has already been resolved")]
    AlreadyResolved,

    #[error("cannot move project from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    #[error("project is {0} and can no longer be edited")]
    ProjectClosed(String),
}

impl OpError {
    pub fn not_found(entity: &'static str, id: impl fmt::Display) -> Self {
        OpError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn invalid_transition(from: impl fmt::Display, to: impl fmt::Display) -> Self {
        OpError::Conflict(ConflictKind::InvalidTransition {
            from: from.to_string(),
            to: to.to_string(),
        })
    }

    /// Single-field validation failure
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = ValidationErrors::new();
        errors.add(field, message);
        OpError::Validation(errors)
    }

    pub fn status_code(&self) -> u16 {
        match self {
            OpError::NotFound { .. } => 404,
            OpError::Forbidden(_) => 403,
            OpError::Validation(_) => 422,
            OpError::Conflict(_) => 409,
            OpError::Unavailable(_) => 503,
            OpError::Internal(_) | OpError::Config(_) => 500,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            OpError::NotFound { .. } => "not_found",
            OpError::Forbidden(Denial::NotOwner) => "not_owner",
            OpError::Forbidden(Denial::NotRecipient) => "not_recipient",
            OpError::Forbidden(Denial::NotParticipant) => "not_participant",
            OpError::Validation(_) => "validation_failed",
            OpError::Conflict(ConflictKind::SelfRequest) => "self_request",
            OpError::Conflict(ConflictKind::DuplicatePending) => "duplicate_pending",
            OpError::Conflict(ConflictKind::AlreadyCollaborator) => "already_collaborator",
            OpError::Conflict(ConflictKind::AlreadyResolved) => "already_resolved",
            OpError::Conflict(ConflictKind::InvalidTransition { .. }) => "invalid_transition",
            OpError::Conflict(ConflictKind::ProjectClosed(_)) => "project_closed",
            OpError::Unavailable(_) => "unavailable",
            OpError::Internal(_) => "internal_error",
            OpError::Config(_) => "configuration_error",
        }
    }
}

impl From<Denial> for OpError {
    fn from(denial: Denial) -> Self {
        OpError::Forbidden(denial)
    }
}

impl From<ConflictKind> for OpError {
    fn from(kind: ConflictKind) -> Self {
        OpError::Conflict(kind)
    }
}

/// Validation errors collection
///
/// Field names map to one or more messages; base errors are not tied to
/// a field. Fields are kept ordered so messages render deterministically.
#[derive(Error, Debug, Default, Clone, PartialEq, Eq)]
pub struct ValidationErrors {
    pub errors: BTreeMap<String, Vec<String>>,
    pub base_errors: Vec<String>,
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.full_messages().join(", "))
    }
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    pub fn add_base(&mut self, message: impl Into<String>) {
        self.base_errors.push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty() && self.base_errors.is_empty()
    }

    /// Check if there are errors for a specific field
    pub fn has_error(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&Vec<String>> {
        self.errors.get(field)
    }

    pub fn merge(&mut self, other: ValidationErrors) {
        for (field, messages) in other.errors {
            self.errors.entry(field).or_default().extend(messages);
        }
        self.base_errors.extend(other.base_errors);
    }

    pub fn full_messages(&self) -> Vec<String> {
        let mut messages = self.base_errors.clone();
        for (field, field_messages) in &self.errors {
            for msg in field_messages {
                messages.push(format!("{} {}", field, msg));
            }
        }
        messages
    }

    /// `Ok(())` when empty, otherwise the collected errors
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes_follow_category() {
        assert_eq!(OpError::from(Denial::NotOwner).status_code(), 403);
        assert_eq!(OpError::from(Denial::NotRecipient).error_code(), "not_recipient");
        assert_eq!(OpError::from(ConflictKind::DuplicatePending).status_code(), 409);
        assert_eq!(
            OpError::from(ConflictKind::AlreadyCollaborator).error_code(),
            "already_collaborator"
        );
        assert_eq!(OpError::not_found("Project", 7).status_code(), 404);
        assert_eq!(OpError::Unavailable("pool timed out".into()).status_code(), 503);
    }

    #[test]
    fn test_invalid_transition_message() {
        let err = OpError::invalid_transition("completed", "active");
        assert_eq!(err.error_code(), "invalid_transition");
        assert_eq!(
            err.to_string(),
            "Conflict: cannot move project from completed to active"
        );
    }

    #[test]
    fn test_validation_messages_are_ordered() {
        let mut errors = ValidationErrors::new();
        errors.add("name", "can't be blank");
        errors.add("hours_per_week", "must be greater than 0");
        errors.add_base("All fields are required");

        assert!(errors.has_error("name"));
        assert_eq!(
            errors.full_messages(),
            vec![
                "All fields are required".to_string(),
                "hours_per_week must be greater than 0".to_string(),
                "name can't be blank".to_string(),
            ]
        );
    }

    #[test]
    fn test_merge_and_into_result() {
        let mut a = ValidationErrors::new();
        assert!(a.clone().into_result().is_ok());

        let mut b = ValidationErrors::new();
        b.add("skills", "is invalid");
        a.merge(b);
        assert!(a.into_result().is_err());
    }
}
