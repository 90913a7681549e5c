//! Collaboration request contract

use cortex_models::NewCollaborationRequest;

use crate::base::{Contract, ValidationResult};
use cortex_core::error::ValidationErrors;

/// Longest message accepted on a request, in characters
pub const MAX_MESSAGE_LENGTH: usize = 2000;

#[derive(Debug, Default, Clone, Copy)]
pub struct RequestContract;

impl Contract<NewCollaborationRequest> for RequestContract {
    fn validate(&self, request: &NewCollaborationRequest) -> ValidationResult {
        let mut errors = ValidationErrors::new();
        if request.message.chars().count() > MAX_MESSAGE_LENGTH {
            errors.add(
                "message",
                format!("is too long (maximum is {} characters)", MAX_MESSAGE_LENGTH),
            );
        }
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cortex_models::RequestKind;

    fn request(message: String) -> NewCollaborationRequest {
        NewCollaborationRequest {
            project_id: 1,
            sender_id: 2,
            recipient_id: 3,
            kind: RequestKind::Application,
            message,
        }
    }

    #[test]
    fn test_message_is_optional() {
        assert!(RequestContract.validate(&request(String::new())).is_ok());
    }

    #[test]
    fn test_long_message_rejected() {
        let errors = RequestContract
            .validate(&request("x".repeat(MAX_MESSAGE_LENGTH + 1)))
            .unwrap_err();
        assert!(errors.has_error("message"));
    }
}
