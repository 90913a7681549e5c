use cortex_models::{CollaborationRequest, CollaborationStatus, NewCollaboration, ProjectStatus};

/// Builds the collaboration an accepted request produces
pub struct CollaborationFactory;

impl CollaborationFactory {
    /// The collaboration binds the request's candidate, whichever side
    /// sent it. It starts `active` unless the project has already closed,
    /// in which case it takes the project's terminal status.
    pub fn build(request: &CollaborationRequest, project_status: ProjectStatus) -> NewCollaboration {
        NewCollaboration {
            project_id: request.project_id,
            user_id: request.candidate_id(),
            status: CollaborationStatus::cascaded_from(project_status)
                .unwrap_or(CollaborationStatus::Active),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cortex_models::{RequestKind, RequestStatus};

    fn accepted(kind: RequestKind) -> CollaborationRequest {
        CollaborationRequest {
            id: 1,
            project_id: 3,
            sender_id: 7,
            recipient_id: 8,
            kind,
            message: String::new(),
            status: RequestStatus::Accepted,
            created_at: None,
            responded_at: None,
        }
    }

    #[test]
    fn test_binds_candidate() {
        let application = CollaborationFactory::build(&accepted(RequestKind::Application), ProjectStatus::Open);
        assert_eq!(application.user_id, 7);
        assert_eq!(application.status, CollaborationStatus::Active);

        let invitation = CollaborationFactory::build(&accepted(RequestKind::Invitation), ProjectStatus::Active);
        assert_eq!(invitation.user_id, 8);
        assert_eq!(invitation.project_id, 3);
    }

    #[test]
    fn test_closed_project_mirrors_status() {
        let late = CollaborationFactory::build(&accepted(RequestKind::Application), ProjectStatus::Dropped);
        assert_eq!(late.status, CollaborationStatus::Dropped);
    }
}
