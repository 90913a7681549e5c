use chrono::{DateTime, Utc};
use cortex_core::{ConflictKind, Id};
use cortex_models::{Collaboration, CollaborationRequest, Decision, NewCollaborationRequest, Project};

/// `pending -> {accepted, declined}`; both outcomes are terminal
pub struct RequestLifecycle;

impl RequestLifecycle {
    /// A request may not make the owner a candidate on their own project
    ///
    /// Project status is deliberately not checked: an active project can
    /// keep collecting requests.
    pub fn check_create(
        project: &Project,
        request: &NewCollaborationRequest,
    ) -> Result<(), ConflictKind> {
        if request.candidate_id() == project.owner_id {
            return Err(ConflictKind::SelfRequest);
        }
        Ok(())
    }

    /// A user joins a project at most once, so any existing collaboration
    /// of the candidate blocks a new request
    pub fn check_candidate<'c>(
        candidate_id: Id,
        collaborations: impl IntoIterator<Item = &'c Collaboration>,
    ) -> Result<(), ConflictKind> {
        if collaborations.into_iter().any(|c| c.user_id == candidate_id) {
            return Err(ConflictKind::AlreadyCollaborator);
        }
        Ok(())
    }

    pub fn ensure_pending(request: &CollaborationRequest) -> Result<(), ConflictKind> {
        if request.is_pending() {
            Ok(())
        } else {
            Err(ConflictKind::AlreadyResolved)
        }
    }

    /// The request after `decision`, or `AlreadyResolved`
    pub fn resolve(
        request: &CollaborationRequest,
        decision: Decision,
        at: DateTime<Utc>,
    ) -> Result<CollaborationRequest, ConflictKind> {
        Self::ensure_pending(request)?;
        let mut resolved = request.clone();
        resolved.status = decision.into();
        resolved.responded_at = Some(at);
        Ok(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cortex_models::{
        CollaborationStatus, LocationPreference, ProjectDetails, ProjectDuration, ProjectGoal, ProjectStage,
        ProjectStatus, ProjectType, RequestKind, RequestStatus, UserRole,
    };

    fn project() -> Project {
        Project {
            id: 1,
            owner_id: 10,
            details: ProjectDetails {
                name: "Lifecycle".into(),
                project_type: ProjectType::Startup,
                stage: ProjectStage::Idea,
                roles_needed: [UserRole::Other].into(),
                skills_needed: Default::default(),
                hours_per_week: 4,
                duration: ProjectDuration::TwoWeeks,
                goal: ProjectGoal::Mvp,
                location: LocationPreference::Remote,
            },
            status: ProjectStatus::Active,
            created_at: None,
        }
    }

    fn new_request(kind: RequestKind, sender_id: i64, recipient_id: i64) -> NewCollaborationRequest {
        NewCollaborationRequest {
            project_id: 1,
            sender_id,
            recipient_id,
            kind,
            message: String::new(),
        }
    }

    #[test]
    fn test_self_request_rejected_both_ways() {
        let project = project();
        assert_eq!(
            RequestLifecycle::check_create(&project, &new_request(RequestKind::Application, 10, 10)),
            Err(ConflictKind::SelfRequest)
        );
        assert_eq!(
            RequestLifecycle::check_create(&project, &new_request(RequestKind::Invitation, 10, 10)),
            Err(ConflictKind::SelfRequest)
        );
    }

    #[test]
    fn test_active_project_accepts_requests() {
        let project = project();
        assert!(
            RequestLifecycle::check_create(&project, &new_request(RequestKind::Application, 11, 10))
                .is_ok()
        );
    }

    #[test]
    fn test_existing_member_cannot_be_requested_again() {
        let joined = Collaboration {
            id: 3,
            project_id: 1,
            user_id: 11,
            status: CollaborationStatus::Active,
            joined_at: Utc::now(),
        };
        assert_eq!(
            RequestLifecycle::check_candidate(11, [&joined]),
            Err(ConflictKind::AlreadyCollaborator)
        );
        assert!(RequestLifecycle::check_candidate(12, [&joined]).is_ok());

        let closed = Collaboration {
            status: CollaborationStatus::Completed,
            ..joined
        };
        assert_eq!(
            RequestLifecycle::check_candidate(11, [&closed]),
            Err(ConflictKind::AlreadyCollaborator)
        );
    }

    #[test]
    fn test_resolve_once() {
        let pending = CollaborationRequest {
            id: 5,
            project_id: 1,
            sender_id: 11,
            recipient_id: 10,
            kind: RequestKind::Application,
            message: String::new(),
            status: RequestStatus::Pending,
            created_at: None,
            responded_at: None,
        };
        let now = Utc::now();
        let accepted = RequestLifecycle::resolve(&pending, Decision::Accepted, now).unwrap();
        assert_eq!(accepted.status, RequestStatus::Accepted);
        assert_eq!(accepted.responded_at, Some(now));

        assert_eq!(
            RequestLifecycle::resolve(&accepted, Decision::Declined, now),
            Err(ConflictKind::AlreadyResolved)
        );
    }
}
