//! Authorization policy
//!
//! Every mutating operation asks one question before touching the store:
//! does the caller stand in the required relationship to the entity?
//! The answer depends only on the entity as loaded, never on roles or
//! global permissions.

use cortex_core::error::Denial;
use cortex_core::traits::Id;
use cortex_models::{CollaborationDetail, CollaborationRequest, Project, RequestKind};

/// Relationship a caller can hold to an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relationship {
    /// Owns the project the entity belongs to
    Owner,
    /// Is the party a request is addressed to
    Recipient,
    /// Is the owner or the joined user of a collaboration
    Participant,
}

impl Relationship {
    /// The denial reported when the relationship is missing
    pub fn denial(self) -> Denial {
        match self {
            Relationship::Owner => Denial::NotOwner,
            Relationship::Recipient => Denial::NotRecipient,
            Relationship::Participant => Denial::NotParticipant,
        }
    }
}

/// Entities that can answer whether a caller holds a relationship to them
pub trait Guarded {
    fn holds(&self, caller: Id, relationship: Relationship) -> bool;
}

impl Guarded for Project {
    fn holds(&self, caller: Id, relationship: Relationship) -> bool {
        match relationship {
            Relationship::Owner | Relationship::Participant => self.is_owned_by(caller),
            Relationship::Recipient => false,
        }
    }
}

impl Guarded for CollaborationRequest {
    fn holds(&self, caller: Id, relationship: Relationship) -> bool {
        match relationship {
            Relationship::Owner => match self.kind {
                RequestKind::Application => self.recipient_id == caller,
                RequestKind::Invitation => self.sender_id == caller,
            },
            Relationship::Recipient => self.recipient_id == caller,
            Relationship::Participant => self.sender_id == caller || self.recipient_id == caller,
        }
    }
}

impl Guarded for CollaborationDetail {
    fn holds(&self, caller: Id, relationship: Relationship) -> bool {
        match relationship {
            Relationship::Owner => self.project.is_owned_by(caller),
            Relationship::Participant => self.is_participant(caller),
            Relationship::Recipient => false,
        }
    }
}

/// `true` when `caller` holds `relationship` to `entity`
pub fn role_of<E: Guarded + ?Sized>(caller: Id, entity: &E, relationship: Relationship) -> bool {
    entity.holds(caller, relationship)
}

/// Like [`role_of`], but yields the matching [`Denial`] on failure
pub fn authorize<E: Guarded + ?Sized>(
    caller: Id,
    entity: &E,
    relationship: Relationship,
) -> Result<(), Denial> {
    if role_of(caller, entity, relationship) {
        Ok(())
    } else {
        Err(relationship.denial())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use cortex_models::{
        Collaboration, CollaborationStatus, LocationPreference, ProjectDetails, ProjectDuration,
        ProjectGoal, ProjectStage, ProjectStatus, ProjectType, RequestStatus, UserRole,
    };

    fn project(owner_id: Id) -> Project {
        Project {
            id: 10,
            owner_id,
            details: ProjectDetails {
                name: "Policy".into(),
                project_type: ProjectType::Freelance,
                stage: ProjectStage::ClientSigned,
                roles_needed: [UserRole::Designer].into(),
                skills_needed: Default::default(),
                hours_per_week: 5,
                duration: ProjectDuration::TwoWeeks,
                goal: ProjectGoal::Delivery,
                location: LocationPreference::Both,
            },
            status: ProjectStatus::Open,
            created_at: None,
        }
    }

    fn request(kind: RequestKind, sender_id: Id, recipient_id: Id) -> CollaborationRequest {
        CollaborationRequest {
            id: 1,
            project_id: 10,
            sender_id,
            recipient_id,
            kind,
            message: String::new(),
            status: RequestStatus::Pending,
            created_at: None,
            responded_at: None,
        }
    }

    #[test]
    fn test_project_owner() {
        let project = project(1);
        assert!(authorize(1, &project, Relationship::Owner).is_ok());
        assert_eq!(
            authorize(2, &project, Relationship::Owner),
            Err(Denial::NotOwner)
        );
    }

    #[test]
    fn test_only_recipient_may_respond() {
        let application = request(RequestKind::Application, 2, 1);
        assert!(role_of(1, &application, Relationship::Recipient));
        assert!(role_of(1, &application, Relationship::Owner));
        assert_eq!(
            authorize(2, &application, Relationship::Recipient),
            Err(Denial::NotRecipient)
        );

        let invitation = request(RequestKind::Invitation, 1, 2);
        assert!(role_of(2, &invitation, Relationship::Recipient));
        assert!(role_of(1, &invitation, Relationship::Owner));
        assert!(!role_of(3, &invitation, Relationship::Participant));
    }

    #[test]
    fn test_collaboration_participants() {
        let detail = CollaborationDetail {
            collaboration: Collaboration {
                id: 4,
                project_id: 10,
                user_id: 2,
                status: CollaborationStatus::Active,
                joined_at: Utc::now(),
            },
            project: project(1),
            collaborator_name: "B".into(),
            owner_name: "A".into(),
        };

        assert!(authorize(1, &detail, Relationship::Participant).is_ok());
        assert!(authorize(2, &detail, Relationship::Participant).is_ok());
        assert_eq!(
            authorize(3, &detail, Relationship::Participant),
            Err(Denial::NotParticipant)
        );
        assert!(!role_of(2, &detail, Relationship::Owner));
    }
}
