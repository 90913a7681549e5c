//! Collaboration request model
//!
//! Table: collaboration_requests

use chrono::{DateTime, Utc};
use cortex_core::traits::{Entity, Id, Identifiable, ProjectScoped, Timestamped};
use serde::{Deserialize, Serialize};

use crate::tags::string_tag;

string_tag! {
    /// `pending` is the only non-terminal state
    RequestStatus {
        Pending => "pending",
        Accepted => "accepted",
        Declined => "declined",
    }
}

string_tag! {
    /// Who initiated the request
    ///
    /// An application is sent by a candidate to the project owner; an
    /// invitation is sent by the owner to a candidate. Either way the
    /// recipient is the one who answers it.
    RequestKind {
        Application => "application",
        Invitation => "invitation",
    }
}

string_tag! {
    /// The recipient's answer
    Decision {
        Accepted => "accepted",
        Declined => "declined",
    }
}

impl From<Decision> for RequestStatus {
    fn from(decision: Decision) -> Self {
        match decision {
            Decision::Accepted => RequestStatus::Accepted,
            Decision::Declined => RequestStatus::Declined,
        }
    }
}

/// Collaboration request entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollaborationRequest {
    pub id: Id,
    pub project_id: Id,
    pub sender_id: Id,
    pub recipient_id: Id,
    pub kind: RequestKind,
    #[serde(default)]
    pub message: String,
    pub status: RequestStatus,
    pub created_at: Option<DateTime<Utc>>,
    pub responded_at: Option<DateTime<Utc>>,
}

impl Identifiable for CollaborationRequest {
    fn id(&self) -> Id {
        self.id
    }
}

impl Timestamped for CollaborationRequest {
    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}

impl ProjectScoped for CollaborationRequest {
    fn project_id(&self) -> Id {
        self.project_id
    }
}

impl Entity for CollaborationRequest {
    const TABLE_NAME: &'static str = "collaboration_requests";
    const TYPE_NAME: &'static str = "CollaborationRequest";
}

impl CollaborationRequest {
    /// The non-owner party, who joins the project if the request is accepted
    pub fn candidate_id(&self) -> Id {
        match self.kind {
            RequestKind::Application => self.sender_id,
            RequestKind::Invitation => self.recipient_id,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == RequestStatus::Pending
    }

    /// Pending or accepted requests keep their candidate out of the pool
    pub fn holds_candidate(&self) -> bool {
        matches!(self.status, RequestStatus::Pending | RequestStatus::Accepted)
    }
}

/// Insert payload for a request; new requests are always pending
#[derive(Debug, Clone, PartialEq)]
pub struct NewCollaborationRequest {
    pub project_id: Id,
    pub sender_id: Id,
    pub recipient_id: Id,
    pub kind: RequestKind,
    pub message: String,
}

impl NewCollaborationRequest {
    pub fn candidate_id(&self) -> Id {
        match self.kind {
            RequestKind::Application => self.sender_id,
            RequestKind::Invitation => self.recipient_id,
        }
    }
}

/// A request as shown in an inbox, with the names a reader needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestView {
    #[serde(flatten)]
    pub request: CollaborationRequest,
    pub project_name: String,
    pub sender_name: String,
    pub recipient_name: String,
}
