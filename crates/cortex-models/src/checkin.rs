//! Check-in model
//!
//! Table: checkins

use chrono::{DateTime, Utc};
use cortex_core::traits::{Entity, Id, Identifiable, Timestamped};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Append-only progress note on a collaboration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Checkin {
    pub id: Id,
    pub collaboration_id: Id,
    pub user_id: Id,
    pub user_name: String,
    pub completed: String,
    pub blocked: String,
    pub next_steps: String,
    pub created_at: DateTime<Utc>,
}

impl Identifiable for Checkin {
    fn id(&self) -> Id {
        self.id
    }
}

impl Timestamped for Checkin {
    fn created_at(&self) -> Option<DateTime<Utc>> {
        Some(self.created_at)
    }
}

impl Entity for Checkin {
    const TABLE_NAME: &'static str = "checkins";
    const TYPE_NAME: &'static str = "Checkin";
}

/// Check-in payload
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewCheckin {
    #[validate(length(min = 1, max = 4000))]
    pub completed: String,

    #[serde(default)]
    #[validate(length(max = 4000))]
    pub blocked: String,

    #[validate(length(min = 1, max = 4000))]
    pub next_steps: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocked_is_optional() {
        let checkin: NewCheckin =
            serde_json::from_str(r#"{"completed":"wired the API","nextSteps":"tests"}"#).unwrap();
        assert!(checkin.validate().is_ok());
        assert!(checkin.blocked.is_empty());
    }

    #[test]
    fn test_blank_next_steps_rejected() {
        let checkin = NewCheckin {
            completed: "x".into(),
            blocked: String::new(),
            next_steps: String::new(),
        };
        assert!(checkin.validate().unwrap_err().field_errors().contains_key("next_steps"));
    }
}
