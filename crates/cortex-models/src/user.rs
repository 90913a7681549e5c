//! User model
//!
//! Table: users

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use cortex_core::traits::{Entity, Id, Identifiable, Timestamped};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::project::ProjectType;
use crate::tags::string_tag;

string_tag! {
    /// What a user does on a team
    UserRole {
        Developer => "developer",
        Designer => "designer",
        FullStack => "full-stack",
        Other => "other",
    }
}

string_tag! {
    /// The kind of work a user is looking for
    WorkPreference {
        Startup => "startup",
        Freelance => "freelance",
        Both => "both",
    }
}

impl WorkPreference {
    /// Exact preference for the given project type
    pub fn is_exactly(&self, project_type: ProjectType) -> bool {
        matches!(
            (self, project_type),
            (WorkPreference::Startup, ProjectType::Startup)
                | (WorkPreference::Freelance, ProjectType::Freelance)
        )
    }
}

/// Optional portfolio links shown on a profile
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    #[serde(default)]
    pub github: String,
    #[serde(default)]
    pub figma: String,
    #[serde(default)]
    pub website: String,
}

/// User entity
///
/// Accounts are created by the external authentication service; this
/// model only carries the matching profile. `role` and `work_preference`
/// stay empty until the first profile update, which also flips
/// `profile_complete`. Only complete profiles enter the candidate pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Id,
    pub name: String,
    pub role: Option<UserRole>,
    #[serde(default)]
    pub skills: BTreeSet<String>,
    /// Weekly availability in hours
    pub availability: u32,
    /// IANA timezone name, e.g. `Europe/Berlin`
    pub timezone: String,
    pub work_preference: Option<WorkPreference>,
    #[serde(default)]
    pub portfolio: Portfolio,
    pub profile_complete: bool,
    pub created_at: Option<DateTime<Utc>>,
}

impl Identifiable for User {
    fn id(&self) -> Id {
        self.id
    }
}

impl Timestamped for User {
    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}

impl Entity for User {
    const TABLE_NAME: &'static str = "users";
    const TYPE_NAME: &'static str = "User";
}

impl User {
    /// A freshly registered user with an empty profile
    pub fn new(id: Id, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            role: None,
            skills: BTreeSet::new(),
            availability: 0,
            timezone: String::new(),
            work_preference: None,
            portfolio: Portfolio::default(),
            profile_complete: false,
            created_at: None,
        }
    }

    /// Apply a validated profile update and mark the profile complete
    pub fn apply_profile(&mut self, update: &ProfileUpdate) {
        self.name = update.name.trim().to_string();
        self.role = Some(update.role);
        self.skills = update.skills.clone();
        self.availability = update.availability;
        self.timezone = update.timezone.clone();
        self.work_preference = Some(update.work_preference);
        self.portfolio = update.portfolio.clone().unwrap_or_default();
        self.profile_complete = true;
    }
}

/// Profile update payload (`PUT /api/users/me`)
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    pub role: UserRole,

    #[serde(default)]
    pub skills: BTreeSet<String>,

    #[validate(range(min = 1, max = 168))]
    pub availability: u32,

    #[validate(length(min = 1, max = 64))]
    pub timezone: String,

    pub work_preference: WorkPreference,

    pub portfolio: Option<Portfolio>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn update() -> ProfileUpdate {
        ProfileUpdate {
            name: "  Ada  ".to_string(),
            role: UserRole::FullStack,
            skills: ["Rust".to_string(), "Go".to_string()].into(),
            availability: 20,
            timezone: "Europe/London".to_string(),
            work_preference: WorkPreference::Both,
            portfolio: None,
        }
    }

    #[test]
    fn test_role_tags() {
        assert_eq!(UserRole::FullStack.as_str(), "full-stack");
        assert_eq!("designer".parse::<UserRole>(), Ok(UserRole::Designer));
        assert!("manager".parse::<UserRole>().is_err());
        assert_eq!(
            serde_json::to_string(&UserRole::FullStack).unwrap(),
            "\"full-stack\""
        );
    }

    #[test]
    fn test_new_user_is_incomplete() {
        let user = User::new(1, "Ada");
        assert!(!user.profile_complete);
        assert!(user.role.is_none());
    }

    #[test]
    fn test_apply_profile_marks_complete() {
        let mut user = User::new(1, "");
        user.apply_profile(&update());

        assert!(user.profile_complete);
        assert_eq!(user.name, "Ada");
        assert_eq!(user.role, Some(UserRole::FullStack));
        assert_eq!(user.skills.len(), 2);
        assert_eq!(user.portfolio, Portfolio::default());
    }

    #[test]
    fn test_profile_update_validation() {
        assert!(update().validate().is_ok());

        let mut bad = update();
        bad.availability = 0;
        bad.name = String::new();
        let errors = bad.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("availability"));
        assert!(fields.contains_key("name"));
    }

    #[test]
    fn test_exact_preference() {
        assert!(WorkPreference::Startup.is_exactly(ProjectType::Startup));
        assert!(!WorkPreference::Startup.is_exactly(ProjectType::Freelance));
        assert!(!WorkPreference::Both.is_exactly(ProjectType::Startup));
    }
}
