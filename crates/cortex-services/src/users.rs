//! Profile services

use cortex_contracts::ProfileContract;
use cortex_core::{Id, OpError, OpResult};
use cortex_models::{ProfileUpdate, User};

use crate::base::{validate, ServiceContext};
use crate::store::CollaborationStore;

/// Public profile of any user
pub struct ShowUserService<'a, S: ?Sized> {
    ctx: ServiceContext<'a, S>,
}

impl<'a, S: CollaborationStore + ?Sized> ShowUserService<'a, S> {
    pub fn new(ctx: ServiceContext<'a, S>) -> Self {
        Self { ctx }
    }

    pub async fn call(self, user_id: Id) -> OpResult<User> {
        self.ctx
            .store
            .find_user(user_id)
            .await?
            .ok_or_else(|| OpError::not_found("User", user_id))
    }
}

/// Update the caller's own profile; a valid update makes the caller
/// eligible for matching
pub struct UpdateProfileService<'a, S: ?Sized> {
    ctx: ServiceContext<'a, S>,
}

impl<'a, S: CollaborationStore + ?Sized> UpdateProfileService<'a, S> {
    pub fn new(ctx: ServiceContext<'a, S>) -> Self {
        Self { ctx }
    }

    pub async fn call(self, mut update: ProfileUpdate) -> OpResult<User> {
        validate(&ProfileContract, &update)?;
        update.timezone = update.timezone.trim().to_string();
        update.skills = update.skills.iter().map(|s| s.trim().to_string()).collect();

        let user = self.ctx.store.save_profile(self.ctx.caller, &update).await?;
        tracing::info!(user_id = user.id, "profile updated");
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use crate::testing::profile;

    #[tokio::test]
    async fn test_update_marks_complete() {
        let store = MemoryStore::new();
        store.insert_user(User::new(3, "Lin"));
        assert!(store.matching_pool().await.unwrap().is_empty());

        let mut update = profile(" Europe/Lisbon ");
        update.skills = [" Figma ".to_string()].into();
        let user = UpdateProfileService::new(ServiceContext::new(&store, 3))
            .call(update)
            .await
            .unwrap();
        assert!(user.profile_complete);
        assert_eq!(user.timezone, "Europe/Lisbon");
        assert!(user.skills.contains("Figma"));

        let shown = ShowUserService::new(ServiceContext::new(&store, 1))
            .call(3)
            .await
            .unwrap();
        assert_eq!(shown, user);
    }

    #[tokio::test]
    async fn test_unknown_timezone_rejected() {
        let store = MemoryStore::new();
        let err = UpdateProfileService::new(ServiceContext::new(&store, 3))
            .call(profile("Nowhere/Special"))
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "validation_failed");
        assert!(store.find_user(3).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_missing_user() {
        let store = MemoryStore::new();
        let err = ShowUserService::new(ServiceContext::new(&store, 1))
            .call(42)
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 404);
    }
}
