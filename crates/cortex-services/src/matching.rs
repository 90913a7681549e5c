//! rankCandidates

use cortex_contracts::Relationship;
use cortex_core::{Id, OpResult};
use cortex_matching::{
    MatchInput, MatchRanker, OffsetResolver, RankedCandidate, TimezoneOffsetResolver,
};

use crate::base::ServiceContext;
use crate::store::CollaborationStore;

/// Ranked candidate list for one of the caller's projects
///
/// Recomputed on every call and never stored. Offsets are resolved at
/// the moment the service is built.
pub struct RankCandidatesService<'a, S: ?Sized, R = TimezoneOffsetResolver> {
    ctx: ServiceContext<'a, S>,
    ranker: MatchRanker<R>,
}

impl<'a, S: CollaborationStore + ?Sized> RankCandidatesService<'a, S> {
    pub fn new(ctx: ServiceContext<'a, S>, limit: usize) -> Self {
        Self {
            ctx,
            ranker: MatchRanker::new(TimezoneOffsetResolver::now()).with_limit(limit),
        }
    }
}

impl<'a, S, R> RankCandidatesService<'a, S, R>
where
    S: CollaborationStore + ?Sized,
    R: OffsetResolver + Send + Sync,
{
    pub fn with_resolver<T: OffsetResolver>(self, resolver: T) -> RankCandidatesService<'a, S, T> {
        RankCandidatesService {
            ctx: self.ctx,
            ranker: MatchRanker::new(resolver).with_limit(self.ranker.limit()),
        }
    }

    pub async fn call(&self, project_id: Id) -> OpResult<Vec<RankedCandidate>> {
        let project = self.ctx.project(project_id).await?;
        self.ctx.require(&project, Relationship::Owner)?;

        let store = self.ctx.store;
        let owner_timezone = store
            .find_user(project.owner_id)
            .await?
            .map(|owner| owner.timezone)
            .unwrap_or_default();
        let population = store.matching_pool().await?;
        let requests = store.requests_for_project(project.id).await?;
        let collaborations = store.collaborations_for_project(project.id).await?;

        let ranked = self.ranker.rank(MatchInput {
            project: &project,
            owner_timezone: &owner_timezone,
            population: &population,
            requests: &requests,
            collaborations: &collaborations,
        });
        tracing::info!(
            project_id,
            caller_id = self.ctx.caller,
            candidates = ranked.len(),
            "ranked candidates"
        );
        Ok(ranked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use crate::testing::{new_project, profiled_user};
    use cortex_core::{Denial, OpError};
    use cortex_models::{Decision, NewCollaborationRequest, RequestKind};

    struct Utc0;

    impl OffsetResolver for Utc0 {
        fn offset_hours(&self, _timezone: &str) -> f64 {
            0.0
        }
    }

    async fn seeded() -> (MemoryStore, Id) {
        let store = MemoryStore::new();
        store.insert_user(profiled_user(1, "Owner"));
        for id in 2..=5 {
            store.insert_user(profiled_user(id, &format!("Candidate {}", id)));
        }
        let project = store.insert_project(new_project(1)).await.unwrap();
        (store, project.id)
    }

    #[tokio::test]
    async fn test_two_of_three_skills_scores_87() {
        let (store, project_id) = seeded().await;
        let ranked = RankCandidatesService::new(ServiceContext::new(&store, 1), 20)
            .with_resolver(Utc0)
            .call(project_id)
            .await
            .unwrap();

        let ids: Vec<Id> = ranked.iter().map(|c| c.user_id).collect();
        assert_eq!(ids, vec![2, 3, 4, 5]);
        assert!(ranked.iter().all(|c| c.score == 87));
    }

    #[tokio::test]
    async fn test_only_owner_may_rank() {
        let (store, project_id) = seeded().await;
        let err = RankCandidatesService::new(ServiceContext::new(&store, 2), 20)
            .call(project_id)
            .await
            .unwrap_err();
        assert!(matches!(err, OpError::Forbidden(Denial::NotOwner)));

        let err = RankCandidatesService::new(ServiceContext::new(&store, 1), 20)
            .call(999)
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 404);
    }

    #[tokio::test]
    async fn test_collaborators_and_pending_candidates_excluded() {
        let (store, project_id) = seeded().await;
        let joined = store
            .insert_request(NewCollaborationRequest {
                project_id,
                sender_id: 2,
                recipient_id: 1,
                kind: RequestKind::Application,
                message: String::new(),
            })
            .await
            .unwrap();
        store.resolve_request(joined.id, Decision::Accepted).await.unwrap();
        store
            .insert_request(NewCollaborationRequest {
                project_id,
                sender_id: 1,
                recipient_id: 3,
                kind: RequestKind::Invitation,
                message: String::new(),
            })
            .await
            .unwrap();

        let ranked = RankCandidatesService::new(ServiceContext::new(&store, 1), 20)
            .with_resolver(Utc0)
            .call(project_id)
            .await
            .unwrap();
        let ids: Vec<Id> = ranked.iter().map(|c| c.user_id).collect();
        assert_eq!(ids, vec![4, 5]);
    }
}
