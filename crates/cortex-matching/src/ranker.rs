//! Ranking: filter the pool, score each candidate, sort, truncate

use std::collections::{BTreeSet, HashMap};

use cortex_core::traits::Id;
use cortex_models::{
    Collaboration, CollaborationRequest, Portfolio, Project, User, UserRole, WorkPreference,
};
use serde::Serialize;

use crate::filter::CandidateFilter;
use crate::scoring::ScoreBreakdown;
use crate::timezone::OffsetResolver;

/// Default number of candidates returned
pub const DEFAULT_LIMIT: usize = 20;

/// One entry of a match list: the candidate's public profile plus score
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedCandidate {
    pub user_id: Id,
    pub score: u8,
    pub name: String,
    pub role: Option<UserRole>,
    pub skills: BTreeSet<String>,
    pub availability: u32,
    pub timezone: String,
    pub work_preference: Option<WorkPreference>,
    pub portfolio: Portfolio,
}

impl RankedCandidate {
    fn new(user: &User, score: u8) -> Self {
        Self {
            user_id: user.id,
            score,
            name: user.name.clone(),
            role: user.role,
            skills: user.skills.clone(),
            availability: user.availability,
            timezone: user.timezone.clone(),
            work_preference: user.work_preference,
            portfolio: user.portfolio.clone(),
        }
    }
}

/// Snapshot the ranker works from
#[derive(Debug, Clone, Copy)]
pub struct MatchInput<'a> {
    pub project: &'a Project,
    /// The owner's timezone name; an unknown owner is treated as UTC
    pub owner_timezone: &'a str,
    pub population: &'a [User],
    pub requests: &'a [CollaborationRequest],
    pub collaborations: &'a [Collaboration],
}

/// Ranks a candidate pool against one project
#[derive(Debug, Clone)]
pub struct MatchRanker<R> {
    resolver: R,
    limit: usize,
}

impl<R: OffsetResolver> MatchRanker<R> {
    pub fn new(resolver: R) -> Self {
        Self {
            resolver,
            limit: DEFAULT_LIMIT,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Eligible candidates, best first, at most `limit` of them
    ///
    /// Equal scores are ordered by ascending user id so the output is
    /// stable for a given snapshot.
    pub fn rank(&self, input: MatchInput<'_>) -> Vec<RankedCandidate> {
        let filter = CandidateFilter::new(input.project, input.requests, input.collaborations);
        let owner_offset = self.resolver.offset_hours(input.owner_timezone);

        let mut offsets: HashMap<&str, f64> = HashMap::new();
        let mut ranked: Vec<RankedCandidate> = filter
            .apply(input.population)
            .into_iter()
            .map(|user| {
                let offset = *offsets
                    .entry(user.timezone.as_str())
                    .or_insert_with(|| self.resolver.offset_hours(&user.timezone));
                let score =
                    ScoreBreakdown::compute(user, input.project, owner_offset, offset).score();
                RankedCandidate::new(user, score)
            })
            .collect();

        ranked.sort_by(|a, b| b.score.cmp(&a.score).then(a.user_id.cmp(&b.user_id)));
        ranked.truncate(self.limit);

        tracing::debug!(
            project_id = input.project.id,
            pool = input.population.len(),
            excluded = filter.exclusions().len(),
            returned = ranked.len(),
            "ranked candidates"
        );
        ranked
    }
}
