//! Candidate pool filtering
//!
//! A user is left out of a project's pool if they own it, if they are
//! the candidate of a pending or accepted request on it, or if they
//! already hold a collaboration on it (any status). Of the rest, only
//! profile-complete users whose role is needed and whose availability
//! covers the weekly hours are kept. Dropping a user is not an error.

use std::collections::BTreeSet;

use cortex_core::traits::Id;
use cortex_models::{Collaboration, CollaborationRequest, Project, User};

/// Users who may not appear in a project's candidate pool
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet(BTreeSet<Id>);

impl ExclusionSet {
    pub fn contains(&self, user_id: Id) -> bool {
        self.0.contains(&user_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Id> + '_ {
        self.0.iter().copied()
    }
}

/// Build the exclusion set for `project`
///
/// Requests and collaborations belonging to other projects are ignored,
/// so callers may pass a wider snapshot.
pub fn exclusion_set(
    project: &Project,
    requests: &[CollaborationRequest],
    collaborations: &[Collaboration],
) -> ExclusionSet {
    let owner = std::iter::once(project.owner_id);
    let requested = requests
        .iter()
        .filter(|r| r.project_id == project.id && r.holds_candidate())
        .map(CollaborationRequest::candidate_id);
    let joined = collaborations
        .iter()
        .filter(|c| c.project_id == project.id)
        .map(|c| c.user_id);

    ExclusionSet(owner.chain(requested).chain(joined).collect())
}

/// Eligibility predicate for a single candidate
pub struct CandidateFilter<'a> {
    project: &'a Project,
    exclusions: ExclusionSet,
}

impl<'a> CandidateFilter<'a> {
    pub fn new(
        project: &'a Project,
        requests: &[CollaborationRequest],
        collaborations: &[Collaboration],
    ) -> Self {
        Self {
            project,
            exclusions: exclusion_set(project, requests, collaborations),
        }
    }

    pub fn exclusions(&self) -> &ExclusionSet {
        &self.exclusions
    }

    pub fn accepts(&self, user: &User) -> bool {
        user.profile_complete
            && !self.exclusions.contains(user.id)
            && user.role.is_some_and(|role| self.project.needs_role(role))
            && user.availability >= self.project.details.hours_per_week
    }

    /// Eligible candidates of `population`, in input order
    pub fn apply<'u>(&self, population: &'u [User]) -> Vec<&'u User> {
        population.iter().filter(|u| self.accepts(u)).collect()
    }
}
