//! Shared service plumbing
//!
//! Every service is built from a [`ServiceContext`]: the store it works
//! against and the authenticated caller it acts for.

use cortex_contracts::{authorize, Contract, Guarded, Relationship};
use cortex_core::{Id, OpError, OpResult};
use cortex_models::{CollaborationDetail, CollaborationRequest, Project};

use crate::store::CollaborationStore;

/// Store and caller for one inbound operation
pub struct ServiceContext<'a, S: ?Sized> {
    pub store: &'a S,
    pub caller: Id,
}

impl<'a, S: ?Sized> Clone for ServiceContext<'a, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, S: ?Sized> Copy for ServiceContext<'a, S> {}

impl<'a, S: CollaborationStore + ?Sized> ServiceContext<'a, S> {
    pub fn new(store: &'a S, caller: Id) -> Self {
        Self { store, caller }
    }

    /// Fail with the matching denial unless the caller holds `relationship`
    pub fn require<E: Guarded + ?Sized>(&self, entity: &E, relationship: Relationship) -> OpResult<()> {
        authorize(self.caller, entity, relationship).map_err(|denial| {
            tracing::debug!(caller_id = self.caller, ?relationship, %denial, "denied");
            OpError::from(denial)
        })
    }

    pub async fn project(&self, id: Id) -> OpResult<Project> {
        self.store
            .find_project(id)
            .await?
            .ok_or_else(|| OpError::not_found("Project", id))
    }

    pub async fn request(&self, id: Id) -> OpResult<CollaborationRequest> {
        self.store
            .find_request(id)
            .await?
            .ok_or_else(|| OpError::not_found("CollaborationRequest", id))
    }

    pub async fn collaboration(&self, id: Id) -> OpResult<CollaborationDetail> {
        self.store
            .collaboration_detail(id)
            .await?
            .ok_or_else(|| OpError::not_found("Collaboration", id))
    }
}

/// Run `contract` and lift its errors into [`OpError::Validation`]
pub fn validate<T, C: Contract<T>>(contract: &C, entity: &T) -> OpResult<()> {
    contract.validate(entity).map_err(OpError::Validation)
}
