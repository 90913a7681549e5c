//! # cortex-contracts
//!
//! Contracts validate input before a create or update reaches the store;
//! the policy module answers "may this caller touch this entity".
//! Contracts never consult the store, so anything that depends on
//! current state (duplicates, transitions) is checked by the services.

pub mod base;
pub mod checkins;
pub mod policy;
pub mod profiles;
pub mod projects;
pub mod requests;

pub use base::*;
pub use checkins::CheckinContract;
pub use policy::{authorize, role_of, Guarded, Relationship};
pub use profiles::ProfileContract;
pub use projects::ProjectDetailsContract;
pub use requests::{RequestContract, MAX_MESSAGE_LENGTH};
