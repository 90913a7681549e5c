//! Lifecycle state machines
//!
//! Pure functions only. Stores call them while holding their own lock or
//! transaction, which keeps the rules in one place.

mod factory;
mod project;
mod request;

pub use factory::CollaborationFactory;
pub use project::{ProjectLifecycle, TransitionPlan};
pub use request::RequestLifecycle;
