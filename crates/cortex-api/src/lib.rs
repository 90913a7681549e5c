//! # cortex-api
//!
//! JSON HTTP API for Cortex.
//!
//! Handlers are thin: they extract the caller and the payload, build a
//! service from `cortex-services` and map its `OpError` onto a status
//! code and an `{ _type, errorIdentifier, message }` body.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod routes;

pub use extractors::AppState;
pub use routes::router;
