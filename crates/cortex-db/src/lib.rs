//! # cortex-db
//!
//! PostgreSQL storage for Cortex.
//!
//! [`PgStore`] implements the service layer's `CollaborationStore` with
//! runtime-checked SQL, so the crate builds without a live database.
//! Schema changes live in `migrations/` and are embedded at compile time.

pub mod pool;
pub mod repository;
pub mod rows;
pub mod store;

pub use pool::{Database, PoolStats};
pub use repository::{RepositoryError, RepositoryResult, MEMBER_INDEX, PENDING_REQUEST_INDEX};
pub use store::PgStore;
