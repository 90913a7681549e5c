//! Repository errors and their mapping onto the domain taxonomy
//!
//! Infrastructure failures become `Unavailable` or `Internal`; the only
//! database errors that surface as domain errors are the pending-request
//! unique index (`DuplicatePending`) and dangling references.

use cortex_core::{ConflictKind, OpError};

/// Unique index guarding one pending request per (project, candidate)
pub const PENDING_REQUEST_INDEX: &str = "collaboration_requests_one_pending";

/// Unique index guarding one collaboration per (project, user)
pub const MEMBER_INDEX: &str = "collaborations_one_per_member";

const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";
const SERIALIZATION_FAILURE: &str = "40001";
const DEADLOCK_DETECTED: &str = "40P01";

/// Error type for repository operations
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Corrupt row: {0}")]
    Decode(String),

    #[error(transparent)]
    Domain(#[from] OpError),
}

impl From<ConflictKind> for RepositoryError {
    fn from(kind: ConflictKind) -> Self {
        RepositoryError::Domain(kind.into())
    }
}

/// Result type for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl From<RepositoryError> for OpError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Domain(err) => err,
            RepositoryError::Decode(message) => OpError::Internal(message),
            RepositoryError::Database(err) => from_sqlx(err),
        }
    }
}

fn from_sqlx(err: sqlx::Error) -> OpError {
    match &err {
        sqlx::Error::Database(db) => {
            let code = db.code();
            match code.as_deref() {
                Some(UNIQUE_VIOLATION) if db.constraint() == Some(PENDING_REQUEST_INDEX) => {
                    ConflictKind::DuplicatePending.into()
                }
                Some(UNIQUE_VIOLATION) if db.constraint() == Some(MEMBER_INDEX) => {
                    ConflictKind::AlreadyCollaborator.into()
                }
                Some(FOREIGN_KEY_VIOLATION) => {
                    let mut errors = cortex_core::ValidationErrors::new();
                    errors.add_base("references a record that does not exist");
                    OpError::Validation(errors)
                }
                Some(SERIALIZATION_FAILURE) | Some(DEADLOCK_DETECTED) => {
                    tracing::warn!(error = %err, "transaction aborted by a concurrent writer");
                    OpError::Unavailable("concurrent update, try again".to_string())
                }
                _ => {
                    tracing::error!(error = %err, "database error");
                    OpError::Internal(err.to_string())
                }
            }
        }
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed => {
            tracing::error!(error = %err, "database unavailable");
            OpError::Unavailable(err.to_string())
        }
        _ => {
            tracing::error!(error = %err, "database error");
            OpError::Internal(err.to_string())
        }
    }
}
