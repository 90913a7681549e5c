//! Result type alias

use crate::error::OpError;

/// Standard Result type for Cortex operations
pub type OpResult<T> = Result<T, OpError>;
