//! # cortex-core
//!
//! Core types, traits, and configuration for Cortex.
//!
//! This crate provides the foundational building blocks used across all other crates:
//! - The domain error taxonomy (`OpError`, `Denial`, `ConflictKind`)
//! - Result type aliases
//! - Core traits (Entity, Identifiable, Timestamped)
//! - Configuration types

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::*;
pub use result::*;
pub use traits::*;
