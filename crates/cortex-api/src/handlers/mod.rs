//! API handlers

pub mod collaborations;
pub mod projects;
pub mod requests;
pub mod users;
