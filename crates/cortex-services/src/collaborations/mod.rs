//! Collaboration services

mod checkins;
mod detail;
mod list;

pub use checkins::{ListCheckinsService, PostCheckinService};
pub use detail::CollaborationDetailService;
pub use list::ListCollaborationsService;
