//! Collaboration request services

mod create;
mod inbox;
mod invite;
mod respond;

pub use create::CreateRequestService;
pub use inbox::InboxService;
pub use invite::InviteCandidateService;
pub use respond::RespondToRequestService;
