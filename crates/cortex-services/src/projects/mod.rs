//! Project services

mod create;
mod read;
mod status;
mod update;

pub use create::CreateProjectService;
pub use read::{ListProjectsService, ProjectScope, ShowProjectService};
pub use status::UpdateProjectStatusService;
pub use update::UpdateProjectService;
