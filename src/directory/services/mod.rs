//! Application services for team and user management.

mod error;
mod team;
mod user;

pub use error::{DirectoryServiceError, DirectoryServiceResult};
pub use team::{AddTeamRequest, TeamMemberRequest, TeamService};
pub use user::UserService;
