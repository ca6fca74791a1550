//! Domain model for teams and their members.
//!
//! A user belongs to exactly one team and is retired by deactivation rather
//! than removal.

mod ids;
mod team;
mod user;

pub use ids::{TeamName, UserId};
pub use team::Team;
pub use user::User;
