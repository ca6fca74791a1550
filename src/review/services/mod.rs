//! Application services for the review context.

mod assignment;
mod error;
pub mod selection;

pub use assignment::{
    CreatePullRequestRequest, ReassignReviewerRequest, Reassignment, ReviewAssignmentService,
};
pub use error::{ReviewServiceError, ReviewServiceResult};
