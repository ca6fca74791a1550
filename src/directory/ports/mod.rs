//! Port contracts for the team and user directory.

pub mod repository;

#[cfg(test)]
pub use repository::MockDirectoryRepository;
pub use repository::{DirectoryRepository, DirectoryRepositoryError, DirectoryRepositoryResult};
