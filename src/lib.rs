//! Rota: reviewer assignment for pull requests.
//!
//! Rota decides who reviews a pull request and who replaces a reviewer that
//! is swapped out, while tracking each pull request's lifecycle (open →
//! merged) and each reviewer's availability.
//!
//! # Architecture
//!
//! Rota follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for stores and randomness
//! - **Adapters**: Concrete implementations of ports (in-memory, `PostgreSQL`,
//!   operating-system random source)
//!
//! # Modules
//!
//! - [`directory`]: Teams, users and reviewer availability
//! - [`review`]: Pull requests and the reviewer-assignment engine
//! - [`error`]: Domain error taxonomy and codes
//! - [`config`]: Engine policy and database settings
//! - [`persistence`]: Shared `PostgreSQL` connection pooling
//! - [`telemetry`]: Structured logging bootstrap

pub mod config;
pub mod directory;
pub mod error;
pub mod persistence;
pub mod review;
pub mod telemetry;
