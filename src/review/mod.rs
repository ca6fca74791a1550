//! Pull requests and the reviewer-assignment engine.
//!
//! Opening a pull request draws its reviewers from the author's active
//! teammates; reassignment swaps one reviewer for an eligible teammate of
//! that reviewer; merging is terminal and idempotent. Reviewer draws come
//! from a cryptographically secure [`ports::RandomSource`]. The module
//! follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
