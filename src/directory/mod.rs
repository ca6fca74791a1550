//! Team and user directory for Rota.
//!
//! Holds the Team → Users and User → active-flag facts consulted by the
//! reviewer-assignment engine. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
