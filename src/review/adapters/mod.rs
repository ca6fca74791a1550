//! Adapter implementations for the review context.

pub mod memory;
pub mod postgres;
pub mod random;
