//! Test fixtures for trip-planner.
//!
//! Provides a small set of Karnataka places and a complete distance table.

pub mod karnataka;

pub use karnataka::*;
