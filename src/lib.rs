//! trip-planner core
//!
//! Orders a set of named places into a visiting route and estimates
//! distance and travel time for it.

pub mod traits;
pub mod error;
pub mod distance_table;
pub mod haversine;
pub mod sequencer;
pub mod metrics;
pub mod config;
pub mod catalog;
pub mod planner;
pub mod osrm;
