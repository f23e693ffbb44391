//! Errors raised while loading planner data or talking to OSRM.
//!
//! Distance lookups, sequencing and metrics never fail; only the edges that
//! touch files, JSON or the network return these.

use thiserror::Error;

use crate::metrics::TravelMode;

#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("distance {from} -> {to} must be positive, got {km}")]
    InvalidDistance { from: String, to: String, km: f64 },

    #[error("average speed for {mode} must be positive, got {speed}")]
    InvalidSpeed { mode: TravelMode, speed: f64 },

    #[error("unknown travel mode {0:?}, expected car, bus or train")]
    UnknownMode(String),

    #[error("invalid fallback policy: {0}")]
    InvalidFallback(String),

    #[error("road factor must be at least 1.0, got {0}")]
    InvalidRoadFactor(f64),

    #[error("OSRM request failed: {0}")]
    Osrm(#[from] reqwest::Error),

    #[error("unexpected OSRM response: {0}")]
    OsrmResponse(String),
}
