//! Core domain traits for the trip planner.
//!
//! These are intentionally minimal. Callers can route their own destination
//! types by implementing `Stop` for them.

use serde::{Deserialize, Serialize};

/// A stop that can be placed on a route.
///
/// Distances are looked up by display name, so `name` is the only thing the
/// sequencer and metrics need.
pub trait Stop {
    fn id(&self) -> &str;

    /// Display name, used as the distance lookup key.
    fn name(&self) -> &str;

    /// Location coordinates (lat, lng).
    fn location(&self) -> (f64, f64);
}

/// A named point of interest from the destination catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lng: f64,
}

impl Place {
    pub fn new(id: impl Into<String>, name: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            lat,
            lng,
        }
    }
}

impl Stop for Place {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn location(&self) -> (f64, f64) {
        (self.lat, self.lng)
    }
}

/// A road distance in kilometers, tagged with where it came from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", tag = "source", content = "km")]
pub enum Distance {
    /// Resolved against an authored table entry.
    Known(f64),
    /// Synthesized because no table entry matched.
    Estimated(f64),
}

impl Distance {
    pub fn km(&self) -> f64 {
        match *self {
            Distance::Known(km) | Distance::Estimated(km) => km,
        }
    }

    pub fn is_estimated(&self) -> bool {
        matches!(self, Distance::Estimated(_))
    }
}

/// Provides the distance between two places by name.
///
/// Implementations must always return a positive distance; missing data is
/// reported through `Distance::Estimated`, never as a failure.
pub trait DistanceLookup {
    fn distance(&self, from: &str, to: &str) -> Distance;
}

impl<T: DistanceLookup + ?Sized> DistanceLookup for &T {
    fn distance(&self, from: &str, to: &str) -> Distance {
        (**self).distance(from, to)
    }
}
