//! Trip metrics: leg distances, total distance and travel time per mode.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PlannerError;
use crate::traits::{Distance, DistanceLookup, Stop};

/// How the group travels between stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    Car,
    Bus,
    Train,
}

impl TravelMode {
    pub const ALL: [TravelMode; 3] = [TravelMode::Car, TravelMode::Bus, TravelMode::Train];
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TravelMode::Car => write!(f, "car"),
            TravelMode::Bus => write!(f, "bus"),
            TravelMode::Train => write!(f, "train"),
        }
    }
}

impl FromStr for TravelMode {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "car" => Ok(TravelMode::Car),
            "bus" => Ok(TravelMode::Bus),
            "train" => Ok(TravelMode::Train),
            other => Err(PlannerError::UnknownMode(other.to_string())),
        }
    }
}

/// Average speed per mode in km/h.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeedTable {
    pub car: f64,
    pub bus: f64,
    pub train: f64,
}

impl Default for SpeedTable {
    fn default() -> Self {
        Self {
            car: 60.0,
            bus: 50.0,
            train: 70.0,
        }
    }
}

impl SpeedTable {
    pub fn speed(&self, mode: TravelMode) -> f64 {
        match mode {
            TravelMode::Car => self.car,
            TravelMode::Bus => self.bus,
            TravelMode::Train => self.train,
        }
    }

    pub fn validate(&self) -> Result<(), PlannerError> {
        for mode in TravelMode::ALL {
            let speed = self.speed(mode);
            if !(speed.is_finite() && speed > 0.0) {
                return Err(PlannerError::InvalidSpeed { mode, speed });
            }
        }
        Ok(())
    }

    /// Hours needed to cover `km` in `mode`, rounded to one decimal place.
    pub fn travel_hours(&self, km: f64, mode: TravelMode) -> f64 {
        round_to_tenth(km / self.speed(mode))
    }
}

/// A single hop between consecutive stops.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Leg {
    pub from: String,
    pub to: String,
    pub distance: Distance,
}

/// Distances between consecutive stops, in route order.
pub fn legs<S, L>(route: &[S], lookup: &L) -> Vec<Leg>
where
    S: Stop,
    L: DistanceLookup + ?Sized,
{
    route
        .windows(2)
        .map(|pair| Leg {
            from: pair[0].name().to_string(),
            to: pair[1].name().to_string(),
            distance: lookup.distance(pair[0].name(), pair[1].name()),
        })
        .collect()
}

/// Sum of consecutive leg distances. Zero for routes with fewer than two stops.
pub fn total_distance<S, L>(route: &[S], lookup: &L) -> f64
where
    S: Stop,
    L: DistanceLookup + ?Sized,
{
    route
        .windows(2)
        .map(|pair| lookup.distance(pair[0].name(), pair[1].name()).km())
        .sum()
}

/// Total distance divided by the mode's average speed, in hours rounded to
/// one decimal place.
pub fn estimate_travel_time<S, L>(route: &[S], mode: TravelMode, speeds: &SpeedTable, lookup: &L) -> f64
where
    S: Stop,
    L: DistanceLookup + ?Sized,
{
    speeds.travel_hours(total_distance(route, lookup), mode)
}

/// Travel time in hours for a single `from -> to` hop.
pub fn leg_travel_time<L>(from: &str, to: &str, mode: TravelMode, speeds: &SpeedTable, lookup: &L) -> f64
where
    L: DistanceLookup + ?Sized,
{
    speeds.travel_hours(lookup.distance(from, to).km(), mode)
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
