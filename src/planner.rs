//! Trip planner: sequence stops, then measure the resulting route.

use std::collections::BTreeMap;

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, warn};

use crate::metrics::{self, Leg, SpeedTable, TravelMode};
use crate::sequencer;
use crate::traits::{DistanceLookup, Stop};

/// One planning request: stops (start first) and the preferred mode.
#[derive(Debug, Clone)]
pub struct TripRequest<S> {
    pub places: Vec<S>,
    pub mode: TravelMode,
}

impl<S> TripRequest<S> {
    pub fn new(places: Vec<S>, mode: TravelMode) -> Self {
        Self { places, mode }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TripPlan<S> {
    /// Stops in visiting order.
    pub stops: Vec<S>,
    pub legs: Vec<Leg>,
    pub total_km: f64,
    pub mode: TravelMode,
    /// Travel time in hours for every mode, rounded to one decimal place.
    pub travel_hours: BTreeMap<TravelMode, f64>,
    /// True when any leg used a fallback distance.
    pub has_estimates: bool,
}

impl<S> TripPlan<S> {
    /// Travel time for the requested mode.
    pub fn hours(&self) -> f64 {
        self.travel_hours.get(&self.mode).copied().unwrap_or_default()
    }
}

#[derive(Debug, Clone)]
pub struct Planner<L> {
    lookup: L,
    speeds: SpeedTable,
}

impl<L: DistanceLookup> Planner<L> {
    pub fn new(lookup: L, speeds: SpeedTable) -> Self {
        Self { lookup, speeds }
    }

    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    pub fn speeds(&self) -> &SpeedTable {
        &self.speeds
    }

    /// Nearest-neighbor ordering of `places`, starting at `places[0]`.
    pub fn sequence<S: Stop + Clone>(&self, places: &[S]) -> Vec<S> {
        sequencer::sequence(places, &self.lookup)
    }

    /// Sequence `places` and measure the result.
    ///
    /// Leg distances are looked up once and reused for the totals, so a
    /// random fallback cannot make the legs and total disagree.
    pub fn plan<S: Stop + Clone>(&self, places: &[S], mode: TravelMode) -> TripPlan<S> {
        let stops = self.sequence(places);
        let legs = metrics::legs(&stops, &self.lookup);
        let total_km: f64 = legs.iter().map(|leg| leg.distance.km()).sum();
        let has_estimates = legs.iter().any(|leg| leg.distance.is_estimated());

        if has_estimates {
            let estimated = legs
                .iter()
                .filter(|leg| leg.distance.is_estimated())
                .map(|leg| format!("{} -> {}", leg.from, leg.to))
                .collect::<Vec<_>>();
            warn!(legs = ?estimated, "route uses estimated distances");
        }

        let travel_hours = TravelMode::ALL
            .into_iter()
            .map(|mode| (mode, self.speeds.travel_hours(total_km, mode)))
            .collect();

        debug!(stops = stops.len(), total_km, %mode, "planned trip");

        TripPlan {
            stops,
            legs,
            total_km,
            mode,
            travel_hours,
            has_estimates,
        }
    }
}

impl<L: DistanceLookup + Sync> Planner<L> {
    /// Plan independent requests in parallel. Output order matches input.
    pub fn plan_batch<S>(&self, requests: &[TripRequest<S>]) -> Vec<TripPlan<S>>
    where
        S: Stop + Clone + Send + Sync,
    {
        requests
            .par_iter()
            .map(|request| self.plan(&request.places, request.mode))
            .collect()
    }
}
