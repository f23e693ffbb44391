//! Great-circle distance estimate (fallback when no table entry matches).
//!
//! Straight-line distance scaled by a road factor. Less accurate than an
//! authored or routed distance (ignores roads) but available whenever both
//! places have coordinates.

/// Typical ratio of road distance to straight-line distance.
pub const DEFAULT_ROAD_FACTOR: f64 = 1.3;

/// Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine-based road distance estimator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GreatCircle {
    /// Multiplier applied to the straight-line distance.
    pub road_factor: f64,
}

impl Default for GreatCircle {
    fn default() -> Self {
        Self {
            road_factor: DEFAULT_ROAD_FACTOR,
        }
    }
}

impl GreatCircle {
    pub fn new(road_factor: f64) -> Self {
        Self { road_factor }
    }

    /// Calculate haversine distance between two points in kilometers.
    pub fn haversine_km(from: (f64, f64), to: (f64, f64)) -> f64 {
        let (lat1, lng1) = from;
        let (lat2, lng2) = to;

        let lat1_rad = lat1.to_radians();
        let lat2_rad = lat2.to_radians();
        let delta_lat = (lat2 - lat1).to_radians();
        let delta_lng = (lng2 - lng1).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1_rad.cos() * lat2_rad.cos() * (delta_lng / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().asin();

        EARTH_RADIUS_KM * c
    }

    /// Estimated road distance in km, rounded to whole kilometers.
    pub fn road_km(&self, from: (f64, f64), to: (f64, f64)) -> f64 {
        (Self::haversine_km(from, to) * self.road_factor).round()
    }
}
