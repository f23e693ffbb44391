//! Planner configuration: average speeds and distance fallbacks.

use std::env;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::distance_table::FallbackPolicy;
use crate::error::PlannerError;
use crate::haversine::{DEFAULT_ROAD_FACTOR, GreatCircle};
use crate::metrics::SpeedTable;

/// Environment variable naming a JSON config file.
pub const CONFIG_PATH_VAR: &str = "TRIP_PLANNER_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub speeds: SpeedTable,
    /// Used when a pair has no table entry and no coordinates.
    pub fallback: FallbackPolicy,
    /// Road factor for coordinate-based estimates. `None` disables them.
    pub road_factor: Option<f64>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            speeds: SpeedTable::default(),
            fallback: FallbackPolicy::default(),
            road_factor: Some(DEFAULT_ROAD_FACTOR),
        }
    }
}

impl PlannerConfig {
    /// Load from the file named by `TRIP_PLANNER_CONFIG`, or defaults if unset.
    pub fn load() -> Result<Self, PlannerError> {
        match env::var(CONFIG_PATH_VAR) {
            Ok(path) => Self::from_path(path),
            Err(_) => {
                info!("{CONFIG_PATH_VAR} not set, using default planner config");
                Ok(Self::default())
            }
        }
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, PlannerError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| PlannerError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_json_str(&json)?;
        info!(path = %path.display(), "loaded planner config");
        Ok(config)
    }

    pub fn from_json_str(json: &str) -> Result<Self, PlannerError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), PlannerError> {
        self.speeds.validate()?;
        self.fallback.validate()?;
        if let Some(factor) = self.road_factor {
            if !(factor.is_finite() && factor >= 1.0) {
                return Err(PlannerError::InvalidRoadFactor(factor));
            }
        }
        Ok(())
    }

    pub fn great_circle(&self) -> Option<GreatCircle> {
        let great_circle = self.road_factor.map(GreatCircle::new);
        if great_circle.is_none() {
            warn!("coordinate estimates disabled, unknown pairs use the fallback policy");
        }
        great_circle
    }
}
