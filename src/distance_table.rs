//! Authored distance table with fuzzy name resolution.
//!
//! Lookups try, in order: an exact name match, a case-insensitive match,
//! then substring containment against entries in authored order. Each stage
//! checks the pair as given and then reversed. When nothing matches the
//! table falls back to a great-circle estimate (if both places have
//! registered coordinates) or to its `FallbackPolicy`, and tags the result
//! `Distance::Estimated`.

use std::collections::HashMap;
use std::path::Path;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::PlannerError;
use crate::haversine::GreatCircle;
use crate::traits::{Distance, DistanceLookup};

/// One authored `from -> to` distance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceEntry {
    pub from: String,
    pub to: String,
    pub km: f64,
}

/// What to return when a pair has no entry and no coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FallbackPolicy {
    /// Always the same distance.
    Fixed(f64),
    /// Uniformly drawn from `min_km..=max_km` on every lookup.
    Random { min_km: f64, max_km: f64 },
}

impl Default for FallbackPolicy {
    fn default() -> Self {
        FallbackPolicy::Random {
            min_km: 50.0,
            max_km: 450.0,
        }
    }
}

impl FallbackPolicy {
    pub fn validate(&self) -> Result<(), PlannerError> {
        match *self {
            FallbackPolicy::Fixed(km) if !(km.is_finite() && km > 0.0) => Err(
                PlannerError::InvalidFallback(format!("fixed distance must be positive, got {km}")),
            ),
            FallbackPolicy::Random { min_km, max_km }
                if !(min_km.is_finite() && max_km.is_finite() && min_km > 0.0 && max_km >= min_km) =>
            {
                Err(PlannerError::InvalidFallback(format!(
                    "random range must satisfy 0 < min <= max, got {min_km}..={max_km}"
                )))
            }
            _ => Ok(()),
        }
    }

    fn sample(&self) -> f64 {
        match *self {
            FallbackPolicy::Fixed(km) => km,
            FallbackPolicy::Random { min_km, max_km } => {
                if min_km >= max_km {
                    min_km
                } else {
                    // Rounding must not leave the range, or sub-kilometer ranges yield 0.
                    rand::rng().random_range(min_km..=max_km).round().clamp(min_km, max_km)
                }
            }
        }
    }
}

/// On-disk layout of a distance table.
#[derive(Debug, Default, Deserialize)]
struct TableFile {
    entries: Vec<DistanceEntry>,
    #[serde(default)]
    coordinates: HashMap<String, (f64, f64)>,
}

/// Distance table keyed by place name.
///
/// Symmetry is not enforced: a pair authored in one direction only is found
/// by the reversed lookup, and a pair authored both ways with different
/// values keeps both (see `asymmetric_pairs`).
#[derive(Debug, Clone)]
pub struct DistanceTable {
    entries: Vec<DistanceEntry>,
    /// Lowercased (from, to) per entry, same order as `entries`.
    folded_names: Vec<(String, String)>,
    exact: HashMap<String, HashMap<String, usize>>,
    folded: HashMap<String, HashMap<String, usize>>,
    coordinates: HashMap<String, (f64, f64)>,
    great_circle: Option<GreatCircle>,
    fallback: FallbackPolicy,
}

impl Default for DistanceTable {
    fn default() -> Self {
        Self::empty(FallbackPolicy::default())
    }
}

impl DistanceTable {
    /// Empty table. Fails if the fallback could produce a non-positive distance.
    pub fn new(fallback: FallbackPolicy) -> Result<Self, PlannerError> {
        fallback.validate()?;
        Ok(Self::empty(fallback))
    }

    fn empty(fallback: FallbackPolicy) -> Self {
        Self {
            entries: Vec::new(),
            folded_names: Vec::new(),
            exact: HashMap::new(),
            folded: HashMap::new(),
            coordinates: HashMap::new(),
            great_circle: None,
            fallback,
        }
    }

    pub fn from_entries(
        entries: impl IntoIterator<Item = DistanceEntry>,
        fallback: FallbackPolicy,
    ) -> Result<Self, PlannerError> {
        let mut table = Self::new(fallback)?;
        for entry in entries {
            table.insert(entry.from, entry.to, entry.km)?;
        }

        for (from, to) in table.asymmetric_pairs() {
            warn!(from, to, "distance table is asymmetric for pair");
        }

        Ok(table)
    }

    /// Parse a table from JSON: `{"entries": [{"from", "to", "km"}], "coordinates": {name: [lat, lng]}}`.
    pub fn from_json_str(json: &str, fallback: FallbackPolicy) -> Result<Self, PlannerError> {
        let file: TableFile = serde_json::from_str(json)?;
        let mut table = Self::from_entries(file.entries, fallback)?;
        for (name, location) in file.coordinates {
            table.set_coordinates(&name, location);
        }
        Ok(table)
    }

    pub fn from_path(path: impl AsRef<Path>, fallback: FallbackPolicy) -> Result<Self, PlannerError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| PlannerError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let table = Self::from_json_str(&json, fallback)?;
        info!(path = %path.display(), entries = table.len(), "loaded distance table");
        Ok(table)
    }

    /// Add or replace the `from -> to` entry.
    pub fn insert(
        &mut self,
        from: impl Into<String>,
        to: impl Into<String>,
        km: f64,
    ) -> Result<(), PlannerError> {
        let from = from.into();
        let to = to.into();
        if !(km.is_finite() && km > 0.0) {
            return Err(PlannerError::InvalidDistance { from, to, km });
        }

        if let Some(&idx) = self.exact.get(&from).and_then(|row| row.get(&to)) {
            self.entries[idx].km = km;
            return Ok(());
        }

        let idx = self.entries.len();
        let folded_from = fold(&from);
        let folded_to = fold(&to);

        self.exact.entry(from.clone()).or_default().insert(to.clone(), idx);
        self.folded
            .entry(folded_from.clone())
            .or_default()
            .entry(folded_to.clone())
            .or_insert(idx);
        self.folded_names.push((folded_from, folded_to));
        self.entries.push(DistanceEntry { from, to, km });
        Ok(())
    }

    /// Builder form of `insert`.
    pub fn with_entry(mut self, from: &str, to: &str, km: f64) -> Result<Self, PlannerError> {
        self.insert(from, to, km)?;
        Ok(self)
    }

    /// Register coordinates used by the great-circle fallback.
    pub fn set_coordinates(&mut self, name: &str, location: (f64, f64)) {
        self.coordinates.insert(fold(name), location);
    }

    /// Enable the great-circle fallback for pairs with known coordinates.
    pub fn with_great_circle(mut self, great_circle: GreatCircle) -> Self {
        self.great_circle = Some(great_circle);
        self
    }

    pub fn fallback(&self) -> FallbackPolicy {
        self.fallback
    }

    pub fn entries(&self) -> &[DistanceEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pairs authored in both directions with different distances.
    pub fn asymmetric_pairs(&self) -> Vec<(&str, &str)> {
        self.entries
            .iter()
            .filter(|entry| entry.from < entry.to)
            .filter_map(|entry| {
                let reverse = self.exact.get(&entry.to)?.get(&entry.from)?;
                (self.entries[*reverse].km != entry.km).then_some((entry.from.as_str(), entry.to.as_str()))
            })
            .collect()
    }

    /// Resolve a pair against the table only, without any fallback.
    pub fn lookup(&self, from: &str, to: &str) -> Option<f64> {
        let idx = exact_index(&self.exact, from, to)
            .or_else(|| exact_index(&self.exact, to, from))
            .or_else(|| {
                let (from, to) = (fold(from), fold(to));
                exact_index(&self.folded, &from, &to)
                    .or_else(|| exact_index(&self.folded, &to, &from))
                    .or_else(|| self.substring_index(&from, &to))
            })?;
        Some(self.entries[idx].km)
    }

    /// First entry, in authored order, whose names contain or are contained
    /// in the (already folded) query names.
    fn substring_index(&self, from: &str, to: &str) -> Option<usize> {
        if from.is_empty() || to.is_empty() {
            return None;
        }

        self.folded_names.iter().position(|(entry_from, entry_to)| {
            (overlaps(entry_from, from) && overlaps(entry_to, to))
                || (overlaps(entry_from, to) && overlaps(entry_to, from))
        })
    }

    fn estimate(&self, from: &str, to: &str) -> f64 {
        if let Some(great_circle) = self.great_circle {
            let locations = self
                .coordinates
                .get(&fold(from))
                .zip(self.coordinates.get(&fold(to)));
            if let Some((&a, &b)) = locations {
                let km = great_circle.road_km(a, b);
                if km > 0.0 {
                    debug!(from, to, km, "distance estimated from coordinates");
                    return km;
                }
            }
        }

        let km = self.fallback.sample();
        debug!(from, to, km, policy = ?self.fallback, "no distance data, using fallback");
        km
    }
}

impl DistanceLookup for DistanceTable {
    fn distance(&self, from: &str, to: &str) -> Distance {
        match self.lookup(from, to) {
            Some(km) => Distance::Known(km),
            None => Distance::Estimated(self.estimate(from, to)),
        }
    }
}

fn fold(name: &str) -> String {
    name.trim().to_lowercase()
}

fn overlaps(a: &str, b: &str) -> bool {
    a.contains(b) || b.contains(a)
}

fn exact_index(index: &HashMap<String, HashMap<String, usize>>, from: &str, to: &str) -> Option<usize> {
    index.get(from).and_then(|row| row.get(to)).copied()
}
