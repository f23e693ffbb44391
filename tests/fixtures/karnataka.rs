//! Deterministic Karnataka fixtures.
//!
//! Every pair the tests route through has a table entry, and the fallback is
//! fixed, so no test depends on random distances.

use trip_planner::distance_table::{DistanceEntry, DistanceTable, FallbackPolicy};
use trip_planner::traits::Place;

pub fn bangalore() -> Place {
    Place::new("bangalore", "Bangalore", 12.9716, 77.5946)
}

pub fn mysore() -> Place {
    Place::new("mysore", "Mysore", 12.3052, 76.6552)
}

pub fn hampi() -> Place {
    Place::new("hampi", "Hampi", 15.3350, 76.4600)
}

pub fn coorg() -> Place {
    Place::new("coorg", "Coorg", 12.4244, 75.7382)
}

pub fn badami() -> Place {
    Place::new("badami", "Badami", 15.9199, 75.6873)
}

/// Complete, symmetric table over Bangalore, Mysore, Hampi, Coorg, Badami.
pub fn complete_table() -> DistanceTable {
    let pairs = [
        ("Bangalore", "Mysore", 143.0),
        ("Bangalore", "Hampi", 340.0),
        ("Bangalore", "Coorg", 265.0),
        ("Bangalore", "Badami", 450.0),
        ("Mysore", "Coorg", 120.0),
        ("Mysore", "Hampi", 480.0),
        ("Mysore", "Badami", 530.0),
        ("Coorg", "Hampi", 560.0),
        ("Coorg", "Badami", 640.0),
        ("Hampi", "Badami", 140.0),
    ];

    let entries = pairs.iter().flat_map(|&(a, b, km)| {
        [
            DistanceEntry {
                from: a.to_string(),
                to: b.to_string(),
                km,
            },
            DistanceEntry {
                from: b.to_string(),
                to: a.to_string(),
                km,
            },
        ]
    });

    DistanceTable::from_entries(entries, FallbackPolicy::Fixed(999.0)).expect("fixture table is valid")
}
