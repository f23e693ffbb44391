//! Built-in Karnataka destination catalog and authored road distances.
//!
//! This is configuration data. Nothing reads it implicitly: callers build a
//! table with `distance_table` and pass it to the planner, so tests can use
//! their own fixtures instead.

use std::collections::HashSet;

use crate::config::PlannerConfig;
use crate::distance_table::{DistanceEntry, DistanceTable};
use crate::error::PlannerError;
use crate::traits::Place;

struct Destination {
    id: &'static str,
    name: &'static str,
    lat: f64,
    lng: f64,
    /// Ids of nearby places. Some are not catalog entries.
    nearby: &'static [&'static str],
}

impl Destination {
    fn place(&self) -> Place {
        Place::new(self.id, self.name, self.lat, self.lng)
    }
}

const DESTINATIONS: &[Destination] = &[
    Destination { id: "hampi", name: "Hampi", lat: 15.3350, lng: 76.4600, nearby: &["badami", "hospet"] },
    Destination { id: "mysore", name: "Mysore Palace", lat: 12.3052, lng: 76.6552, nearby: &["coorg", "bandipur"] },
    Destination { id: "badami", name: "Badami Cave Temples", lat: 15.9199, lng: 75.6873, nearby: &["pattadakal", "aihole"] },
    Destination { id: "coorg", name: "Coorg", lat: 12.4244, lng: 75.7382, nearby: &["mysore", "wayanad"] },
    Destination { id: "gokarna", name: "Gokarna", lat: 14.5479, lng: 74.3188, nearby: &["murudeshwar", "karwar"] },
    Destination { id: "bandipur", name: "Bandipur National Park", lat: 11.6700, lng: 76.6338, nearby: &["mysore", "wayanad"] },
    Destination { id: "jog-falls", name: "Jog Falls", lat: 14.2236, lng: 74.7933, nearby: &["gokarna", "murdeshwar"] },
    Destination { id: "chikmagalur", name: "Chikmagalur", lat: 13.3161, lng: 75.7720, nearby: &["coorg", "shimoga"] },
    Destination { id: "murudeshwar", name: "Murudeshwar", lat: 14.0940, lng: 74.4869, nearby: &["gokarna", "jog-falls"] },
    Destination { id: "udupi", name: "Udupi", lat: 13.3409, lng: 74.7421, nearby: &["mangalore", "murudeshwar"] },
];

/// Complete matrix over catalog display names plus Bangalore.
const DISPLAY_NAME_DISTANCES: &[(&str, &str, f64)] = &[
    ("Bangalore", "Hampi", 340.0),
    ("Bangalore", "Mysore Palace", 145.0),
    ("Bangalore", "Badami Cave Temples", 450.0),
    ("Bangalore", "Coorg", 260.0),
    ("Bangalore", "Gokarna", 480.0),
    ("Bangalore", "Bandipur National Park", 220.0),
    ("Hampi", "Mysore Palace", 420.0),
    ("Hampi", "Badami Cave Temples", 140.0),
    ("Hampi", "Coorg", 560.0),
    ("Hampi", "Gokarna", 320.0),
    ("Hampi", "Bandipur National Park", 520.0),
    ("Mysore Palace", "Badami Cave Temples", 530.0),
    ("Mysore Palace", "Coorg", 120.0),
    ("Mysore Palace", "Gokarna", 560.0),
    ("Mysore Palace", "Bandipur National Park", 80.0),
    ("Badami Cave Temples", "Coorg", 640.0),
    ("Badami Cave Temples", "Gokarna", 280.0),
    ("Badami Cave Temples", "Bandipur National Park", 610.0),
    ("Coorg", "Gokarna", 420.0),
    ("Coorg", "Bandipur National Park", 160.0),
    ("Gokarna", "Bandipur National Park", 630.0),
];

/// Transport route distances keyed by short town names, authored per origin.
/// Short names also match display names by substring ("Mysore" finds
/// "Mysore Palace").
const TRANSPORT_DISTANCES: &[(&str, &str, f64)] = &[
    ("Bangalore", "Mysore", 143.0),
    ("Bangalore", "Hampi", 340.0),
    ("Bangalore", "Coorg", 265.0),
    ("Bangalore", "Badami", 450.0),
    ("Bangalore", "Gokarna", 485.0),
    ("Bangalore", "Bandipur", 220.0),
    ("Mysore", "Bangalore", 143.0),
    ("Mysore", "Coorg", 120.0),
    ("Mysore", "Bandipur", 80.0),
    ("Mysore", "Hampi", 480.0),
    ("Hampi", "Bangalore", 340.0),
    ("Hampi", "Badami", 140.0),
    ("Hampi", "Gokarna", 355.0),
    ("Coorg", "Bangalore", 265.0),
    ("Coorg", "Mysore", 120.0),
    ("Badami", "Bangalore", 450.0),
    ("Badami", "Hampi", 140.0),
    ("Gokarna", "Bangalore", 485.0),
    ("Gokarna", "Hampi", 355.0),
    ("Bandipur", "Bangalore", 220.0),
    ("Bandipur", "Mysore", 80.0),
];

/// Bangalore is the usual trip origin but is not itself a catalog destination.
pub fn bangalore() -> Place {
    Place::new("bangalore", "Bangalore", 12.9716, 77.5946)
}

pub fn destinations() -> Vec<Place> {
    DESTINATIONS.iter().map(Destination::place).collect()
}

pub fn find(id: &str) -> Option<Place> {
    DESTINATIONS.iter().find(|d| d.id == id).map(Destination::place)
}

/// Case-insensitive lookup by display name.
pub fn find_by_name(name: &str) -> Option<Place> {
    let name = name.trim();
    DESTINATIONS
        .iter()
        .find(|d| d.name.eq_ignore_ascii_case(name))
        .map(Destination::place)
}

/// Catalog destinations listed as nearby `id`, in catalog order. Unknown ids
/// yield an empty list; nearby ids outside the catalog are skipped.
pub fn nearby(id: &str) -> Vec<Place> {
    let Some(origin) = DESTINATIONS.iter().find(|d| d.id == id) else {
        return Vec::new();
    };

    DESTINATIONS
        .iter()
        .filter(|d| origin.nearby.contains(&d.id))
        .map(Destination::place)
        .collect()
}

/// Authored entries in lookup order.
///
/// The display-name matrix is listed in both directions and comes first.
/// Transport distances follow for pairs the matrix does not already cover,
/// so the first authored value of a pair wins.
pub fn authored_entries() -> impl Iterator<Item = DistanceEntry> {
    let both_ways = DISPLAY_NAME_DISTANCES
        .iter()
        .flat_map(|&(from, to, km)| [(from, to, km), (to, from, km)]);

    let mut seen = HashSet::new();
    both_ways
        .chain(TRANSPORT_DISTANCES.iter().copied())
        .filter(move |&(from, to, _)| seen.insert((from, to)))
        .map(|(from, to, km)| DistanceEntry {
            from: from.to_string(),
            to: to.to_string(),
            km,
        })
}

/// The authored table with catalog coordinates registered for estimates.
pub fn distance_table(config: &PlannerConfig) -> Result<DistanceTable, PlannerError> {
    config.validate()?;
    let mut table = DistanceTable::from_entries(authored_entries(), config.fallback)?;
    if let Some(great_circle) = config.great_circle() {
        table = table.with_great_circle(great_circle);
    }

    for place in destinations().into_iter().chain(std::iter::once(bangalore())) {
        table.set_coordinates(&place.name, (place.lat, place.lng));
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance_table::FallbackPolicy;
    use crate::traits::{Distance, DistanceLookup};

    fn table() -> DistanceTable {
        let config = PlannerConfig {
            fallback: FallbackPolicy::Fixed(300.0),
            road_factor: None,
            ..PlannerConfig::default()
        };
        distance_table(&config).unwrap()
    }

    #[test]
    fn test_catalog_ids_unique() {
        let mut ids = destinations().into_iter().map(|place| place.id).collect::<Vec<_>>();
        let count = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), count);
    }

    #[test]
    fn test_find() {
        assert_eq!(find("coorg").map(|place| place.name), Some("Coorg".to_string()));
        assert!(find("atlantis").is_none());
    }

    #[test]
    fn test_find_by_name_ignores_case() {
        assert_eq!(find_by_name("mysore palace").map(|place| place.id), Some("mysore".to_string()));
        assert_eq!(find_by_name(" JOG FALLS ").map(|place| place.id), Some("jog-falls".to_string()));
        assert!(find_by_name("Mysore").is_none());
    }

    #[test]
    fn test_nearby_skips_ids_outside_catalog() {
        let ids = nearby("gokarna").into_iter().map(|place| place.id).collect::<Vec<_>>();
        assert_eq!(ids, vec!["murudeshwar"]);

        let ids = nearby("mysore").into_iter().map(|place| place.id).collect::<Vec<_>>();
        assert_eq!(ids, vec!["coorg", "bandipur"]);

        assert!(nearby("badami").is_empty());
        assert!(nearby("atlantis").is_empty());
    }

    #[test]
    fn test_authored_entries_have_no_duplicate_pairs() {
        let entries = authored_entries().collect::<Vec<_>>();
        let pairs = entries
            .iter()
            .map(|entry| (entry.from.as_str(), entry.to.as_str()))
            .collect::<HashSet<_>>();
        assert_eq!(pairs.len(), entries.len());
    }

    #[test]
    fn test_authored_table_is_symmetric() {
        let table = table();
        assert!(table.asymmetric_pairs().is_empty());
        for entry in table.entries() {
            assert_eq!(
                table.distance(&entry.from, &entry.to),
                table.distance(&entry.to, &entry.from),
                "{} <-> {}",
                entry.from,
                entry.to
            );
        }
    }

    #[test]
    fn test_display_name_matrix_is_complete() {
        let table = table();
        let mut names = DESTINATIONS[..6].iter().map(|d| d.name).collect::<Vec<_>>();
        names.push("Bangalore");
        for from in &names {
            for to in &names {
                if from != to {
                    assert!(table.lookup(from, to).is_some(), "{from} -> {to}");
                }
            }
        }
        assert_eq!(table.distance("Coorg", "Hampi"), Distance::Known(560.0));
        assert_eq!(table.distance("Bandipur National Park", "Hampi"), Distance::Known(520.0));
    }

    #[test]
    fn test_short_names_use_transport_distances() {
        let table = table();
        assert_eq!(table.distance("Bangalore", "Mysore"), Distance::Known(143.0));
        assert_eq!(table.distance("Mysore", "Hampi"), Distance::Known(480.0));
        // Covered by the display-name matrix, which wins.
        assert_eq!(table.distance("Bangalore", "Coorg"), Distance::Known(260.0));
    }

    #[test]
    fn test_catalog_names_resolve() {
        let table = table();
        assert_eq!(table.distance("Bangalore", "Mysore Palace"), Distance::Known(145.0));
        assert_eq!(table.distance("Badami Cave Temples", "Hampi"), Distance::Known(140.0));
        assert_eq!(table.distance("bandipur national park", "MYSORE PALACE"), Distance::Known(80.0));
    }

    #[test]
    fn test_unlisted_catalog_pair_estimated_from_coordinates() {
        let table = distance_table(&PlannerConfig::default()).unwrap();
        let distance = table.distance("Udupi", "Murudeshwar");
        assert!(distance.is_estimated());
        assert!(distance.km() > 50.0 && distance.km() < 150.0, "got {}", distance.km());
    }
}
