//! Nearest-neighbor route sequencing.
//!
//! The first stop is fixed as the start. From there the route is extended by
//! repeatedly taking the closest stop not yet visited. This is a greedy
//! heuristic ordering: O(n²) lookups, no backtracking, and no guarantee
//! that the result is the shortest route (a long final leg is common).

use tracing::debug;

use crate::traits::{DistanceLookup, Stop};

/// Order `places` by the nearest-neighbor heuristic, starting at `places[0]`.
///
/// Inputs with fewer than three stops are returned in their original order.
/// Ties go to the candidate that appears first in the input.
pub fn sequence<S, L>(places: &[S], lookup: &L) -> Vec<S>
where
    S: Stop + Clone,
    L: DistanceLookup + ?Sized,
{
    if places.len() < 3 {
        return places.to_vec();
    }

    let mut unvisited: Vec<&S> = places[1..].iter().collect();
    let mut current = &places[0];
    let mut route = Vec::with_capacity(places.len());
    route.push(current.clone());

    while !unvisited.is_empty() {
        let mut nearest_index = 0;
        let mut shortest = f64::INFINITY;

        for (index, candidate) in unvisited.iter().enumerate() {
            let km = lookup.distance(current.name(), candidate.name()).km();
            if km < shortest {
                shortest = km;
                nearest_index = index;
            }
        }

        let next = unvisited.remove(nearest_index);
        debug!(from = current.name(), to = next.name(), km = shortest, "next nearest stop");
        route.push(next.clone());
        current = next;
    }

    route
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{Distance, Place};

    /// Distance is the absolute difference of the numeric names.
    struct LineLookup;

    impl DistanceLookup for LineLookup {
        fn distance(&self, from: &str, to: &str) -> Distance {
            let a: f64 = from.parse().unwrap();
            let b: f64 = to.parse().unwrap();
            Distance::Known((a - b).abs())
        }
    }

    fn points(names: &[&str]) -> Vec<Place> {
        names.iter().map(|name| Place::new(*name, *name, 0.0, 0.0)).collect()
    }

    fn names(route: &[Place]) -> Vec<&str> {
        route.iter().map(|place| place.name.as_str()).collect()
    }

    #[test]
    fn test_empty_input() {
        let route = sequence(&Vec::<Place>::new(), &LineLookup);
        assert!(route.is_empty());
    }

    #[test]
    fn test_short_inputs_unchanged() {
        let one = points(&["5"]);
        assert_eq!(sequence(&one, &LineLookup), one);

        let two = points(&["5", "0"]);
        assert_eq!(sequence(&two, &LineLookup), two);
    }

    #[test]
    fn test_orders_by_nearest() {
        let route = sequence(&points(&["0", "9", "1", "4"]), &LineLookup);
        assert_eq!(names(&route), vec!["0", "1", "4", "9"]);
    }

    #[test]
    fn test_start_stays_first() {
        let route = sequence(&points(&["5", "0", "10", "6"]), &LineLookup);
        assert_eq!(names(&route), vec!["5", "6", "10", "0"]);
    }

    #[test]
    fn test_tie_goes_to_first_candidate() {
        let route = sequence(&points(&["5", "7", "3", "20"]), &LineLookup);
        assert_eq!(names(&route), vec!["5", "7", "3", "20"]);
    }

    #[test]
    fn test_result_is_permutation() {
        let input = points(&["3", "8", "1", "6", "2", "9"]);
        let mut route = names(&sequence(&input, &LineLookup))
            .into_iter()
            .map(str::to_string)
            .collect::<Vec<_>>();
        let mut expected = names(&input).into_iter().map(str::to_string).collect::<Vec<_>>();
        route.sort();
        expected.sort();
        assert_eq!(route, expected);
    }
}
