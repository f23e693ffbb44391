//! OSRM HTTP adapter that fills a distance table with road distances.

use serde::Deserialize;
use tracing::{info, warn};

use crate::distance_table::{DistanceTable, FallbackPolicy};
use crate::error::PlannerError;
use crate::traits::Stop;

#[derive(Debug, Clone)]
pub struct OsrmConfig {
    pub base_url: String,
    pub profile: String,
    pub timeout_secs: u64,
}

impl Default for OsrmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            profile: "car".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OsrmClient {
    config: OsrmConfig,
    client: reqwest::blocking::Client,
}

impl OsrmClient {
    pub fn new(config: OsrmConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    pub fn table_url<S: Stop>(&self, places: &[S]) -> String {
        let coords = places
            .iter()
            .map(|place| {
                let (lat, lng) = place.location();
                format!("{:.6},{:.6}", lng, lat)
            })
            .collect::<Vec<_>>()
            .join(";");

        format!(
            "{}/table/v1/{}/{}?annotations=distance",
            self.config.base_url, self.config.profile, coords
        )
    }

    /// Fetch all pairwise road distances between `places` as a table keyed
    /// by place name.
    pub fn distance_table<S: Stop>(
        &self,
        places: &[S],
        fallback: FallbackPolicy,
    ) -> Result<DistanceTable, PlannerError> {
        if places.len() < 2 {
            return table_from_response(places, OsrmTableResponse::empty(), fallback);
        }

        let body = self
            .client
            .get(self.table_url(places))
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<OsrmTableResponse>())?;

        let table = table_from_response(places, body, fallback)?;
        info!(places = places.len(), entries = table.len(), "built distance table from OSRM");
        Ok(table)
    }
}

#[derive(Debug, Deserialize)]
struct OsrmTableResponse {
    code: String,
    #[serde(default)]
    message: Option<String>,
    /// Meters; `null` where no route exists.
    #[serde(default)]
    distances: Option<Vec<Vec<Option<f64>>>>,
}

impl OsrmTableResponse {
    fn empty() -> Self {
        Self {
            code: "Ok".to_string(),
            message: None,
            distances: Some(Vec::new()),
        }
    }
}

/// Parse a raw OSRM `table` response body for `places`.
pub fn parse_table_response<S: Stop>(
    places: &[S],
    body: &str,
    fallback: FallbackPolicy,
) -> Result<DistanceTable, PlannerError> {
    let response: OsrmTableResponse = serde_json::from_str(body)?;
    table_from_response(places, response, fallback)
}

fn table_from_response<S: Stop>(
    places: &[S],
    response: OsrmTableResponse,
    fallback: FallbackPolicy,
) -> Result<DistanceTable, PlannerError> {
    if response.code != "Ok" {
        return Err(PlannerError::OsrmResponse(format!(
            "{}: {}",
            response.code,
            response.message.unwrap_or_default()
        )));
    }

    let rows = response
        .distances
        .ok_or_else(|| PlannerError::OsrmResponse("missing distances annotation".to_string()))?;
    let square = rows.len() == places.len() && rows.iter().all(|row| row.len() == places.len());
    if !square && !(rows.is_empty() && places.len() < 2) {
        return Err(PlannerError::OsrmResponse(format!(
            "expected {n}x{n} matrix for {n} places",
            n = places.len()
        )));
    }

    let mut table = DistanceTable::new(fallback)?;
    for place in places {
        table.set_coordinates(place.name(), place.location());
    }

    for (i, row) in rows.iter().enumerate() {
        for (j, meters) in row.iter().enumerate() {
            if i == j {
                continue;
            }
            match meters {
                Some(meters) if *meters > 0.0 => {
                    let km = (meters / 1000.0).round().max(1.0);
                    table.insert(places[i].name(), places[j].name(), km)?;
                }
                _ => warn!(
                    from = places[i].name(),
                    to = places[j].name(),
                    "OSRM returned no route, pair left to fallback"
                ),
            }
        }
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{Distance, DistanceLookup, Place};

    fn places() -> Vec<Place> {
        vec![
            Place::new("bangalore", "Bangalore", 12.9716, 77.5946),
            Place::new("mysore", "Mysore Palace", 12.3052, 76.6552),
            Place::new("coorg", "Coorg", 12.4244, 75.7382),
        ]
    }

    #[test]
    fn test_table_url_uses_lng_lat_order() {
        let client = OsrmClient::new(OsrmConfig::default()).unwrap();
        let url = client.table_url(&places()[..2]);
        assert_eq!(
            url,
            "http://localhost:5000/table/v1/car/77.594600,12.971600;76.655200,12.305200?annotations=distance"
        );
    }

    #[test]
    fn test_parse_table_response() {
        let body = r#"{
            "code": "Ok",
            "distances": [
                [0, 143400, 265100],
                [143600, 0, 119800],
                [265000, null, 0]
            ]
        }"#;
        let table = parse_table_response(&places(), body, FallbackPolicy::Fixed(300.0)).unwrap();

        assert_eq!(table.len(), 5);
        assert_eq!(table.distance("Bangalore", "Mysore Palace"), Distance::Known(143.0));
        assert_eq!(table.distance("Mysore Palace", "Bangalore"), Distance::Known(144.0));
        // Coorg -> Mysore had no route; the reverse entry answers it.
        assert_eq!(table.distance("Coorg", "Mysore Palace"), Distance::Known(120.0));
    }

    #[test]
    fn test_error_code() {
        let body = r#"{"code": "InvalidQuery", "message": "Query string malformed"}"#;
        let err = parse_table_response(&places(), body, FallbackPolicy::default()).unwrap_err();
        assert!(matches!(err, PlannerError::OsrmResponse(msg) if msg.contains("InvalidQuery")));
    }

    #[test]
    fn test_matrix_shape_mismatch() {
        let body = r#"{"code": "Ok", "distances": [[0, 1000], [1000, 0]]}"#;
        let err = parse_table_response(&places(), body, FallbackPolicy::default()).unwrap_err();
        assert!(matches!(err, PlannerError::OsrmResponse(_)));
    }

    #[test]
    fn test_single_place_needs_no_request() {
        let client = OsrmClient::new(OsrmConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            ..OsrmConfig::default()
        })
        .unwrap();
        let table = client
            .distance_table(&places()[..1], FallbackPolicy::default())
            .unwrap();
        assert!(table.is_empty());
    }
}
