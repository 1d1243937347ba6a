//! Decoding of the tracker's route document.
//!
//! The document is an object with a `destinations` array. Each record carries
//! an arrival time in epoch milliseconds, a delivered-presents count and a
//! `{ lat, lng }` location. Unknown fields are ignored and a missing
//! `destinations` key decodes to an empty route.

use chrono::{DateTime, Utc};
use geo::Point;
use serde::Deserialize;

use crate::models::types::{Place, Result, Route, Waypoint};

#[derive(Debug, Deserialize)]
struct RouteDocument {
    #[serde(default)]
    destinations: Vec<DestinationRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DestinationRecord {
    id: Option<String>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    arrival: DateTime<Utc>,
    presents_delivered: u64,
    location: LocationRecord,
    city: Option<String>,
    region: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LocationRecord {
    lat: f64,
    lng: f64,
}

impl From<DestinationRecord> for Waypoint {
    fn from(record: DestinationRecord) -> Self {
        let place = record.city.map(|city| Place {
            city: city.into(),
            region: record.region.map(Into::into),
        });

        Waypoint {
            id: record.id.map(Into::into),
            arrival: record.arrival,
            location: Point::new(record.location.lng, record.location.lat),
            presents_delivered: record.presents_delivered,
            place,
        }
    }
}

impl Route {
    /// Decode a route document.
    ///
    /// Any missing or mistyped field fails the whole document; callers decide
    /// how to degrade.
    pub fn from_json(bytes: &[u8]) -> Result<Route> {
        let document: RouteDocument = serde_json::from_slice(bytes)?;
        tracing::debug!("decoded {} destinations", document.destinations.len());

        Ok(document.destinations.into_iter().map(Waypoint::from).collect())
    }
}
