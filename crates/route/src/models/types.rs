//! Core data types for route feeds.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use geo::Point;

// ============================================================================
// Data Structures
// ============================================================================

/// Named place attached to a stop, when the feed supplies one
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Place {
    pub city: Arc<str>,
    pub region: Option<Arc<str>>,
}

impl fmt::Display for Place {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.region {
            Some(region) => write!(f, "{}, {}", self.city, region),
            None => write!(f, "{}", self.city),
        }
    }
}

/// A single stop on the route
///
/// `location` follows the geo convention: x is longitude, y is latitude.
#[derive(Clone, Debug, PartialEq)]
pub struct Waypoint {
    pub id: Option<Arc<str>>,
    pub arrival: DateTime<Utc>,
    pub location: Point,
    pub presents_delivered: u64,
    pub place: Option<Place>,
}

impl Waypoint {
    pub fn new(arrival: DateTime<Utc>, location: Point, presents_delivered: u64) -> Self {
        Self {
            id: None,
            arrival,
            location,
            presents_delivered,
            place: None,
        }
    }

    pub fn with_place(mut self, place: Place) -> Self {
        self.place = Some(place);
        self
    }

    /// Arrival at or before `now` counts as visited
    pub fn is_visited(&self, now: DateTime<Utc>) -> bool {
        self.arrival <= now
    }

    pub fn has_delivery(&self) -> bool {
        self.presents_delivered > 0
    }
}

/// Ordered stops, kept in feed order
///
/// Waypoints are never re-sorted by arrival time.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Route {
    waypoints: Vec<Waypoint>,
}

impl Route {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_waypoints(waypoints: Vec<Waypoint>) -> Self {
        Self { waypoints }
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    pub fn push(&mut self, waypoint: Waypoint) {
        self.waypoints.push(waypoint);
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Visited stops with at least one delivery, in feed order
    pub fn deliveries_before(&self, now: DateTime<Utc>) -> impl Iterator<Item = &Waypoint> {
        self.waypoints
            .iter()
            .filter(move |waypoint| waypoint.is_visited(now))
            .filter(|waypoint| waypoint.has_delivery())
    }
}

impl FromIterator<Waypoint> for Route {
    fn from_iter<I: IntoIterator<Item = Waypoint>>(iter: I) -> Self {
        Self::from_waypoints(iter.into_iter().collect())
    }
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    #[error("Fetch failed for {url}: {message}")]
    Fetch { url: String, message: String },

    #[error("Timed out fetching {0}")]
    Timeout(String),

    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("Malformed feed: {0}")]
    Malformed(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RouteError>;
