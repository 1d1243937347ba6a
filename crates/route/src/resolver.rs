//! Resolution of the current position from a route.

use chrono::{DateTime, Utc};
use geo::{LineString, Point};

use crate::models::types::{Place, Route};

/// Where the tracker currently places Santa
#[derive(Clone, Debug, PartialEq)]
pub enum Position {
    /// No visited stop has had a delivery yet
    AtBase,
    /// Last visited stop with a delivery, plus every such stop in feed order
    AtWaypoint {
        location: Point,
        path: LineString,
        place: Option<Place>,
    },
}

impl Position {
    pub fn location(&self) -> Option<Point> {
        match self {
            Position::AtBase => None,
            Position::AtWaypoint { location, .. } => Some(*location),
        }
    }
}

/// Resolve the position at `now`.
///
/// Only stops with `arrival <= now` and `presents_delivered > 0` count. The
/// last of them in feed order is the current position.
pub fn resolve(route: &Route, now: DateTime<Utc>) -> Position {
    let deliveries: Vec<_> = route.deliveries_before(now).collect();

    let Some(last) = deliveries.last() else {
        tracing::debug!("no deliveries among {} stops, at base", route.len());
        return Position::AtBase;
    };

    let path: LineString = deliveries.iter().map(|waypoint| waypoint.location.0).collect();
    tracing::debug!(
        "{} delivery stops, last at ({}, {})",
        deliveries.len(),
        last.location.y(),
        last.location.x()
    );

    Position::AtWaypoint {
        location: last.location,
        path,
        place: last.place.clone(),
    }
}
