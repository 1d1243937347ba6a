//! Progress statistics for a route at a point in time.

use chrono::{DateTime, Utc};
use geo::{Distance, Haversine};
use itertools::Itertools;

use crate::models::types::Route;

/// Statistics about how far along the route is
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RouteSummary {
    pub total_stops: usize,
    pub visited_stops: usize,
    pub delivery_stops: usize,
    /// Running total reported by the last delivery stop
    pub presents_delivered: u64,
    /// Great-circle length of the delivery path, in kilometers
    pub path_length_km: f64,
}

impl RouteSummary {
    pub fn compute(route: &Route, now: DateTime<Utc>) -> Self {
        let visited_stops = route
            .waypoints()
            .iter()
            .filter(|waypoint| waypoint.is_visited(now))
            .count();

        let deliveries: Vec<_> = route.deliveries_before(now).collect();

        let path_length_m: f64 = deliveries
            .iter()
            .tuple_windows()
            .map(|(a, b)| Haversine.distance(a.location, b.location))
            .sum();

        Self {
            total_stops: route.len(),
            visited_stops,
            delivery_stops: deliveries.len(),
            presents_delivered: deliveries
                .last()
                .map_or(0, |waypoint| waypoint.presents_delivered),
            path_length_km: path_length_m / 1_000.0,
        }
    }

    pub fn log_summary(&self) {
        tracing::info!(
            "Stops visited: {}/{} ({} with deliveries)",
            self.visited_stops,
            self.total_stops,
            self.delivery_stops
        );
        tracing::info!("Presents delivered: {}", self.presents_delivered);
        tracing::info!("Path length: {:.1} km", self.path_length_km);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::types::Waypoint;
    use approx::assert_relative_eq;
    use chrono::{Duration, TimeZone};
    use geo::Point;

    fn now() -> DateTime<Utc> {
        Utc.timestamp_millis_opt(1_545_700_000_000).unwrap()
    }

    #[test]
    fn test_empty_route_summary() {
        assert_eq!(RouteSummary::compute(&Route::empty(), now()), RouteSummary::default());
    }

    #[test]
    fn test_summary_counts() {
        let route = Route::from_waypoints(vec![
            Waypoint::new(now() - Duration::minutes(30), Point::new(0.0, 0.0), 26_932),
            Waypoint::new(now() - Duration::minutes(20), Point::new(1.0, 0.0), 0),
            Waypoint::new(now() - Duration::minutes(10), Point::new(2.0, 0.0), 64_226),
            Waypoint::new(now() + Duration::minutes(10), Point::new(3.0, 0.0), 90_000),
        ]);

        let summary = RouteSummary::compute(&route, now());
        assert_eq!(summary.total_stops, 4);
        assert_eq!(summary.visited_stops, 3);
        assert_eq!(summary.delivery_stops, 2);
        // Counts are running totals, so the last visited delivery stop has the figure
        assert_eq!(summary.presents_delivered, 64_226);

        // Two degrees of longitude along the equator is roughly 222 km
        assert_relative_eq!(summary.path_length_km, 222.4, max_relative = 0.01);
    }

    #[test]
    fn test_huge_counts_do_not_overflow() {
        let route = Route::from_waypoints(vec![
            Waypoint::new(now() - Duration::minutes(2), Point::new(0.0, 0.0), u64::MAX),
            Waypoint::new(now() - Duration::minutes(1), Point::new(1.0, 0.0), 1),
        ]);

        let summary = RouteSummary::compute(&route, now());
        assert_eq!(summary.delivery_stops, 2);
        assert_eq!(summary.presents_delivered, 1);
    }

    #[test]
    fn test_single_delivery_has_zero_length() {
        let route = Route::from_waypoints(vec![Waypoint::new(
            now() - Duration::minutes(1),
            Point::new(-77.0, 38.9),
            1,
        )]);

        assert_eq!(RouteSummary::compute(&route, now()).path_length_km, 0.0);
    }
}
