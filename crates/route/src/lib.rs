//! # santa-route
//!
//! Route feed decoding and position resolution for the Santa tracker.
//!
//! ## Features
//!
//! - **Feed decoding**: Turns the tracker's `destinations` document into an ordered [`Route`]
//! - **Resolution**: Picks the last visited stop with deliveries as the current [`Position`]
//! - **Summaries**: Stop counts, presents delivered and path length so far
//! - **Pluggable networking**: Implement [`FeedFetcher`] to supply feed bytes
//!
//! ## Example
//!
//! ```
//! use santa_route::prelude::*;
//! use chrono::{TimeZone, Utc};
//! use geo::Point;
//!
//! let now = Utc.timestamp_millis_opt(1_000).unwrap();
//! let route = Route::from_waypoints(vec![
//!     Waypoint::new(now - chrono::Duration::seconds(2), Point::new(20.0, 10.0), 3),
//!     Waypoint::new(now - chrono::Duration::seconds(1), Point::new(40.0, 30.0), 0),
//! ]);
//!
//! match resolve(&route, now) {
//!     Position::AtWaypoint { location, path, .. } => {
//!         assert_eq!(location, Point::new(20.0, 10.0));
//!         assert_eq!(path.0.len(), 1);
//!     }
//!     Position::AtBase => unreachable!(),
//! }
//! ```

pub mod feed;
pub mod models;
pub mod network;
pub mod resolver;
pub mod summary;

// Re-exports for convenience
pub mod prelude {
    pub use crate::models::types::*;
    pub use crate::network::traits::*;
    pub use crate::resolver::{resolve, Position};
    pub use crate::summary::RouteSummary;
}

pub use prelude::*;
