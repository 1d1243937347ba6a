pub mod config;
pub mod fetch;
pub mod overlay;
pub mod render;
pub mod tracker;

// Re-export the route crate
pub use santa_route as route;

pub use config::{ConfigError, LatLng, MapSettings, OverlayConfig, TrackerConfig};
pub use tracker::{Tracker, Tracking};
