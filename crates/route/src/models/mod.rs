//! Route data models and errors.

pub mod types;

// Re-exports for convenience
pub use types::{Place, Result, Route, RouteError, Waypoint};
