//! Map drawing capabilities.
//!
//! Resolution output is drawn through [`MapCanvas`]; concrete map libraries
//! (or the GeoJSON writer here) implement it.

pub mod geojson_canvas;
pub mod style;

use geo::{LineString, Point};

pub use geojson_canvas::GeoJsonCanvas;
pub use style::{MarkerIcon, PathStyle};

pub trait MapCanvas {
    fn place_marker(&mut self, location: Point, icon: &MarkerIcon, popup: Option<&str>);
    fn draw_path(&mut self, path: &LineString, style: &PathStyle);
}
