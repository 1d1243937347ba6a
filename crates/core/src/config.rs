//! Tracker configuration.
//!
//! Every field has a default, so a config file only needs the values it
//! overrides.

use std::path::{Path, PathBuf};
use std::time::Duration;

use geo::Point;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::render::{MarkerIcon, PathStyle};

pub const DEFAULT_FEED_URL: &str = "https://firebasestorage.googleapis.com/v0/b/santa-tracker-firebase.appspot.com/o/route%2Fsanta_en.json?alt=media&2018b";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn to_point(self) -> Point {
        Point::new(self.lng, self.lat)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
pub enum BaseMap {
    #[default]
    OpenStreetMap,
    OpenTopoMap,
}

impl BaseMap {
    pub fn tile_url(&self) -> &'static str {
        match self {
            BaseMap::OpenStreetMap => "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png",
            BaseMap::OpenTopoMap => "https://{s}.tile.opentopomap.org/{z}/{x}/{y}.png",
        }
    }
}

/// Initial view handed to the map
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapSettings {
    pub center: LatLng,
    pub zoom: u8,
    pub base_map: BaseMap,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            center: LatLng::new(38.9072, -77.0369),
            zoom: 1,
            base_map: BaseMap::default(),
        }
    }
}

/// How a resolved position is drawn
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Marker location used while no delivery has happened
    pub base_location: LatLng,
    pub base_popup: String,
    pub marker: MarkerIcon,
    pub path_style: PathStyle,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            base_location: LatLng::new(0.0, 0.0),
            base_popup: "Santa's still at the North Pole!".to_owned(),
            marker: MarkerIcon::default(),
            path_style: PathStyle::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub feed_url: String,
    pub timeout_secs: u64,
    pub map: MapSettings,
    pub overlay: OverlayConfig,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            feed_url: DEFAULT_FEED_URL.to_owned(),
            timeout_secs: 10,
            map: MapSettings::default(),
            overlay: OverlayConfig::default(),
        }
    }
}

impl TrackerConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
