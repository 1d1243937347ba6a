use geo::{LineString, Point};
use geojson::{Feature, FeatureCollection, GeoJson, Geometry, Value};

use super::MapCanvas;
use super::style::{MarkerIcon, PathStyle, to_hex};

/// Collects drawn overlay items as GeoJSON features
#[derive(Debug, Default)]
pub struct GeoJsonCanvas {
    features: Vec<Feature>,
}

impl GeoJsonCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    pub fn into_feature_collection(self) -> FeatureCollection {
        FeatureCollection {
            bbox: None,
            features: self.features,
            foreign_members: None,
        }
    }

    pub fn to_geojson_string(self) -> serde_json::Result<String> {
        let geojson = GeoJson::from(self.into_feature_collection());
        serde_json::to_string_pretty(&geojson)
    }
}

fn feature(value: Value, properties: serde_json::Map<String, serde_json::Value>) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(Geometry::new(value)),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

impl MapCanvas for GeoJsonCanvas {
    fn place_marker(&mut self, location: Point, icon: &MarkerIcon, popup: Option<&str>) {
        let mut properties = serde_json::Map::new();
        properties.insert("feature_type".to_string(), serde_json::json!("marker"));
        properties.insert("icon_class".to_string(), serde_json::json!(icon.class_name));
        properties.insert("icon_html".to_string(), serde_json::json!(icon.html));
        properties.insert("icon_size".to_string(), serde_json::json!(icon.size));
        if let Some(popup) = popup {
            properties.insert("popup".to_string(), serde_json::json!(popup));
        }

        self.features.push(feature(
            Value::Point(vec![location.x(), location.y()]),
            properties,
        ));
    }

    fn draw_path(&mut self, path: &LineString, style: &PathStyle) {
        let coordinates: Vec<Vec<f64>> = path.coords().map(|c| vec![c.x, c.y]).collect();

        let mut properties = serde_json::Map::new();
        properties.insert("feature_type".to_string(), serde_json::json!("route"));
        properties.insert("stroke".to_string(), serde_json::json!(to_hex(style.color)));
        properties.insert("stroke-width".to_string(), serde_json::json!(style.weight));
        properties.insert("stroke-opacity".to_string(), serde_json::json!(style.opacity));
        properties.insert("fill".to_string(), serde_json::json!(to_hex(style.fill_color)));
        properties.insert("fill-opacity".to_string(), serde_json::json!(style.fill_opacity));

        self.features
            .push(feature(Value::LineString(coordinates), properties));
    }
}
