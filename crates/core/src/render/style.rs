use palette::Srgb;
use serde::{Deserialize, Serialize};

/// Stroke and fill of the route polyline
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathStyle {
    pub weight: f32,
    #[serde(with = "hex_color")]
    pub color: Srgb<u8>,
    pub opacity: f32,
    #[serde(with = "hex_color")]
    pub fill_color: Srgb<u8>,
    pub fill_opacity: f32,
}

impl PathStyle {
    pub fn solid_color(color: Srgb<u8>) -> Self {
        Self {
            weight: 2.0,
            color,
            opacity: 1.0,
            fill_color: color,
            fill_opacity: 0.5,
        }
    }
}

impl Default for PathStyle {
    fn default() -> Self {
        Self::solid_color(palette::named::GREEN)
    }
}

/// HTML marker icon, drawn by the map as a div
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerIcon {
    pub class_name: String,
    pub html: String,
    pub size: u32,
}

impl Default for MarkerIcon {
    fn default() -> Self {
        Self {
            class_name: "icon".to_owned(),
            html: r#"<div class="icon-santa">🎅</div>"#.to_owned(),
            size: 50,
        }
    }
}

pub fn to_hex(color: Srgb<u8>) -> String {
    format!("#{:02x}{:02x}{:02x}", color.red, color.green, color.blue)
}

mod hex_color {
    use palette::Srgb;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(color: &Srgb<u8>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::to_hex(*color))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Srgb<u8>, D::Error> {
        let hex = String::deserialize(deserializer)?;
        hex.parse::<Srgb<u8>>()
            .map_err(|e| D::Error::custom(format!("invalid color {hex:?}: {e}")))
    }
}
