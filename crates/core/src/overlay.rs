use santa_route::Position;

use crate::config::OverlayConfig;
use crate::render::MapCanvas;

/// Draw a resolved position: one marker, plus the route path when there is one.
pub fn draw_position(position: &Position, config: &OverlayConfig, canvas: &mut impl MapCanvas) {
    match position {
        Position::AtBase => {
            canvas.place_marker(
                config.base_location.to_point(),
                &config.marker,
                Some(config.base_popup.as_str()),
            );
        }
        Position::AtWaypoint {
            location,
            path,
            place,
        } => {
            let popup = place.as_ref().map(|place| format!("Last seen in {place}"));
            canvas.place_marker(*location, &config.marker, popup.as_deref());

            if !path.0.is_empty() {
                canvas.draw_path(path, &config.path_style);
            }
        }
    }
}
