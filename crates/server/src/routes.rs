use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use chrono::Utc;
use santa_core::render::GeoJsonCanvas;
use santa_core::{MapSettings, Tracker};
use tower_http::cors::{Any, CorsLayer};

pub const FEED_STATUS_HEADER: &str = "x-feed-status";

pub fn create_router(tracker: Arc<Tracker>) -> Router {
    Router::new()
        .route("/overlay.geojson", get(overlay))
        .route("/settings", get(settings))
        .route("/health", get(health))
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(tracker)
}

/// One fresh fetch and resolve per request
async fn overlay(State(tracker): State<Arc<Tracker>>) -> Response {
    let tracking = tracker.track(Utc::now()).await;
    let feed_status = if tracking.diagnostic.is_some() { "degraded" } else { "ok" };

    let mut canvas = GeoJsonCanvas::new();
    tracker.draw(&tracking, &mut canvas);

    match canvas.to_geojson_string() {
        Ok(body) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "application/geo+json"),
                (header::HeaderName::from_static(FEED_STATUS_HEADER), feed_status),
            ],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!("failed to serialize overlay: {e}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

async fn settings(State(tracker): State<Arc<Tracker>>) -> Json<MapSettings> {
    Json(tracker.config().map.clone())
}

async fn health() -> &'static str {
    "OK"
}
