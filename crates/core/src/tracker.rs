//! Fetch, resolve, render.
//!
//! Each call to [`Tracker::track`] performs exactly one feed fetch and then
//! resolves against it. A feed that cannot be fetched or decoded degrades to an
//! empty route, so the caller always gets a drawable position.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use santa_route::{FeedFetcher, Position, Route, RouteError, RouteSummary, resolve};

use crate::config::TrackerConfig;
use crate::overlay::draw_position;
use crate::render::MapCanvas;

/// Result of one tracking pass
#[derive(Debug)]
pub struct Tracking {
    pub observed_at: DateTime<Utc>,
    pub position: Position,
    pub summary: RouteSummary,
    /// Feed failure that was recovered from, if any
    pub diagnostic: Option<RouteError>,
}

pub struct Tracker {
    fetcher: Arc<dyn FeedFetcher>,
    config: TrackerConfig,
}

impl Tracker {
    pub fn new(fetcher: Arc<dyn FeedFetcher>, config: TrackerConfig) -> Self {
        Self { fetcher, config }
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub async fn load_route(&self) -> Result<Route, RouteError> {
        let bytes = self.fetcher.fetch(&self.config.feed_url).await?;
        Route::from_json(&bytes)
    }

    pub async fn track(&self, now: DateTime<Utc>) -> Tracking {
        let (route, diagnostic) = match self.load_route().await {
            Ok(route) => {
                tracing::info!("loaded {} stops from {}", route.len(), self.config.feed_url);
                (route, None)
            }
            Err(e) => {
                tracing::warn!("Failed to find Santa, falling back to base: {e}");
                (Route::empty(), Some(e))
            }
        };

        let position = resolve(&route, now);
        let summary = RouteSummary::compute(&route, now);

        Tracking {
            observed_at: now,
            position,
            summary,
            diagnostic,
        }
    }

    pub fn draw(&self, tracking: &Tracking, canvas: &mut impl MapCanvas) {
        draw_position(&tracking.position, &self.config.overlay, canvas);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::GeoJsonCanvas;
    use chrono::TimeZone;
    use geo::Point;
    use geojson::Value;
    use std::future::Future;
    use std::pin::Pin;
    use std::sync::atomic::{AtomicUsize, Ordering};

    enum Reply {
        Body(&'static str),
        Unreachable,
    }

    struct StubFetcher {
        reply: Reply,
        calls: AtomicUsize,
    }

    impl StubFetcher {
        fn new(reply: Reply) -> Arc<Self> {
            Arc::new(Self {
                reply,
                calls: AtomicUsize::new(0),
            })
        }
    }

    impl FeedFetcher for StubFetcher {
        fn fetch<'a>(
            &'a self,
            url: &'a str,
        ) -> Pin<Box<dyn Future<Output = santa_route::Result<Vec<u8>>> + Send + 'a>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Box::pin(async move {
                match self.reply {
                    Reply::Body(body) => Ok(body.as_bytes().to_vec()),
                    Reply::Unreachable => Err(RouteError::Fetch {
                        url: url.to_owned(),
                        message: "connection refused".to_owned(),
                    }),
                }
            })
        }
    }

    const FEED: &str = r#"{
        "destinations": [
            { "arrival": 1000, "presentsDelivered": 3, "location": { "lat": 10.0, "lng": 20.0 }, "city": "Provideniya", "region": "Russia" },
            { "arrival": 2000, "presentsDelivered": 0, "location": { "lat": 30.0, "lng": 40.0 } },
            { "arrival": 9000, "presentsDelivered": 8, "location": { "lat": 50.0, "lng": 60.0 } }
        ]
    }"#;

    fn now() -> DateTime<Utc> {
        Utc.timestamp_millis_opt(3000).unwrap()
    }

    #[tokio::test]
    async fn test_track_resolves_feed() {
        let fetcher = StubFetcher::new(Reply::Body(FEED));
        let tracker = Tracker::new(fetcher.clone(), TrackerConfig::default());

        let tracking = tracker.track(now()).await;

        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
        assert!(tracking.diagnostic.is_none());
        assert_eq!(tracking.position.location(), Some(Point::new(20.0, 10.0)));
        assert_eq!(tracking.summary.total_stops, 3);
        assert_eq!(tracking.summary.presents_delivered, 3);
    }

    #[tokio::test]
    async fn test_unreachable_feed_falls_back_to_base() {
        let tracker = Tracker::new(StubFetcher::new(Reply::Unreachable), TrackerConfig::default());

        let tracking = tracker.track(now()).await;

        assert_eq!(tracking.position, Position::AtBase);
        assert!(matches!(tracking.diagnostic, Some(RouteError::Fetch { .. })));
    }

    #[tokio::test]
    async fn test_malformed_feed_falls_back_to_base() {
        let tracker = Tracker::new(
            StubFetcher::new(Reply::Body(r#"{ "destinations": [ { "arrival": "soon" } ] }"#)),
            TrackerConfig::default(),
        );

        let tracking = tracker.track(now()).await;

        assert_eq!(tracking.position, Position::AtBase);
        assert!(matches!(tracking.diagnostic, Some(RouteError::Malformed(_))));
    }

    #[tokio::test]
    async fn test_draw_renders_marker_and_route() {
        let tracker = Tracker::new(StubFetcher::new(Reply::Body(FEED)), TrackerConfig::default());
        let tracking = tracker.track(now()).await;

        let mut canvas = GeoJsonCanvas::new();
        tracker.draw(&tracking, &mut canvas);

        let features = canvas.features();
        assert_eq!(features.len(), 2);
        assert_eq!(
            features[0].properties.as_ref().unwrap()["popup"],
            "Last seen in Provideniya, Russia"
        );
        assert!(matches!(
            features[1].geometry.as_ref().map(|g| &g.value),
            Some(Value::LineString(coords)) if coords.len() == 1
        ));
    }

    #[tokio::test]
    async fn test_draw_at_base_has_no_route() {
        let tracker = Tracker::new(StubFetcher::new(Reply::Unreachable), TrackerConfig::default());
        let tracking = tracker.track(now()).await;

        let mut canvas = GeoJsonCanvas::new();
        tracker.draw(&tracking, &mut canvas);

        assert_eq!(canvas.features().len(), 1);
    }
}
