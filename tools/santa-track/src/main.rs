use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use santa_core::config::BaseMap;
use santa_core::fetch::HttpFetcher;
use santa_core::render::GeoJsonCanvas;
use santa_core::route::Position;
use santa_core::{Tracker, TrackerConfig};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "santa-track",
    author,
    version,
    about = "Resolve Santa's current position and write the map overlay as GeoJSON",
    long_about = "Fetches the Santa tracker route feed once, finds the last stop at which \
                  presents were delivered, and writes the marker and route polyline as a \
                  GeoJSON FeatureCollection.\n\n\
                  If the feed cannot be fetched or decoded, the marker is placed at the \
                  base location and the failure is only logged."
)]
struct Args {
    /// Output GeoJSON file (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Route feed URL (overrides the config file)
    #[arg(long)]
    feed_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Base map named in the printed map settings
    #[arg(long)]
    base_map: Option<BaseMap>,

    /// Resolve at this instant instead of now (RFC 3339)
    #[arg(long)]
    at: Option<DateTime<Utc>>,

    /// Verbose output (show debug messages)
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn load_config(&self) -> Result<TrackerConfig> {
        let mut config = match &self.config {
            Some(path) => TrackerConfig::from_file(path).context("Failed to load config")?,
            None => TrackerConfig::default(),
        };
        self.apply_overrides(&mut config);
        Ok(config)
    }

    fn apply_overrides(&self, config: &mut TrackerConfig) {
        if let Some(feed_url) = &self.feed_url {
            config.feed_url = feed_url.clone();
        }
        if let Some(timeout) = self.timeout {
            config.timeout_secs = timeout;
        }
        if let Some(base_map) = self.base_map {
            config.map.base_map = base_map;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr so stdout can carry the GeoJSON
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if args.verbose { "debug" } else { "info" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let config = args.load_config()?;
    let now = args.at.unwrap_or_else(Utc::now);

    tracing::info!("=== Santa Tracker ===");
    tracing::info!("Feed: {}", config.feed_url);
    tracing::info!("Observed at: {}", now.to_rfc3339());
    tracing::info!(
        "Map: center ({}, {}), zoom {}, {} ({})",
        config.map.center.lat,
        config.map.center.lng,
        config.map.zoom,
        config.map.base_map,
        config.map.base_map.tile_url()
    );

    let fetcher = HttpFetcher::new(config.timeout()).context("Failed to build HTTP client")?;
    let tracker = Tracker::new(Arc::new(fetcher), config);

    let tracking = tracker.track(now).await;

    match &tracking.position {
        Position::AtBase => tracing::info!("Santa is at base"),
        Position::AtWaypoint { location, place, .. } => match place {
            Some(place) => tracing::info!("Santa was last seen in {place} ({}, {})", location.y(), location.x()),
            None => tracing::info!("Santa was last seen at ({}, {})", location.y(), location.x()),
        },
    }
    tracking.summary.log_summary();

    let mut canvas = GeoJsonCanvas::new();
    tracker.draw(&tracking, &mut canvas);
    let json_string = canvas
        .to_geojson_string()
        .context("Failed to serialize GeoJSON")?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, json_string)
                .with_context(|| format!("Failed to write GeoJSON to {}", path.display()))?;
            tracing::info!("Output written to: {}", path.display());
        }
        None => println!("{json_string}"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_replace_config_values() {
        let args = Args::parse_from([
            "santa-track",
            "--feed-url",
            "http://localhost:9000/route.json",
            "--timeout",
            "3",
            "--base-map",
            "OpenTopoMap",
            "--at",
            "2018-12-24T20:00:00Z",
        ]);

        let mut config = TrackerConfig::default();
        args.apply_overrides(&mut config);

        assert_eq!(config.feed_url, "http://localhost:9000/route.json");
        assert_eq!(config.timeout_secs, 3);
        assert_eq!(config.map.base_map, BaseMap::OpenTopoMap);
        assert_eq!(args.at.map(|at| at.timestamp()), Some(1_545_681_600));
    }

    #[test]
    fn test_no_overrides_keeps_defaults() {
        let args = Args::parse_from(["santa-track"]);

        let mut config = TrackerConfig::default();
        args.apply_overrides(&mut config);

        assert_eq!(config, TrackerConfig::default());
    }
}
