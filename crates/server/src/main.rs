use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use santa_core::fetch::HttpFetcher;
use santa_core::{Tracker, TrackerConfig};
use santa_server::OverlayServer;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "santa-server",
    author,
    version,
    about = "Serve the Santa tracker map overlay as GeoJSON",
    long_about = "Serves the current Santa tracker overlay over HTTP.\n\n\
                  Every request to /overlay.geojson fetches the route feed once, \
                  resolves the last stop with deliveries and returns the marker and \
                  route as a GeoJSON FeatureCollection. /settings returns the initial \
                  map view."
)]
struct Args {
    /// Address to listen on
    #[arg(short, long, default_value = "127.0.0.1:8080", env = "SANTA_BIND")]
    bind: SocketAddr,

    /// JSON config file
    #[arg(short, long, env = "SANTA_CONFIG")]
    config: Option<PathBuf>,

    /// Route feed URL (overrides the config file)
    #[arg(long, env = "SANTA_FEED_URL")]
    feed_url: Option<String>,

    /// Verbose output (show debug messages)
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if args.verbose { "debug" } else { "info" }));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut config = match &args.config {
        Some(path) => TrackerConfig::from_file(path).context("Failed to load config")?,
        None => TrackerConfig::default(),
    };
    if let Some(feed_url) = args.feed_url {
        config.feed_url = feed_url;
    }

    tracing::info!("Feed: {}", config.feed_url);

    let fetcher = HttpFetcher::new(config.timeout()).context("Failed to build HTTP client")?;
    let tracker = Arc::new(Tracker::new(Arc::new(fetcher), config));

    let server = OverlayServer::start(args.bind, tracker)
        .await
        .with_context(|| format!("Failed to bind {}", args.bind))?;

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for shutdown signal")?;

    tracing::info!("shutting down");
    server.shutdown().await;

    Ok(())
}
