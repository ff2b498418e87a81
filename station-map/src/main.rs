use std::process::ExitCode;

use station_map::cache::CachedFeeds;
use station_map::config::AppConfig;
use station_map::gbfs::{FeedSource, FileFeedClient, GbfsClient};
use station_map::web::{AppState, create_router};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(e) = dotenvy::dotenv()
        && !e.not_found()
    {
        eprintln!("Warning: failed to load .env: {e}");
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let source = match &config.mock_feed_dir {
        Some(dir) => {
            warn!(dir = %dir.display(), "serving feeds from local files");
            FileFeedClient::new(dir).map(FeedSource::Files)
        }
        None => {
            info!(
                information = %config.feeds.information_url,
                status = %config.feeds.status_url,
                "using live feeds"
            );
            GbfsClient::new(config.feeds.clone()).map(FeedSource::Live)
        }
    };
    let source = match source {
        Ok(source) => source,
        Err(e) => {
            error!("failed to create feed client: {e}");
            return ExitCode::FAILURE;
        }
    };

    let feeds = CachedFeeds::new(source, &config.cache);
    let state = AppState::new(feeds, config.map.clone());
    let app = create_router(state, &config.static_dir);

    let listener = match tokio::net::TcpListener::bind(config.addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(addr = %config.addr, "failed to bind: {e}");
            return ExitCode::FAILURE;
        }
    };

    info!("Station map listening on http://{}", config.addr);
    info!("  GET  /              - Map page");
    info!("  GET  /api/stations  - Classified stations (JSON)");
    info!("  GET  /health        - Health check");

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("failed to listen for shutdown signal: {e}");
        }
        info!("shutting down");
    };

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
    {
        error!("server error: {e}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
