use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use news_dashboard::cache::FeedCache;
use news_dashboard::config::Config;
use news_dashboard::fetcher::Fetcher;
use news_dashboard::routes::{build_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "news_dashboard=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config_path =
        std::env::var("DASHBOARD_CONFIG").unwrap_or_else(|_| "dashboard.toml".to_string());
    let config = Config::load_or_default(&config_path)?;
    info!(
        "Using feed endpoint {} (cache ttl {}s)",
        config.feed.endpoint, config.cache_ttl_secs
    );

    let fetcher = Fetcher::new(&config.feed)?;
    let state = Arc::new(AppState {
        cache: FeedCache::new(fetcher, config.cache_ttl()),
        default_query: config.default_query.clone(),
    });

    let app = build_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    info!("Server starting on http://{}", config.listen_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
