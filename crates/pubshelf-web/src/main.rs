use std::net::SocketAddr;
use std::sync::Arc;

use pubshelf_core::fetch::http_client;
use pubshelf_core::{Config, arrange_posts};

mod handlers;
mod routes;
mod state;

use state::AppState;

const DEFAULT_ADDR: &str = "127.0.0.1:5001";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // Resolve configuration: env vars > config file > defaults
    let mut config = Config::from_file(&pubshelf_core::config_file::load_config());
    if let Some(source) = std::env::var("PUBSHELF_SOURCE")
        .ok()
        .filter(|s| !s.trim().is_empty())
    {
        config.source = source;
    }
    if let Some(secs) = std::env::var("PUBSHELF_TIMEOUT")
        .ok()
        .and_then(|v| v.trim().parse().ok())
    {
        config.timeout_secs = secs;
    }
    let addr: SocketAddr = std::env::var("PUBSHELF_ADDR")
        .unwrap_or_else(|_| DEFAULT_ADDR.to_string())
        .parse()?;

    let state = Arc::new(AppState {
        client: http_client(config.timeout())?,
        source: config.source,
        site_title: config
            .site_title
            .unwrap_or_else(|| "Publications".to_string()),
        posts: arrange_posts(config.posts),
    });
    tracing::info!(source = %state.source, posts = state.posts.len(), "serving bibliography");

    let app = routes::router(state);

    tracing::info!("Listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
        })
        .await?;

    Ok(())
}
