use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

use thread_skill_server::config::Settings;
use thread_skill_server::handlers::build_router;
use thread_skill_server::services::{
    Backends, HttpCatalogFeed, HttpCommentSource, PostCache, ThreadCatalog,
};
use thread_skill_server::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,thread_skill_server=debug".to_string()),
        )
        .with_target(true)
        .with_thread_ids(true)
        .json()
        .init();

    info!("🚀 Starting thread skill server...");

    // Load configuration
    let settings = Settings::load()?;
    info!("✅ Configuration loaded");

    let feed = Arc::new(HttpCatalogFeed::new(
        settings.catalog.url.clone(),
        settings.catalog.fetch_timeout(),
    )?);
    let comments = Arc::new(HttpCommentSource::new(settings.catalog.fetch_timeout())?);

    let posts = Arc::new(PostCache::new(settings.cache.ttl()));
    let janitor = posts.spawn_janitor(settings.cache.sweep_interval());
    info!(
        "✅ Post cache ready (ttl: {:?}, sweep every {:?})",
        settings.cache.ttl(),
        settings.cache.sweep_interval()
    );

    let backends = Backends {
        catalog: Arc::new(ThreadCatalog::from_config(feed, &settings.catalog)),
        comments,
        posts,
        board_url: settings.catalog.board_url.clone(),
    };

    let state = AppState::new(&settings, backends);
    info!("✅ Serving platforms: {:?}", state.platforms());

    let app = build_router(state);

    // Server address
    let addr = SocketAddr::from((
        settings.server.host.parse::<std::net::IpAddr>()?,
        settings.server.port,
    ));

    info!("🎯 Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    janitor.stop().await;
    info!("👋 Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
