mod config;
mod ebook;
mod errors;
mod image_client;
mod llm_client;
mod routes;
mod state;
mod storyboard;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::ebook::LayoutConfig;
use crate::image_client::ImageClient;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Storybook API v{}", env!("CARGO_PKG_VERSION"));

    let llm = LlmClient::new(config.openai_api_key.clone())?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let images = ImageClient::new(config.image_api_key.clone())?;
    info!("Image client initialized (model: {})", image_client::IMAGE_MODEL);

    let layout = LayoutConfig::default();
    info!(
        "Ebook layout: {}x{}pt, {}pt text, {}pt margins, {} lines per page",
        layout.page_width,
        layout.page_height,
        layout.font_size,
        layout.margin,
        layout.lines_per_page()
    );

    let state = AppState {
        llm: Arc::new(llm),
        images: Arc::new(images),
        layout,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
