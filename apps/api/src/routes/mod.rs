pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::ebook::handlers as ebook;
use crate::state::AppState;
use crate::storyboard::handlers as storyboard;

/// Generation endpoints. Mounted at the root and again under `/api`, the prefix the
/// browser client posts to.
fn generation_routes() -> Router<AppState> {
    Router::new()
        .route("/generate-ebook", post(ebook::handle_generate_ebook))
        .route("/generate-image", post(storyboard::handle_generate_image))
        .route(
            "/generate-storyboard",
            post(storyboard::handle_generate_storyboard),
        )
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .merge(generation_routes())
        .nest("/api", generation_routes())
        .with_state(state)
}
