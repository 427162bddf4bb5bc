// src/routes.rs

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::{
    handlers::{chat, health, quiz, recycle, share, speech},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Nests the quiz sub-router and mounts the media directory.
/// * Applies global middleware (Trace, CORS).
/// * Injects global state.
pub fn create_router(state: AppState) -> Router {
    // Open CORS: the service has no authenticated surface.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let quiz_routes = Router::new()
        .route("/start", post(quiz::start_quiz))
        .route("/submit", post(quiz::submit_quiz))
        .route("/leaderboard", get(quiz::get_leaderboard));

    Router::new()
        .route("/", get(health::health))
        .route("/chat", post(chat::chat))
        .route("/stt", post(speech::stt))
        .route("/carbon-footprint", post(chat::carbon_footprint))
        .route("/recycle", post(recycle::recycle))
        .route("/share/upload", post(share::upload))
        .nest("/quiz", quiz_routes)
        .nest_service("/media", ServeDir::new(&state.config.media_dir))
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
