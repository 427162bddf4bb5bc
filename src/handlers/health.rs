// src/handlers/health.rs

use axum::{Json, response::IntoResponse};
use serde_json::json;

pub async fn health() -> impl IntoResponse {
    Json(json!({
        "msg": "EcoLearn backend is running with Groq Whisper + LLaMA-3 + DB leaderboard!"
    }))
}
