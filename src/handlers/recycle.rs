// src/handlers/recycle.rs

use axum::{Json, extract::State, response::IntoResponse};
use base64::Engine as _;
use serde_json::json;

use crate::{error::AppError, models::chat::RecycleRequest, state::AppState};

/// Classifies an uploaded image and asks the generator for recycling and
/// reuse suggestions for the detected item.
pub async fn recycle(
    State(state): State<AppState>,
    Json(req): Json<RecycleRequest>,
) -> Result<impl IntoResponse, AppError> {
    // Reject payloads that are not actually an image before calling out.
    base64::engine::general_purpose::STANDARD
        .decode(&req.image_base64)
        .map_err(|e| AppError::BadRequest(format!("invalid base64 image: {}", e)))?;

    let label = state.labeler.label(&req.image_base64).await?;

    let prompt = format!(
        "Please summarize recycling and reuse suggestions for {} in under 5 sentences.\n\
         Dont write intro just directly give the sentences. Also bold main points.\n\
         Please dont say about general plastics or other types of plastics.\n\
         Only give points about the specific item the label that is provided.\n\
         Also mention how it can be recycled and reused like a DIY project or something which can be done at home.\n\
         Make it easy to understand and use.",
        label
    );

    let messages = state
        .conversations
        .push_user("user-1", "en", "12", &prompt)
        .await;

    let ai_suggestion = state.generator.complete(&messages).await?;
    state.conversations.push_assistant("user-1", &ai_suggestion).await;

    Ok(Json(json!({ "label": label, "ai_suggestion": ai_suggestion })))
}
