// src/handlers/chat.rs

use axum::{Json, extract::State, response::IntoResponse};
use serde_json::json;

use crate::{
    error::AppError,
    models::chat::{CarbonRequest, ChatRequest},
    state::AppState,
};

/// Conversation id for callers that do not identify themselves.
const DEFAULT_CHAT_USER: &str = "user-1";

/// No TTS voice is available upstream yet.
fn tts_audio_url(_text: &str, _language: &str) -> Option<String> {
    None
}

/// Relays a chat message to the text generator, keeping per-user
/// conversation context.
pub async fn chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<impl IntoResponse, AppError> {
    let messages = state
        .conversations
        .push_user(DEFAULT_CHAT_USER, &req.language, &req.age_level, &req.message)
        .await;

    let text = state.generator.complete(&messages).await?;
    state
        .conversations
        .push_assistant(DEFAULT_CHAT_USER, &text)
        .await;

    let audio_url = if req.tts {
        tts_audio_url(&text, &req.language)
    } else {
        None
    };

    Ok(Json(json!({ "text": text, "audio_url": audio_url })))
}

/// Asks the generator for exactly 3 practical carbon-reduction tips based
/// on the caller's lifestyle data.
pub async fn carbon_footprint(
    State(state): State<AppState>,
    Json(req): Json<CarbonRequest>,
) -> Result<impl IntoResponse, AppError> {
    let prompt = format!(
        "\nThe user has shared their lifestyle data:\n\
         - Electricity use: {} kWh per month\n\
         - Transport: {} km per week\n\
         - Diet: {}\n\n\
         Provide exactly 3 practical ways to reduce their carbon footprint.\n\
         Only list the 3 points as bullet points.\n\
         Do NOT add any introductory or concluding sentences.\n\
         Do NOT use any markdown, bold, or asterisks.\n\
         Just:\n\
         - Suggestion 1\n\
         - Suggestion 2\n\
         - Suggestion 3\n",
        req.electricity, req.transport, req.diet
    );

    let messages = state
        .conversations
        .push_user("carbon-footprint", "en", "adult", &prompt)
        .await;

    let tips_text = state.generator.complete(&messages).await?;
    state
        .conversations
        .push_assistant("carbon-footprint", &tips_text)
        .await;

    let tips: Vec<String> = tips_text
        .lines()
        .map(|line| line.trim_matches(&['-', '•', '*', ' '][..]).to_string())
        .filter(|line| !line.is_empty())
        .take(3)
        .collect();

    Ok(Json(json!({ "tips": tips })))
}
