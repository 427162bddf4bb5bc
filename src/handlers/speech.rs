// src/handlers/speech.rs

use axum::{Json, extract::Multipart, extract::State, response::IntoResponse};
use serde_json::json;

use crate::{error::AppError, state::AppState};

/// The STT relay degrades to this text on any upstream failure; the
/// endpoint itself never surfaces a transcription error.
const STT_FALLBACK: &str = "Sorry, I couldn't understand the audio.";

/// Transcribes an uploaded audio clip.
///
/// Multipart form: optional `language` field (default "en") and an `audio`
/// file part.
pub async fn stt(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut language = String::from("en");
    let mut audio: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("language") => {
                language = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
            }
            Some("audio") => {
                audio = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| AppError::BadRequest(e.to_string()))?
                        .to_vec(),
                );
            }
            _ => {}
        }
    }

    let audio = audio.ok_or_else(|| AppError::BadRequest("missing audio file".to_string()))?;

    let text = match state.transcriber.transcribe(audio, &language).await {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!("Transcription failed: {}", e);
            STT_FALLBACK.to_string()
        }
    };

    Ok(Json(json!({ "text": text })))
}
