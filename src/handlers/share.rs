// src/handlers/share.rs

use std::path::Path;

use axum::{
    Json,
    extract::{Multipart, State},
    http::HeaderMap,
    response::IntoResponse,
};
use serde_json::json;
use uuid::Uuid;

use crate::{error::AppError, state::AppState};

const ALLOWED_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "webp"];

fn normalized_extension(filename: Option<&str>) -> &'static str {
    let ext = filename
        .and_then(|name| Path::new(name).extension())
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase);

    match ext.as_deref() {
        Some(ext) => ALLOWED_EXTENSIONS
            .iter()
            .find(|allowed| **allowed == ext)
            .copied()
            .unwrap_or("png"),
        None => "png",
    }
}

/// Stores an uploaded image under the media directory and returns a public
/// URL for it.
pub async fn upload(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let mut saved: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() == Some("image") {
            let ext = normalized_extension(field.file_name());
            let file_name = format!("share_{}.{}", Uuid::new_v4().simple(), ext);
            let content = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?
                .to_vec();
            saved = Some((file_name, content));
        }
    }

    let (file_name, content) =
        saved.ok_or_else(|| AppError::BadRequest("missing image file".to_string()))?;

    let path = state.config.media_dir.join(&file_name);
    tokio::fs::write(&path, content)
        .await
        .map_err(|e| AppError::InternalServerError(format!("failed to store upload: {}", e)))?;

    let rel_url = format!("/media/{}", file_name);
    let host = headers
        .get(axum::http::header::HOST)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("localhost:8000");
    let abs_url = format!("http://{}{}", host, rel_url);

    Ok(Json(json!({ "url": rel_url, "absolute_url": abs_url })))
}
