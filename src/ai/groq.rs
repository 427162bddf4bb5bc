// src/ai/groq.rs

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use super::{ChatMessage, GeneratorError, TextGenerator, Transcriber};

const CHAT_MODEL: &str = "llama-3.3-70b-versatile";
const WHISPER_MODEL: &str = "whisper-large-v3";
const MAX_TOKENS: u32 = 1500;
const TEMPERATURE: f32 = 0.5;

/// Bounded timeout so a hung upstream cannot block a request forever.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Client for the Groq OpenAI-compatible API (chat completions + whisper
/// transcriptions), authenticated with a bearer token.
pub struct GroqClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Deserialize)]
struct ChatCompletion {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

#[derive(Deserialize)]
struct Transcription {
    text: Option<String>,
}

impl GroqClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl TextGenerator for GroqClient {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, GeneratorError> {
        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .timeout(REQUEST_TIMEOUT)
            .json(&json!({
                "model": CHAT_MODEL,
                "messages": messages,
                "max_tokens": MAX_TOKENS,
                "temperature": TEMPERATURE,
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeneratorError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let completion: ChatCompletion = response.json().await?;
        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.trim().to_string())
            .ok_or_else(|| GeneratorError::Malformed("completion has no choices".to_string()))
    }
}

#[async_trait]
impl Transcriber for GroqClient {
    async fn transcribe(&self, audio: Vec<u8>, language: &str) -> Result<String, GeneratorError> {
        let file = reqwest::multipart::Part::bytes(audio)
            .file_name("audio.webm")
            .mime_str("audio/webm")?;
        let form = reqwest::multipart::Form::new()
            .part("file", file)
            .text("model", WHISPER_MODEL)
            .text("language", language.to_string());

        let response = self
            .http
            .post(format!("{}/audio/transcriptions", self.base_url))
            .bearer_auth(&self.api_key)
            .timeout(REQUEST_TIMEOUT)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeneratorError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let transcription: Transcription = response.json().await?;
        transcription
            .text
            .ok_or_else(|| GeneratorError::Malformed("transcription has no text".to_string()))
    }
}
