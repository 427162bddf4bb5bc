// src/models/chat.rs

use serde::Deserialize;

fn default_language() -> String {
    "en".to_string()
}

fn default_age_level() -> String {
    "12".to_string()
}

fn default_tts() -> bool {
    true
}

/// Chat relay request. Language and age level shape the system prompt of a
/// fresh conversation; they are ignored once a conversation exists.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_age_level")]
    pub age_level: String,
    #[serde(default = "default_tts")]
    pub tts: bool,
}

/// Lifestyle data for the carbon footprint tips endpoint.
#[derive(Debug, Deserialize)]
pub struct CarbonRequest {
    /// kWh per month
    pub electricity: f64,
    /// km per week
    pub transport: f64,
    /// veg, mixed, meat
    pub diet: String,
}

/// Image classification request for the recycle endpoint.
#[derive(Debug, Deserialize)]
pub struct RecycleRequest {
    pub image_base64: String,
}
