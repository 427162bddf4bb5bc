// src/config.rs

use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub groq_api_key: String,
    pub groq_base_url: String,
    pub hf_space_url: String,
    pub media_dir: PathBuf,
    pub rust_log: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://leaderboard.db".to_string());

        let groq_api_key = env::var("GROQ_API_KEY").expect("GROQ_API_KEY must be set");

        let groq_base_url = env::var("GROQ_BASE_URL")
            .unwrap_or_else(|_| "https://api.groq.com/openai/v1".to_string());

        let hf_space_url = env::var("HF_SPACE_URL")
            .unwrap_or_else(|_| "https://ms732-recycle-items.hf.space/api/predict".to_string());

        let media_dir = env::var("MEDIA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("media"));

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8000);

        Self {
            database_url,
            groq_api_key,
            groq_base_url,
            hf_space_url,
            media_dir,
            rust_log,
            port,
        }
    }
}
