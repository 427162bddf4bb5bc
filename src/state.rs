use crate::ai::{Conversations, ImageLabeler, TextGenerator, Transcriber};
use crate::config::Config;
use crate::quiz::{leaderboard::LeaderboardStore, session::SessionStore};
use axum::extract::FromRef;
use sqlx::SqlitePool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: Config,
    pub generator: Arc<dyn TextGenerator>,
    pub transcriber: Arc<dyn Transcriber>,
    pub labeler: Arc<dyn ImageLabeler>,
    pub conversations: Arc<Conversations>,
    pub sessions: Arc<SessionStore>,
    pub leaderboard: LeaderboardStore,
}

impl FromRef<AppState> for SqlitePool {
    fn from_ref(state: &AppState) -> Self {
        state.pool.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
