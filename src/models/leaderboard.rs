// src/models/leaderboard.rs

use serde::Serialize;
use sqlx::FromRow;

/// One row of the 'leaderboard' table: the best-known score per username.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LeaderboardEntry {
    pub username: String,
    pub score: i64,
}
