// src/quiz/leaderboard.rs

use sqlx::SqlitePool;

use crate::{error::AppError, models::leaderboard::LeaderboardEntry};

/// Durable table of the best-known score per username.
#[derive(Clone)]
pub struct LeaderboardStore {
    pool: SqlitePool,
}

impl LeaderboardStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Inserts or overwrites the row for `username`. The overwrite is
    /// unconditional: a later, lower score replaces a higher one. A single
    /// statement, so a failure leaves existing rows untouched.
    pub async fn upsert(&self, username: &str, score: i64) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO leaderboard (username, score, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(username) DO UPDATE SET
                score = excluded.score,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(username)
        .bind(score)
        .bind(chrono::Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to upsert leaderboard row: {:?}", e);
            AppError::from(e)
        })?;

        Ok(())
    }

    /// Top `n` entries by score descending. Ties break on most recent
    /// update first, then username, so the ordering is deterministic.
    pub async fn top_n(&self, n: i64) -> Result<Vec<LeaderboardEntry>, AppError> {
        let entries = sqlx::query_as::<_, LeaderboardEntry>(
            r#"
            SELECT username, score
            FROM leaderboard
            ORDER BY score DESC, updated_at DESC, username ASC
            LIMIT ?1
            "#,
        )
        .bind(n)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to fetch leaderboard: {:?}", e);
            AppError::from(e)
        })?;

        Ok(entries)
    }
}
