// src/quiz/session.rs

use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::models::quiz::QuizQuestion;

/// In-memory store of active quiz sessions, keyed by username.
///
/// Owned by the application state and constructed at service start; there
/// is no expiry, and sessions are lost on restart. Starting a quiz
/// unconditionally overwrites any prior session for the same username
/// (concurrent starts are last-writer-wins).
#[derive(Default)]
pub struct SessionStore {
    inner: RwLock<HashMap<String, Vec<QuizQuestion>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn start(&self, username: &str, questions: Vec<QuizQuestion>) {
        self.inner
            .write()
            .await
            .insert(username.to_string(), questions);
    }

    pub async fn get(&self, username: &str) -> Option<Vec<QuizQuestion>> {
        self.inner.read().await.get(username).cloned()
    }

    /// Removes and returns the session in one step, so a session can only
    /// ever be consumed once even under concurrent submits.
    pub async fn take(&self, username: &str) -> Option<Vec<QuizQuestion>> {
        self.inner.write().await.remove(username)
    }

    /// Removes the session; a no-op if absent, so it is safe to retry.
    pub async fn clear(&self, username: &str) {
        self.inner.write().await.remove(username);
    }
}
