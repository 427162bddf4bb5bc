// src/models/mod.rs

pub mod chat;
pub mod leaderboard;
pub mod quiz;
