// src/quiz/mod.rs

pub mod grader;
pub mod leaderboard;
pub mod parser;
pub mod session;
