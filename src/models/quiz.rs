// src/models/quiz.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

/// The four recognized answer letters.
///
/// Lowercase aliases are accepted on input; output is always uppercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnswerLetter {
    #[serde(alias = "a")]
    A,
    #[serde(alias = "b")]
    B,
    #[serde(alias = "c")]
    C,
    #[serde(alias = "d")]
    D,
}

impl AnswerLetter {
    /// Case-insensitive parse of a single letter, as extracted from an
    /// "Answer: <letter>" line.
    pub fn from_str_ci(s: &str) -> Option<Self> {
        match s {
            "A" | "a" => Some(AnswerLetter::A),
            "B" | "b" => Some(AnswerLetter::B),
            "C" | "c" => Some(AnswerLetter::C),
            "D" | "d" => Some(AnswerLetter::D),
            _ => None,
        }
    }
}

/// One validated multiple-choice question: non-empty text, exactly 4
/// options in their original "<Letter>. <text>" form, and an answer letter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub answer: AnswerLetter,
}

/// DTO for sending a question to the client (excludes the answer).
#[derive(Debug, Serialize)]
pub struct QuestionView {
    pub question: String,
    pub options: Vec<String>,
}

impl From<&QuizQuestion> for QuestionView {
    fn from(question: &QuizQuestion) -> Self {
        Self {
            question: question.question.clone(),
            options: question.options.clone(),
        }
    }
}

/// Form payload for starting a quiz. The username doubles as the session id
/// and the leaderboard identity.
#[derive(Debug, Deserialize, Validate)]
pub struct StartQuizRequest {
    #[validate(length(min = 1, max = 64))]
    pub username: String,
}

/// JSON payload for submitting a quiz. `answers` is a JSON-encoded string
/// of answer entries, e.g. `[{"q": 0, "ans": "A"}]`.
#[derive(Debug, Deserialize, Validate)]
pub struct QuizSubmission {
    #[validate(length(min = 1, max = 64))]
    pub username: String,
    pub answers: String,
}

/// One submitted answer, referring positionally (0-based) into the
/// session's question sequence.
#[derive(Debug, Clone, Deserialize)]
pub struct AnswerEntry {
    #[serde(rename = "q")]
    pub question_index: i64,
    #[serde(rename = "ans")]
    pub chosen: AnswerLetter,
}

/// Grading result returned to the caller.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct ScoreCard {
    pub score: usize,
    pub total: usize,
}
