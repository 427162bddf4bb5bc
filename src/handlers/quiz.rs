// src/handlers/quiz.rs

use axum::{Form, Json, extract::State, response::IntoResponse};
use serde_json::json;
use validator::Validate;

use crate::{
    error::AppError,
    models::quiz::{AnswerEntry, QuestionView, QuizSubmission, StartQuizRequest},
    quiz::{grader, parser},
    state::AppState,
};

const LEADERBOARD_SIZE: i64 = 10;

const QUIZ_PROMPT: &str = r#"
Generate 5 multiple choice quiz questions about recycling, climate change, or sustainability.
Each should have 4 options (A, B, C, D) and specify the correct one.
The format should be exactly like this, without any other text or introduction:
Q1. What is recycling?
A. Reusing materials
B. Burning waste
C. Throwing waste
D. Making new from oil
Answer: A

Q2. What is a carbon footprint?
A. A type of shoe
B. The total greenhouse gas emissions caused by a person or organization
C. The amount of carbon in a person's body
D. A dance move
Answer: B
"#;

/// Starts a new quiz for a username.
///
/// * Asks the generator for quiz text within the user's conversation.
/// * Parses the reply into at most 5 validated questions; fewer well-formed
///   blocks simply yield a shorter session, never an error.
/// * Stores the session (overwriting any prior one for that username) and
///   returns the questions with the answer letters hidden.
pub async fn start_quiz(
    State(state): State<AppState>,
    Form(req): Form<StartQuizRequest>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = req.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    let messages = state
        .conversations
        .push_user(&req.username, "en", "12", QUIZ_PROMPT)
        .await;

    let quiz_text = state.generator.complete(&messages).await?;
    state
        .conversations
        .push_assistant(&req.username, &quiz_text)
        .await;

    let questions = parser::parse(&quiz_text);
    if questions.is_empty() {
        tracing::warn!(
            "Generator output yielded no parseable questions for '{}'",
            req.username
        );
    }

    let views: Vec<QuestionView> = questions.iter().map(QuestionView::from).collect();
    state.sessions.start(&req.username, questions).await;

    Ok(Json(json!({ "questions": views })))
}

/// Grades a submission against the caller's active session.
///
/// The session is taken (removed) in the same step that reads it, before
/// the leaderboard write, so concurrent submits cannot double-consume it
/// and a failed write can never leave a stale session behind (the
/// trade-off is that such a submission must be replayed from a fresh
/// quiz). The answers payload is decoded first: a malformed payload keeps
/// the session intact.
pub async fn submit_quiz(
    State(state): State<AppState>,
    Json(submission): Json<QuizSubmission>,
) -> Result<impl IntoResponse, AppError> {
    if let Err(validation_errors) = submission.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    // `answers` is a JSON-encoded string, not a nested JSON array.
    let answers: Vec<AnswerEntry> = serde_json::from_str(&submission.answers)?;

    let questions = state
        .sessions
        .take(&submission.username)
        .await
        .ok_or_else(|| {
            AppError::NotFound("Quiz session not found. Please start a new quiz.".to_string())
        })?;

    let card = grader::grade(&questions, &answers);

    state
        .leaderboard
        .upsert(&submission.username, card.score as i64)
        .await?;

    Ok(Json(card))
}

/// Retrieves the top 10 scores.
pub async fn get_leaderboard(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let leaderboard = state.leaderboard.top_n(LEADERBOARD_SIZE).await?;

    Ok(Json(json!({ "leaderboard": leaderboard })))
}
