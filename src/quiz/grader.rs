// src/quiz/grader.rs

use crate::models::quiz::{AnswerEntry, QuizQuestion, ScoreCard};

/// Scores a submission against the session's questions.
///
/// `total` is always the session length. An entry counts when its index is
/// a valid position and its letter matches that question's answer; entries
/// referencing an out-of-range index are ignored, not errors. Duplicate
/// indices are each scored independently (no deduplication).
pub fn grade(session: &[QuizQuestion], submission: &[AnswerEntry]) -> ScoreCard {
    let total = session.len();
    let mut score = 0;

    for entry in submission {
        let Ok(index) = usize::try_from(entry.question_index) else {
            continue;
        };
        if let Some(question) = session.get(index) {
            if question.answer == entry.chosen {
                score += 1;
            }
        }
    }

    ScoreCard { score, total }
}
