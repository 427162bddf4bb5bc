// src/quiz/parser.rs

use regex::Regex;
use std::sync::OnceLock;

use crate::models::quiz::{AnswerLetter, QuizQuestion};

/// A session never holds more than this many questions; extra well-formed
/// blocks are discarded, not an error.
pub const MAX_QUESTIONS: usize = 5;

fn marker_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)Q\d+\.").expect("marker regex"))
}

fn option_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^[A-D]\.\s").expect("option regex"))
}

fn answer_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)Answer:\s*([A-D])").expect("answer regex"))
}

/// Extracts validated questions from freeform generator output.
///
/// The text is split on "Q<number>." markers. Within each block the first
/// line is the question text, the next up-to-4 lines are kept if they look
/// like "<Letter>. <text>" options, and the last line must carry
/// "Answer: <letter>". A block missing any part, or with fewer than 4
/// option lines, is dropped entirely; malformed input never errors.
pub fn parse(raw: &str) -> Vec<QuizQuestion> {
    let mut questions = Vec::new();

    for block in marker_re().split(raw) {
        let block = block.trim();
        if block.is_empty() {
            continue;
        }

        let lines: Vec<&str> = block.lines().collect();
        let question = lines[0].trim();

        let options: Vec<String> = lines
            .iter()
            .skip(1)
            .take(4)
            .filter(|line| option_re().is_match(line))
            .map(|line| line.trim().to_string())
            .collect();

        let answer = lines
            .last()
            .and_then(|line| answer_re().captures(line.trim()))
            .and_then(|captures| captures.get(1))
            .and_then(|letter| AnswerLetter::from_str_ci(letter.as_str()));

        if let Some(answer) = answer {
            if !question.is_empty() && options.len() == 4 {
                questions.push(QuizQuestion {
                    question: question.to_string(),
                    options,
                    answer,
                });
            }
        }
    }

    questions.truncate(MAX_QUESTIONS);
    questions
}
