use serde::{Deserialize, Serialize};

use crate::models::domain::Question;

/// Append-only log entry created at the moment a choice is committed.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct UserAnswer {
    pub question_number: u32,
    pub question: String,
    pub answer: String,
    pub correct_answer: String,
    pub is_correct: bool,
}

impl UserAnswer {
    pub fn record(question: &Question, answer: &str) -> Self {
        UserAnswer {
            question_number: question.number,
            question: question.text.clone(),
            answer: answer.to_string(),
            correct_answer: question.correct_answer.clone(),
            is_correct: answer == question.correct_answer,
        }
    }
}
