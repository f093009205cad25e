use serde::Serialize;

use crate::models::domain::UserAnswer;

/// When the results view shows the correct answer next to an entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RevealPolicy {
    #[default]
    OnlyIncorrect,
    Always,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AnswerReview {
    pub question_number: u32,
    pub question: String,
    pub answer: String,
    pub correct_answer: String,
    pub is_correct: bool,
}

impl AnswerReview {
    /// The correct answer, if the policy says to show it for this entry.
    pub fn revealed_answer(&self, policy: RevealPolicy) -> Option<&str> {
        match policy {
            RevealPolicy::Always => Some(self.correct_answer.as_str()),
            RevealPolicy::OnlyIncorrect if !self.is_correct => Some(self.correct_answer.as_str()),
            RevealPolicy::OnlyIncorrect => None,
        }
    }
}

impl From<&UserAnswer> for AnswerReview {
    fn from(answer: &UserAnswer) -> Self {
        AnswerReview {
            question_number: answer.question_number,
            question: answer.question.clone(),
            answer: answer.answer.clone(),
            correct_answer: answer.correct_answer.clone(),
            is_correct: answer.is_correct,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct QuizSummary {
    pub correct_count: usize,
    pub total_count: usize,
    pub per_question: Vec<AnswerReview>,
}

impl QuizSummary {
    pub fn score_line(&self) -> String {
        format!("{}/{}", self.correct_count, self.total_count)
    }
}
