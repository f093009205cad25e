use crate::models::domain::{AnswerReview, QuizSummary, UserAnswer};

/// Turns the answers recorded during play into a final summary.
pub struct ResultsService;

impl ResultsService {
    /// Counts correct answers and carries every reviewed question over in
    /// the order it was answered.
    pub fn summarize(answers: &[UserAnswer]) -> QuizSummary {
        let correct_count = answers.iter().filter(|answer| answer.is_correct).count();
        let per_question: Vec<AnswerReview> = answers.iter().map(AnswerReview::from).collect();

        QuizSummary {
            correct_count,
            total_count: answers.len(),
            per_question,
        }
    }
}
