pub mod prompt;
pub mod quiz;
pub mod results;
pub mod user_answer;
pub use prompt::PromptEntry;
pub use quiz::{Question, Quiz};
pub use results::{AnswerReview, QuizSummary, RevealPolicy};
pub use user_answer::UserAnswer;
