use serde::Deserialize;
use validator::Validate;

/// The fixed question-count menu. Not configurable: the instruction text
/// and the session flow are only exercised against these sizes.
pub const QUESTION_COUNT_CHOICES: [u8; 4] = [5, 10, 15, 20];

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GenerateQuizRequest {
    #[validate(length(min = 1, max = 2000))]
    pub prompt: String,

    pub question_count: u8,

    #[validate(length(min = 1, max = 100))]
    pub model: String,

    #[validate(length(min = 1, max = 50))]
    pub difficulty: String,
}

impl GenerateQuizRequest {
    pub fn new(prompt: &str, question_count: u8, model: &str, difficulty: &str) -> Self {
        GenerateQuizRequest {
            prompt: prompt.to_string(),
            question_count,
            model: model.to_string(),
            difficulty: difficulty.to_string(),
        }
    }
}
