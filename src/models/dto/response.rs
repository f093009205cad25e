use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::domain::{Question, Quiz};

pub const INCORRECT_ANSWERS_PER_QUESTION: usize = 3;

/// Wire shape of one generated question. Field names are the provider
/// contract; the schema derived from this type is sent with the request,
/// so deny_unknown_fields keeps decode and schema strict together.
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct QuestionDto {
    pub text: String,
    pub correct_answer: String,
    pub incorrect_answers: Vec<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct QuizResponseDto {
    pub questions: Vec<QuestionDto>,
}

impl TryFrom<QuizResponseDto> for Quiz {
    type Error = AppError;

    /// Strict decode: parse, don't validate-later. Rejects an empty quiz,
    /// blank strings, and any incorrect-answer count other than 3.
    fn try_from(dto: QuizResponseDto) -> Result<Self, Self::Error> {
        if dto.questions.is_empty() {
            return Err(AppError::EmptyOrInvalidResponse(
                "Response contained no questions".to_string(),
            ));
        }

        let mut questions = Vec::with_capacity(dto.questions.len());
        for (position, question) in dto.questions.into_iter().enumerate() {
            let number = (position + 1) as u32;
            if question.text.trim().is_empty() {
                return Err(AppError::EmptyOrInvalidResponse(format!(
                    "Question {} has no text",
                    number
                )));
            }
            if question.correct_answer.trim().is_empty() {
                return Err(AppError::EmptyOrInvalidResponse(format!(
                    "Question {} has no correct answer",
                    number
                )));
            }
            if question.incorrect_answers.len() != INCORRECT_ANSWERS_PER_QUESTION {
                return Err(AppError::EmptyOrInvalidResponse(format!(
                    "Question {} has {} incorrect answers, expected {}",
                    number,
                    question.incorrect_answers.len(),
                    INCORRECT_ANSWERS_PER_QUESTION
                )));
            }
            questions.push(Question {
                number,
                text: question.text,
                correct_answer: question.correct_answer,
                incorrect_answers: question.incorrect_answers,
            });
        }

        Ok(Quiz::new(questions))
    }
}
