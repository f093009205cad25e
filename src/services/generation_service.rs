use std::sync::Arc;

use async_openai::config::OpenAIConfig;
use async_openai::Client;
use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::Deserialize;
use serde_json::json;
use validator::Validate;

use crate::config::{Config, DifficultyTier};
use crate::constants::{quiz_prompt, sample_quiz};
use crate::errors::{AppError, AppResult};
use crate::models::domain::Quiz;
use crate::models::dto::request::{GenerateQuizRequest, QUESTION_COUNT_CHOICES};
use crate::models::dto::QuizResponseDto;
use crate::services::credential_service::CredentialService;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuizGenerator: Send + Sync {
    async fn generate_quiz(&self, request: &GenerateQuizRequest) -> AppResult<Quiz>;
}

// The slice of the chat completion reply this crate reads. Decoded through
// the byot call, so unknown reply fields are simply ignored.
#[derive(Debug, Deserialize)]
struct ChatCompletionReply {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

/// Quiz generation against an OpenAI-compatible chat completion API.
///
/// Returns data only; applying the quiz to a session is the caller's
/// business. No retries and no timeout beyond the transport's own.
pub struct OpenAiQuizGenerator {
    config: Arc<Config>,
    credentials: Arc<CredentialService>,
}

impl OpenAiQuizGenerator {
    pub fn new(config: Arc<Config>, credentials: Arc<CredentialService>) -> Self {
        Self {
            config,
            credentials,
        }
    }

    // Shape checks from the derive, then membership checks against the
    // runtime configuration.
    fn vet(&self, request: &GenerateQuizRequest) -> AppResult<&DifficultyTier> {
        request.validate()?;

        if request.prompt.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Prompt must not be blank".to_string(),
            ));
        }
        if !QUESTION_COUNT_CHOICES.contains(&request.question_count) {
            return Err(AppError::ValidationError(format!(
                "Question count must be one of {:?}",
                QUESTION_COUNT_CHOICES
            )));
        }
        if !self.config.models.iter().any(|model| model == &request.model) {
            return Err(AppError::ValidationError(format!(
                "Model '{}' is not in the configured model list",
                request.model
            )));
        }
        self.config
            .difficulty_policy
            .tier(&request.difficulty)
            .ok_or_else(|| {
                AppError::ValidationError(format!(
                    "Difficulty '{}' is not in the difficulty policy",
                    request.difficulty
                ))
            })
    }
}

#[async_trait]
impl QuizGenerator for OpenAiQuizGenerator {
    async fn generate_quiz(&self, request: &GenerateQuizRequest) -> AppResult<Quiz> {
        let tier = self.vet(request)?;

        // Resolved before anything leaves the process: a missing key must
        // not produce a network call.
        let key = self
            .credentials
            .active_key()
            .await
            .ok_or(AppError::CredentialMissing)?;

        let instruction =
            quiz_prompt::build_instruction(request.question_count, &tier.description);
        let body = json!({
            "model": request.model,
            "temperature": tier.temperature,
            "messages": [
                { "role": "system", "content": instruction },
                { "role": "user", "content": request.prompt.trim() }
            ],
            "response_format": {
                "type": "json_schema",
                "json_schema": {
                    "name": "quiz_response",
                    "schema": schemars::schema_for!(QuizResponseDto),
                    "strict": true
                }
            }
        });

        let mut openai_config = OpenAIConfig::new().with_api_key(key.expose_secret());
        if let Some(base) = &self.config.api_base {
            openai_config = openai_config.with_api_base(base.as_str());
        }
        let client = Client::with_config(openai_config);

        log::info!(
            "Requesting {} questions from {} at difficulty '{}'",
            request.question_count,
            request.model,
            request.difficulty
        );
        let reply: ChatCompletionReply = client.chat().create_byot(body).await?;

        let content = reply
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| {
                AppError::EmptyOrInvalidResponse("Reply contained no content".to_string())
            })?;

        let dto: QuizResponseDto = serde_json::from_str(&content).map_err(|err| {
            AppError::EmptyOrInvalidResponse(format!("Reply is not a quiz payload: {}", err))
        })?;

        log::info!("Received quiz payload with {} questions", dto.questions.len());
        Quiz::try_from(dto)
    }
}

/// Offline stand-in: serves the first `question_count` questions of the
/// built-in sample set through the same strict decode path. Needs no
/// credential.
pub struct SampleQuizGenerator;

#[async_trait]
impl QuizGenerator for SampleQuizGenerator {
    async fn generate_quiz(&self, request: &GenerateQuizRequest) -> AppResult<Quiz> {
        request.validate()?;

        let mut dto: QuizResponseDto = serde_json::from_str(sample_quiz::SAMPLE_QUIZ_JSON)
            .map_err(|err| {
                AppError::EmptyOrInvalidResponse(format!("Sample payload is invalid: {}", err))
            })?;
        dto.questions.truncate(request.question_count as usize);

        log::info!("Serving {} sample questions", dto.questions.len());
        Quiz::try_from(dto)
    }
}
