use async_openai::error::OpenAIError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("No API credential is configured")]
    CredentialMissing,

    #[error("API credential rejected: {0}")]
    CredentialInvalid(String),

    #[error("Empty or invalid model response: {0}")]
    EmptyOrInvalidResponse(String),

    #[error("Transport error: {0}")]
    TransportError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
}

impl AppError {
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::CredentialMissing => "CREDENTIAL_MISSING",
            AppError::CredentialInvalid(_) => "CREDENTIAL_INVALID",
            AppError::EmptyOrInvalidResponse(_) => "EMPTY_OR_INVALID_RESPONSE",
            AppError::TransportError(_) => "TRANSPORT_ERROR",
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::StorageError(_) => "STORAGE_ERROR",
            AppError::InvalidTransition(_) => "INVALID_TRANSITION",
        }
    }

    /// Whether the failure calls for (re)entering the API credential.
    pub fn is_credential_failure(&self) -> bool {
        matches!(
            self,
            AppError::CredentialMissing | AppError::CredentialInvalid(_)
        )
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::StorageError(err.to_string())
    }
}

// Only the repository layer converts JSON errors with `?`; the response
// decode path maps them to EmptyOrInvalidResponse explicitly.
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::StorageError(format!("JSON serialization failed: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

impl From<OpenAIError> for AppError {
    fn from(err: OpenAIError) -> Self {
        match err {
            OpenAIError::ApiError(api) => {
                if is_credential_rejection(&api.message) {
                    AppError::CredentialInvalid(api.message)
                } else {
                    AppError::TransportError(api.message)
                }
            }
            OpenAIError::JSONDeserialize(err, _) => {
                AppError::EmptyOrInvalidResponse(err.to_string())
            }
            other => AppError::TransportError(other.to_string()),
        }
    }
}

// The provider reports credential problems as API errors; the stable signal
// is the message text, not the error code field.
fn is_credential_rejection(message: &str) -> bool {
    let lowered = message.to_lowercase();
    lowered.contains("api key")
        || lowered.contains("authentication")
        || lowered.contains("unauthorized")
}

pub type AppResult<T> = Result<T, AppError>;
