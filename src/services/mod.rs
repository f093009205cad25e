pub mod credential_service;
pub mod generation_service;
pub mod results_service;

pub use credential_service::{CredentialService, CredentialStatus};
#[cfg(test)]
pub use generation_service::MockQuizGenerator;
pub use generation_service::{OpenAiQuizGenerator, QuizGenerator, SampleQuizGenerator};
pub use results_service::ResultsService;
