pub mod credential_repository;
pub mod prompt_repository;

pub use credential_repository::{CredentialRepository, FileCredentialRepository};
pub use prompt_repository::{FilePromptRepository, PromptRepository};
