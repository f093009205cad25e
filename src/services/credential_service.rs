use std::sync::Arc;

use once_cell::sync::Lazy;
use secrecy::SecretString;
use tokio::sync::Mutex;

use crate::crypto::CredentialCipher;
use crate::errors::{AppError, AppResult};
use crate::repositories::CredentialRepository;

static API_KEY_REGEX: Lazy<regex::Regex> = Lazy::new(|| {
    regex::Regex::new(r"^sk-[A-Za-z0-9_-]{40,}$").expect("API_KEY_REGEX is a valid regex pattern")
});

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CredentialStatus {
    Missing,
    SessionOnly,
    Saved,
    Unreadable,
}

impl std::fmt::Display for CredentialStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CredentialStatus::Missing => write!(f, "missing"),
            CredentialStatus::SessionOnly => write!(f, "session-only"),
            CredentialStatus::Saved => write!(f, "saved"),
            CredentialStatus::Unreadable => write!(f, "unreadable"),
        }
    }
}

/// Resolves the provider credential. A session-only key (entered but not
/// saved) shadows the encrypted saved key; a saved key that no longer
/// decrypts degrades to absent instead of failing the caller.
pub struct CredentialService {
    repository: Arc<dyn CredentialRepository>,
    cipher: CredentialCipher,
    session_key: Mutex<Option<SecretString>>,
}

impl CredentialService {
    pub fn new(repository: Arc<dyn CredentialRepository>, cipher: CredentialCipher) -> Self {
        Self {
            repository,
            cipher,
            session_key: Mutex::new(None),
        }
    }

    /// The key an outgoing request should use, if any.
    pub async fn active_key(&self) -> Option<SecretString> {
        if let Some(key) = self.session_key.lock().await.as_ref() {
            return Some(key.clone());
        }
        self.stored_key().await
    }

    /// Validate, encrypt and persist. The saved key becomes the active
    /// one, so any session-only override is dropped.
    pub async fn remember(&self, key: &str) -> AppResult<()> {
        let key = Self::validated(key)?;
        let ciphertext = self.cipher.encrypt(key)?;
        self.repository.save(&ciphertext).await?;
        *self.session_key.lock().await = None;
        Ok(())
    }

    /// Validate and keep in memory only; nothing touches disk.
    pub async fn use_for_session(&self, key: &str) -> AppResult<()> {
        let key = Self::validated(key)?;
        *self.session_key.lock().await = Some(SecretString::from(key.to_string()));
        Ok(())
    }

    /// Drop both the session-only key and the saved one.
    pub async fn forget(&self) -> AppResult<()> {
        *self.session_key.lock().await = None;
        self.repository.clear().await
    }

    pub async fn status(&self) -> CredentialStatus {
        if self.session_key.lock().await.is_some() {
            return CredentialStatus::SessionOnly;
        }
        match self.repository.load().await {
            Ok(Some(ciphertext)) => match self.cipher.decrypt(&ciphertext) {
                Ok(_) => CredentialStatus::Saved,
                Err(_) => CredentialStatus::Unreadable,
            },
            Ok(None) => CredentialStatus::Missing,
            Err(_) => CredentialStatus::Unreadable,
        }
    }

    async fn stored_key(&self) -> Option<SecretString> {
        let ciphertext = match self.repository.load().await {
            Ok(Some(ciphertext)) => ciphertext,
            Ok(None) => return None,
            Err(err) => {
                log::warn!("Saved credential could not be read: {}", err);
                return None;
            }
        };
        match self.cipher.decrypt(&ciphertext) {
            Ok(key) => Some(key),
            Err(err) => {
                log::warn!("Saved credential could not be decrypted: {}", err);
                None
            }
        }
    }

    fn validated(key: &str) -> AppResult<&str> {
        let trimmed = key.trim();
        if !API_KEY_REGEX.is_match(trimmed) {
            return Err(AppError::ValidationError(
                "API key must start with 'sk-' followed by at least 40 characters".to_string(),
            ));
        }
        Ok(trimmed)
    }
}
