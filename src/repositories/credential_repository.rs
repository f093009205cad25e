use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::AppResult;
use crate::storage::LocalStore;

const CREDENTIAL_FILE: &str = "credential.json";

// Stored shape; the ciphertext is already base64(nonce || ct).
#[derive(Debug, Deserialize, Serialize)]
struct StoredCredential {
    ciphertext: String,
}

#[async_trait]
pub trait CredentialRepository: Send + Sync {
    async fn load(&self) -> AppResult<Option<String>>;
    async fn save(&self, ciphertext: &str) -> AppResult<()>;
    async fn clear(&self) -> AppResult<()>;
}

pub struct FileCredentialRepository {
    store: Arc<LocalStore>,
}

impl FileCredentialRepository {
    pub fn new(store: Arc<LocalStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl CredentialRepository for FileCredentialRepository {
    async fn load(&self) -> AppResult<Option<String>> {
        let contents = match self.store.read(CREDENTIAL_FILE)? {
            Some(contents) => contents,
            None => return Ok(None),
        };
        let stored: StoredCredential = serde_json::from_str(&contents)?;
        Ok(Some(stored.ciphertext))
    }

    async fn save(&self, ciphertext: &str) -> AppResult<()> {
        log::info!("Saving encrypted API credential");
        let stored = StoredCredential {
            ciphertext: ciphertext.to_string(),
        };
        self.store
            .write(CREDENTIAL_FILE, &serde_json::to_string_pretty(&stored)?)
    }

    async fn clear(&self) -> AppResult<()> {
        log::info!("Clearing saved API credential");
        self.store.remove(CREDENTIAL_FILE)
    }
}
