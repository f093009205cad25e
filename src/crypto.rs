use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use rand::RngCore;
use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha256};

use crate::errors::{AppError, AppResult};

const NONCE_LEN: usize = 12;

/// AES-256-GCM cipher for the API credential at rest.
///
/// Key = SHA-256 of the configured secret; payload = base64(nonce ||
/// ciphertext) with a fresh 12-byte nonce per encryption.
pub struct CredentialCipher {
    cipher: Aes256Gcm,
}

impl CredentialCipher {
    pub fn new(secret: &SecretString) -> Self {
        let digest = Sha256::digest(secret.expose_secret().as_bytes());
        Self {
            cipher: Aes256Gcm::new(&digest),
        }
    }

    pub fn encrypt(&self, plaintext: &str) -> AppResult<String> {
        let mut nonce_bytes = [0u8; NONCE_LEN];
        rand::thread_rng().fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        let ciphertext = self
            .cipher
            .encrypt(nonce, plaintext.as_bytes())
            .map_err(|_| AppError::StorageError("Credential encryption failed".to_string()))?;

        let mut payload = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        payload.extend_from_slice(&nonce_bytes);
        payload.extend_from_slice(&ciphertext);
        Ok(STANDARD.encode(payload))
    }

    pub fn decrypt(&self, payload: &str) -> AppResult<SecretString> {
        let raw = STANDARD.decode(payload).map_err(|_| {
            AppError::CredentialInvalid("Stored credential is not valid base64".to_string())
        })?;
        if raw.len() <= NONCE_LEN {
            return Err(AppError::CredentialInvalid(
                "Stored credential is truncated".to_string(),
            ));
        }

        let (nonce_bytes, ciphertext) = raw.split_at(NONCE_LEN);
        let nonce = Nonce::from_slice(nonce_bytes);
        let plaintext = self.cipher.decrypt(nonce, ciphertext).map_err(|_| {
            AppError::CredentialInvalid("Stored credential failed to decrypt".to_string())
        })?;
        let plaintext = String::from_utf8(plaintext).map_err(|_| {
            AppError::CredentialInvalid("Decrypted credential is not UTF-8".to_string())
        })?;

        Ok(SecretString::from(plaintext))
    }
}
