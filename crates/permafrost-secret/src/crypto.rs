//! Authenticated encryption for config values at rest.
//!
//! The specification's example keystore is a Python Fernet key loaded from
//! `/etc/fernet.key`; Fernet itself has no maintained Rust crate in this
//! workspace's dependency stack. We substitute AES-256-GCM over a raw
//! 32-byte key loaded from the same well-known keyfile path, which gives
//! the same properties the spec actually requires (authenticated symmetric
//! encryption, a fixed process-local key) without inventing a dependency.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use rand::RngCore;
use thiserror::Error;

const NONCE_LEN: usize = 12;
const KEY_LEN: usize = 32;

/// Failures from key loading, encryption, or decryption.
#[derive(Debug, Error)]
pub enum CryptoError {
    /// The keyfile did not contain exactly 32 bytes.
    #[error("encryption key must be {KEY_LEN} bytes, found {found}")]
    InvalidKeyLength { found: usize },

    /// The stored ciphertext was not valid base64.
    #[error("stored secret is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The stored ciphertext was shorter than one nonce.
    #[error("stored secret is too short to contain a nonce")]
    Truncated,

    /// AEAD authentication failed: wrong key, or the ciphertext was
    /// tampered with.
    #[error("decryption failed: authentication tag mismatch")]
    AuthenticationFailed,
}

/// A 256-bit key shared by every encrypt/decrypt call in one process.
///
/// Loaded once at process start from a fixed keyfile path (mirroring the
/// spec's `/etc/fernet.key`) and held for the process's lifetime; there is
/// no key rotation within a running process.
#[derive(Clone)]
pub struct EncryptionKey([u8; KEY_LEN]);

impl EncryptionKey {
    /// Builds a key from exactly 32 raw bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.len() != KEY_LEN {
            return Err(CryptoError::InvalidKeyLength { found: bytes.len() });
        }
        let mut key = [0u8; KEY_LEN];
        key.copy_from_slice(bytes);
        Ok(Self(key))
    }

    /// Generates a fresh random key, for the key-generation utility (§6).
    pub fn generate() -> Self {
        let mut key = [0u8; KEY_LEN];
        rand::rng().fill_bytes(&mut key);
        Self(key)
    }

    /// Returns the raw key bytes, for writing a freshly generated key to
    /// the keyfile path.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }

    fn cipher(&self) -> Aes256Gcm {
        Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(&self.0))
    }
}

/// A nonce-prefixed, base64-encoded ciphertext as stored in the YAML
/// config's `secrets` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedData(String);

impl EncryptedData {
    /// Wraps an already-encoded string read from the config file.
    pub fn from_encoded(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Returns the base64-encoded form for writing back to the config file.
    pub fn as_encoded(&self) -> &str {
        &self.0
    }
}

/// Encrypts `plaintext` under `key`, returning a nonce-prefixed blob
/// suitable for storage in the config file's `secrets` section.
pub fn encrypt(key: &EncryptionKey, plaintext: &[u8]) -> EncryptedData {
    let cipher = key.cipher();
    let mut nonce_bytes = [0u8; NONCE_LEN];
    rand::rng().fill_bytes(&mut nonce_bytes);
    let nonce = Nonce::from_slice(&nonce_bytes);

    // `Aes256Gcm::encrypt` cannot fail for a correctly sized key/nonce.
    let ciphertext = cipher
        .encrypt(nonce, plaintext)
        .expect("AES-256-GCM encryption with a fixed-size nonce cannot fail");

    let mut blob = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    blob.extend_from_slice(&nonce_bytes);
    blob.extend_from_slice(&ciphertext);
    EncryptedData(BASE64.encode(blob))
}

/// Decrypts a blob produced by [`encrypt`]. Returns
/// [`CryptoError::AuthenticationFailed`] if the key is wrong or the stored
/// value was tampered with.
pub fn decrypt(key: &EncryptionKey, data: &EncryptedData) -> Result<Vec<u8>, CryptoError> {
    let blob = BASE64.decode(&data.0)?;
    if blob.len() < NONCE_LEN {
        return Err(CryptoError::Truncated);
    }
    let (nonce_bytes, ciphertext) = blob.split_at(NONCE_LEN);
    let nonce = Nonce::from_slice(nonce_bytes);

    key.cipher()
        .decrypt(nonce, ciphertext)
        .map_err(|_| CryptoError::AuthenticationFailed)
}
