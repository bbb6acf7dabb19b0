//! Masked secret values and authenticated encryption for the permafrost
//! config store.
//!
//! Two independent concerns live here because both need the same guarantee
//! — a secret payload never reaches a `Display`/`Debug` rendering by
//! accident:
//!
//! - [`Secret<T>`] — a wrapper that masks under default rendering and only
//!   yields its payload through an explicit [`Secret::reveal`] call.
//! - [`crypto`] — AES-256-GCM encrypt/decrypt over a process-local key,
//!   used by the config store to keep `secrets.*` values at rest.

pub mod crypto;
mod secret;

pub use crypto::{CryptoError, EncryptedData, EncryptionKey};
pub use secret::Secret;
