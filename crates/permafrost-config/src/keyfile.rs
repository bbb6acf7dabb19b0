//! The key-generation utility (§6).

use std::fs;
use std::path::Path;

use permafrost_error::{Error, Result};
use permafrost_secret::EncryptionKey;

/// Generates a fresh 256-bit key and writes it, raw, to `path`.
///
/// This is the counterpart to the spec's key-generation utility, which
/// "emits a fresh symmetric key to a named path in the format expected by
/// the encryption layer" — here, that format is the 32 raw key bytes
/// [`EncryptionKey::from_bytes`] expects back.
pub fn generate_key(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let key = EncryptionKey::generate();
    fs::write(path, key.as_bytes()).map_err(|e| Error::ConfigIo {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}
