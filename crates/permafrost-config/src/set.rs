//! The `set` utility (§6): rewrites one secret in place, atomically.

use std::fs;
use std::path::Path;

use permafrost_error::{Error, Result};
use permafrost_secret::{EncryptionKey, crypto};
use serde_yaml::Value;
use tracing::debug;

/// Re-encrypts `value` under `key` and writes it to `secrets.<group>.<key>`
/// in the YAML file at `path`, preserving every other entry.
///
/// The rewrite is atomic: the new document is written to a sibling
/// temporary file first, then renamed over the original, so a crash
/// mid-write never leaves a half-written config file on disk.
pub fn set_secret(
    path: impl AsRef<Path>,
    key: &EncryptionKey,
    group: &str,
    secret_key: &str,
    value: &str,
) -> Result<()> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|e| Error::ConfigIo {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    let mut document: Value = serde_yaml::from_str(&contents).map_err(|e| Error::ConfigIo {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    let encrypted = crypto::encrypt(key, value.as_bytes());

    let mapping = document.as_mapping_mut().ok_or_else(|| Error::ConfigIo {
        path: path.display().to_string(),
        reason: "top-level document is not a mapping".to_string(),
    })?;

    let secrets = mapping
        .entry(Value::String("secrets".to_string()))
        .or_insert_with(|| Value::Mapping(serde_yaml::Mapping::new()));
    let secrets = secrets.as_mapping_mut().ok_or_else(|| Error::ConfigIo {
        path: path.display().to_string(),
        reason: "'secrets' section is not a mapping".to_string(),
    })?;

    let group_entry = secrets
        .entry(Value::String(group.to_string()))
        .or_insert_with(|| Value::Mapping(serde_yaml::Mapping::new()));
    let group_entry = group_entry.as_mapping_mut().ok_or_else(|| Error::ConfigIo {
        path: path.display().to_string(),
        reason: format!("'secrets.{group}' is not a mapping"),
    })?;

    group_entry.insert(
        Value::String(secret_key.to_string()),
        Value::String(encrypted.as_encoded().to_string()),
    );

    let rendered = serde_yaml::to_string(&document).map_err(|e| Error::ConfigIo {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    let tmp_path = path.with_extension("tmp");
    fs::write(&tmp_path, rendered).map_err(|e| Error::ConfigIo {
        path: tmp_path.display().to_string(),
        reason: e.to_string(),
    })?;
    fs::rename(&tmp_path, path).map_err(|e| Error::ConfigIo {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    debug!(path = %path.display(), group, secret_key, "config.secret.set");
    Ok(())
}
