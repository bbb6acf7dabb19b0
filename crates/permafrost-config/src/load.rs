//! Loading and dotted-path access over the parsed config file.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use permafrost_error::{Error, Result};
use permafrost_secret::{EncryptedData, EncryptionKey, Secret, crypto};
use serde::Deserialize;
use tracing::debug;

/// Raw on-disk shape of the config file: a reserved `secrets` section plus
/// any number of cleartext groups.
#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(default)]
    secrets: BTreeMap<String, BTreeMap<String, String>>,
    #[serde(flatten)]
    cleartext: BTreeMap<String, serde_json::Value>,
}

/// An immutable, loaded configuration.
///
/// Decryption happens lazily, per key, in [`Config::secret`] — the keyfile
/// is only required if the machine actually reads an encrypted value.
pub struct Config {
    path: PathBuf,
    secrets: BTreeMap<String, BTreeMap<String, String>>,
    cleartext: BTreeMap<String, serde_json::Value>,
    key: EncryptionKey,
}

impl Config {
    /// Loads and parses the YAML file at `path`, using `key` to decrypt
    /// `secrets.*` values on demand.
    ///
    /// `key` is ordinarily produced by [`crate::generate_key`] and loaded
    /// once at process start from the fixed keyfile path; it is threaded
    /// in explicitly here rather than read from a hardcoded path so the
    /// caller controls where the keyfile lives.
    pub fn load(path: impl AsRef<Path>, key: EncryptionKey) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let contents = fs::read_to_string(&path).map_err(|e| Error::ConfigIo {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let raw: RawConfig = serde_yaml::from_str(&contents).map_err(|e| Error::ConfigIo {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        debug!(path = %path.display(), groups = raw.secrets.len(), "config.loaded");

        Ok(Self {
            path,
            secrets: raw.secrets,
            cleartext: raw.cleartext,
            key,
        })
    }

    /// Returns the path this config was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Decrypts and returns `secrets.<group>.<key>`.
    ///
    /// Returns [`Error::ConfigKey`] if the group or key is absent, and
    /// [`Error::ConfigDecrypt`] if the stored value fails to decrypt under
    /// the loaded key (wrong key, or a corrupted/tampered file).
    pub fn secret(&self, group: &str, key: &str) -> Result<Secret<String>> {
        let encoded = self
            .secrets
            .get(group)
            .and_then(|g| g.get(key))
            .ok_or_else(|| Error::ConfigKey {
                group: group.to_string(),
                key: key.to_string(),
            })?;

        let encrypted = EncryptedData::from_encoded(encoded.clone());
        let plaintext = crypto::decrypt(&self.key, &encrypted).map_err(|e| Error::ConfigDecrypt {
            group: group.to_string(),
            key: key.to_string(),
            reason: e.to_string(),
        })?;
        let value = String::from_utf8(plaintext).map_err(|e| Error::ConfigDecrypt {
            group: group.to_string(),
            key: key.to_string(),
            reason: e.to_string(),
        })?;
        debug!(group, key, "config.secret.decrypted");
        Ok(Secret::new(value))
    }

    /// Returns the cleartext value `<group>.<key>`, where `<group>` is a
    /// top-level cleartext group (not `secrets`).
    pub fn cleartext(&self, group: &str, key: &str) -> Result<serde_json::Value> {
        self.cleartext
            .get(group)
            .and_then(|g| g.as_object())
            .and_then(|g| g.get(key))
            .cloned()
            .ok_or_else(|| Error::ConfigKey {
                group: group.to_string(),
                key: key.to_string(),
            })
    }
}
