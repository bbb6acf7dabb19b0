//! Error taxonomy for the permafrost archival state-machine engine.
//!
//! One flat `thiserror` enum per failure domain (§7 of the specification),
//! aggregated into a single crate-root [`Error`]/[`Result`] pair. Unlike a
//! generic error-context framework, every variant here corresponds to a
//! specific, named failure mode a caller is expected to `match` on —
//! config load failures are fatal at process start, machine-definition
//! failures are fatal at load time, and the runtime edge-check failures
//! abort a single machine run.

pub mod machine;

pub use machine::MachineDefinitionError;

use thiserror::Error;

/// The workspace-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// A config key was requested that does not exist in the loaded file.
    #[error("config key '{group}.{key}' not found")]
    ConfigKey { group: String, key: String },

    /// A config value under `secrets.<group>.<key>` could not be decrypted.
    #[error("failed to decrypt secret '{group}.{key}': {reason}")]
    ConfigDecrypt {
        group: String,
        key: String,
        reason: String,
    },

    /// The config file could not be read, written, or parsed.
    #[error("config file '{path}': {reason}")]
    ConfigIo { path: String, reason: String },

    /// A machine failed load-time validation (§4.2).
    #[error(transparent)]
    MachineDefinition(#[from] MachineDefinitionError),

    /// A node emitted a `Success`/`Failure` transition whose target was not
    /// in its declared happy/unhappy set.
    #[error(
        "illegal transition: node '{node}' emitted {attempted_kind} targeting '{target}', which is not in its declared {attempted_kind} set"
    )]
    IllegalTransition {
        node: String,
        target: String,
        attempted_kind: &'static str,
    },

    /// A node returned a transition back to itself, or the runtime made no
    /// forward progress.
    #[error("no transition: node '{node}' produced no forward progress")]
    NoTransition { node: String },
}

/// Convenience alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_key_error_message() {
        let err = Error::ConfigKey {
            group: "db".into(),
            key: "password".into(),
        };
        assert_eq!(err.to_string(), "config key 'db.password' not found");
    }

    #[test]
    fn illegal_transition_message_names_both_node_and_target() {
        let err = Error::IllegalTransition {
            node: "compress".into(),
            target: "encrypt".into(),
            attempted_kind: "success",
        };
        let msg = err.to_string();
        assert!(msg.contains("compress"));
        assert!(msg.contains("encrypt"));
        assert!(msg.contains("success"));
    }

    #[test]
    fn machine_definition_error_converts_via_from() {
        let def_err = MachineDefinitionError::NoEntry;
        let err: Error = def_err.into();
        assert!(matches!(err, Error::MachineDefinition(MachineDefinitionError::NoEntry)));
    }
}
