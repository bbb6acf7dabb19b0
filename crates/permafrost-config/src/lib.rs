//! Immutable YAML configuration and encrypted secret store (§4.6, §6).
//!
//! A config file has two kinds of top-level sections: `secrets` (nested one
//! level by group, values are encrypted literals) and any number of
//! cleartext groups. [`Config::load`] reads and parses the file but does
//! *not* decrypt eagerly — decryption happens per-key on [`Config::secret`],
//! so a config with keys nobody asks for never pays the decrypt cost and
//! never needs the key loaded for the values it doesn't touch. The loaded
//! [`Config`] is immutable for its lifetime; [`set_secret`] is a free
//! function that operates on the file on disk, not on a live `Config`,
//! matching the spec's `set` utility being a standalone tool rather than a
//! method that mutates a loaded config in place.

mod keyfile;
mod load;
mod set;

pub use keyfile::generate_key;
pub use load::Config;
pub use set::set_secret;

pub use permafrost_error::{Error, Result};
