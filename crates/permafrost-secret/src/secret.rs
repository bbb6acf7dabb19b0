//! The masking secret atom.

use std::fmt;

use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;
use zeroize::Zeroize;

/// A value that masks itself under every default rendering.
///
/// `Secret<T>` is the distinguished type §4.5 requires: composite command
/// fragments recurse into masking *because* their leaves are this type, not
/// because each fragment re-implements the masking rule. The only way to
/// get the clear payload back out is [`Secret::reveal`], which is never
/// called by a `Display`/`Debug`/logging path — only by the OS hand-off at
/// the edge of the command builder.
#[derive(Clone, Serialize, Deserialize)]
pub struct Secret<T>(T);

impl<T> Secret<T> {
    /// Wraps a value as a secret.
    pub fn new(value: T) -> Self {
        Self(value)
    }

    /// Returns the clear payload. Callers must not pass the result to any
    /// logging, display, or error-message path.
    pub fn reveal(&self) -> &T {
        &self.0
    }

    /// Consumes the wrapper, returning the owned clear payload.
    pub fn into_reveal(self) -> T {
        self.0
    }
}

impl<T> fmt::Debug for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(**********)")
    }
}

impl<T> fmt::Display for Secret<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("**********")
    }
}

impl<T: Zeroize> Drop for Secret<T> {
    /// Zeroes the payload when a secret goes out of scope, matching the
    /// teacher's `#[derive(Zeroize, ZeroizeOnDrop)]` `SecretString` — a
    /// secret's cleartext never lingers in process memory past its own
    /// lifetime.
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl Secret<String> {
    /// Zeroizes the payload in place ahead of drop, for a caller that
    /// needs the cleartext gone before the wrapper's own scope ends (e.g.
    /// replacing a still-live `Secret` with a new value).
    pub fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl PartialEq for Secret<String> {
    /// Constant-time comparison: secret values must never be compared in a
    /// way that leaks timing information about where they first differ.
    fn eq(&self, other: &Self) -> bool {
        self.0.as_bytes().ct_eq(other.0.as_bytes()).into()
    }
}

impl Eq for Secret<String> {}

impl<T> From<T> for Secret<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}
