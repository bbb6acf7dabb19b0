//! Timestamp helpers.

use chrono::{DateTime, Utc};

/// Returns the current time.
///
/// Centralized so that tests and frozen-field state records have one place
/// to reason about "now" rather than calling `Utc::now()` ad hoc throughout
/// the workspace.
pub fn unix_now() -> DateTime<Utc> {
    Utc::now()
}
