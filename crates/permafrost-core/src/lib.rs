//! Identity and time primitives shared across the permafrost workspace.
//!
//! Every other crate in the workspace builds on the newtypes defined here so
//! that a node name, a machine name, and a fully-qualified node identity can
//! never be confused with one another or with a bare `String`.

pub mod id;
pub mod time;

pub use id::{MachineName, NodeIdentity, NodeName};
pub use time::unix_now;
