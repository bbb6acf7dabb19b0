//! Secret-aware command-line fragment builder (§4.5).
//!
//! Shell-invoking nodes (mount, dump, tar, encrypt) assemble their argument
//! vectors out of [`Fragment`]s rather than raw strings, so that a secret
//! value can never leak into a log line by accident: every fragment has a
//! masked [`Fragment::display`] used for logging and a clear
//! [`Fragment::reveal_args`] used only at the OS process-spawn boundary.

mod fragment;

pub use fragment::Fragment;
