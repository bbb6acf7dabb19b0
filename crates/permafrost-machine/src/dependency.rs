//! Dependency container (§4.4, §9 Design Note 2).
//!
//! The source attaches a logger to a capability by attribute interception
//! on access; here the container simply threads a [`Logger`] into every
//! capability call explicitly. What's preserved is the behavioral contract
//! that actually matters: per-node-named keys, so a test can substitute
//! `create_pg_dump_directory` without touching `create_intermediate_directory`
//! even when both would otherwise share one underlying capability.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use tracing::Span;

/// A thin wrapper around the active `tracing::Span`, handed to every
/// capability call so side-effecting operations log under the calling
/// node's span without needing to know which node is calling them.
#[derive(Clone)]
pub struct Logger(Span);

impl Logger {
    pub fn new(span: Span) -> Self {
        Self(span)
    }

    /// A logger with a disabled span, for tests that don't care about
    /// log correlation.
    pub fn noop() -> Self {
        Self(Span::none())
    }

    pub fn span(&self) -> &Span {
        &self.0
    }
}

/// A capability call's outcome: the payload on success, or an exceptional
/// condition message on failure — mirrors [`crate::node::NodeBody`]'s own
/// `Result<_, String>` shape, since a capability failing is exactly what a
/// *may-throw* node's body propagates.
pub type CapabilityResult = Result<Value, String>;

/// A single side-effecting operation, keyed by the node name that owns it.
pub type Capability<S> = Arc<dyn Fn(&S, &Logger) -> CapabilityResult + Send + Sync>;

/// Per-machine record mapping node-conventional names to capability
/// functions (§4.4).
pub struct Dependencies<S> {
    logger: Logger,
    capabilities: HashMap<&'static str, Capability<S>>,
}

impl<S> Dependencies<S> {
    /// Builds an empty container bound to `logger`.
    pub fn new(logger: Logger) -> Self {
        Self {
            logger,
            capabilities: HashMap::new(),
        }
    }

    /// Registers (or substitutes) the capability for `name`.
    #[must_use]
    pub fn register(mut self, name: &'static str, capability: Capability<S>) -> Self {
        self.capabilities.insert(name, capability);
        self
    }

    /// Substitutes the capability for `name` in place, without consuming
    /// `self` — the per-site test-double substitution mechanism of §4.4.
    pub fn substitute(&mut self, name: &'static str, capability: Capability<S>) {
        self.capabilities.insert(name, capability);
    }

    /// Calls the capability registered under `name`, with the container's
    /// logger already bound.
    ///
    /// Returns an exceptional-condition message if no capability is
    /// registered for `name` — a misconfigured dependency container is
    /// itself the kind of defect a *may-throw* node's caller should see as
    /// a failure, not a panic.
    pub fn call(&self, name: &'static str, state: &S) -> CapabilityResult {
        match self.capabilities.get(name) {
            Some(capability) => capability(state, &self.logger),
            None => Err(format!("no capability registered for '{name}'")),
        }
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }
}
