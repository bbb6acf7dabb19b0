//! The result model (§4.1/§4.3): every node run produces one [`NodeResult`],
//! and a machine run produces an ordered stream of them.

use permafrost_core::NodeIdentity;
use serde_json::Value;

/// The outcome of a single node's run, or of a synthetic engine-level check
/// (an illegal transition, a stalled run).
#[derive(Debug, Clone, PartialEq)]
pub enum NodeResult {
    /// The node completed its work without error.
    Success { node: NodeIdentity, payload: Value },
    /// The node failed, either because its body raised an exceptional
    /// condition or because it explicitly reported a domain failure.
    Failure {
        node: NodeIdentity,
        message: String,
        /// The underlying cause: a node body's raised message for a
        /// *may-throw* exception, or an engine-assigned tag
        /// (`"IllegalTransitionError"`, `"NoTransitionError"`) for a
        /// runtime-detected defect. `None` for an explicit domain failure
        /// that carries no separate cause.
        cause: Option<String>,
    },
}

impl NodeResult {
    /// Builds a `Success` result.
    pub fn success(node: NodeIdentity, payload: Value) -> Self {
        NodeResult::Success { node, payload }
    }

    /// Builds a `Failure` result with no separate cause.
    pub fn failure(node: NodeIdentity, message: impl Into<String>) -> Self {
        NodeResult::Failure {
            node,
            message: message.into(),
            cause: None,
        }
    }

    /// Builds a `Failure` result carrying an explicit cause.
    pub fn failure_with_cause(
        node: NodeIdentity,
        message: impl Into<String>,
        cause: impl Into<String>,
    ) -> Self {
        NodeResult::Failure {
            node,
            message: message.into(),
            cause: Some(cause.into()),
        }
    }

    /// The node identity this result belongs to.
    pub fn node(&self) -> &NodeIdentity {
        match self {
            NodeResult::Success { node, .. } | NodeResult::Failure { node, .. } => node,
        }
    }

    /// True for `Success`.
    pub fn is_success(&self) -> bool {
        matches!(self, NodeResult::Success { .. })
    }

    /// True for `Failure`.
    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }
}
