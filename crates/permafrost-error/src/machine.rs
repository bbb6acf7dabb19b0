//! Load-time validation errors for machine definitions (spec §4.2).

use thiserror::Error;

/// One variant per check performed by the load-time validator.
///
/// Every variant names the node(s) involved so that a failing validation
/// can be reported without re-walking the graph.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MachineDefinitionError {
    /// No node declared `is_entry = true`.
    #[error("machine has no entry node")]
    NoEntry,

    /// More than one node declared `is_entry = true`.
    #[error("machine has multiple entry nodes: '{first}' and '{second}'")]
    MultipleEntry { first: String, second: String },

    /// No node declared `is_terminal = true`.
    #[error("machine has no terminal node")]
    NoTerminal,

    /// A happy or unhappy successor names a node that was never declared.
    #[error("node '{from}' declares an edge to unknown node '{to}'")]
    EdgeUnknown { from: String, to: String },

    /// A node is not reachable from the entry node via any declared edge.
    #[error("node '{node}' is unreachable from the entry node")]
    UnreachableNode { node: String },

    /// A machine-level or node-level overview string was empty.
    #[error("missing overview for {context}")]
    NoOverview { context: String },

    /// A *may-throw* node has no `on_exception` target, or a *cannot-throw*
    /// node declares one anyway.
    #[error("node '{node}' exception policy is inconsistent: {reason}")]
    ExceptionEdgeMismatch { node: String, reason: String },

    /// `invokes_machine` names a machine kind that does not exist or is
    /// itself invalid.
    #[error("node '{node}' invokes unknown or invalid machine '{invoked_machine}'")]
    InvalidInvokedMachine {
        node: String,
        invoked_machine: String,
    },
}
