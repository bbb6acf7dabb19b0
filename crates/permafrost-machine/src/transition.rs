//! The transition a node emits (§4.1): where to go next, and what happened.

use permafrost_core::NodeName;

use crate::result::NodeResult;

/// `{to, result}` as named by the glossary: `to` is the next node's name,
/// or `None` for a terminal node with no successor.
#[derive(Debug, Clone)]
pub struct Transition {
    pub to: Option<NodeName>,
    pub result: NodeResult,
}

impl Transition {
    /// A transition to a named successor.
    pub fn to(target: impl Into<NodeName>, result: NodeResult) -> Self {
        Self {
            to: Some(target.into()),
            result,
        }
    }

    /// A transition with no successor (terminal).
    pub fn terminal(result: NodeResult) -> Self {
        Self { to: None, result }
    }
}

/// What a node body returns: its own transition, plus any sub-results it
/// has already appended to a nested machine's stream (§4.3, "nested
/// machines").
///
/// `sub_results` is non-empty only for a node declared `invokes_machine`;
/// the runtime splices it into the outer stream immediately before the
/// node's own result, in order.
#[derive(Debug, Clone)]
pub struct NodeOutcome {
    pub sub_results: Vec<NodeResult>,
    pub transition: Transition,
}

impl NodeOutcome {
    /// An outcome with no nested sub-results: the common case.
    pub fn new(transition: Transition) -> Self {
        Self {
            sub_results: Vec::new(),
            transition,
        }
    }

    /// An outcome that spliced a nested machine's stream before its own
    /// transition.
    pub fn nested(sub_results: Vec<NodeResult>, transition: Transition) -> Self {
        Self {
            sub_results,
            transition,
        }
    }
}
