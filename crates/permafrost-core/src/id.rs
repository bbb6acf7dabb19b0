//! Identity newtypes for machines and nodes.
//!
//! Node and machine names are author-chosen strings (they come from the
//! node/machine declarations written by the engineer wiring up a workflow),
//! not generated IDs, so these newtypes exist to keep a node name, a
//! machine name, and a bare `String` from being mixed up at call sites,
//! not to mint or validate values.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Name of a single node within a machine, e.g. `"compress"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeName(String);

impl NodeName {
    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for NodeName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for NodeName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Name of a machine kind, e.g. `"BackupAndEncrypt"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MachineName(String);

impl MachineName {
    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MachineName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for MachineName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for MachineName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Fully-qualified node identity: `<MachineName>.<NodeName>`.
///
/// Carried on every [`Transition`](crate) and result so that a failure can
/// always be traced back to the machine and node that produced it, even
/// after a nested machine has spliced its stream into an outer one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeIdentity {
    machine: MachineName,
    node: NodeName,
}

impl NodeIdentity {
    /// Builds an identity from a machine name and a node name.
    pub fn new(machine: impl Into<MachineName>, node: impl Into<NodeName>) -> Self {
        Self {
            machine: machine.into(),
            node: node.into(),
        }
    }

    /// The machine this node belongs to.
    pub fn machine(&self) -> &MachineName {
        &self.machine
    }

    /// The bare node name, without the machine qualifier.
    pub fn node(&self) -> &NodeName {
        &self.node
    }
}

impl fmt::Display for NodeIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.machine, self.node)
    }
}
