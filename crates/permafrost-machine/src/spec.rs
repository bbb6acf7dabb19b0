//! A machine's static definition: its nodes, name, and failure prefix.

use std::collections::BTreeMap;

use permafrost_core::{MachineName, NodeName};

use crate::node::NodeSpec;

/// The full declaration of one machine kind, ready for [`crate::validate`]
/// and [`crate::run`].
pub struct MachineSpec<S> {
    pub(crate) name: MachineName,
    pub(crate) overview: String,
    pub(crate) failure_prefix: String,
    pub(crate) nodes: BTreeMap<NodeName, NodeSpec<S>>,
}

impl<S> MachineSpec<S> {
    /// Starts building a machine with no nodes.
    pub fn new(
        name: impl Into<MachineName>,
        overview: impl Into<String>,
        failure_prefix: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            overview: overview.into(),
            failure_prefix: failure_prefix.into(),
            nodes: BTreeMap::new(),
        }
    }

    /// Registers a node, keyed by its own name.
    #[must_use]
    pub fn with_node(mut self, node: NodeSpec<S>) -> Self {
        self.nodes.insert(node.name().clone(), node);
        self
    }

    pub fn name(&self) -> &MachineName {
        &self.name
    }

    pub fn overview(&self) -> &str {
        &self.overview
    }

    pub fn failure_prefix(&self) -> &str {
        &self.failure_prefix
    }

    pub fn node(&self, name: &NodeName) -> Option<&NodeSpec<S>> {
        self.nodes.get(name)
    }

    pub fn nodes(&self) -> impl Iterator<Item = &NodeSpec<S>> {
        self.nodes.values()
    }

    /// The single entry node, if exactly one is declared `entry()`.
    pub(crate) fn entry_nodes(&self) -> Vec<&NodeSpec<S>> {
        self.nodes.values().filter(|n| n.is_entry()).collect()
    }

    pub(crate) fn terminal_nodes(&self) -> Vec<&NodeSpec<S>> {
        self.nodes.values().filter(|n| n.is_terminal()).collect()
    }
}
