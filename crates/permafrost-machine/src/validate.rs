//! Load-time validator (§4.2): the seven checks every machine must pass
//! before it can be run.

use std::collections::{BTreeMap, BTreeSet};

use permafrost_core::{MachineName, NodeName};
use permafrost_error::MachineDefinitionError as Error;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::Bfs;

use crate::node::ExceptionPolicy;
use crate::spec::MachineSpec;

/// Which kind of declared edge a [`Diagram`] edge represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    Happy,
    Unhappy,
}

/// A side-effect-free projection of a validated machine, suitable for an
/// external diagram renderer — node list plus colored edge list.
#[derive(Debug, Clone)]
pub struct Diagram {
    pub nodes: Vec<NodeName>,
    pub edges: Vec<(NodeName, NodeName, EdgeKind)>,
}

/// Runs all seven checks of §4.2 over `spec`, returning a [`Diagram`] on
/// success or the first violated invariant's error.
///
/// `known_machines` is the set of machine kinds the caller has already
/// registered (including, if applicable, `spec`'s own name for recursive
/// invocation) — used to validate `invokes_machine` declarations.
pub fn validate<S>(
    spec: &MachineSpec<S>,
    known_machines: &BTreeSet<MachineName>,
) -> Result<Diagram, Error> {
    if spec.overview().trim().is_empty() {
        return Err(Error::NoOverview {
            context: spec.name().to_string(),
        });
    }

    match spec.entry_nodes().as_slice() {
        [] => return Err(Error::NoEntry),
        [_one] => {}
        [first, second, ..] => {
            return Err(Error::MultipleEntry {
                first: first.name().to_string(),
                second: second.name().to_string(),
            });
        }
    }

    if spec.terminal_nodes().is_empty() {
        return Err(Error::NoTerminal);
    }

    for node in spec.nodes() {
        if node.overview().trim().is_empty() {
            return Err(Error::NoOverview {
                context: node.name().to_string(),
            });
        }

        for target in node.happy_paths_set().iter().chain(node.unhappy_paths_set()) {
            if spec.node(target).is_none() {
                return Err(Error::EdgeUnknown {
                    from: node.name().to_string(),
                    to: target.to_string(),
                });
            }
        }

        if let ExceptionPolicy::MayThrow { on_exception } = node.exception_policy() {
            if spec.node(on_exception).is_none() {
                return Err(Error::ExceptionEdgeMismatch {
                    node: node.name().to_string(),
                    reason: format!("on_exception target '{on_exception}' is not a declared node"),
                });
            }
        }

        if let Some(invoked) = node.invoked_machine() {
            if !known_machines.contains(invoked) {
                return Err(Error::InvalidInvokedMachine {
                    node: node.name().to_string(),
                    invoked_machine: invoked.to_string(),
                });
            }
        }
    }

    let mut graph = DiGraph::<NodeName, EdgeKind>::new();
    let mut index_of: BTreeMap<NodeName, NodeIndex> = BTreeMap::new();
    for node in spec.nodes() {
        index_of.insert(node.name().clone(), graph.add_node(node.name().clone()));
    }

    let mut edges = Vec::new();
    for node in spec.nodes() {
        for target in node.happy_paths_set() {
            graph.add_edge(index_of[node.name()], index_of[target], EdgeKind::Happy);
            edges.push((node.name().clone(), target.clone(), EdgeKind::Happy));
        }
        for target in node.unhappy_paths_set() {
            graph.add_edge(index_of[node.name()], index_of[target], EdgeKind::Unhappy);
            edges.push((node.name().clone(), target.clone(), EdgeKind::Unhappy));
        }
    }

    let entry = spec.entry_nodes()[0];
    let mut bfs = Bfs::new(&graph, index_of[entry.name()]);
    let mut reached = BTreeSet::new();
    while let Some(idx) = bfs.next(&graph) {
        reached.insert(graph[idx].clone());
    }
    for node in spec.nodes() {
        if !reached.contains(node.name()) {
            return Err(Error::UnreachableNode {
                node: node.name().to_string(),
            });
        }
    }

    Ok(Diagram {
        nodes: spec.nodes().map(|n| n.name().clone()).collect(),
        edges,
    })
}
