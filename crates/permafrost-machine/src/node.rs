//! Node declaration (§4.1, §9 Design Note 1).
//!
//! The source expresses graph metadata as a decorator parsing documentation
//! strings; here a node is instead a typed, builder-constructed descriptor
//! registered with a [`crate::spec::MachineSpec`] at load time.

use std::collections::BTreeSet;
use std::sync::Arc;

use permafrost_core::NodeName;

use crate::dependency::Dependencies;
use crate::transition::NodeOutcome;

/// Whether a node's body may raise an exceptional condition, and if so,
/// where the engine should route the resulting failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExceptionPolicy {
    /// The body may fail exceptionally; `on_exception` names the unhappy
    /// successor that handles the resulting `Failure`.
    MayThrow { on_exception: NodeName },
    /// The body is not expected to fail exceptionally — only via an
    /// explicit domain `Failure` routed through its own unhappy paths.
    CannotThrow,
}

/// A node's executable body.
///
/// `Ok(NodeOutcome)` is the node's normal return, success or domain
/// failure alike — both travel as data (§4.3's core invariant: "the engine
/// never throws across a node boundary"). `Err(String)` models an
/// exceptional condition raised by the body itself (the Rust analogue of
/// the source's uncaught exception), which the runtime converts into a
/// `Failure` and routes per the node's [`ExceptionPolicy`].
pub type NodeBody<S> =
    Arc<dyn Fn(&mut S, &Dependencies<S>) -> Result<NodeOutcome, String> + Send + Sync>;

/// A single node of a machine.
#[derive(Clone)]
pub struct NodeSpec<S> {
    pub(crate) name: NodeName,
    pub(crate) overview: String,
    pub(crate) is_entry: bool,
    pub(crate) is_terminal: bool,
    pub(crate) happy_paths: BTreeSet<NodeName>,
    pub(crate) unhappy_paths: BTreeSet<NodeName>,
    pub(crate) invokes_machine: Option<permafrost_core::MachineName>,
    pub(crate) exception_policy: ExceptionPolicy,
    pub(crate) body: NodeBody<S>,
}

impl<S> NodeSpec<S> {
    /// Starts building a node. Defaults to `CannotThrow`, not entry, not
    /// terminal, with empty happy/unhappy sets.
    pub fn new(
        name: impl Into<NodeName>,
        overview: impl Into<String>,
        body: NodeBody<S>,
    ) -> Self {
        Self {
            name: name.into(),
            overview: overview.into(),
            is_entry: false,
            is_terminal: false,
            happy_paths: BTreeSet::new(),
            unhappy_paths: BTreeSet::new(),
            invokes_machine: None,
            exception_policy: ExceptionPolicy::CannotThrow,
            body,
        }
    }

    /// Marks this node as the machine's single entry point.
    #[must_use]
    pub fn entry(mut self) -> Self {
        self.is_entry = true;
        self
    }

    /// Marks this node as a terminal node (no outgoing transition).
    #[must_use]
    pub fn terminal(mut self) -> Self {
        self.is_terminal = true;
        self
    }

    /// Declares the set of nodes a `Success` transition may target.
    #[must_use]
    pub fn happy_paths<I, N>(mut self, targets: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<NodeName>,
    {
        self.happy_paths = targets.into_iter().map(Into::into).collect();
        self
    }

    /// Declares the set of nodes a `Failure` transition may target.
    #[must_use]
    pub fn unhappy_paths<I, N>(mut self, targets: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<NodeName>,
    {
        self.unhappy_paths = targets.into_iter().map(Into::into).collect();
        self
    }

    /// Declares that this node invokes a nested machine of the given kind.
    #[must_use]
    pub fn invokes_machine(mut self, machine: impl Into<permafrost_core::MachineName>) -> Self {
        self.invokes_machine = Some(machine.into());
        self
    }

    /// Declares the node *may-throw*, routing exceptional failures to
    /// `on_exception`.
    #[must_use]
    pub fn may_throw(mut self, on_exception: impl Into<NodeName>) -> Self {
        self.exception_policy = ExceptionPolicy::MayThrow {
            on_exception: on_exception.into(),
        };
        self
    }

    pub fn name(&self) -> &NodeName {
        &self.name
    }

    pub fn overview(&self) -> &str {
        &self.overview
    }

    pub fn is_entry(&self) -> bool {
        self.is_entry
    }

    pub fn is_terminal(&self) -> bool {
        self.is_terminal
    }

    pub fn happy_paths_set(&self) -> &BTreeSet<NodeName> {
        &self.happy_paths
    }

    pub fn unhappy_paths_set(&self) -> &BTreeSet<NodeName> {
        &self.unhappy_paths
    }

    pub fn invoked_machine(&self) -> Option<&permafrost_core::MachineName> {
        self.invokes_machine.as_ref()
    }

    pub fn exception_policy(&self) -> &ExceptionPolicy {
        &self.exception_policy
    }
}
