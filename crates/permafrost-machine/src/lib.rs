//! Validated directed-graph state-machine engine for archival workflows.
//!
//! A machine is a set of [`node::NodeSpec`]s wired into a directed graph of
//! happy/unhappy successor edges, checked once at load time by
//! [`validate::validate`] and then driven to completion by
//! [`runtime::run`], which produces an ordered [`result::NodeResult`]
//! stream consumed by the caller (or spliced into an outer stream by a
//! node that [`node::NodeSpec::invokes_machine`]).

pub mod dependency;
pub mod node;
pub mod result;
pub mod runtime;
pub mod spec;
pub mod transition;
pub mod validate;

pub use dependency::{Capability, CapabilityResult, Dependencies, Logger};
pub use node::{ExceptionPolicy, NodeBody, NodeSpec};
pub use result::NodeResult;
pub use runtime::run;
pub use spec::MachineSpec;
pub use transition::{NodeOutcome, Transition};
pub use validate::{Diagram, EdgeKind, validate};
