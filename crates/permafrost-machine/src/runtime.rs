//! The single-threaded runtime (§4.3, §5 Concurrency model).
//!
//! No suspension points, no scheduler loop beyond the one below: each node
//! runs to completion before the next begins. This is a deliberate
//! divergence from the teacher's async, level-parallel `WorkflowEngine` —
//! the specification this engine implements explicitly excludes concurrent
//! execution within a single machine run.

use std::time::Instant;

use permafrost_core::NodeIdentity;
use tracing::{debug, debug_span};

use crate::dependency::Dependencies;
use crate::node::ExceptionPolicy;
use crate::result::NodeResult;
use crate::spec::MachineSpec;

/// Runs `spec` to completion starting from its entry node, returning the
/// full ordered result stream.
///
/// `spec` is assumed to have already passed [`crate::validate::validate`];
/// running an unvalidated spec may panic (a missing node lookup is a
/// caller defect the validator exists specifically to rule out).
pub fn run<S>(spec: &MachineSpec<S>, state: &mut S, deps: &Dependencies<S>) -> Vec<NodeResult> {
    let mut stream = Vec::new();

    let entry = spec
        .entry_nodes()
        .first()
        .copied()
        .expect("run() requires a validated machine with exactly one entry node");
    let mut current = entry.name().clone();

    loop {
        let node = spec.node(&current).unwrap_or_else(|| {
            panic!("run() requires a validated machine: node '{current}' does not exist")
        });
        let identity = NodeIdentity::new(spec.name().clone(), node.name().clone());

        let span = debug_span!("node", name = %node.name());
        let _entered = span.enter();
        debug!(node = %node.name(), "node.start");
        let started = Instant::now();

        match (node.body)(state, deps) {
            Ok(outcome) => {
                stream.extend(outcome.sub_results);

                let result = outcome.transition.result;
                let to = outcome.transition.to.clone();

                debug!(
                    node = %node.name(),
                    elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
                    success = result.is_success(),
                    "node.complete"
                );

                // §4.3.c: a Failure's target must be in `unhappy_paths`, "or
                // equal to the on_exception target" — a may-throw node need
                // not duplicate its exception handler into `unhappy_paths`
                // for an Ok(Failure) domain transition to legally reach it.
                let illegal = match &to {
                    Some(target) if result.is_success() => !node.happy_paths_set().contains(target),
                    Some(target) => {
                        let declared = node.unhappy_paths_set().contains(target);
                        let is_exception_handler = matches!(
                            node.exception_policy(),
                            ExceptionPolicy::MayThrow { on_exception } if on_exception == target
                        );
                        !(declared || is_exception_handler)
                    }
                    None => false,
                };

                if illegal {
                    stream.push(result);
                    stream.push(NodeResult::failure_with_cause(
                        identity,
                        format!(
                            "{} illegal transition: node '{}' targeted '{}'",
                            spec.failure_prefix(),
                            node.name(),
                            to.as_ref().expect("illegal transition always has a target"),
                        ),
                        "IllegalTransitionError",
                    ));
                    break;
                }

                stream.push(result);

                match to {
                    Some(next) if next == current => {
                        stream.push(NodeResult::failure_with_cause(
                            identity,
                            format!(
                                "{} no transition: node '{}' transitioned to itself",
                                spec.failure_prefix(),
                                node.name()
                            ),
                            "NoTransitionError",
                        ));
                        break;
                    }
                    Some(next) => current = next,
                    None if node.is_terminal() => break,
                    None => {
                        stream.push(NodeResult::failure_with_cause(
                            identity,
                            format!(
                                "{} no transition: node '{}' produced no successor",
                                spec.failure_prefix(),
                                node.name()
                            ),
                            "NoTransitionError",
                        ));
                        break;
                    }
                }
            }
            Err(exception) => {
                debug!(
                    node = %node.name(),
                    elapsed_ms = started.elapsed().as_secs_f64() * 1000.0,
                    error = %exception,
                    "node.error"
                );

                let message = format!(
                    "{} unrecognized exception: {exception}",
                    spec.failure_prefix()
                );
                stream.push(NodeResult::failure_with_cause(
                    identity,
                    message,
                    exception,
                ));

                match node.exception_policy() {
                    ExceptionPolicy::MayThrow { on_exception } => {
                        current = on_exception.clone();
                    }
                    ExceptionPolicy::CannotThrow => break,
                }
            }
        }
    }

    stream
}
