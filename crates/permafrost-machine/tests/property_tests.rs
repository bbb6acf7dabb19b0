//! Property-based tests for the validator and runtime, covering the
//! "universal invariants" the specification names directly: every
//! validated machine's BFS from its entry node covers every node, every
//! run's result stream is a valid path through the declared graph, an
//! all-succeeding run emits only `Success`, and a failing run's stream
//! always contains the failure and never loses track of which machine a
//! result belongs to.

use std::collections::BTreeSet;
use std::sync::Arc;

use permafrost_core::NodeIdentity;
use permafrost_machine::{
    Dependencies, Logger, MachineSpec, NodeBody, NodeOutcome, NodeResult, NodeSpec, Transition,
    run, validate,
};
use proptest::prelude::*;
use serde_json::Value;

const MACHINE: &str = "LinearChain";

/// Builds a machine of `len` nodes wired into a straight line:
/// `n0 -> n1 -> ... -> n{len-1}` on the happy path, with every
/// non-terminal node's unhappy path (and `on_exception` target) pointing
/// straight at the last node, which is both the cleanup handler and the
/// terminal. Each node's capability outcome is driven by `fails[i]`.
fn linear_chain(len: usize) -> (MachineSpec<()>, Dependencies<()>, Vec<&'static str>) {
    // Leaked once per node name and reused for both the node body's
    // capability lookup and the dependency container's registration key,
    // rather than re-leaking on every capability call.
    let names: Vec<&'static str> = (0..len)
        .map(|i| -> &'static str { Box::leak(format!("n{i}").into_boxed_str()) })
        .collect();
    let last = names[len - 1];

    let mut machine = MachineSpec::new(MACHINE, "a straight-line chain of nodes", "[LinearChain]");
    for (i, &name) in names.iter().enumerate() {
        let is_last = i == len - 1;
        let next = if is_last { None } else { Some(names[i + 1]) };
        let body: NodeBody<()> = Arc::new(move |state, deps| {
            let payload = deps.call(name, state)?;
            let result = NodeResult::success(NodeIdentity::new(MACHINE, name), payload);
            let transition = match next {
                Some(target) => Transition::to(target, result),
                None => Transition::terminal(result),
            };
            Ok(NodeOutcome::new(transition))
        });

        let mut node = NodeSpec::new(name, format!("{name} step"), body);
        if i == 0 {
            node = node.entry();
        }
        if is_last {
            node = node.terminal();
        } else {
            node = node
                .happy_paths([names[i + 1]])
                .unhappy_paths([last])
                .may_throw(last);
        }
        machine = machine.with_node(node);
    }

    let mut deps = Dependencies::new(Logger::noop());
    for &name in &names {
        deps = deps.register(name, Arc::new(|_, _| Ok(Value::Null)));
    }
    (machine, deps, names)
}

fn fail_node(deps: &mut Dependencies<()>, name: &'static str) {
    deps.substitute(name, Arc::new(|_, _| Err("proptest induced failure".to_string())));
}

proptest! {
    #[test]
    fn validated_linear_chain_always_reaches_every_node(len in 2usize..9) {
        let (machine, _deps, _names) = linear_chain(len);
        let diagram = validate(&machine, &BTreeSet::new()).expect("a straight chain always validates");
        prop_assert_eq!(diagram.nodes.len(), len);
    }

    #[test]
    fn all_success_run_emits_only_successes_in_declared_order(len in 2usize..9) {
        let (machine, deps, _names) = linear_chain(len);
        validate(&machine, &BTreeSet::new()).unwrap();

        let stream = run(&machine, &mut (), &deps);

        prop_assert_eq!(stream.len(), len);
        prop_assert!(stream.iter().all(NodeResult::is_success));
        for (i, result) in stream.iter().enumerate() {
            prop_assert_eq!(result.node().node().as_str(), format!("n{i}"));
        }
    }

    #[test]
    fn a_failure_anywhere_is_followed_only_by_the_cleanup_terminal(
        len in 3usize..9,
        fail_at in 0usize..8,
    ) {
        let fail_at = fail_at % (len - 1);
        let (machine, mut deps, names) = linear_chain(len);
        validate(&machine, &BTreeSet::new()).unwrap();
        fail_node(&mut deps, names[fail_at]);

        let stream = run(&machine, &mut (), &deps);

        // Every result in the stream belongs to this machine, regardless
        // of where the failure interrupted the chain.
        for result in &stream {
            prop_assert_eq!(result.node().machine().as_str(), MACHINE);
        }

        prop_assert_eq!(stream.len(), fail_at + 2);
        for result in &stream[..fail_at] {
            prop_assert!(result.is_success());
        }
        prop_assert!(stream[fail_at].is_failure());
        prop_assert_eq!(stream[fail_at].node().node().as_str(), format!("n{fail_at}"));
        prop_assert!(stream[fail_at + 1].is_success());
        prop_assert_eq!(stream[fail_at + 1].node().node().as_str(), format!("n{}", len - 1));
    }
}
