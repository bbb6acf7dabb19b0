//! End-to-end scenarios for a backup-and-encrypt machine, built entirely
//! from the public API: node descriptors whose bodies call into a
//! [`Dependencies`] container, validated once, then run to completion.
//!
//! Concrete step implementations (actually mounting a filesystem, actually
//! running `pg_dump`) are out of scope for this engine; what's in scope,
//! and what this fixture exercises, is the graph wiring, the load-time
//! validator, and the runtime's transition/exception handling.

use std::collections::BTreeSet;
use std::sync::Arc;

use permafrost_core::{MachineName, NodeIdentity};
use permafrost_machine::{
    Capability, Dependencies, Logger, NodeBody, NodeOutcome, NodeResult, NodeSpec, MachineSpec,
    Transition, run, validate,
};
use serde_json::Value;

const MACHINE: &str = "BackupAndEncrypt";

/// One entry in the backup-and-encrypt chain: its name, its happy
/// successor (`None` for the terminal node), and where an exceptional
/// failure is routed (`None` for nodes that cannot throw).
const CHAIN: &[(&str, Option<&str>, Option<&str>)] = &[
    ("create_intermediate_directory", Some("create_pg_dump_directory"), Some("remove_intermediate_directory")),
    ("create_pg_dump_directory", Some("backup_schema"), Some("remove_pg_dump_directory")),
    ("backup_schema", Some("backup_data"), Some("remove_schema_file")),
    ("backup_data", Some("compress"), Some("remove_data_file")),
    ("compress", Some("encrypt"), Some("remove_tarball")),
    ("encrypt", Some("create_storage_directory"), Some("remove_tarball")),
    ("create_storage_directory", Some("move_backup"), Some("remove_tarball")),
    ("move_backup", Some("remove_encrypted_backup"), Some("remove_tarball")),
    ("remove_encrypted_backup", Some("remove_tarball"), None),
    ("remove_tarball", Some("remove_data_file"), None),
    ("remove_data_file", Some("remove_schema_file"), None),
    ("remove_schema_file", Some("remove_pg_dump_directory"), None),
    ("remove_pg_dump_directory", Some("remove_intermediate_directory"), None),
    ("remove_intermediate_directory", Some("report_results"), None),
    ("report_results", None, None),
];

fn capability_node(name: &'static str, next: Option<&'static str>) -> NodeBody<()> {
    Arc::new(move |state, deps| {
        let payload = deps.call(name, state)?;
        let result = NodeResult::success(NodeIdentity::new(MACHINE, name), payload);
        let transition = match next {
            Some(target) => Transition::to(target, result),
            None => Transition::terminal(result),
        };
        Ok(NodeOutcome::new(transition))
    })
}

fn backup_and_encrypt_machine() -> MachineSpec<()> {
    let mut machine = MachineSpec::new(
        MACHINE,
        "back up one database, compress and encrypt it, move it into cold storage, then clean up",
        "[BackupAndEncrypt]",
    );

    for &(name, next, on_exception) in CHAIN {
        let mut node = NodeSpec::new(name, format!("{name} step"), capability_node(name, next));
        if name == "create_intermediate_directory" {
            node = node.entry();
        }
        node = match next {
            Some(target) => node.happy_paths([target]),
            None => node.terminal(),
        };
        if let Some(target) = on_exception {
            node = node.may_throw(target);
        }
        machine = machine.with_node(node);
    }

    machine
}

/// A dependency container where every capability succeeds with a null
/// payload — the baseline for S1, overridden per scenario by substituting
/// one entry.
fn all_succeed_dependencies() -> Dependencies<()> {
    let mut deps = Dependencies::new(Logger::noop());
    for &(name, _, _) in CHAIN {
        deps = deps.register(name, Arc::new(|_, _| Ok(Value::Null)));
    }
    deps
}

fn failing_capability() -> Capability<()> {
    Arc::new(|_, _| Err("unit test failure".to_string()))
}

#[test]
fn s1_happy_path_runs_all_fifteen_nodes_in_order() {
    let machine = backup_and_encrypt_machine();
    validate(&machine, &BTreeSet::new()).expect("fixture machine must validate");

    let deps = all_succeed_dependencies();
    let stream = run(&machine, &mut (), &deps);

    let expected_order: Vec<&str> = CHAIN.iter().map(|&(name, _, _)| name).collect();
    assert_eq!(stream.len(), 15);
    assert!(stream.iter().all(NodeResult::is_success));
    for (result, expected_name) in stream.iter().zip(expected_order) {
        assert_eq!(result.node().node().as_str(), expected_name);
    }
}

#[test]
fn s2_early_failure_in_create_intermediate_directory() {
    let machine = backup_and_encrypt_machine();
    let mut deps = all_succeed_dependencies();
    deps.substitute("create_intermediate_directory", failing_capability());

    let stream = run(&machine, &mut (), &deps);

    assert_eq!(stream.len(), 3);
    match &stream[0] {
        NodeResult::Failure { message, .. } => {
            assert_eq!(
                message,
                "[BackupAndEncrypt] unrecognized exception: unit test failure"
            );
        }
        NodeResult::Success { .. } => panic!("expected a failure"),
    }
    assert_eq!(stream[1].node().node().as_str(), "remove_intermediate_directory");
    assert!(stream[1].is_success());
    assert_eq!(stream[2].node().node().as_str(), "report_results");
    assert!(stream[2].is_success());
}

#[test]
fn s3_mid_path_failure_in_compress_runs_the_cleanup_chain() {
    let machine = backup_and_encrypt_machine();
    let mut deps = all_succeed_dependencies();
    deps.substitute("compress", failing_capability());

    let stream = run(&machine, &mut (), &deps);

    assert_eq!(stream.len(), 11);
    assert!(stream[4].is_failure());
    assert_eq!(stream[4].node().node().as_str(), "compress");

    let expected_cleanup = [
        "remove_tarball",
        "remove_data_file",
        "remove_schema_file",
        "remove_pg_dump_directory",
        "remove_intermediate_directory",
        "report_results",
    ];
    for (result, expected_name) in stream[5..].iter().zip(expected_cleanup) {
        assert!(result.is_success());
        assert_eq!(result.node().node().as_str(), expected_name);
    }
}

/// State for the S4 fixture: the list of databases discovered for this
/// billing cycle, the one mutable scratch field this machine needs.
struct RetentionState {
    databases: Vec<String>,
}

fn retention_machine() -> MachineSpec<RetentionState> {
    fn step(name: &'static str, next: Option<&'static str>) -> NodeBody<RetentionState> {
        Arc::new(move |_state, _deps| {
            let result = NodeResult::success(NodeIdentity::new("MonthlyRetention", name), Value::Null);
            let transition = match next {
                Some(target) => Transition::to(target, result),
                None => Transition::terminal(result),
            };
            Ok(NodeOutcome::new(transition))
        })
    }

    let fetch_databases: NodeBody<RetentionState> = Arc::new(|state, _deps| {
        let identity = NodeIdentity::new("MonthlyRetention", "fetch_databases");
        if state.databases.is_empty() {
            let result = NodeResult::failure(identity, "[MonthlyRetention] no databases to backup");
            return Ok(NodeOutcome::new(Transition::to("end_of_month_retention", result)));
        }
        let result = NodeResult::success(identity, Value::Null);
        Ok(NodeOutcome::new(Transition::to("end_of_month_retention", result)))
    });

    MachineSpec::new(
        "MonthlyRetention",
        "discover databases for this cycle, then run end-of-month retention",
        "[MonthlyRetention]",
    )
    .with_node(
        NodeSpec::new("fetch_databases", "discovers this cycle's databases", fetch_databases)
            .entry()
            .happy_paths(["end_of_month_retention"])
            .unhappy_paths(["end_of_month_retention"]),
    )
    .with_node(
        NodeSpec::new(
            "end_of_month_retention",
            "runs end-of-month retention regardless of whether any database was found",
            step("end_of_month_retention", Some("archive_previous_month")),
        )
        .happy_paths(["archive_previous_month"]),
    )
    .with_node(
        NodeSpec::new(
            "archive_previous_month",
            "archives last month's retained backups",
            step("archive_previous_month", Some("purge_expired_backups")),
        )
        .happy_paths(["purge_expired_backups"]),
    )
    .with_node(
        NodeSpec::new(
            "purge_expired_backups",
            "purges backups past the retention window",
            step("purge_expired_backups", Some("notify_retention_complete")),
        )
        .happy_paths(["notify_retention_complete"]),
    )
    .with_node(
        NodeSpec::new(
            "notify_retention_complete",
            "notifies operators that retention finished",
            step("notify_retention_complete", Some("report_results")),
        )
        .happy_paths(["report_results"]),
    )
    .with_node(
        NodeSpec::new(
            "report_results",
            "emits the accumulated result stream",
            step("report_results", None),
        )
        .terminal(),
    )
}

#[test]
fn s4_empty_database_list_is_a_domain_failure_not_an_exception() {
    let machine = retention_machine();
    validate(&machine, &BTreeSet::new()).expect("fixture machine must validate");

    let mut state = RetentionState { databases: Vec::new() };
    let deps = Dependencies::new(Logger::noop());
    let stream = run(&machine, &mut state, &deps);

    assert_eq!(stream.len(), 6);
    match &stream[0] {
        NodeResult::Failure { message, cause, .. } => {
            assert_eq!(message, "[MonthlyRetention] no databases to backup");
            assert!(cause.is_none());
        }
        NodeResult::Success { .. } => panic!("expected a failure"),
    }
    assert!(stream[1..].iter().all(NodeResult::is_success));
}

fn defect_machine() -> MachineSpec<()> {
    let start: NodeBody<()> = Arc::new(|_, _| {
        let result = NodeResult::success(NodeIdentity::new("Defect", "start"), Value::Null);
        Ok(NodeOutcome::new(Transition::to("nowhere", result)))
    });
    let end: NodeBody<()> = Arc::new(|_, _| {
        let result = NodeResult::success(NodeIdentity::new("Defect", "end"), Value::Null);
        Ok(NodeOutcome::new(Transition::terminal(result)))
    });

    MachineSpec::new("Defect", "a machine with a deliberately mis-wired node", "[Defect]")
        .with_node(
            NodeSpec::new("start", "emits Success to an undeclared target", start)
                .entry()
                .happy_paths(["end"]),
        )
        .with_node(NodeSpec::new("end", "overview", end).terminal())
}

#[test]
fn s5_illegal_transition_aborts_the_machine() {
    let machine = defect_machine();
    let deps = Dependencies::new(Logger::noop());
    let stream = run(&machine, &mut (), &deps);

    assert_eq!(stream.len(), 2);
    pretty_assertions::assert_eq!(
        stream[0],
        NodeResult::success(NodeIdentity::new("Defect", "start"), Value::Null),
    );
    pretty_assertions::assert_eq!(
        stream[1],
        NodeResult::failure_with_cause(
            NodeIdentity::new("Defect", "start"),
            "[Defect] illegal transition: node 'start' targeted 'nowhere'",
            "IllegalTransitionError",
        ),
    );
}

fn sub_machine() -> MachineSpec<()> {
    let step_one: NodeBody<()> = Arc::new(|_, _| {
        let result = NodeResult::success(NodeIdentity::new("Sub", "step_one"), Value::Null);
        Ok(NodeOutcome::new(Transition::to("step_two", result)))
    });
    let step_two: NodeBody<()> = Arc::new(|_, _| {
        let result = NodeResult::success(NodeIdentity::new("Sub", "step_two"), Value::Null);
        Ok(NodeOutcome::new(Transition::to("step_three", result)))
    });
    let step_three: NodeBody<()> = Arc::new(|_, _| {
        let result = NodeResult::failure(NodeIdentity::new("Sub", "step_three"), "sub-step failed");
        Ok(NodeOutcome::new(Transition::terminal(result)))
    });

    MachineSpec::new("Sub", "a three-step sub-machine", "[Sub]")
        .with_node(NodeSpec::new("step_one", "overview", step_one).entry().happy_paths(["step_two"]))
        .with_node(NodeSpec::new("step_two", "overview", step_two).happy_paths(["step_three"]))
        .with_node(NodeSpec::new("step_three", "overview", step_three).terminal())
}

fn outer_machine() -> MachineSpec<()> {
    let invoke_sub: NodeBody<()> = Arc::new(|state, _deps| {
        let sub_spec = sub_machine();
        let sub_deps: Dependencies<()> = Dependencies::new(Logger::noop());
        let sub_results = run(&sub_spec, state, &sub_deps);
        let result = NodeResult::success(NodeIdentity::new("Outer", "invoke_sub"), Value::Null);
        Ok(NodeOutcome::nested(sub_results, Transition::to("after_invoke", result)))
    });
    let after_invoke: NodeBody<()> = Arc::new(|_, _| {
        let result = NodeResult::success(NodeIdentity::new("Outer", "after_invoke"), Value::Null);
        Ok(NodeOutcome::new(Transition::terminal(result)))
    });

    MachineSpec::new("Outer", "invokes a nested machine and splices its stream", "[Outer]")
        .with_node(
            NodeSpec::new("invoke_sub", "runs the Sub machine to completion", invoke_sub)
                .entry()
                .happy_paths(["after_invoke"])
                .invokes_machine("Sub"),
        )
        .with_node(NodeSpec::new("after_invoke", "overview", after_invoke).terminal())
}

#[test]
fn s6_nested_machine_partial_failure_splices_into_the_outer_stream() {
    let mut known = BTreeSet::new();
    known.insert(MachineName::from("Sub"));
    validate(&sub_machine(), &BTreeSet::new()).expect("sub-machine must validate");
    validate(&outer_machine(), &known).expect("outer machine must validate");

    let deps = Dependencies::new(Logger::noop());
    let stream = run(&outer_machine(), &mut (), &deps);

    assert_eq!(stream.len(), 4);
    assert!(stream[0].is_success());
    assert_eq!(stream[0].node().node().as_str(), "step_one");
    assert!(stream[1].is_success());
    assert_eq!(stream[1].node().node().as_str(), "step_two");
    assert!(stream[2].is_failure());
    assert_eq!(stream[2].node().node().as_str(), "step_three");
    assert!(stream[3].is_success());
    assert_eq!(stream[3].node().node().as_str(), "invoke_sub");
}
