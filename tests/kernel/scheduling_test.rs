/*!
 * Scheduling Tests
 * Heat ordering, budget cut-off, aging and failure isolation across ticks
 */

use super::common::{spawn_all, Harness, RUN_COST};
use pretty_assertions::assert_eq;
use serde_json::json;
use tick_kernel::core::types::ROOT_PID;
use tick_kernel::store::SerializedProcess;
use tick_kernel::boot;

fn seed(harness: &mut Harness, specs: &[(&str, u32)]) -> Vec<u32> {
    let mut kernel = harness.kernel();
    kernel.load_process_table();
    let pids = spawn_all(&mut kernel, specs);
    kernel.save_process_table();
    pids
}

#[test]
fn test_runs_in_descending_heat_with_pid_tie_break() {
    let mut harness = Harness::new();
    seed(
        &mut harness,
        &[("root", 0), ("idle", 0), ("worker", 0), ("idle", 0), ("worker", 0)],
    );

    let report = harness.tick(f64::INFINITY);
    assert_eq!(report.ran, vec![0, 2, 4, 1, 3]);
    assert_eq!(harness.take_log(), vec![0, 2, 4, 1, 3]);
    assert!(report.skipped.is_empty());
}

#[test]
fn test_budget_polled_before_each_slot() {
    let mut harness = Harness::new();
    seed(
        &mut harness,
        &[
            ("root", 0),
            ("worker", 0),
            ("worker", 0),
            ("worker", 0),
            ("worker", 0),
            ("worker", 0),
        ],
    );

    // Samples 0, 3, 6, 9 are under 10; 12 stops the pass
    let report = harness.tick(10.0);
    assert_eq!(report.ran.len(), 4);
    assert_eq!(report.skipped, vec![4, 5]);
    assert_eq!(report.usage, (4 * RUN_COST) as f64);
    assert!(report.budget_exhausted());

    // Nothing runs once the budget is already spent
    let report = harness.tick(0.0);
    assert!(report.ran.is_empty());
    assert_eq!(report.skipped.len(), 6);
}

#[test]
fn test_starved_process_ages_until_it_runs() {
    let mut harness = Harness::new();
    // Root would always win; start from a table without one
    harness.mem.proc = Some(vec![
        SerializedProcess {
            id: ROOT_PID,
            parent_id: ROOT_PID,
            type_tag: "worker".into(),
            heat: 10,
        },
        SerializedProcess {
            id: 1,
            parent_id: ROOT_PID,
            type_tag: "idle".into(),
            heat: 1,
        },
    ]);

    // One slot per tick: the first sample is 0, the second is RUN_COST
    let budget = RUN_COST as f64;
    let mut first_run = None;
    for tick in 0..20 {
        let report = harness.tick(budget);
        assert_eq!(report.ran.len(), 1);
        if report.ran == vec![1] {
            first_run = Some(tick);
            break;
        }
        assert_eq!(harness.persisted_heat(1), Some(2 + tick));
    }

    // Heat 11 outranks the worker's 10 on the eleventh tick
    assert_eq!(first_run, Some(10));
    assert_eq!(harness.persisted_heat(1), Some(1));
    assert_eq!(harness.persisted_heat(ROOT_PID), Some(20));
}

#[test]
fn test_equal_heat_loser_runs_first_next_tick() {
    let mut harness = Harness::new();
    harness.mem.proc = Some(vec![
        SerializedProcess {
            id: ROOT_PID,
            parent_id: ROOT_PID,
            type_tag: "worker".into(),
            heat: 10,
        },
        SerializedProcess {
            id: 1,
            parent_id: ROOT_PID,
            type_tag: "worker".into(),
            heat: 10,
        },
    ]);
    let budget = RUN_COST as f64;

    let report = harness.tick(budget);
    assert_eq!(report.ran, vec![ROOT_PID]);
    assert_eq!(report.skipped, vec![1]);
    assert!(harness.persisted_heat(1) > harness.persisted_heat(ROOT_PID));

    let report = harness.tick(budget);
    assert_eq!(report.ran, vec![1]);
}

#[test]
fn test_middle_failure_does_not_stop_the_pass() {
    let mut harness = Harness::new();
    let pids = seed(&mut harness, &[("root", 0), ("faulty", 0), ("idle", 0)]);

    let report = harness.tick(f64::INFINITY);
    assert_eq!(report.ran, pids);
    assert_eq!(report.terminated, vec![pids[1]]);
    assert_eq!(harness.persisted_pids(), vec![pids[0], pids[2]]);
}

#[test]
fn test_failure_is_isolated_to_subtree() {
    let mut harness = Harness::new();
    let pids = seed(
        &mut harness,
        &[("root", 0), ("faulty", 0), ("idle", 1), ("worker", 0)],
    );
    let (faulty, child, sibling) = (pids[1], pids[2], pids[3]);
    harness.mem.pmem.insert(faulty, json!({ "doomed": true }));
    harness.mem.pmem.insert(child, json!({ "doomed": true }));

    let report = harness.tick(f64::INFINITY);
    assert_eq!(report.terminated, vec![faulty]);
    assert!(report.ran.contains(&sibling));
    assert!(!report.ran.contains(&child));

    assert_eq!(harness.persisted_pids(), vec![ROOT_PID, sibling]);
    assert!(!harness.mem.pmem.contains_key(&faulty));
    assert!(!harness.mem.pmem.contains_key(&child));

    // The survivors keep running on later ticks
    harness.take_log();
    harness.tick(f64::INFINITY);
    assert_eq!(harness.take_log(), vec![ROOT_PID, sibling]);
}

#[test]
fn test_panic_is_contained() {
    let mut harness = Harness::new();
    let pids = seed(
        &mut harness,
        &[("root", 0), ("panicky", 0), ("idle", 1), ("worker", 0)],
    );

    let report = harness.tick(f64::INFINITY);
    assert_eq!(report.terminated, vec![pids[1]]);
    assert_eq!(harness.persisted_pids(), vec![ROOT_PID, pids[3]]);
}

#[test]
fn test_orphan_exits_without_running() {
    let mut harness = Harness::new();
    // Parent 7 was lost with the rest of its record
    harness.mem.proc = Some(vec![
        SerializedProcess {
            id: ROOT_PID,
            parent_id: ROOT_PID,
            type_tag: "root".into(),
            heat: 1000,
        },
        SerializedProcess {
            id: 8,
            parent_id: 7,
            type_tag: "worker".into(),
            heat: 10,
        },
    ]);
    harness.mem.pmem.insert(8, json!({ "runs": 4 }));

    let report = harness.tick(f64::INFINITY);
    assert_eq!(report.ran, vec![ROOT_PID]);
    assert_eq!(report.exited, vec![8]);
    assert_eq!(harness.take_log(), vec![ROOT_PID]);

    assert_eq!(harness.persisted_pids(), vec![ROOT_PID]);
    assert!(!harness.mem.pmem.contains_key(&8));
}

#[test]
fn test_children_of_exited_parent_become_orphans() {
    let mut harness = Harness::new();
    let pids = seed(&mut harness, &[("root", 0), ("exiter", 0), ("idle", 1)]);
    let (exiter, child) = (pids[1], pids[2]);

    let report = harness.tick(f64::INFINITY);
    assert_eq!(report.ran, vec![ROOT_PID, exiter]);
    assert_eq!(report.exited, vec![exiter, child]);
    assert_eq!(harness.persisted_pids(), vec![ROOT_PID]);
}

#[test]
fn test_spawned_child_waits_for_next_tick() {
    let mut harness = Harness::new();
    seed(&mut harness, &[("root", 0), ("spawner", 0)]);

    let report = harness.tick(f64::INFINITY);
    assert_eq!(report.ran, vec![ROOT_PID, 1]);
    assert_eq!(harness.persisted_pids(), vec![ROOT_PID, 1, 2]);
    assert_eq!(harness.mem.pmem[&1], json!({ "child": 2 }));

    let report = harness.tick(f64::INFINITY);
    assert_eq!(report.ran, vec![ROOT_PID, 1, 2]);
    assert_eq!(harness.persisted_pids(), vec![ROOT_PID, 1, 2]);
}

#[test]
fn test_memory_persists_between_ticks() {
    let mut harness = Harness::new();
    let pids = seed(&mut harness, &[("root", 0), ("worker", 0)]);

    for _ in 0..3 {
        harness.tick(f64::INFINITY);
    }
    assert_eq!(harness.mem.pmem[&pids[1]], json!({ "runs": 3 }));
}

#[test]
fn test_failed_root_keeps_children_whatever_the_budget() {
    for (slots, ran, skipped) in [
        (1, vec![ROOT_PID], vec![1, 2]),
        (2, vec![ROOT_PID, 1], vec![2]),
        (3, vec![ROOT_PID, 1, 2], vec![]),
    ] {
        let mut harness = Harness::new();
        harness.mem.kpar.next_pid = 3;
        harness.mem.proc = Some(vec![
            SerializedProcess {
                id: ROOT_PID,
                parent_id: ROOT_PID,
                type_tag: "faulty".into(),
                heat: 100,
            },
            SerializedProcess {
                id: 1,
                parent_id: ROOT_PID,
                type_tag: "worker".into(),
                heat: 10,
            },
            SerializedProcess {
                id: 2,
                parent_id: ROOT_PID,
                type_tag: "worker".into(),
                heat: 10,
            },
        ]);
        harness.mem.pmem.insert(1, json!({ "runs": 0 }));

        let report = harness.tick((slots * RUN_COST) as f64);
        assert_eq!(report.ran, ran);
        assert_eq!(report.skipped, skipped);
        assert_eq!(report.terminated, vec![ROOT_PID]);
        assert!(report.exited.is_empty());
        assert_eq!(harness.persisted_pids(), vec![1, 2]);
        assert!(harness.mem.pmem.contains_key(&1));

        // A fresh root adopts the survivors on the next invocation
        {
            let mut kernel = harness.kernel();
            kernel.load_process_table();
            assert_eq!(boot(&mut kernel, "root").unwrap(), Some(ROOT_PID));
        }
        let report = harness.tick(f64::INFINITY);
        let mut ran = report.ran.clone();
        ran.sort_unstable();
        assert_eq!(ran, vec![ROOT_PID, 1, 2]);
        assert!(report.terminated.is_empty());
    }
}
