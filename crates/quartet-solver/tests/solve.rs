//! Integration tests for the solve loop.
//!
//! These tests run whole puzzles through `PuzzleSolver` with test oracles
//! and check the resulting partitions.

use std::collections::HashSet;
use std::io::Cursor;

use quartet_config::QuartetConfig;
use quartet_core::{Group, Item, Normalizer, QuartetError, Verdict};
use quartet_solver::{GroupMatcher, PuzzleSolver, SolveReport, SolveStatus, TerminalOracle};
use quartet_test::{
    fruit_and_vehicles, group, items, near_miss, ScriptedOracle, TruthOracle, FRUIT_AND_VEHICLES,
};

fn truth() -> [Group; 2] {
    [
        group(&["apple", "banana", "cat", "dog"]),
        group(&["car", "truck", "bike", "train"]),
    ]
}

fn assert_partition(report: &SolveReport, pool: &[Item]) {
    let mut seen = HashSet::new();
    for found in &report.groups {
        assert_eq!(found.group.len(), 4);
        for item in &found.group {
            assert!(seen.insert(item.clone()), "{item} placed twice");
        }
    }
    let expected: HashSet<Item> = pool.iter().cloned().collect();
    assert_eq!(seen, expected);
}

#[test]
fn test_solves_clear_puzzle_without_rejections() {
    let table = fruit_and_vehicles();
    let solver = PuzzleSolver::new(GroupMatcher::new(&table, 4));
    let mut oracle = TruthOracle::new(truth());
    let pool = items(&FRUIT_AND_VEHICLES);

    let report = solver.solve(pool.clone(), &mut oracle).unwrap();

    assert!(report.is_solved());
    assert_partition(&report, &pool);
    assert!(report.history.is_empty());
    assert!(report.remaining.is_empty());
    assert_eq!(report.statistics.round_count(), 2);
    assert_eq!(report.statistics.total_proposals(), 2);
    // the second round only sees the four leftover items
    assert_eq!(report.statistics.rounds[1].candidates_ranked, 1);
}

#[test]
fn test_solves_near_miss_through_one_away_feedback() {
    let table = near_miss();
    let solver = PuzzleSolver::new(GroupMatcher::new(&table, 4));
    let mut oracle = TruthOracle::new(truth());
    let pool = items(&FRUIT_AND_VEHICLES);

    let report = solver.solve(pool.clone(), &mut oracle).unwrap();

    assert_eq!(report.status, SolveStatus::Solved);
    assert_partition(&report, &pool);
    assert_eq!(report.groups[0].group, truth()[0]);
    assert_eq!(report.groups[1].group, truth()[1]);
    assert_eq!(report.history.len(), 4);
    assert_eq!(report.statistics.rounds[0].proposals, 5);
    assert_eq!(report.statistics.rounds[1].proposals, 1);

    let proposed = oracle.proposed_groups();
    let unique: HashSet<&Group> = proposed.iter().collect();
    assert_eq!(unique.len(), proposed.len());
}

#[test]
fn test_rejected_group_is_not_proposed_in_later_rounds() {
    let table = fruit_and_vehicles();
    let solver = PuzzleSolver::new(GroupMatcher::new(&table, 4));
    let mut oracle = ScriptedOracle::new([Verdict::Incorrect, Verdict::Correct, Verdict::Correct]);

    let report = solver.solve(items(&FRUIT_AND_VEHICLES), &mut oracle).unwrap();

    // the only group left in round two was rejected in round one
    assert_eq!(report.status, SolveStatus::Exhausted);
    assert_eq!(report.groups.len(), 1);
    assert_eq!(report.groups[0].group, truth()[1]);
    assert_eq!(Group::new(report.remaining.clone()), truth()[0]);
    assert_eq!(report.statistics.rounds[1].pruned_rejected, 1);
    assert_eq!(report.statistics.rounds[1].proposals, 0);
    assert_eq!(oracle.proposals().len(), 2);
    assert_eq!(oracle.remaining(), 1);
}

#[test]
fn test_silent_oracle_stops_the_run() {
    let table = fruit_and_vehicles();
    let solver = PuzzleSolver::new(GroupMatcher::new(&table, 4));
    let mut oracle = ScriptedOracle::new([Verdict::Correct]);

    let report = solver.solve(items(&FRUIT_AND_VEHICLES), &mut oracle).unwrap();

    assert_eq!(report.status, SolveStatus::Abandoned);
    assert_eq!(report.groups.len(), 1);
    assert_eq!(report.remaining.len(), 4);
}

#[test]
fn test_pairs_with_group_size_two() {
    let table = fruit_and_vehicles();
    let solver = PuzzleSolver::new(GroupMatcher::new(&table, 2));
    let mut oracle = TruthOracle::new([group(&["apple", "banana"]), group(&["car", "truck"])]);
    let pool = items(&["apple", "car", "banana", "truck"]);

    let report = solver.solve(pool, &mut oracle).unwrap();

    assert!(report.is_solved());
    assert_eq!(report.groups[0].group, group(&["apple", "banana"]));
    assert_eq!(report.groups[1].group, group(&["car", "truck"]));
}

#[test]
fn test_invalid_pools_fail_before_any_proposal() {
    let table = fruit_and_vehicles();
    let solver = PuzzleSolver::new(GroupMatcher::new(&table, 4));
    let mut oracle = ScriptedOracle::new([Verdict::Correct]);

    let short = items(&FRUIT_AND_VEHICLES[..7]);
    assert!(matches!(
        solver.solve(short, &mut oracle),
        Err(QuartetError::Validation { count: 7, group_size: 4 })
    ));

    assert!(matches!(
        solver.solve(Vec::new(), &mut oracle),
        Err(QuartetError::Validation { count: 0, .. })
    ));

    let repeated = items(&["apple", "banana", "dog", "apple"]);
    assert!(matches!(
        solver.solve(repeated, &mut oracle),
        Err(QuartetError::Duplicate { item }) if item == "apple"
    ));

    let unknown = items(&["apple", "banana", "dog", "zebra"]);
    assert!(matches!(
        solver.solve(unknown, &mut oracle),
        Err(QuartetError::Lookup { item }) if item == "zebra"
    ));

    assert!(oracle.proposals().is_empty());
}

#[test]
fn test_config_caps_proposals() {
    let table = near_miss();
    let config = QuartetConfig::new().with_max_proposals_per_round(3);
    let solver = PuzzleSolver::from_config(&table, &config);
    let mut oracle = TruthOracle::new(truth());

    let report = solver.solve(items(&FRUIT_AND_VEHICLES), &mut oracle).unwrap();

    assert_eq!(report.status, SolveStatus::Exhausted);
    assert!(report.groups.is_empty());
    assert_eq!(report.history.len(), 3);
}

#[test]
fn test_terminal_session_from_raw_input() {
    let table = fruit_and_vehicles();
    let raw = ["  Apple", "BANANA", "car", "", "Truck", "dog", "cat", "bike", "train "];
    let pool = Normalizer::new(&table, 4).normalize_lines(raw).unwrap();
    assert_eq!(pool, items(&FRUIT_AND_VEHICLES));

    let solver = PuzzleSolver::new(GroupMatcher::new(&table, 4));
    let mut out = Vec::new();
    let mut oracle = TerminalOracle::new(Cursor::new("what\ny\nY\n"), &mut out);

    let report = solver.solve(pool, &mut oracle).unwrap();
    assert!(report.is_solved());

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("[APPLE, BANANA, CAT, DOG] 0.7500"));
    assert!(text.contains("[BIKE, CAR, TRAIN, TRUCK] 0.5000"));
    assert_eq!(text.matches("(incorrect): ").count(), 3);
}
