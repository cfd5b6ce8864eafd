use super::*;
use quartet_core::{QuartetError, Verdict};
use quartet_test::{
    fruit_and_vehicles, group, items, near_miss, ScriptedOracle, TruthOracle, FRUIT_AND_VEHICLES,
};

fn pool() -> Vec<Item> {
    items(&FRUIT_AND_VEHICLES)
}

#[test]
fn test_correct_on_first_proposal() {
    let table = fruit_and_vehicles();
    let matcher = GroupMatcher::new(&table, 4);
    let mut oracle = ScriptedOracle::new([Verdict::Correct]);

    let report = matcher
        .match_group(0, &pool(), &History::new(), &mut oracle)
        .unwrap();

    assert_eq!(
        report.outcome.group(),
        Some(&group(&["apple", "banana", "dog", "cat"]))
    );
    assert!(report.outcome.rejected().is_empty());
    assert_eq!(report.statistics.proposals, 1);
    assert_eq!(report.statistics.candidates_ranked, 70);
}

#[test]
fn test_one_away_keeps_three_shared() {
    let table = near_miss();
    let matcher = GroupMatcher::new(&table, 4);
    let mut oracle = ScriptedOracle::new([Verdict::OneAway, Verdict::Correct]);

    let report = matcher
        .match_group(0, &pool(), &History::new(), &mut oracle)
        .unwrap();

    let proposed = oracle.proposed_groups();
    assert_eq!(proposed[0], group(&["apple", "banana", "car", "dog"]));
    assert_eq!(proposed[1], group(&["apple", "banana", "car", "cat"]));
    assert!(proposed[1].overlap(&proposed[0]) >= 3);
    assert_eq!(report.outcome.rejected(), &proposed[..1]);
}

#[test]
fn test_truthful_one_away_chain_reaches_true_group() {
    let table = near_miss();
    let matcher = GroupMatcher::new(&table, 4);
    let truth = group(&["apple", "banana", "cat", "dog"]);
    let mut oracle = TruthOracle::new([truth.clone(), group(&["car", "truck", "bike", "train"])]);

    let report = matcher
        .match_group(0, &pool(), &History::new(), &mut oracle)
        .unwrap();

    assert_eq!(report.outcome.group(), Some(&truth));
    assert_eq!(report.statistics.proposals, 5);
    assert_eq!(report.outcome.rejected().len(), 4);

    // every proposal after a one-away verdict shares three members with it
    let proposed = oracle.proposed_groups();
    for (i, later) in proposed.iter().enumerate() {
        for earlier in &proposed[..i] {
            assert!(later.overlap(earlier) >= 3, "{later} vs {earlier}");
        }
    }
}

#[test]
fn test_far_away_prunes_three_shared_only() {
    let table = near_miss();
    let matcher = GroupMatcher::new(&table, 4);
    let script = std::iter::once(Verdict::FarAway).chain(std::iter::repeat(Verdict::Incorrect).take(80));
    let mut oracle = ScriptedOracle::new(script);

    let report = matcher
        .match_group(0, &pool(), &History::new(), &mut oracle)
        .unwrap();

    let proposed = oracle.proposed_groups();
    let far = &proposed[0];
    assert!(proposed[1..].iter().all(|g| g.overlap(far) < 3));
    assert!(proposed[1..].iter().any(|g| g.overlap(far) == 2));

    // 4 choose 3 kept members times 4 outsiders
    assert_eq!(report.statistics.pruned_far_away, 16);
    assert_eq!(report.statistics.proposals, 70 - 16);
    assert!(matches!(report.outcome, RoundOutcome::Exhausted { .. }));
}

#[test]
fn test_far_away_moves_to_next_cluster() {
    let table = near_miss();
    let matcher = GroupMatcher::new(&table, 4);
    let mut oracle = ScriptedOracle::new([Verdict::FarAway, Verdict::Correct]);

    let report = matcher
        .match_group(0, &pool(), &History::new(), &mut oracle)
        .unwrap();

    assert_eq!(
        report.outcome.group(),
        Some(&group(&["car", "truck", "bike", "train"]))
    );
}

#[test]
fn test_history_is_never_proposed() {
    let table = fruit_and_vehicles();
    let matcher = GroupMatcher::new(&table, 4);
    let history: History = [group(&["apple", "banana", "dog", "cat"])].into_iter().collect();
    let mut oracle = ScriptedOracle::new([Verdict::Correct]);

    let report = matcher.match_group(1, &pool(), &history, &mut oracle).unwrap();

    assert_eq!(
        report.outcome.group(),
        Some(&group(&["car", "truck", "bike", "train"]))
    );
    assert_eq!(report.statistics.pruned_rejected, 1);
    assert_eq!(oracle.proposals()[0].round, 1);
}

#[test]
fn test_proposal_scores_never_increase() {
    let table = near_miss();
    let matcher = GroupMatcher::new(&table, 4).with_parallel_scoring(false);
    let mut oracle = ScriptedOracle::new(std::iter::repeat(Verdict::Incorrect).take(70));

    let report = matcher
        .match_group(0, &pool(), &History::new(), &mut oracle)
        .unwrap();

    let scores: Vec<_> = oracle.proposals().iter().map(|p| p.score).collect();
    assert_eq!(scores.len(), 70);
    assert!(scores.windows(2).all(|w| w[0] >= w[1]));
    assert_eq!(report.outcome.rejected().len(), 70);
}

#[test]
fn test_exhausted_round_has_empty_group() {
    let table = fruit_and_vehicles();
    let matcher = GroupMatcher::new(&table, 4);
    let small = items(&["apple", "banana", "dog", "cat"]);
    let mut oracle = ScriptedOracle::new([Verdict::Incorrect, Verdict::Correct]);

    let report = matcher
        .match_group(0, &small, &History::new(), &mut oracle)
        .unwrap();

    let (found, rejected) = report.outcome.into_parts();
    assert!(found.is_empty());
    assert_eq!(rejected, vec![group(&["apple", "banana", "dog", "cat"])]);
    assert_eq!(oracle.remaining(), 1);
}

#[test]
fn test_silent_oracle_abandons_round() {
    let table = fruit_and_vehicles();
    let matcher = GroupMatcher::new(&table, 4);
    let mut oracle = ScriptedOracle::new([Verdict::Incorrect]);

    let report = matcher
        .match_group(0, &pool(), &History::new(), &mut oracle)
        .unwrap();

    match report.outcome {
        RoundOutcome::Abandoned { rejected } => assert_eq!(rejected.len(), 1),
        other => panic!("expected abandoned round, got {other:?}"),
    }
    assert_eq!(oracle.proposals().len(), 2);
}

#[test]
fn test_proposal_limit_exhausts_round() {
    let table = fruit_and_vehicles();
    let matcher = GroupMatcher::new(&table, 4).with_proposal_limit(Some(2));
    let mut oracle = ScriptedOracle::new([Verdict::Incorrect, Verdict::Incorrect, Verdict::Correct]);

    let report = matcher
        .match_group(0, &pool(), &History::new(), &mut oracle)
        .unwrap();

    assert!(matches!(report.outcome, RoundOutcome::Exhausted { .. }));
    assert_eq!(report.statistics.proposals, 2);
    assert_eq!(oracle.remaining(), 1);
}

#[test]
fn test_from_config_reads_matching_settings() {
    let table = fruit_and_vehicles();
    let config = QuartetConfig::new()
        .with_group_size(4)
        .with_max_proposals_per_round(1);
    let matcher = GroupMatcher::from_config(&table, &config);
    let mut oracle = ScriptedOracle::new([Verdict::Incorrect, Verdict::Correct]);

    let report = matcher
        .match_group(0, &pool(), &History::new(), &mut oracle)
        .unwrap();

    assert_eq!(report.statistics.proposals, 1);
    assert!(!report.outcome.is_confirmed());
}

#[test]
fn test_unknown_item_fails_before_proposing() {
    let table = fruit_and_vehicles();
    let matcher = GroupMatcher::new(&table, 4);
    let pool = items(&["apple", "banana", "dog", "zebra"]);
    let mut oracle = ScriptedOracle::new([Verdict::Correct]);

    let err = matcher
        .match_group(0, &pool, &History::new(), &mut oracle)
        .unwrap_err();

    assert!(matches!(err, QuartetError::Lookup { item } if item == "zebra"));
    assert!(oracle.proposals().is_empty());
}
