//! Concrete rescore scenarios with known outputs.

use super::common::{
    assert_leaders_first, assert_rescore_invariants, assert_scores_close, example_window,
    make_window, ranks, scores,
};
use mixup::{rescore, DeclineParams, Descent, GroupKey, Hit, RescoreConfig, Seed};

// ============================================================================
// ROUND ROBIN
// ============================================================================

#[test]
fn test_round_robin_example_order_and_scores() {
    let hits = example_window();
    let output = rescore(&hits, &RescoreConfig::round_robin()).unwrap();

    assert_eq!(ranks(&output), vec![0, 2, 4, 1, 3]);
    assert_scores_close(&output, &[10.0, 8.0, 6.0, 5.99, 5.98]);
    assert_rescore_invariants(&hits, &output, hits.len());
    assert_leaders_first(&output);
}

#[test]
fn test_group_cap_one_leaves_example_unchanged() {
    let hits = example_window();
    let config = RescoreConfig::round_robin().with_group_cap(1);
    let output = rescore(&hits, &config).unwrap();

    assert_eq!(ranks(&output), vec![0, 2, 4, 1, 3]);
    // Group A's second and third members land after the leading slots
    assert_eq!(
        output.iter().map(|h| h.deferred).collect::<Vec<_>>(),
        vec![false, false, false, true, true]
    );
}

#[test]
fn test_groups_visit_in_representative_order() {
    // C's best hit outranks B's, so C leads the second slot
    let hits = make_window(&[(9.0, "A"), (8.0, "C"), (7.0, "A"), (6.0, "B"), (5.0, "C")]);
    let output = rescore(&hits, &RescoreConfig::round_robin()).unwrap();
    assert_eq!(ranks(&output), vec![0, 1, 3, 2, 4]);
}

#[test]
fn test_all_singletons_keep_input_order_and_scores() {
    let hits = make_window(&[(5.0, "a"), (4.0, "b"), (3.0, "c"), (2.0, "d")]);
    let output = rescore(&hits, &RescoreConfig::round_robin()).unwrap();
    assert_eq!(ranks(&output), vec![0, 1, 2, 3]);
    assert_eq!(scores(&output), vec![5.0, 4.0, 3.0, 2.0]);
}

#[test]
fn test_ungrouped_hits_never_merge() {
    let hits = vec![
        Hit::new(0, 5.0, "a"),
        Hit::new(1, 4.0, "a"),
        Hit::ungrouped(2, 3.0),
        Hit::ungrouped(3, 2.0),
    ];
    let output = rescore(&hits, &RescoreConfig::round_robin()).unwrap();
    // Each ungrouped hit is its own group, so both lead before a's runner-up
    assert_eq!(ranks(&output), vec![0, 2, 3, 1]);
    assert_eq!(output[1].group, GroupKey::Ungrouped);
}

#[test]
fn test_single_group_is_unchanged() {
    let hits = make_window(&[(3.0, "a"), (2.0, "a"), (1.0, "a")]);
    let output = rescore(&hits, &RescoreConfig::round_robin()).unwrap();
    assert_eq!(ranks(&output), vec![0, 1, 2]);
    assert_eq!(scores(&output), vec![3.0, 2.0, 1.0]);
}

#[test]
fn test_integer_and_string_keys_are_distinct() {
    let hits = vec![
        Hit::new(0, 4.0, 7i64),
        Hit::new(1, 3.0, 7i64),
        Hit::new(2, 2.0, "7"),
    ];
    let output = rescore(&hits, &RescoreConfig::round_robin()).unwrap();
    assert_eq!(ranks(&output), vec![0, 2, 1]);
}

// ============================================================================
// WINDOW AND TAIL
// ============================================================================

#[test]
fn test_hits_past_window_pass_through() {
    let hits = make_window(&[
        (10.0, "A"),
        (9.0, "A"),
        (8.0, "B"),
        (7.0, "A"),
        (6.0, "C"),
        (5.0, "A"),
        (4.0, "B"),
    ]);
    let config = RescoreConfig::round_robin().with_window_size(5);
    let output = rescore(&hits, &config).unwrap();

    assert_eq!(ranks(&output), vec![0, 2, 4, 1, 3, 5, 6]);
    assert_eq!(output[5].score, 5.0);
    assert_eq!(output[6].score, 4.0);
    assert!(output[5].group_position.is_none());
    assert_rescore_invariants(&hits, &output, 5);
}

#[test]
fn test_window_scores_stay_above_tail() {
    // Tight scores: epsilon steps would cross the tail's 9.98 without a bound
    let hits = make_window(&[
        (10.0, "A"),
        (10.0, "A"),
        (10.0, "A"),
        (10.0, "B"),
        (9.98, "C"),
    ]);
    let config = RescoreConfig::round_robin().with_window_size(4);
    let output = rescore(&hits, &config).unwrap();

    assert_eq!(ranks(&output), vec![0, 3, 1, 2, 4]);
    assert!(output[3].score >= 9.98);
    assert_rescore_invariants(&hits, &output, 4);
}

// ============================================================================
// SCORE SYNTHESIS
// ============================================================================

#[test]
fn test_non_strict_descent_allows_ties() {
    let hits = example_window();
    let config = RescoreConfig::round_robin().with_descent(Descent::NonStrict);
    let output = rescore(&hits, &config).unwrap();
    assert_eq!(scores(&output), vec![10.0, 8.0, 6.0, 6.0, 6.0]);
}

#[test]
fn test_custom_epsilon() {
    let hits = example_window();
    let config = RescoreConfig::round_robin().with_epsilon(0.5);
    let output = rescore(&hits, &config).unwrap();
    assert_scores_close(&output, &[10.0, 8.0, 6.0, 5.5, 5.0]);
}

#[test]
fn test_score_floor_lifts_top_score() {
    let hits = example_window();
    let config = RescoreConfig::round_robin().with_score_floor(2.0);
    let output = rescore(&hits, &config).unwrap();
    assert_eq!(output[0].score, 10.0);
    assert_eq!(output[0].original_score, 10.0);
}

#[test]
fn test_original_scores_are_reported() {
    let hits = example_window();
    let output = rescore(&hits, &RescoreConfig::round_robin()).unwrap();
    let originals: Vec<f64> = output.iter().map(|h| h.original_score).collect();
    assert_eq!(originals, vec![10.0, 8.0, 6.0, 9.0, 7.0]);
}

// ============================================================================
// SEEDED SHUFFLE
// ============================================================================

#[test]
fn test_seeded_shuffle_keeps_tiers() {
    let hits = example_window();
    for seed in 0..32 {
        let output = rescore(&hits, &RescoreConfig::seeded_shuffle(Seed::Int(seed))).unwrap();
        let mut leaders = ranks(&output)[..3].to_vec();
        leaders.sort_unstable();
        assert_eq!(leaders, vec![0, 2, 4], "seed {}", seed);
        assert_eq!(ranks(&output)[3..], [1, 3], "seed {}", seed);
        assert_rescore_invariants(&hits, &output, hits.len());
        assert_leaders_first(&output);
    }
}

#[test]
fn test_seeded_shuffle_varies_with_seed() {
    let hits = make_window(&[
        (9.0, "a"),
        (8.0, "b"),
        (7.0, "c"),
        (6.0, "d"),
        (5.0, "e"),
        (4.0, "f"),
    ]);
    let orders: std::collections::HashSet<Vec<usize>> = (0..16)
        .map(|seed| {
            let output =
                rescore(&hits, &RescoreConfig::seeded_shuffle(Seed::Int(seed))).unwrap();
            ranks(&output)
        })
        .collect();
    assert!(orders.len() > 1, "sixteen seeds produced one order");
}

#[test]
fn test_string_seed_is_deterministic() {
    let hits = example_window();
    let config = RescoreConfig::seeded_shuffle("user-42:shoes");
    let first = rescore(&hits, &config).unwrap();
    let second = rescore(&hits, &config).unwrap();
    assert_eq!(first, second);
}

// ============================================================================
// POSITION DECLINE
// ============================================================================

#[test]
fn test_position_decline_overtakes_only_when_declined() {
    // declined: A 10, 4.5, 2.33; B 8; C 6
    let hits = example_window();
    let config = RescoreConfig::position_decline(DeclineParams::default());
    let output = rescore(&hits, &config).unwrap();
    assert_eq!(ranks(&output), vec![0, 2, 4, 1, 3]);
    assert_rescore_invariants(&hits, &output, hits.len());
}

#[test]
fn test_position_decline_keeps_strong_runner_up() {
    // A's runner-up at 50 declines to 25 and still beats B's 10
    let hits = make_window(&[(100.0, "A"), (50.0, "A"), (10.0, "B")]);
    let config = RescoreConfig::position_decline(DeclineParams::default());
    let output = rescore(&hits, &config).unwrap();
    assert_eq!(ranks(&output), vec![0, 1, 2]);

    // Capped at one per group, B moves up
    let capped = rescore(&hits, &config.clone().with_group_cap(1)).unwrap();
    assert_eq!(ranks(&capped), vec![0, 2, 1]);
    assert!(capped[2].deferred);
}

#[test]
fn test_position_decline_constant_offset() {
    // factor = 1 / (pos + 1) + 1: runner-ups keep most of their score
    let params = DeclineParams {
        c: 1.0,
        ..DeclineParams::default()
    };
    let hits = make_window(&[(10.0, "A"), (9.0, "A"), (8.0, "B")]);
    let output = rescore(&hits, &RescoreConfig::position_decline(params)).unwrap();
    // declined: 20, 13.5, 16
    assert_eq!(ranks(&output), vec![0, 2, 1]);
}
