//! Invariants that hold for every window and config.

use super::common::{assert_leaders_first, assert_rescore_invariants, ranks};
use super::*;
use mixup::rescore;

proptest! {
    #[test]
    fn prop_output_is_sorted_permutation(
        hits in window_strategy(60),
        config in config_strategy(),
    ) {
        let output = rescore(&hits, &config).unwrap();
        let window_len = hits.len().min(config.window_size());
        assert_rescore_invariants(&hits, &output, window_len);
    }

    #[test]
    fn prop_ties_stay_sorted(
        hits in tied_window_strategy(40),
        config in config_strategy(),
    ) {
        let output = rescore(&hits, &config).unwrap();
        let window_len = hits.len().min(config.window_size());
        assert_rescore_invariants(&hits, &output, window_len);
    }

    #[test]
    fn prop_leaders_first_for_tiered_strategies(
        hits in window_strategy(60),
        config in tiered_config_strategy(),
        group_cap in 0usize..4,
    ) {
        let uncapped = rescore(&hits, &config).unwrap();
        let output = rescore(&hits, &config.with_group_cap(group_cap)).unwrap();
        assert_leaders_first(&output);
        // Tiers already emit every group's first members first, so the cap
        // marks hits as deferred without moving them
        prop_assert_eq!(ranks(&output), ranks(&uncapped));
    }

    #[test]
    fn prop_all_singletons_round_robin_is_identity(len in 0usize..50) {
        let hits: Vec<Hit> = (0..len)
            .map(|rank| Hit::ungrouped(rank, (len - rank) as f64))
            .collect();
        let output = rescore(&hits, &RescoreConfig::round_robin()).unwrap();
        prop_assert_eq!(ranks(&output), (0..len).collect::<Vec<_>>());
        for (hit, original) in output.iter().zip(&hits) {
            prop_assert_eq!(hit.score, original.score);
        }
    }

    #[test]
    fn prop_single_hit_unchanged(
        score in -1000.0f64..1000.0,
        group in group_strategy(),
        config in config_strategy(),
    ) {
        let hits = vec![Hit::new(0, score, group)];
        let output = rescore(&hits, &config).unwrap();
        prop_assert_eq!(output.len(), 1);
        prop_assert_eq!(output[0].original_rank, 0);
        prop_assert_eq!(output[0].score, score);
    }

    #[test]
    fn prop_group_cap_limits_leading_slots(
        hits in window_strategy(60),
        cap in 1usize..4,
        params in (0.5f64..3.0, 0.0f64..2.0, 0.5f64..2.0),
    ) {
        let (m, a, b) = params;
        let config = RescoreConfig::position_decline(DeclineParams { m, a, b, c: 0.0 })
            .with_group_cap(cap);
        let output = rescore(&hits, &config).unwrap();

        let mut placed = std::collections::HashMap::new();
        for hit in output.iter().filter(|h| !h.deferred) {
            if hit.group.is_ungrouped() {
                continue;
            }
            let count = placed.entry(hit.group.clone()).or_insert(0usize);
            *count += 1;
            prop_assert!(*count <= cap, "group {} has {} leading slots", hit.group, count);
        }
    }
}
