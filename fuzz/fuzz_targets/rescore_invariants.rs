// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for the rescore invariants.
//!
//! Any window, any config: the call either fails with a typed error or
//! returns a sorted permutation of its input with the tail untouched.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use mixup::verify::{
    check_non_increasing, check_permutation, check_rank_one_priority, check_tail_untouched,
};
use mixup::{rescore, DeclineParams, Descent, GroupKey, Hit, RescoreConfig, Seed};

#[derive(Debug, Arbitrary)]
enum FuzzStrategy {
    RoundRobin,
    Shuffle(i64),
    ShuffleStr(String),
    Decline(f64, f64, f64, f64),
}

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    // (score bucket, group tag): small ranges so groups and ties collide
    rows: Vec<(u16, u8)>,
    strategy: FuzzStrategy,
    window_size: u16,
    group_cap: u8,
    floor: Option<u16>,
    non_strict: bool,
}

fn group(tag: u8) -> GroupKey {
    match tag % 8 {
        0 => GroupKey::Ungrouped,
        1..=4 => GroupKey::Int(i64::from(tag % 4)),
        _ => GroupKey::from(format!("g{}", tag % 3)),
    }
}

fuzz_target!(|input: FuzzInput| {
    let mut rows: Vec<(u16, u8)> = input.rows.into_iter().take(512).collect();
    rows.sort_by(|a, b| b.0.cmp(&a.0));
    let hits: Vec<Hit> = rows
        .iter()
        .enumerate()
        .map(|(rank, &(score, tag))| Hit::new(rank, f64::from(score) / 8.0, group(tag)))
        .collect();

    let mut config = match input.strategy {
        FuzzStrategy::RoundRobin => RescoreConfig::round_robin(),
        FuzzStrategy::Shuffle(seed) => RescoreConfig::seeded_shuffle(Seed::Int(seed)),
        FuzzStrategy::ShuffleStr(seed) => RescoreConfig::seeded_shuffle(Seed::Str(seed)),
        FuzzStrategy::Decline(m, a, b, c) => {
            RescoreConfig::position_decline(DeclineParams { m, a, b, c })
        }
    }
    .with_window_size(usize::from(input.window_size))
    .with_group_cap(usize::from(input.group_cap));
    if let Some(floor) = input.floor {
        config = config.with_score_floor(f64::from(floor) / 8.0);
    }
    if input.non_strict {
        config = config.with_descent(Descent::NonStrict);
    }

    // Invalid configs (zero window, bad decline params) are rejected, not panics
    let Ok(output) = rescore(&hits, &config) else {
        return;
    };

    let window_len = hits.len().min(config.window_size());
    check_permutation(&hits, &output).expect("not a permutation");
    check_non_increasing(&output).expect("scores increase");
    check_tail_untouched(&hits, &output, window_len).expect("tail modified");
    if config.strategy().is_tiered() {
        check_rank_one_priority(&output).expect("runner-up before leader");
    }

    // Same input, same output
    assert_eq!(rescore(&hits, &config).ok(), Some(output));
});
