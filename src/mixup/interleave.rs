// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Tiered interleaving: round-robin and seeded shuffle.
//!
//! Both strategies emit the window tier by tier, where tier `i` is every
//! group's `i`-th best hit. That is what gives rank-1 priority: no hit at
//! group position 1 or later can precede a group leader. They differ only in
//! the order inside a tier.
//!
//! - **Round-robin**: groups in order of their strongest hit.
//! - **Seeded shuffle**: hits in order of their shuffle key, ties by rank.

use tracing::trace;

use super::partition::Partition;
use crate::shuffle::ShuffleSource;
use crate::types::Hit;

/// Round-robin order as window indices.
pub fn round_robin(partition: &Partition<'_>) -> Vec<usize> {
    let mut order = Vec::with_capacity(partition.len());
    for (pass, tier) in partition.tiers().into_iter().enumerate() {
        trace!(pass, hits = tier.len(), "round-robin pass");
        order.extend(tier);
    }
    order
}

/// Seeded shuffle order as window indices.
pub fn seeded_shuffle(
    window: &[Hit],
    partition: &Partition<'_>,
    source: ShuffleSource,
) -> Vec<usize> {
    let mut order = Vec::with_capacity(partition.len());
    for (pass, tier) in partition.tiers().into_iter().enumerate() {
        let mut keyed: Vec<(u64, usize, usize)> = tier
            .into_iter()
            .map(|idx| {
                let hit = &window[idx];
                (source.key_for(hit), hit.original_rank, idx)
            })
            .collect();
        keyed.sort_unstable();
        trace!(pass, hits = keyed.len(), "shuffled tier");
        order.extend(keyed.into_iter().map(|(_, _, idx)| idx));
    }
    order
}
