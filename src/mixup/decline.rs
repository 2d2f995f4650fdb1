// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Position decline: demote hits by how deep they sit in their group.
//!
//! Each hit's score is multiplied by `m / (a * pos + b) + c`, with `pos` its
//! 0-based position in its group, and the window is re-sorted by the result.
//! Unlike the tiered strategies this lets a strong second-place hit beat a weak
//! group leader, so rank-1 priority is not guaranteed.
//!
//! The declined scores only decide the order. Output scores still come from
//! [`ScoreSynthesizer`](crate::scoring::ScoreSynthesizer), same as every
//! other strategy.

use super::partition::Partition;
use crate::config::DeclineParams;
use crate::error::Result;
use crate::types::Hit;

/// Declined score of every window index.
pub fn declined_scores(
    window: &[Hit],
    partition: &Partition<'_>,
    params: &DeclineParams,
) -> Vec<f64> {
    window
        .iter()
        .enumerate()
        .map(|(idx, hit)| hit.score * params.factor(partition.position_of(idx)))
        .collect()
}

/// Position decline order as window indices.
///
/// Fails if the factor is zero, negative or non-finite at any position that
/// occurs in this window.
pub fn position_decline(
    window: &[Hit],
    partition: &Partition<'_>,
    params: &DeclineParams,
) -> Result<Vec<usize>> {
    params.check_positions(partition.largest_group())?;

    let declined = declined_scores(window, partition, params);
    let mut order: Vec<usize> = (0..window.len()).collect();
    order.sort_by(|&a, &b| {
        declined[b]
            .total_cmp(&declined[a])
            .then_with(|| window[a].original_rank.cmp(&window[b].original_rank))
    });
    Ok(order)
}
