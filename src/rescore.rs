// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The rescore entry point.
//!
//! ```text
//! hits ──▶ validate ──▶ split at window_size ──┬──▶ reorder ──▶ synthesize ──┐
//!                                             └──▶ tail (untouched) ─────────┴──▶ output
//! ```
//!
//! A call is a pure function of `(hits, config)`: no state is kept between
//! calls, and the same input always yields the same output.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, trace};

use crate::config::{RescoreConfig, Validation, UNSORTED_TOLERANCE};
use crate::error::{RescoreError, Result};
use crate::mixup::reorder;
use crate::scoring::ScoreSynthesizer;
use crate::types::{Hit, RescoredHit};
use crate::verify::contracts;

/// Rescore one ranked list of hits.
///
/// The first `config.window_size()` hits are reordered so that no group
/// crowds out the others, and get fresh non-increasing scores. Hits past the
/// window are returned as they came in.
///
/// # Errors
///
/// - [`RescoreError::InvalidConfiguration`] if the config fails validation.
/// - [`RescoreError::NonFiniteScore`] if any hit's score is NaN or infinite.
/// - [`RescoreError::UnsortedInput`] under [`Validation::Strict`] when input
///   scores increase somewhere.
///
/// # Example
///
/// ```
/// use mixup::{rescore, Hit, RescoreConfig};
///
/// let hits = vec![
///     Hit::new(0, 10.0, "A"),
///     Hit::new(1, 9.0, "A"),
///     Hit::new(2, 8.0, "B"),
///     Hit::new(3, 7.0, "A"),
///     Hit::new(4, 6.0, "C"),
/// ];
/// let out = rescore(&hits, &RescoreConfig::round_robin()).unwrap();
/// let ranks: Vec<usize> = out.iter().map(|h| h.original_rank).collect();
/// assert_eq!(ranks, vec![0, 2, 4, 1, 3]);
/// ```
pub fn rescore(hits: &[Hit], config: &RescoreConfig) -> Result<Vec<RescoredHit>> {
    config.validate()?;
    let sorted = check_scores(hits, config.validation())?;

    if hits.is_empty() {
        return Ok(Vec::new());
    }

    let window_len = hits.len().min(config.window_size());
    let (window, tail) = hits.split_at(window_len);

    let reordered = reorder(window, config)?;
    // an unsorted tail gives no ordering to preserve
    let lower_bound = tail.first().filter(|_| sorted).map(|hit| hit.score);
    let scores = ScoreSynthesizer::new(config)
        .with_lower_bound(lower_bound)
        .synthesize(window, &reordered.order);

    let mut output = Vec::with_capacity(hits.len());
    for (slot, (&idx, &score)) in reordered.order.iter().zip(&scores).enumerate() {
        let hit = &window[idx];
        output.push(RescoredHit {
            original_rank: hit.original_rank,
            doc_id: hit.doc_id,
            group: hit.group.clone(),
            score,
            original_score: hit.score,
            group_position: Some(reordered.group_positions[idx]),
            deferred: slot >= reordered.deferred_from,
        });
    }
    output.extend(tail.iter().map(RescoredHit::passthrough));

    debug!(
        hits = hits.len(),
        window = window_len,
        passthrough = tail.len(),
        moved = !reordered.is_identity(),
        "rescored"
    );

    contracts::check_output_is_permutation(hits, &output);
    contracts::check_tail_passthrough(hits, &output, window_len);
    if sorted {
        contracts::check_scores_non_increasing(&output);
    }
    if config.strategy().is_tiered() {
        contracts::check_leaders_first(&output);
    }

    Ok(output)
}

/// Rescore many independent lists with one config, e.g. one per shard.
///
/// Each list succeeds or fails on its own. Runs in parallel with the
/// `parallel` feature.
pub fn rescore_batch<W>(windows: &[W], config: &RescoreConfig) -> Vec<Result<Vec<RescoredHit>>>
where
    W: AsRef<[Hit]> + Sync,
{
    #[cfg(feature = "parallel")]
    {
        windows
            .par_iter()
            .map(|window| rescore(window.as_ref(), config))
            .collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        windows
            .iter()
            .map(|window| rescore(window.as_ref(), config))
            .collect()
    }
}

/// Reject non-finite scores, and under strict validation, unsorted input.
///
/// Returns whether the input is exactly sorted. Increases within
/// [`UNSORTED_TOLERANCE`] pass strict validation but still count as unsorted.
fn check_scores(hits: &[Hit], validation: Validation) -> Result<bool> {
    let mut sorted = true;

    for (position, hit) in hits.iter().enumerate() {
        if !hit.score.is_finite() {
            return Err(RescoreError::NonFiniteScore {
                original_rank: hit.original_rank,
                score: hit.score,
            });
        }
        if position == 0 {
            continue;
        }

        let previous = hits[position - 1].score;
        if hit.score > previous {
            if validation == Validation::Strict && hit.score > previous + UNSORTED_TOLERANCE {
                return Err(RescoreError::UnsortedInput {
                    position,
                    previous,
                    current: hit.score,
                });
            }
            if sorted {
                trace!(position, previous, current = hit.score, "input not sorted by score");
            }
            sorted = false;
        }
    }

    Ok(sorted)
}
