// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fallible invariant checks over a rescore call's input and output.
//!
//! These are the properties every rescore must satisfy, written as functions
//! that say *where* they fail. Tests, the fuzz target and the debug contracts
//! all go through here, so there is exactly one definition of each invariant.

use std::collections::HashMap;
use thiserror::Error;

use crate::types::{Hit, RescoredHit};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvariantError {
    #[error("output has {output} hits, input had {input}")]
    LengthChanged { input: usize, output: usize },

    #[error("original_rank {rank} appears {output} times in output, {input} times in input")]
    NotAPermutation {
        rank: usize,
        input: usize,
        output: usize,
    },

    #[error("score increases at position {position}: {previous} then {current}")]
    ScoreIncreases {
        position: usize,
        previous: f64,
        current: f64,
    },

    #[error(
        "hit at group position {group_position} (rank {rank}) at output position {position} \
         precedes a group leader at output position {leader_position}"
    )]
    LeaderAfterRunnerUp {
        position: usize,
        rank: usize,
        group_position: usize,
        leader_position: usize,
    },

    #[error("hit past the rescore window changed at position {position}")]
    TailModified { position: usize },
}

/// Output holds exactly the input's original ranks, with multiplicity.
pub fn check_permutation(input: &[Hit], output: &[RescoredHit]) -> Result<(), InvariantError> {
    if input.len() != output.len() {
        return Err(InvariantError::LengthChanged {
            input: input.len(),
            output: output.len(),
        });
    }

    let mut counts: HashMap<usize, (usize, usize)> = HashMap::with_capacity(input.len());
    for hit in input {
        counts.entry(hit.original_rank).or_default().0 += 1;
    }
    for hit in output {
        counts.entry(hit.original_rank).or_default().1 += 1;
    }

    let mut mismatched: Vec<(usize, (usize, usize))> = counts
        .into_iter()
        .filter(|(_, (seen_in, seen_out))| seen_in != seen_out)
        .collect();
    mismatched.sort_unstable_by_key(|(rank, _)| *rank);

    match mismatched.first() {
        Some(&(rank, (input, output))) => Err(InvariantError::NotAPermutation {
            rank,
            input,
            output,
        }),
        None => Ok(()),
    }
}

/// `score[i] >= score[i + 1]` for every adjacent pair.
pub fn check_non_increasing(output: &[RescoredHit]) -> Result<(), InvariantError> {
    for (i, pair) in output.windows(2).enumerate() {
        if pair[1].score > pair[0].score {
            return Err(InvariantError::ScoreIncreases {
                position: i + 1,
                previous: pair[0].score,
                current: pair[1].score,
            });
        }
    }
    Ok(())
}

/// No rescored hit at group position >= 1 precedes any group leader.
///
/// Only meaningful for tiered strategies (round-robin, seeded shuffle).
/// Hits past the rescore window are ignored.
pub fn check_rank_one_priority(output: &[RescoredHit]) -> Result<(), InvariantError> {
    let last_leader = output
        .iter()
        .rposition(|hit| hit.group_position == Some(0));

    let Some(leader_position) = last_leader else {
        return Ok(());
    };

    for (position, hit) in output[..leader_position].iter().enumerate() {
        if let Some(group_position) = hit.group_position {
            if group_position >= 1 {
                return Err(InvariantError::LeaderAfterRunnerUp {
                    position,
                    rank: hit.original_rank,
                    group_position,
                    leader_position,
                });
            }
        }
    }
    Ok(())
}

/// Hits past the first `window_len` keep their position and score.
pub fn check_tail_untouched(
    input: &[Hit],
    output: &[RescoredHit],
    window_len: usize,
) -> Result<(), InvariantError> {
    for (position, (before, after)) in input
        .iter()
        .zip(output)
        .enumerate()
        .skip(window_len)
    {
        if before.original_rank != after.original_rank
            || before.score.to_bits() != after.score.to_bits()
            || after.was_rescored()
        {
            return Err(InvariantError::TailModified { position });
        }
    }
    Ok(())
}
