// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Debug-mode contracts over a finished rescore.
//!
//! These run at the end of every [`rescore`](crate::rescore) call in debug
//! builds and compile to nothing in release. A panic here is a bug in the
//! reorderer or the score synthesizer, never bad input: bad input is rejected
//! with a [`RescoreError`](crate::RescoreError) before any of this runs.
//!
//! # INVARIANTS (DO NOT REMOVE THESE CHECKS)
//!
//! | Contract                          | Property                               |
//! |-----------------------------------|----------------------------------------|
//! | `check_output_is_permutation`     | same hits in, same hits out            |
//! | `check_scores_non_increasing`     | `score[i] >= score[i + 1]`             |
//! | `check_leaders_first`             | no runner-up ahead of a group leader   |
//! | `check_tail_passthrough`          | hits past the window are untouched     |

use super::types::{
    check_non_increasing, check_permutation, check_rank_one_priority, check_tail_untouched,
};
use crate::types::{Hit, RescoredHit};

// ============================================================================
// OUTPUT SHAPE
// ============================================================================

/// Output is a permutation of the input.
///
/// # Panics (debug builds only)
/// Panics if a hit was dropped, duplicated or invented.
#[inline]
pub fn check_output_is_permutation(input: &[Hit], output: &[RescoredHit]) {
    if cfg!(debug_assertions) {
        if let Err(e) = check_permutation(input, output) {
            panic!("Contract violation: {}", e);
        }
    }
}

/// Hits past the rescore window kept their position and score.
///
/// # Panics (debug builds only)
#[inline]
pub fn check_tail_passthrough(input: &[Hit], output: &[RescoredHit], window_len: usize) {
    if cfg!(debug_assertions) {
        if let Err(e) = check_tail_untouched(input, output, window_len) {
            panic!("Contract violation: {}", e);
        }
    }
}

// ============================================================================
// ORDERING
// ============================================================================

/// Scores never increase down the output.
///
/// # Panics (debug builds only)
#[inline]
pub fn check_scores_non_increasing(output: &[RescoredHit]) {
    if cfg!(debug_assertions) {
        if let Err(e) = check_non_increasing(output) {
            panic!("Contract violation: {}", e);
        }
    }
}

/// Every group leader precedes every runner-up.
///
/// Only holds for tiered strategies, so callers gate it.
///
/// # Panics (debug builds only)
#[inline]
pub fn check_leaders_first(output: &[RescoredHit]) {
    if cfg!(debug_assertions) {
        if let Err(e) = check_rank_one_priority(output) {
            panic!("Contract violation: {}", e);
        }
    }
}
