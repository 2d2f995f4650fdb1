//! Shared test utilities and fixtures.

#![allow(dead_code)]

use mixup::verify::{
    check_non_increasing, check_permutation, check_rank_one_priority, check_tail_untouched,
};
use mixup::{Hit, RescoredHit};

// Re-export canonical test utilities from mixup::testing
#[allow(unused_imports)]
pub use mixup::testing::{example_window, make_window, make_window_with_ids};

// ============================================================================
// OUTPUT ACCESSORS
// ============================================================================

pub fn ranks(output: &[RescoredHit]) -> Vec<usize> {
    output.iter().map(|h| h.original_rank).collect()
}

pub fn scores(output: &[RescoredHit]) -> Vec<f64> {
    output.iter().map(|h| h.score).collect()
}

pub fn doc_ids(output: &[RescoredHit]) -> Vec<u64> {
    output.iter().filter_map(|h| h.doc_id).collect()
}

// ============================================================================
// ASSERTIONS
// ============================================================================

/// Assert scores match `expected` within 1e-9.
pub fn assert_scores_close(output: &[RescoredHit], expected: &[f64]) {
    assert_eq!(output.len(), expected.len(), "length mismatch");
    for (i, (hit, e)) in output.iter().zip(expected).enumerate() {
        assert!(
            (hit.score - e).abs() < 1e-9,
            "score[{}] = {}, expected {}",
            i,
            hit.score,
            e
        );
    }
}

/// Invariants every rescore must satisfy on sorted input.
pub fn assert_rescore_invariants(input: &[Hit], output: &[RescoredHit], window_len: usize) {
    check_permutation(input, output).expect("output is not a permutation of input");
    check_non_increasing(output).expect("scores increase");
    check_tail_untouched(input, output, window_len).expect("tail was modified");
}

/// Additional invariant for round-robin and seeded shuffle.
pub fn assert_leaders_first(output: &[RescoredHit]) {
    check_rank_one_priority(output).expect("a runner-up precedes a group leader");
}
