// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides canonical implementations of test helpers to avoid duplication.

#![doc(hidden)]

use crate::types::Hit;

/// The five-hit window used throughout the docs:
///
/// ```text
/// rank  score  group
///    0   10.0  A
///    1    9.0  A
///    2    8.0  B
///    3    7.0  A
///    4    6.0  C
/// ```
///
/// Round-robin turns it into ranks `[0, 2, 4, 1, 3]`.
pub fn example_window() -> Vec<Hit> {
    make_window(&[(10.0, "A"), (9.0, "A"), (8.0, "B"), (7.0, "A"), (6.0, "C")])
}

/// Build a window from `(score, group)` pairs; rank is the index.
pub fn make_window(rows: &[(f64, &str)]) -> Vec<Hit> {
    rows.iter()
        .enumerate()
        .map(|(rank, &(score, group))| Hit::new(rank, score, group))
        .collect()
}

/// Like [`make_window`], with `doc_id = 1000 + rank` on every hit.
pub fn make_window_with_ids(rows: &[(f64, &str)]) -> Vec<Hit> {
    make_window(rows)
        .into_iter()
        .map(|hit| {
            let id = 1000 + hit.original_rank as u64;
            hit.with_doc_id(id)
        })
        .collect()
}

/// Map window indices to original ranks.
pub fn ranks_of(window: &[Hit], order: &[usize]) -> Vec<usize> {
    order.iter().map(|&idx| window[idx].original_rank).collect()
}
