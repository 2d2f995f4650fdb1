// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Pagination over a rescored list.
//!
//! The host asks for page `[from, from + size)`. To serve it, the rescore
//! window must cover the page, so the host fetches and rescores
//! [`required_window`] hits and then slices the result with [`paginate`].
//! With a fixed seed and the same candidates, every page is a slice of the
//! same total order, so no hit shows up on two pages.

use tracing::debug;

use crate::config::MAX_WINDOW_SIZE;

/// Hits the host must rescore to serve `[from, from + size)` with a
/// configured `window_size`: `max(window_size, from + size)`.
///
/// Capped at [`MAX_WINDOW_SIZE`]; pages past the cap are served from the
/// untouched tail.
pub fn required_window(window_size: usize, from: usize, size: usize) -> usize {
    let needed = window_size.max(from.saturating_add(size));
    if needed > MAX_WINDOW_SIZE {
        debug!(needed, cap = MAX_WINDOW_SIZE, "page extends past the rescore cap");
    }
    needed.min(MAX_WINDOW_SIZE)
}

/// The page `[from, from + size)` of `hits`, clipped to its length.
///
/// Empty when `from` is past the end or `size` is zero.
pub fn paginate<T>(hits: &[T], from: usize, size: usize) -> &[T] {
    if from >= hits.len() {
        return &[];
    }
    let end = from.saturating_add(size).min(hits.len());
    &hits[from..end]
}
