// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The reorderer: window in, permutation out.
//!
//! Three steps, each in its own module:
//!
//! 1. [`partition`]: split the window by group key.
//! 2. Strategy: [`interleave`] (round-robin, seeded shuffle) or [`decline`].
//! 3. [`cap`]: defer members past the per-group cap.
//!
//! Scores are not touched here. See [`crate::scoring`].

pub mod cap;
pub mod decline;
pub mod interleave;
pub mod partition;

use tracing::debug;

use crate::config::{RescoreConfig, Strategy};
use crate::error::Result;
use crate::shuffle::ShuffleSource;
use crate::types::Hit;

pub use cap::{apply_group_cap, Capped};
pub use partition::{Group, Partition};

/// A permutation of the window, with per-hit group bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reordered {
    /// Window indices in output order.
    pub order: Vec<usize>,
    /// Output index where the group cap's deferred tail starts
    /// (`order.len()` when nothing was deferred).
    pub deferred_from: usize,
    /// For each window index: 0-based position inside its group.
    pub group_positions: Vec<usize>,
}

impl Reordered {
    fn identity(partition: &Partition<'_>) -> Self {
        Self {
            order: (0..partition.len()).collect(),
            deferred_from: partition.len(),
            group_positions: partition.positions().to_vec(),
        }
    }

    /// Is the output order the input order?
    pub fn is_identity(&self) -> bool {
        self.order.iter().enumerate().all(|(i, &idx)| i == idx)
    }
}

/// Compute the new order of `window` under `config`.
///
/// `window` is exactly the hits to reorder; window-size truncation happens in
/// [`rescore`](crate::rescore).
pub fn reorder(window: &[Hit], config: &RescoreConfig) -> Result<Reordered> {
    let partition = Partition::build(window);

    if window.len() <= 1 {
        return Ok(Reordered::identity(&partition));
    }

    // G == W: every pass of round-robin is the input order. The shuffle does
    // not take this exit, since ordering a lone tier by key is what keeps it
    // consistent with windows that do contain groups.
    if partition.is_all_singletons() && matches!(config.strategy(), Strategy::RoundRobin) {
        debug!(hits = window.len(), "all groups are singletons, keeping input order");
        return Ok(Reordered::identity(&partition));
    }

    let order = match config.strategy() {
        Strategy::RoundRobin => interleave::round_robin(&partition),
        Strategy::SeededShuffle(seed) => {
            interleave::seeded_shuffle(window, &partition, ShuffleSource::new(seed))
        }
        Strategy::PositionDecline(params) => {
            decline::position_decline(window, &partition, params)?
        }
    };

    let capped = apply_group_cap(order, &partition, config.group_cap());
    if capped.deferred_from < capped.order.len() {
        debug!(
            deferred = capped.order.len() - capped.deferred_from,
            cap = config.group_cap(),
            "group cap deferred hits to the tail"
        );
    }

    debug!(
        hits = window.len(),
        groups = partition.group_count(),
        largest = partition.largest_group(),
        strategy = config.strategy().kind().as_str(),
        "reordered window"
    );

    Ok(Reordered {
        order: capped.order,
        deferred_from: capped.deferred_from,
        group_positions: partition.positions().to_vec(),
    })
}
