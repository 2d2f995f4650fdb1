// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! What can go wrong at the rescore boundary.
//!
//! Every failure is local, synchronous and deterministic. Nothing is retried
//! and nothing is partially applied: a call either returns the full rescored
//! window or one of these.
//!
//! An empty window is not an error. It rescores to an empty window.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RescoreError {
    /// Rejected before any reordering: unknown strategy, missing seed,
    /// negative sizes, non-finite tuning values.
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },

    /// Input scores increase somewhere beyond tolerance. Only raised under
    /// strict validation.
    #[error("unsorted input at position {position}: score {current} follows {previous}")]
    UnsortedInput {
        position: usize,
        previous: f64,
        current: f64,
    },

    /// A hit carries NaN or an infinite score.
    #[error("non-finite score {score} for hit at rank {original_rank}")]
    NonFiniteScore { original_rank: usize, score: f64 },
}

impl RescoreError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        RescoreError::InvalidConfiguration {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RescoreError>;
