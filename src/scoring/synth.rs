// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Score synthesis for a reordered window.
//!
//! After reordering, a promoted hit can sit ahead of hits that outscored it.
//! Downstream paging and merging assume scores never increase down the list,
//! so every hit gets a new score:
//!
//! ```text
//! first hit        max(window top score, score_floor)
//! original < prev  original          (keeps its natural magnitude)
//! otherwise        prev - epsilon    (Strict)  or  prev  (NonStrict)
//! ```
//!
//! Hits below `score_floor` sit out: they keep their original score when it
//! fits under the previous one, and are clamped to the previous score (no
//! epsilon step) when it doesn't.
//!
//! Synthesized scores never go below the score of the first hit outside the
//! rescore window, so splicing the window back keeps the whole list sorted.

use crate::config::{Descent, RescoreConfig};
use crate::types::Hit;

/// Assigns non-increasing scores to a reordered window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreSynthesizer {
    floor: Option<f64>,
    epsilon: f64,
    descent: Descent,
    lower_bound: Option<f64>,
}

impl ScoreSynthesizer {
    pub fn new(config: &RescoreConfig) -> Self {
        Self {
            floor: config.score_floor(),
            epsilon: config.epsilon(),
            descent: config.descent(),
            lower_bound: None,
        }
    }

    /// Keep every synthesized score at or above `bound`, typically the score
    /// of the first hit past the rescore window.
    pub fn with_lower_bound(mut self, bound: Option<f64>) -> Self {
        self.lower_bound = bound;
        self
    }

    /// Scores for `window` in the output order `order` (window indices).
    pub fn synthesize(&self, window: &[Hit], order: &[usize]) -> Vec<f64> {
        let top = window
            .iter()
            .map(|hit| hit.score)
            .fold(f64::NEG_INFINITY, f64::max);

        let mut scores = Vec::with_capacity(order.len());
        let mut prev: Option<f64> = None;

        for &idx in order {
            let original = window[idx].score;
            let below_floor = self.floor.is_some_and(|floor| original < floor);

            let next = match prev {
                None if below_floor => original,
                None => self.floor.map_or(top, |floor| top.max(floor)),
                Some(prev) if original < prev => original,
                Some(prev) if below_floor => prev,
                Some(prev) => self.step_below(prev),
            };
            let next = match self.lower_bound {
                Some(bound) => next.max(bound),
                None => next,
            };

            scores.push(next);
            prev = Some(next);
        }

        scores
    }

    fn step_below(&self, prev: f64) -> f64 {
        match self.descent {
            Descent::NonStrict => prev,
            Descent::Strict => {
                let stepped = prev - self.epsilon;
                if stepped < prev {
                    stepped
                } else {
                    // epsilon is zero or lost to rounding at this magnitude
                    next_below(prev)
                }
            }
        }
    }
}

/// Largest finite `f64` strictly below `x`.
fn next_below(x: f64) -> f64 {
    if x == 0.0 {
        return -f64::from_bits(1);
    }
    let bits = x.to_bits();
    if x > 0.0 {
        f64::from_bits(bits - 1)
    } else {
        f64::from_bits(bits + 1)
    }
}
