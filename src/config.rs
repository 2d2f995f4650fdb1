// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Rescore configuration: the host-facing option record and the validated value.
//!
//! Hosts hand us whatever their request format carried as a [`RescoreOptions`]
//! (deserializable from JSON, every field optional, integers signed so that a
//! negative size is a validation error rather than a parse error). Converting
//! it with `RescoreConfig::try_from` is the only place an
//! [`InvalidConfiguration`](crate::RescoreError::InvalidConfiguration) can come
//! from, apart from [`RescoreConfig::validate`] for configs assembled through
//! the builder methods.
//!
//! The seed lives inside [`Strategy::SeededShuffle`], so "shuffle without a
//! seed" cannot be expressed once validation has passed.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::debug;

use crate::error::{RescoreError, Result};

// =============================================================================
// CONSTANTS
// =============================================================================

/// Largest window a host may request. Larger requests are capped to this.
pub const MAX_WINDOW_SIZE: usize = 10_000;

/// Window size used when the options do not name one.
pub const DEFAULT_WINDOW_SIZE: usize = MAX_WINDOW_SIZE;

/// Step between consecutive synthesized scores when a promoted hit needs a
/// score strictly below its predecessor.
pub const DEFAULT_EPSILON: f64 = 0.01;

/// Slack allowed when checking that input scores are non-increasing.
pub const UNSORTED_TOLERANCE: f64 = 1e-9;

// =============================================================================
// ENUMS
// =============================================================================

/// Strategy names as they appear in option records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    RoundRobin,
    SeededShuffle,
    PositionDecline,
}

impl StrategyKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StrategyKind::RoundRobin => "round_robin",
            StrategyKind::SeededShuffle => "seeded_shuffle",
            StrategyKind::PositionDecline => "position_decline",
        }
    }
}

impl FromStr for StrategyKind {
    type Err = RescoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "round_robin" => Ok(StrategyKind::RoundRobin),
            "seeded_shuffle" => Ok(StrategyKind::SeededShuffle),
            "position_decline" => Ok(StrategyKind::PositionDecline),
            other => Err(RescoreError::invalid(format!(
                "unknown strategy '{}' (expected round_robin, seeded_shuffle or position_decline)",
                other
            ))),
        }
    }
}

/// Seed for the deterministic shuffle. Hosts usually derive it from the query.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Seed {
    Int(i64),
    Str(String),
}

impl From<i64> for Seed {
    fn from(value: i64) -> Self {
        Seed::Int(value)
    }
}

impl From<&str> for Seed {
    fn from(value: &str) -> Self {
        Seed::Str(value.to_string())
    }
}

impl From<String> for Seed {
    fn from(value: String) -> Self {
        Seed::Str(value)
    }
}

/// Coefficients of the position decline factor `m / (a * pos + b) + c`.
///
/// `pos` is the 0-based position of a hit inside its group. The defaults give
/// `1 / (pos + 1)`: the group leader keeps its score, the runner-up is halved,
/// and so on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeclineParams {
    pub m: f64,
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl Default for DeclineParams {
    fn default() -> Self {
        Self {
            m: 1.0,
            a: 1.0,
            b: 1.0,
            c: 0.0,
        }
    }
}

impl DeclineParams {
    /// Multiplier applied to the score of a hit at group position `pos`.
    #[inline]
    pub fn factor(&self, pos: usize) -> f64 {
        self.m / (self.a * pos as f64 + self.b) + self.c
    }

    /// Check the factor is positive and finite for every position below `positions`.
    pub fn check_positions(&self, positions: usize) -> Result<()> {
        for pos in 0..positions {
            let factor = self.factor(pos);
            if !factor.is_finite() || factor <= 0.0 {
                return Err(RescoreError::invalid(format!(
                    "decline factor {} at group position {} must be positive and finite",
                    factor, pos
                )));
            }
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        for (name, value) in [("m", self.m), ("a", self.a), ("b", self.b), ("c", self.c)] {
            if !value.is_finite() {
                return Err(RescoreError::invalid(format!(
                    "decline parameter '{}' must be finite, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

/// Reordering strategy, with the parameters each one needs.
#[derive(Debug, Clone, PartialEq)]
pub enum Strategy {
    /// Passes over groups ordered by their strongest hit, one member per pass.
    RoundRobin,
    /// Round-robin tiers, each tier ordered by a seeded per-hit key.
    SeededShuffle(Seed),
    /// Score decay by position inside the group, then re-sort.
    PositionDecline(DeclineParams),
}

impl Strategy {
    pub fn kind(&self) -> StrategyKind {
        match self {
            Strategy::RoundRobin => StrategyKind::RoundRobin,
            Strategy::SeededShuffle(_) => StrategyKind::SeededShuffle,
            Strategy::PositionDecline(_) => StrategyKind::PositionDecline,
        }
    }

    /// Does this strategy emit every group's best hit before any second-best hit?
    pub fn is_tiered(&self) -> bool {
        matches!(self, Strategy::RoundRobin | Strategy::SeededShuffle(_))
    }
}

/// How synthesized scores step down past a promoted hit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Descent {
    /// Strictly below the predecessor, by `epsilon`.
    #[default]
    Strict,
    /// Equal to the predecessor.
    NonStrict,
}

/// How much the rescorer checks its input preconditions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Validation {
    /// Take the given order as authoritative.
    #[default]
    Lenient,
    /// Reject input whose scores increase beyond [`UNSORTED_TOLERANCE`].
    Strict,
}

// =============================================================================
// VALIDATED CONFIG
// =============================================================================

/// Immutable per-call rescore configuration.
///
/// Build one with [`RescoreConfig::round_robin`], [`RescoreConfig::seeded_shuffle`]
/// or [`RescoreConfig::position_decline`] and the `with_*` methods, or convert a
/// [`RescoreOptions`].
#[derive(Debug, Clone, PartialEq)]
pub struct RescoreConfig {
    strategy: Strategy,
    window_size: usize,
    group_cap: usize,
    score_floor: Option<f64>,
    epsilon: f64,
    descent: Descent,
    validation: Validation,
}

impl RescoreConfig {
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            window_size: DEFAULT_WINDOW_SIZE,
            group_cap: 0,
            score_floor: None,
            epsilon: DEFAULT_EPSILON,
            descent: Descent::default(),
            validation: Validation::default(),
        }
    }

    pub fn round_robin() -> Self {
        Self::new(Strategy::RoundRobin)
    }

    pub fn seeded_shuffle(seed: impl Into<Seed>) -> Self {
        Self::new(Strategy::SeededShuffle(seed.into()))
    }

    pub fn position_decline(params: DeclineParams) -> Self {
        Self::new(Strategy::PositionDecline(params))
    }

    /// Hits considered for reordering. Capped at [`MAX_WINDOW_SIZE`].
    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size;
        self
    }

    /// Per-group cap on leading slots. 0 means unbounded.
    pub fn with_group_cap(mut self, group_cap: usize) -> Self {
        self.group_cap = group_cap;
        self
    }

    pub fn with_score_floor(mut self, score_floor: f64) -> Self {
        self.score_floor = Some(score_floor);
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_descent(mut self, descent: Descent) -> Self {
        self.descent = descent;
        self
    }

    pub fn with_validation(mut self, validation: Validation) -> Self {
        self.validation = validation;
        self
    }

    pub fn strategy(&self) -> &Strategy {
        &self.strategy
    }

    /// Effective window size, after the host maximum is applied.
    pub fn window_size(&self) -> usize {
        self.window_size.min(MAX_WINDOW_SIZE)
    }

    pub fn group_cap(&self) -> usize {
        self.group_cap
    }

    pub fn score_floor(&self) -> Option<f64> {
        self.score_floor
    }

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn descent(&self) -> Descent {
        self.descent
    }

    pub fn validation(&self) -> Validation {
        self.validation
    }

    /// Check the values the type system cannot.
    pub fn validate(&self) -> Result<()> {
        if self.window_size == 0 {
            return Err(RescoreError::invalid("window_size must be positive"));
        }
        if let Some(floor) = self.score_floor {
            if !floor.is_finite() {
                return Err(RescoreError::invalid(format!(
                    "score_floor must be finite, got {}",
                    floor
                )));
            }
        }
        if !self.epsilon.is_finite() || self.epsilon < 0.0 {
            return Err(RescoreError::invalid(format!(
                "epsilon must be finite and non-negative, got {}",
                self.epsilon
            )));
        }
        if let Strategy::PositionDecline(params) = &self.strategy {
            params.validate()?;
        }
        Ok(())
    }
}

impl Default for RescoreConfig {
    fn default() -> Self {
        Self::round_robin()
    }
}

// =============================================================================
// HOST OPTIONS
// =============================================================================

/// Rescore options as a host serializes them.
///
/// ```
/// use mixup::{RescoreConfig, RescoreOptions, StrategyKind};
///
/// let options = RescoreOptions::from_json(
///     r#"{"strategy": "seeded_shuffle", "seed": "user-42:shoes", "group_cap": 2}"#,
/// ).unwrap();
/// let config = RescoreConfig::try_from(options).unwrap();
/// assert_eq!(config.strategy().kind(), StrategyKind::SeededShuffle);
/// assert_eq!(config.group_cap(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RescoreOptions {
    /// `round_robin` (default), `seeded_shuffle` or `position_decline`.
    pub strategy: Option<String>,
    pub window_size: Option<i64>,
    /// Required iff `strategy` is `seeded_shuffle`, ignored otherwise.
    pub seed: Option<Seed>,
    pub group_cap: Option<i64>,
    pub score_floor: Option<f64>,
    pub epsilon: Option<f64>,
    pub descent: Option<Descent>,
    pub validation: Option<Validation>,
    /// Coefficients for `position_decline`.
    pub decline: Option<DeclineParams>,
}

impl RescoreOptions {
    /// Parse options from JSON. Malformed JSON is a configuration error.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| RescoreError::invalid(format!("malformed rescore options: {}", e)))
    }
}

impl TryFrom<RescoreOptions> for RescoreConfig {
    type Error = RescoreError;

    fn try_from(options: RescoreOptions) -> Result<Self> {
        let kind = match options.strategy.as_deref() {
            Some(name) => name.parse::<StrategyKind>()?,
            None => StrategyKind::RoundRobin,
        };

        let seed_given = options.seed.is_some();
        let strategy = match kind {
            StrategyKind::RoundRobin => Strategy::RoundRobin,
            StrategyKind::SeededShuffle => match options.seed {
                Some(seed) => Strategy::SeededShuffle(seed),
                None => {
                    return Err(RescoreError::invalid(
                        "seeded_shuffle requires a seed",
                    ))
                }
            },
            StrategyKind::PositionDecline => {
                Strategy::PositionDecline(options.decline.unwrap_or_default())
            }
        };
        if kind != StrategyKind::SeededShuffle && seed_given {
            debug!(strategy = kind.as_str(), "ignoring seed for unseeded strategy");
        }

        let mut config = RescoreConfig::new(strategy);

        if let Some(window_size) = options.window_size {
            if window_size <= 0 {
                return Err(RescoreError::invalid(format!(
                    "window_size must be positive, got {}",
                    window_size
                )));
            }
            let window_size = usize::try_from(window_size).unwrap_or(usize::MAX);
            if window_size > MAX_WINDOW_SIZE {
                debug!(
                    requested = window_size,
                    max = MAX_WINDOW_SIZE,
                    "capping window_size at host maximum"
                );
            }
            config = config.with_window_size(window_size.min(MAX_WINDOW_SIZE));
        }

        if let Some(group_cap) = options.group_cap {
            if group_cap < 0 {
                return Err(RescoreError::invalid(format!(
                    "group_cap must be non-negative, got {}",
                    group_cap
                )));
            }
            config = config.with_group_cap(usize::try_from(group_cap).unwrap_or(usize::MAX));
        }

        if let Some(floor) = options.score_floor {
            config = config.with_score_floor(floor);
        }
        if let Some(epsilon) = options.epsilon {
            config = config.with_epsilon(epsilon);
        }
        if let Some(descent) = options.descent {
            config = config.with_descent(descent);
        }
        if let Some(validation) = options.validation {
            config = config.with_validation(validation);
        }

        config.validate()?;
        Ok(config)
    }
}
