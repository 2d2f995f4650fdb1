// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Group-diversifying rescorer for ranked search results.
//!
//! A primary ranker returns hits sorted by score. When several top hits share
//! a grouping key (same seller, same site, same author), the first page can
//! be crowded by one group. This crate reorders the top window so that groups
//! take turns, then gives every hit a new score so the list is still sorted.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────┐
//! │  types.rs   │────▶│   mixup/     │────▶│  scoring/    │
//! │ (Hit,       │     │ (partition,  │     │ (synthesize  │
//! │  GroupKey)  │     │  strategies, │     │  monotone    │
//! │             │     │  group cap)  │     │  scores)     │
//! └─────────────┘     └──────────────┘     └──────────────┘
//!        │                   │                    │
//!        ▼                   ▼                    ▼
//! ┌─────────────────────────────────────────────────────┐
//! │                    rescore.rs                       │
//! │   (validate, split window/tail, reorder, score,     │
//! │    splice tail, run contracts)                      │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Strategies
//!
//! | Strategy          | Order inside the window                          |
//! |-------------------|--------------------------------------------------|
//! | `round_robin`     | every group's best, then every group's second... |
//! | `seeded_shuffle`  | same tiers, each tier shuffled by a fixed seed   |
//! | `position_decline`| score decays with position in group, then sort   |
//!
//! # Usage
//!
//! ```
//! use mixup::{rescore, window_from, RescoreConfig};
//!
//! let items = [("a", 3.0), ("a", 2.0), ("b", 1.0)];
//! let hits = window_from(&items, |item| item.1, |item| item.0.into());
//! let out = rescore(&hits, &RescoreConfig::round_robin().with_window_size(100)).unwrap();
//! assert_eq!(out[1].original_rank, 2);
//! ```

pub mod config;
pub mod error;
pub mod mixup;
pub mod page;
mod rescore;
pub mod scoring;
pub mod shuffle;
pub mod testing;
mod types;
pub mod verify;

pub use config::{
    DeclineParams, Descent, RescoreConfig, RescoreOptions, Seed, Strategy, StrategyKind,
    Validation, DEFAULT_EPSILON, DEFAULT_WINDOW_SIZE, MAX_WINDOW_SIZE,
};
pub use error::{RescoreError, Result};
pub use mixup::{reorder, Reordered};
pub use page::{paginate, required_window};
pub use rescore::{rescore, rescore_batch};
pub use scoring::ScoreSynthesizer;
pub use shuffle::ShuffleSource;
pub use types::{window_from, window_with_ids, GroupKey, Hit, RescoredHit};
pub use verify::InvariantError;
