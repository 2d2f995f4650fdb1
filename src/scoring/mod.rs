// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Scoring after reordering: how rescored hits get their numbers.
//!
//! The reorderer decides who goes where; this module decides what score each
//! slot carries. The one hard rule is that scores never increase down the
//! output, because paging and cross-shard merging sort on them.

mod synth;

pub use synth::ScoreSynthesizer;
