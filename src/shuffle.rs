// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Deterministic shuffle keys.
//!
//! A seeded shuffle has to give the same answer every time it sees the same
//! seed, including on page 2 of a result list whose window differs from page
//! 1's. Drawing from an RNG in iteration order can't do that: the n-th draw
//! depends on how many hits came before it. So there is no RNG here. Each hit's
//! key is a hash of `(seed, identity)`, where identity is the caller's stable
//! `doc_id` (or `original_rank` when none was supplied). Two hits compare the
//! same way in every call that shares the seed.
//!
//! The source is a plain `Copy` value, built per call and passed by value.
//! There is no ambient random state to leak between concurrent calls.

use xxhash_rust::xxh3::{xxh3_64, xxh3_64_with_seed};

use crate::config::Seed;
use crate::types::Hit;

/// Seeded per-hit key generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShuffleSource {
    seed: u64,
}

impl ShuffleSource {
    pub fn new(seed: &Seed) -> Self {
        Self {
            seed: fold_seed(seed),
        }
    }

    pub fn from_u64(seed: u64) -> Self {
        Self { seed }
    }

    /// The 64-bit seed after folding.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Key for an arbitrary identity. Pure function of `(seed, identity)`.
    #[inline]
    pub fn key(&self, identity: u64) -> u64 {
        xxh3_64_with_seed(&identity.to_le_bytes(), self.seed)
    }

    #[inline]
    pub fn key_for(&self, hit: &Hit) -> u64 {
        self.key(hit.identity())
    }
}

/// Integer seeds are used as-is; string seeds are hashed down to 64 bits.
fn fold_seed(seed: &Seed) -> u64 {
    match seed {
        Seed::Int(value) => *value as u64,
        Seed::Str(value) => xxh3_64(value.as_bytes()),
    }
}
