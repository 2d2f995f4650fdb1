// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The values that flow through a rescore call.
//!
//! A [`Hit`] is what the primary ranking stage produced: a score, the hit's
//! position in the incoming window, and the group it belongs to. A
//! [`RescoredHit`] is what comes back out: the same identity with a new score
//! and enough bookkeeping to explain how it got there.
//!
//! # Invariants (the stuff that breaks if you ignore it)
//!
//! - **Hit**: `score.is_finite()`. Rejected at the boundary otherwise.
//!
//! - **Window**: sorted by `score` descending, ties by `original_rank` ascending.
//!   This is a precondition, not something the rescorer repairs.
//!
//! - **GroupKey::Ungrouped**: never equal to anything for grouping purposes.
//!   Two ungrouped hits are two singleton groups, not one group of two.

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// GROUP KEYS
// =============================================================================

/// Opaque group identifier attached to a hit.
///
/// Integer and string keys cover the field types a host usually groups on
/// (seller ids, product family names). A hit with no key is `Ungrouped` and
/// forms a group of its own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "Option<KeyRepr>", into = "Option<KeyRepr>")]
pub enum GroupKey {
    /// No group value. Each ungrouped hit is a singleton group.
    #[default]
    Ungrouped,
    Int(i64),
    Str(String),
}

impl GroupKey {
    /// Is this the ungrouped sentinel?
    #[inline]
    pub fn is_ungrouped(&self) -> bool {
        matches!(self, GroupKey::Ungrouped)
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupKey::Ungrouped => write!(f, "-"),
            GroupKey::Int(value) => write!(f, "{}", value),
            GroupKey::Str(value) => write!(f, "{}", value),
        }
    }
}

impl From<i64> for GroupKey {
    fn from(value: i64) -> Self {
        GroupKey::Int(value)
    }
}

impl From<&str> for GroupKey {
    fn from(value: &str) -> Self {
        GroupKey::Str(value.to_string())
    }
}

impl From<String> for GroupKey {
    fn from(value: String) -> Self {
        GroupKey::Str(value)
    }
}

/// Wire shape of a group key: a bare JSON integer or string, `null` when absent.
#[derive(Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum KeyRepr {
    Int(i64),
    Str(String),
}

impl From<Option<KeyRepr>> for GroupKey {
    fn from(repr: Option<KeyRepr>) -> Self {
        match repr {
            None => GroupKey::Ungrouped,
            Some(KeyRepr::Int(value)) => GroupKey::Int(value),
            Some(KeyRepr::Str(value)) => GroupKey::Str(value),
        }
    }
}

impl From<GroupKey> for Option<KeyRepr> {
    fn from(key: GroupKey) -> Self {
        match key {
            GroupKey::Ungrouped => None,
            GroupKey::Int(value) => Some(KeyRepr::Int(value)),
            GroupKey::Str(value) => Some(KeyRepr::Str(value)),
        }
    }
}

// =============================================================================
// HITS
// =============================================================================

/// One scored hit inside the rescore window.
///
/// Hits are never mutated by the rescorer. It only computes a new order and
/// new scores, reported separately as [`RescoredHit`]s.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hit {
    /// 0-based position in the incoming window. Stable tie-breaker, and the
    /// identity the caller uses to re-associate results with documents.
    pub original_rank: usize,
    /// Score from the primary ranking stage.
    pub score: f64,
    /// Group membership.
    #[serde(default)]
    pub group: GroupKey,
    /// Caller-supplied stable document identifier.
    ///
    /// When present it replaces `original_rank` as the shuffle identity, which
    /// is what keeps seeded shuffles consistent across pages whose windows
    /// differ.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_id: Option<u64>,
}

impl Hit {
    pub fn new(original_rank: usize, score: f64, group: impl Into<GroupKey>) -> Self {
        Self {
            original_rank,
            score,
            group: group.into(),
            doc_id: None,
        }
    }

    /// A hit with no group value.
    pub fn ungrouped(original_rank: usize, score: f64) -> Self {
        Self::new(original_rank, score, GroupKey::Ungrouped)
    }

    /// Attach a stable document identifier.
    pub fn with_doc_id(mut self, doc_id: u64) -> Self {
        self.doc_id = Some(doc_id);
        self
    }

    /// Identity used for shuffle keys: `doc_id` if supplied, else `original_rank`.
    #[inline]
    pub fn identity(&self) -> u64 {
        self.doc_id.unwrap_or(self.original_rank as u64)
    }
}

/// A hit after rescoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RescoredHit {
    pub original_rank: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_id: Option<u64>,
    pub group: GroupKey,
    /// Synthesized score. Non-increasing across the output.
    pub score: f64,
    /// Score the hit arrived with.
    pub original_score: f64,
    /// 0-based position of the hit inside its group, `None` for hits past the
    /// rescore window (those are passed through untouched).
    pub group_position: Option<usize>,
    /// Pushed to the tail by the group cap.
    pub deferred: bool,
}

impl RescoredHit {
    /// A hit outside the rescore window, carried over unchanged.
    pub(crate) fn passthrough(hit: &Hit) -> Self {
        Self {
            original_rank: hit.original_rank,
            doc_id: hit.doc_id,
            group: hit.group.clone(),
            score: hit.score,
            original_score: hit.score,
            group_position: None,
            deferred: false,
        }
    }

    /// Was this hit inside the rescore window?
    #[inline]
    pub fn was_rescored(&self) -> bool {
        self.group_position.is_some()
    }
}

// =============================================================================
// WINDOW CONSTRUCTION
// =============================================================================

/// Build a window from host items, with group extraction injected as a closure.
///
/// `original_rank` is the item's index. Items must already be in primary
/// ranking order.
///
/// ```
/// use mixup::{window_from, GroupKey};
///
/// let listings = [(9.5, 17), (9.1, 17), (8.0, 4)];
/// let window = window_from(&listings, |l| l.0, |l| GroupKey::Int(l.1));
/// assert_eq!(window[2].original_rank, 2);
/// ```
pub fn window_from<T>(
    items: &[T],
    score_of: impl Fn(&T) -> f64,
    group_of: impl Fn(&T) -> GroupKey,
) -> Vec<Hit> {
    items
        .iter()
        .enumerate()
        .map(|(rank, item)| Hit::new(rank, score_of(item), group_of(item)))
        .collect()
}

/// Like [`window_from`], also extracting a stable document identifier.
pub fn window_with_ids<T>(
    items: &[T],
    score_of: impl Fn(&T) -> f64,
    group_of: impl Fn(&T) -> GroupKey,
    doc_id_of: impl Fn(&T) -> Option<u64>,
) -> Vec<Hit> {
    items
        .iter()
        .enumerate()
        .map(|(rank, item)| Hit {
            original_rank: rank,
            score: score_of(item),
            group: group_of(item),
            doc_id: doc_id_of(item),
        })
        .collect()
}
