// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Group cap: a hard post-filter on the strategy's order.
//!
//! Walking the order front to back, each group may place at most `cap` hits in
//! the leading slots. Any further member is deferred. Deferred hits are
//! appended after the leading slots, in the order the strategy gave them.
//! Nothing inside either part is reordered.
//!
//! Tiered strategies already emit every group's first `cap` members before
//! anything deeper, so for them the cap never moves a hit. It bites for
//! position decline, where a strong runner-up can overtake other leaders.

use super::partition::Partition;

/// Order after the cap, plus the index where the deferred tail starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capped {
    pub order: Vec<usize>,
    pub deferred_from: usize,
}

/// Apply `cap` to `order`. A cap of 0 means unbounded.
pub fn apply_group_cap(order: Vec<usize>, partition: &Partition<'_>, cap: usize) -> Capped {
    let len = order.len();
    if cap == 0 || cap >= len {
        return Capped {
            order,
            deferred_from: len,
        };
    }

    let mut placed = vec![0usize; partition.group_count()];
    let mut leading = Vec::with_capacity(len);
    let mut deferred = Vec::new();

    for idx in order {
        let gid = partition.group_of(idx);
        if placed[gid] < cap {
            placed[gid] += 1;
            leading.push(idx);
        } else {
            deferred.push(idx);
        }
    }

    let deferred_from = leading.len();
    leading.extend(deferred);
    Capped {
        order: leading,
        deferred_from,
    }
}
