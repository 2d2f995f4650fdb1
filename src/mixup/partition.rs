// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Splitting a window into groups.
//!
//! Groups are kept in a `Vec` with a side `HashMap` from key to group index,
//! so iteration order is deterministic (insertion order) and lookups are O(1).
//! Members are stored as indices into the window, in window order.
//!
//! Ungrouped hits bypass the map entirely: each one gets a fresh group.

use std::collections::HashMap;

use crate::types::{GroupKey, Hit};

/// One group: its key and the window indices of its members, best first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group<'a> {
    pub key: &'a GroupKey,
    pub members: Vec<usize>,
    /// Lowest `original_rank` among the members.
    pub representative: usize,
}

/// A window split by group key.
///
/// Groups are sorted by representative rank, so iterating [`Partition::groups`]
/// visits the group with the strongest hit first.
#[derive(Debug, Clone)]
pub struct Partition<'a> {
    groups: Vec<Group<'a>>,
    /// For each window index: index of its group in `groups`.
    group_of: Vec<usize>,
    /// For each window index: 0-based position inside its group.
    position_of: Vec<usize>,
}

impl<'a> Partition<'a> {
    pub fn build(window: &'a [Hit]) -> Self {
        let mut groups: Vec<Group<'a>> = Vec::new();
        let mut index: HashMap<&'a GroupKey, usize> = HashMap::new();
        let mut group_of = Vec::with_capacity(window.len());
        let mut position_of = Vec::with_capacity(window.len());

        for (idx, hit) in window.iter().enumerate() {
            let slot = if hit.group.is_ungrouped() {
                None
            } else {
                index.get(&hit.group).copied()
            };

            let gid = match slot {
                Some(gid) => gid,
                None => {
                    let gid = groups.len();
                    groups.push(Group {
                        key: &hit.group,
                        members: Vec::new(),
                        representative: hit.original_rank,
                    });
                    if !hit.group.is_ungrouped() {
                        index.insert(&hit.group, gid);
                    }
                    gid
                }
            };

            let group = &mut groups[gid];
            position_of.push(group.members.len());
            group.members.push(idx);
            group.representative = group.representative.min(hit.original_rank);
            group_of.push(gid);
        }

        // Visit order: strongest representative first. Ties keep insertion
        // order (stable sort), then remap group ids.
        let mut order: Vec<usize> = (0..groups.len()).collect();
        order.sort_by_key(|&gid| groups[gid].representative);
        let mut remap = vec![0; groups.len()];
        for (new_gid, &old_gid) in order.iter().enumerate() {
            remap[old_gid] = new_gid;
        }
        let mut slots: Vec<Option<Group<'a>>> = groups.into_iter().map(Some).collect();
        let groups: Vec<Group<'a>> = order
            .iter()
            .filter_map(|&old_gid| slots[old_gid].take())
            .collect();
        for gid in &mut group_of {
            *gid = remap[*gid];
        }

        Self {
            groups,
            group_of,
            position_of,
        }
    }

    /// Groups in visiting order.
    pub fn groups(&self) -> &[Group<'a>] {
        &self.groups
    }

    /// Number of distinct groups (`G`).
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Size of the largest group (`M`). Also the number of round-robin passes.
    pub fn largest_group(&self) -> usize {
        self.groups.iter().map(|g| g.members.len()).max().unwrap_or(0)
    }

    /// Window length the partition was built from.
    pub fn len(&self) -> usize {
        self.group_of.len()
    }

    pub fn is_empty(&self) -> bool {
        self.group_of.is_empty()
    }

    /// Every hit is alone in its group (`G == W`).
    pub fn is_all_singletons(&self) -> bool {
        self.groups.len() == self.group_of.len()
    }

    /// Group id (index into [`Partition::groups`]) of a window index.
    #[inline]
    pub fn group_of(&self, idx: usize) -> usize {
        self.group_of[idx]
    }

    /// 0-based position of a window index inside its group.
    #[inline]
    pub fn position_of(&self, idx: usize) -> usize {
        self.position_of[idx]
    }

    pub fn positions(&self) -> &[usize] {
        &self.position_of
    }

    /// Round-robin tiers: tier `i` holds every group's `i`-th member, in group
    /// visiting order. Concatenating the tiers is the round-robin order.
    pub fn tiers(&self) -> Vec<Vec<usize>> {
        let mut tiers: Vec<Vec<usize>> = vec![Vec::new(); self.largest_group()];
        for group in &self.groups {
            for (pos, &idx) in group.members.iter().enumerate() {
                tiers[pos].push(idx);
            }
        }
        tiers
    }
}
