// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the mixup command-line interface.
//!
//! Two subcommands: `rescore` runs a window file through the rescorer and
//! prints the new order, `groups` shows how a window partitions before any
//! reordering. Both read the same window format:
//!
//! ```json
//! {"hits": [{"score": 10.0, "group": "A", "doc_id": 17}, ...]}
//! ```
//!
//! Hits must already be in primary ranking order. `group` may be a string, an
//! integer or `null` (ungrouped). `doc_id` is optional.

pub mod display;

use clap::{Parser, Subcommand, ValueEnum};
use mixup::StrategyKind;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "mixup",
    about = "Diversify ranked search results by group",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rescore a window of hits and print the new order
    Rescore {
        /// Path to window JSON file
        window: PathBuf,

        /// Rescore options as JSON (same shape a host sends)
        ///
        /// Flags below override values from this file.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Reordering strategy
        #[arg(short, long, value_enum)]
        strategy: Option<StrategyArg>,

        /// Seed for seeded_shuffle (integers are used as-is, anything else is hashed)
        #[arg(long)]
        seed: Option<String>,

        /// Max hits per group in the leading slots (0 = unbounded)
        #[arg(long)]
        group_cap: Option<i64>,

        /// Number of top hits to reorder
        #[arg(short, long)]
        window_size: Option<i64>,

        /// First hit of the page to print
        #[arg(long, default_value = "0")]
        from: usize,

        /// Page size (default: all hits)
        #[arg(long)]
        size: Option<usize>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show the groups in a window and each hit's position in its group
    Groups {
        /// Path to window JSON file
        window: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    RoundRobin,
    SeededShuffle,
    PositionDecline,
}

impl From<StrategyArg> for StrategyKind {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::RoundRobin => StrategyKind::RoundRobin,
            StrategyArg::SeededShuffle => StrategyKind::SeededShuffle,
            StrategyArg::PositionDecline => StrategyKind::PositionDecline,
        }
    }
}
