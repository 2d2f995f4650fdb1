// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Deserialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use mixup::mixup::Partition;
use mixup::{
    paginate, required_window, rescore, window_with_ids, GroupKey, Hit, RescoreConfig,
    RescoreOptions, RescoredHit, Seed, StrategyKind,
};

mod cli;
use cli::display::{self, pad_left, pad_right, themed, BOLD, GRAY};
use cli::{Cli, Commands, StrategyArg};

/// Window file: hits in primary ranking order.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct WindowFile {
    hits: Vec<InputHit>,
}

#[derive(Deserialize)]
struct InputHit {
    score: f64,
    #[serde(default)]
    group: GroupKey,
    #[serde(default)]
    doc_id: Option<u64>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("MIXUP_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Rescore {
            window,
            config,
            strategy,
            seed,
            group_cap,
            window_size,
            from,
            size,
            json,
        } => {
            let overrides = Overrides {
                strategy,
                seed,
                group_cap,
                window_size,
            };
            run_rescore(&window, config.as_deref(), overrides, from, size, json)
        }
        Commands::Groups { window } => run_groups(&window),
    };

    if let Err(e) = result {
        eprintln!("❌ {:#}", e);
        std::process::exit(1);
    }
}

// ============================================================================
// INPUT
// ============================================================================

fn load_window(path: &Path) -> Result<Vec<Hit>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read window file {}", path.display()))?;
    let file: WindowFile = serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse window file {}", path.display()))?;

    info!(hits = file.hits.len(), path = %path.display(), "loaded window");
    Ok(window_with_ids(
        &file.hits,
        |hit| hit.score,
        |hit| hit.group.clone(),
        |hit| hit.doc_id,
    ))
}

/// Command-line values layered over the options file.
struct Overrides {
    strategy: Option<StrategyArg>,
    seed: Option<String>,
    group_cap: Option<i64>,
    window_size: Option<i64>,
}

fn load_config(path: Option<&Path>, overrides: Overrides) -> Result<RescoreConfig> {
    let mut options = match path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read options file {}", path.display()))?;
            RescoreOptions::from_json(&raw)?
        }
        None => RescoreOptions::default(),
    };

    if let Some(strategy) = overrides.strategy {
        options.strategy = Some(StrategyKind::from(strategy).as_str().to_string());
    }
    if let Some(seed) = overrides.seed {
        options.seed = Some(match seed.parse::<i64>() {
            Ok(n) => Seed::Int(n),
            Err(_) => Seed::Str(seed),
        });
    }
    if overrides.group_cap.is_some() {
        options.group_cap = overrides.group_cap;
    }
    if overrides.window_size.is_some() {
        options.window_size = overrides.window_size;
    }

    Ok(RescoreConfig::try_from(options)?)
}

// ============================================================================
// COMMANDS
// ============================================================================

fn run_rescore(
    window_path: &Path,
    config_path: Option<&Path>,
    overrides: Overrides,
    from: usize,
    size: Option<usize>,
    json: bool,
) -> Result<()> {
    let mut config = load_config(config_path, overrides)?;
    let hits = load_window(window_path)?;

    let size = size.unwrap_or(hits.len());
    let needed = required_window(config.window_size(), from, size);
    if needed > config.window_size() {
        info!(from, size, window = needed, "widening rescore window to cover the page");
        config = config.with_window_size(needed);
    }

    let output = rescore(&hits, &config)?;
    let page = paginate(&output, from, size);

    if json {
        println!("{}", serde_json::to_string_pretty(page)?);
        return Ok(());
    }

    if page.is_empty() && !output.is_empty() {
        bail!("page starts at {} but there are only {} hits", from, output.len());
    }
    print_rescored(page, from, &config);
    Ok(())
}

fn run_groups(window_path: &Path) -> Result<()> {
    let hits = load_window(window_path)?;
    let partition = Partition::build(&hits);

    display::section_top(&format!(
        "{} hits, {} groups, largest {}",
        hits.len(),
        partition.group_count(),
        partition.largest_group()
    ));
    for group in partition.groups() {
        let ranks: Vec<String> = group
            .members
            .iter()
            .map(|&idx| hits[idx].original_rank.to_string())
            .collect();
        display::row(&format!(
            " {} {}",
            pad_right(&display::group_badge(group.key), 20),
            themed(GRAY, &[], &format!("ranks {}", ranks.join(", ")))
        ));
    }
    display::section_bot();
    Ok(())
}

// ============================================================================
// OUTPUT
// ============================================================================

fn print_rescored(page: &[RescoredHit], from: usize, config: &RescoreConfig) {
    display::section_top(&format!(
        "{} (window {}, cap {})",
        config.strategy().kind().as_str(),
        config.window_size(),
        config.group_cap()
    ));
    display::row(&themed(
        GRAY,
        &[BOLD],
        &format!(
            " {:>5} {:>5}  {:<18} {:<10} {:>6}  score",
            "pos", "rank", "group", "status", "moved"
        ),
    ));
    display::section_mid("hits");

    for (offset, hit) in page.iter().enumerate() {
        let position = from + offset;
        display::row(&format!(
            " {:>5} {:>5}  {} {} {}  {}",
            position,
            hit.original_rank,
            pad_right(&display::group_badge(&hit.group), 18),
            pad_right(&display::status_label(hit), 10),
            pad_left(&display::movement(hit.original_rank, position), 6),
            display::score_change(hit)
        ));
    }
    display::section_bot();
}
