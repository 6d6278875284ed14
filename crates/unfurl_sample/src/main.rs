//! Unfurl sample
//!
//! Drives a list of expandable rows through a scripted session on a
//! simulated clock: expand rows, page the recycled holders away and back,
//! and collapse again, logging heights and scroll offsets as it goes.
//!
//! Set `RUST_LOG=debug` to follow state changes and auto-scroll decisions.

mod adapter;
mod config;
mod demo;
mod holder;
mod units;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::SampleConfig;

/// Scripted demo of expandable list rows
#[derive(Parser, Debug)]
#[command(name = "unfurl-sample")]
#[command(about = "Scripted demo of expandable list rows")]
#[command(version)]
struct Args {
    /// Config file, or a directory containing unfurl.toml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of list rows (overrides the config file)
    #[arg(short, long)]
    rows: Option<usize>,

    /// Frame limit for each step to settle (overrides the config file)
    #[arg(long)]
    frames: Option<usize>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SampleConfig::load(path)?,
        None => SampleConfig::default(),
    };
    if let Some(rows) = args.rows {
        config.rows = rows;
    }
    if let Some(frames) = args.frames {
        config.max_frames = frames;
    }

    tracing::info!(
        rows = config.rows,
        pool_size = config.pool_size,
        density = config.density,
        "starting sample"
    );

    demo::run(&config).context("demo session failed")
}
