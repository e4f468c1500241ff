//! # Jelly Runtime
//!
//! Headless driver for the jelly cube. Loads a JSON scene, runs the lattice
//! in real time for a fixed wall-clock duration and logs its state. With
//! `--watch` the config file is hot-reloaded and its parameters applied to the
//! running simulation.

#![deny(clippy::all, clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]

mod app;
mod config;
mod watcher;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Real-time mass-spring jelly cube
#[derive(Parser, Debug)]
#[command(name = "jelly", version, about, long_about = None)]
struct Args {
    /// JSON file with `scene` and `params` sections
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Wall-clock seconds to run for
    #[arg(short, long, default_value_t = 5.0)]
    seconds: f32,

    /// Host frame rate
    #[arg(long, default_value_t = 60.0)]
    fps: f32,

    /// Reload parameters whenever the config file changes
    #[arg(short, long)]
    watch: bool,

    /// Disturb the lattice every this many seconds
    #[arg(long)]
    disturb_every: Option<f32>,

    /// Log the lattice state every this many frames
    #[arg(long, default_value_t = 60)]
    log_every: u64,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();
    app::run(&app::RunOptions {
        config: args.config,
        seconds: args.seconds,
        fps: args.fps,
        watch: args.watch,
        disturb_every: args.disturb_every,
        log_every: args.log_every,
    })
}
