//! # Jelly Application Loop
//!
//! Drives a [`softbody::Simulation`] from a fixed-rate host loop. Each frame
//! applies pending config reloads, fires scheduled disturbances and lets the
//! simulation catch up with the wall clock. Rendering is out of scope; the
//! loop logs a summary of the lattice instead.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{ensure, Context, Result};
use softbody::{Simulation, Vec3};
use tracing::{error, info};

use crate::config::ConfigFile;
use crate::watcher;

pub struct RunOptions {
    pub config: Option<PathBuf>,
    pub seconds: f32,
    pub fps: f32,
    pub watch: bool,
    pub disturb_every: Option<f32>,
    pub log_every: u64,
}

/// Run the simulation for `options.seconds` of wall-clock time.
///
/// # Errors
///
/// Returns an error if the config cannot be loaded or the options are out of
/// range. A failing watcher is logged and the run continues without it.
pub fn run(options: &RunOptions) -> Result<()> {
    let run_duration = seconds("--seconds", options.seconds)?;
    ensure!(
        options.fps.is_finite() && options.fps > 0.0,
        "--fps must be positive"
    );
    let frame_duration = seconds("--fps", 1.0 / options.fps)?;
    let disturb_period = match options.disturb_every {
        Some(every) => {
            ensure!(every > 0.0, "--disturb-every must be positive");
            Some(seconds("--disturb-every", every)?)
        }
        None => None,
    };

    let config = match &options.config {
        Some(path) => ConfigFile::load(path)?,
        None => ConfigFile::default(),
    };

    let config_watcher = match (&options.config, options.watch) {
        (Some(path), true) => match watcher::start(path) {
            Ok(w) => Some(w),
            Err(e) => {
                error!("Failed to start config watcher: {e:?}");
                None
            }
        },
        (None, true) => {
            error!("--watch needs --config; running without hot reload");
            None
        }
        _ => None,
    };

    info!(
        cube_size = ?config.scene.cube_size,
        half_extents = ?config.scene.constraint_half_extents,
        dt = config.params.dt,
        gravity = config.params.gravity,
        "initializing jelly cube"
    );
    let mut sim = Simulation::new(config.scene, config.params);

    let log_every = options.log_every.max(1);

    let run_start = Instant::now();
    let mut next_disturb = disturb_period.and_then(|p| run_start.checked_add(p));
    let mut frame: u64 = 0;
    sim.start();

    while run_start.elapsed() < run_duration {
        let frame_start = Instant::now();

        if let Some(update) = config_watcher.as_ref().and_then(watcher::ConfigWatcher::latest) {
            sim.apply_params(&update.params);
        }

        if let (Some(due), Some(period)) = (next_disturb, disturb_period) {
            if frame_start >= due {
                sim.disturb();
                next_disturb = due.checked_add(period);
            }
        }

        sim.update();
        frame += 1;

        if frame % log_every == 0 {
            log_state(&sim, frame);
        }

        let frame_time = frame_start.elapsed();
        if frame_time < frame_duration {
            std::thread::sleep(frame_duration - frame_time);
        }
    }

    sim.stop();
    log_state(&sim, frame);
    info!(
        frames = frame,
        iterations = sim.iterations(),
        "simulation finished"
    );
    Ok(())
}

/// Non-negative, finite and representable as a [`Duration`].
fn seconds(flag: &str, value: f32) -> Result<Duration> {
    Duration::try_from_secs_f32(value).with_context(|| format!("{flag} out of range: {value}"))
}

fn log_state(sim: &Simulation, frame: u64) {
    let positions = sim.positions();
    let centre = positions.iter().copied().sum::<Vec3>() / positions.len() as f32;
    let lowest = positions.iter().map(|p| p.y).fold(f32::INFINITY, f32::min);
    info!(
        frame,
        t = sim.time(),
        iterations = sim.iterations(),
        centre = ?centre,
        lowest_y = lowest,
        kinetic = sim.kinetic_energy(),
        "lattice state"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seconds_accepts_representable_values() {
        assert_eq!(seconds("--seconds", 0.0).unwrap(), Duration::ZERO);
        assert_eq!(seconds("--seconds", 1.5).unwrap(), Duration::from_millis(1500));
    }

    #[test]
    fn test_seconds_rejects_out_of_range_values() {
        for value in [-1.0, f32::NAN, f32::INFINITY, 1e30] {
            let err = seconds("--seconds", value).unwrap_err();
            assert!(err.to_string().contains("--seconds out of range"), "{err}");
        }
    }
}
