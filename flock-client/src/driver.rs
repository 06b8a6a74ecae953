use std::time::Instant;

use anyhow::{Context, Result};
use flock_core::{Avoidance, Flock, FlockParams};
use flock_shared::{FlockSettings, StatusReport};

use crate::cli::Args;
use crate::stats::FlockStats;

/// What one headless run does besides stepping
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    pub steps: u64,
    /// Log statistics every N steps; 0 disables periodic logging
    pub report_every: u64,
    pub avoidance: Option<Avoidance>,
    /// Clear the avoidance point after this many steps
    pub avoid_for: Option<u64>,
}

impl RunOptions {
    pub fn from_args(args: &Args) -> Self {
        let avoidance = args.avoid.map(|target| {
            let avoidance = Avoidance::new(target);
            match args.avoid_radius {
                Some(radius) => avoidance.with_radius(radius),
                None => avoidance,
            }
        });

        Self {
            steps: args.steps,
            report_every: args.report_every,
            avoidance,
            avoid_for: args.avoid_for,
        }
    }
}

/// Validate `settings`, allocate the buffers and seed the initial state
pub fn build_flock(agent_count: usize, settings: FlockSettings, seed: Option<u64>) -> Result<Flock> {
    let params = FlockParams::try_from(settings).context("Incomplete flock settings")?;
    let setup = Flock::create(agent_count, params).context("Invalid flock configuration")?;

    let flock = match seed {
        Some(seed) => {
            log::info!("Seeding initial state with {}", seed);
            setup.initialize_seeded(seed)
        }
        None => setup.initialize(),
    }
    .context("Failed to initialize flock state")?;

    Ok(flock)
}

/// Step `flock` `options.steps` times and summarize the final state
pub fn run(flock: &mut Flock, options: &RunOptions) -> StatusReport {
    log::info!(
        "Running {} steps with {} agents ({}x{} grid, step size {})",
        options.steps,
        flock.agent_count(),
        flock.agent_grid_side(),
        flock.agent_grid_side(),
        flock.params().step_size
    );

    if let Some(avoidance) = options.avoidance {
        log::info!(
            "Avoiding {:?} within {} units",
            avoidance.target,
            avoidance.radius
        );
        flock.set_avoidance(Some(avoidance));
    }

    let start = Instant::now();
    for step in 1..=options.steps {
        flock.step();

        if options.avoid_for == Some(step) && flock.avoidance().is_some() {
            log::info!("Clearing avoidance point after step {}", step);
            flock.set_avoidance(None);
        }

        if options.report_every > 0 && step % options.report_every == 0 {
            let stats = FlockStats::measure(flock);
            log::info!(
                "step {}: speed {:.2} (min {:.2}, max {:.2}), centroid ({:.1}, {:.1}, {:.1}), {:.1}% inside bounds",
                step,
                stats.mean_speed,
                stats.min_speed,
                stats.max_speed,
                stats.centroid.x,
                stats.centroid.y,
                stats.centroid.z,
                stats.inside_bounds * 100.0
            );
            if stats.speed_violations > 0 {
                log::warn!(
                    "{} agents outside the speed range at step {}",
                    stats.speed_violations,
                    step
                );
            }
        }
    }
    let elapsed = start.elapsed();

    let stats = FlockStats::measure(flock);
    let elapsed_secs = elapsed.as_secs_f64();
    StatusReport {
        agent_count: flock.agent_count(),
        grid_side: flock.agent_grid_side(),
        steps: flock.generation(),
        step_offset: flock.step_offset() as u32,
        mean_speed: stats.mean_speed,
        min_speed: stats.min_speed,
        max_speed: stats.max_speed,
        centroid: stats.centroid.to_array(),
        inside_bounds: stats.inside_bounds,
        speed_violations: stats.speed_violations,
        elapsed_ms: elapsed_secs * 1000.0,
        steps_per_second: if elapsed_secs > 0.0 {
            options.steps as f64 / elapsed_secs
        } else {
            0.0
        },
    }
}
