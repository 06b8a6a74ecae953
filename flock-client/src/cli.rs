use std::path::PathBuf;

use clap::Parser;
use flock_core::Vector3D;

#[derive(Parser, Debug)]
#[command(author, version, about = "Headless flocking simulation driver", long_about = None)]
pub struct Args {
    /// Number of agents: 1, 4, 16, 64, 256, 1024, 4096 or 16384
    #[arg(short = 'n', long, default_value_t = 1024)]
    pub agents: usize,

    /// Number of steps to simulate
    #[arg(short, long, default_value_t = 600)]
    pub steps: u64,

    /// JSON settings file layered over the preset for the agent count
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Override the number of frames one neighbour scan is spread over
    #[arg(long)]
    pub step_size: Option<u32>,

    /// Seed for a reproducible initial state
    #[arg(long)]
    pub seed: Option<u64>,

    /// Log flock statistics every N steps (0 disables)
    #[arg(long, default_value_t = 60)]
    pub report_every: u64,

    /// Steer on every axis that leaves the bounds instead of only the first
    #[arg(long)]
    pub all_axes: bool,

    /// Point agents are pushed away from, as x,y,z
    #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
    pub avoid: Option<Vector3D>,

    /// Radius of the avoidance zone
    #[arg(long, requires = "avoid")]
    pub avoid_radius: Option<f32>,

    /// Only avoid the point during the first N steps
    #[arg(long, requires = "avoid")]
    pub avoid_for: Option<u64>,

    /// Print the effective settings as JSON and exit
    #[arg(long)]
    pub print_settings: bool,

    /// Print the final report as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub debug: bool,
}

/// Parse `x,y,z` into a point
pub fn parse_point(s: &str) -> Result<Vector3D, String> {
    let coords = s
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<f32>()
                .map_err(|e| format!("invalid coordinate '{}': {}", part.trim(), e))
        })
        .collect::<Result<Vec<_>, _>>()?;

    match coords.as_slice() {
        &[x, y, z] => Ok(Vector3D::new(x, y, z)),
        _ => Err(format!("expected x,y,z but got {} values", coords.len())),
    }
}
