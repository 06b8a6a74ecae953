//! Headless driver for the flocking engine: command line parsing, settings
//! layering, the step loop and the statistics it reports.

pub mod cli;
pub mod driver;
pub mod settings;
pub mod stats;

pub use cli::Args;
pub use driver::{build_flock, run, RunOptions};
pub use settings::{load_settings_file, resolve_settings};
pub use stats::FlockStats;
