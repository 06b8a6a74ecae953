use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use flock_shared::{presets, BoundaryPolicy, FlockSettings};

use crate::cli::Args;

/// Read a JSON settings file; fields it leaves out stay unset
pub fn load_settings_file(path: &Path) -> Result<FlockSettings> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings file {}", path.display()))?;
    FlockSettings::from_json_str(&text)
        .with_context(|| format!("Failed to parse settings file {}", path.display()))
}

/// Preset for the agent count, then the settings file, then command line overrides
pub fn resolve_settings(args: &Args) -> Result<FlockSettings> {
    let mut settings = match presets::for_agent_count(args.agents) {
        Some(preset) => preset,
        None => {
            log::warn!("No preset for {} agents", args.agents);
            FlockSettings::default()
        }
    };

    if let Some(path) = &args.settings {
        log::info!("Loading settings from {}", path.display());
        settings = settings.merged_with(load_settings_file(path)?);
    }

    let overrides = FlockSettings {
        step_size: args.step_size,
        boundary_policy: args.all_axes.then_some(BoundaryPolicy::AllAxes),
        ..Default::default()
    };

    Ok(settings.merged_with(overrides))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_preset_with_overrides() {
        let args = Args::try_parse_from([
            "flock-client",
            "-n",
            "4096",
            "--step-size",
            "4",
            "--all-axes",
        ])
        .unwrap();
        let settings = resolve_settings(&args).unwrap();
        assert_eq!(settings.step_size, Some(4));
        assert_eq!(settings.boundary_policy, Some(BoundaryPolicy::AllAxes));
        assert_eq!(settings.min_speed, Some(1.2));
    }

    #[test]
    fn test_unknown_count_starts_empty() {
        let args = Args::try_parse_from(["flock-client", "-n", "1000"]).unwrap();
        let settings = resolve_settings(&args).unwrap();
        assert_eq!(settings.missing_fields().len(), 11);
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = load_settings_file(Path::new("/nonexistent/flock.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/flock.json"));
    }
}
