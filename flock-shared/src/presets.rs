//! Tuned parameter sets per population size.
//!
//! The look of a flock depends heavily on the parameters relative to the size
//! of the domain, so each supported population gets its own set. Populations
//! smaller than 1024 reuse the 1024 values.

use crate::{Bounds, FlockSettings};

/// Populations that have a tuned preset
pub const PRESET_AGENT_COUNTS: [usize; 8] = [1, 4, 16, 64, 256, 1024, 4096, 16384];

fn base(half_extent: f32, step_size: u32) -> FlockSettings {
    FlockSettings {
        bounds: Some(Bounds::cube(half_extent)),
        bounds_multiplier: Some(1.0 / 2.0),
        min_speed: Some(1.2),
        max_speed: Some(3.5),
        separation_radius: Some(7.0),
        separation_multiplier: Some(1.0 / 5.0),
        cohesion_radius: Some(1.0),
        cohesion_multiplier: Some(0.01),
        alignment_radius: Some(15.0),
        alignment_multiplier: Some(1.0 / 8.0),
        step_size: Some(step_size),
        boundary_policy: None,
    }
}

/// Preset for `agent_count`, or `None` when the population has no preset
pub fn for_agent_count(agent_count: usize) -> Option<FlockSettings> {
    match agent_count {
        1 | 4 | 16 | 64 | 256 | 1024 => Some(base(75.0, 1)),
        4096 => Some(base(110.0, 2)),
        16384 => Some(base(110.0, 16)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_listed_count_has_complete_preset() {
        for count in PRESET_AGENT_COUNTS {
            let settings = for_agent_count(count).unwrap();
            assert!(settings.missing_fields().is_empty(), "count {}", count);
        }
    }

    #[test]
    fn test_small_populations_share_1024_preset() {
        assert_eq!(for_agent_count(16), for_agent_count(1024));
    }

    #[test]
    fn test_large_populations_chunk_neighbor_scan() {
        assert_eq!(for_agent_count(4096).unwrap().step_size, Some(2));
        assert_eq!(for_agent_count(16384).unwrap().step_size, Some(16));
        assert_eq!(
            for_agent_count(16384).unwrap().bounds,
            Some(Bounds::cube(110.0))
        );
    }

    #[test]
    fn test_unsupported_count_has_no_preset() {
        assert!(for_agent_count(1000).is_none());
    }
}
