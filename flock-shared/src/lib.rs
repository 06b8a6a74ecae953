use serde::{Deserialize, Serialize};

pub mod presets;

/// Axis-aligned simulation domain
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
    pub min_z: f32,
    pub max_z: f32,
}

impl Bounds {
    pub fn new(min_x: f32, max_x: f32, min_y: f32, max_y: f32, min_z: f32, max_z: f32) -> Self {
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
            min_z,
            max_z,
        }
    }

    /// A cube centred on the origin spanning `-half..=half` on every axis
    pub fn cube(half: f32) -> Self {
        Self::new(-half, half, -half, half, -half, half)
    }

    /// `(min, max)` per axis in X, Y, Z order
    pub fn axes(&self) -> [(f32, f32); 3] {
        [
            (self.min_x, self.max_x),
            (self.min_y, self.max_y),
            (self.min_z, self.max_z),
        ]
    }

    pub fn contains(&self, point: [f32; 3]) -> bool {
        self.axes()
            .iter()
            .zip(point.iter())
            .all(|(&(min, max), &v)| v >= min && v <= max)
    }
}

/// How boundary steering treats an agent that is outside the domain on several axes
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryPolicy {
    /// Steer on the first violated axis only, checking X, then Y, then Z
    #[default]
    FirstAxis,
    /// Steer on every violated axis
    AllAxes,
}

/// Flocking parameters as they arrive from a settings file or a preset.
///
/// Every field is optional so that a partially specified file can be layered
/// over a preset; turning it into engine parameters reports all fields that
/// are still missing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FlockSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<Bounds>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds_multiplier: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_speed: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_speed: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub separation_radius: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub separation_multiplier: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cohesion_radius: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cohesion_multiplier: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment_radius: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment_multiplier: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step_size: Option<u32>,
    /// Not required; engines fall back to [`BoundaryPolicy::FirstAxis`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boundary_policy: Option<BoundaryPolicy>,
}

impl FlockSettings {
    /// Names of the required fields that are not set, in declaration order
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let checks = [
            ("bounds", self.bounds.is_none()),
            ("boundsMultiplier", self.bounds_multiplier.is_none()),
            ("minSpeed", self.min_speed.is_none()),
            ("maxSpeed", self.max_speed.is_none()),
            ("separationRadius", self.separation_radius.is_none()),
            ("separationMultiplier", self.separation_multiplier.is_none()),
            ("cohesionRadius", self.cohesion_radius.is_none()),
            ("cohesionMultiplier", self.cohesion_multiplier.is_none()),
            ("alignmentRadius", self.alignment_radius.is_none()),
            ("alignmentMultiplier", self.alignment_multiplier.is_none()),
            ("stepSize", self.step_size.is_none()),
        ];

        checks
            .into_iter()
            .filter_map(|(name, missing)| missing.then_some(name))
            .collect()
    }

    /// Layer `overrides` on top of `self`; any field set in `overrides` wins
    pub fn merged_with(self, overrides: FlockSettings) -> Self {
        Self {
            bounds: overrides.bounds.or(self.bounds),
            bounds_multiplier: overrides.bounds_multiplier.or(self.bounds_multiplier),
            min_speed: overrides.min_speed.or(self.min_speed),
            max_speed: overrides.max_speed.or(self.max_speed),
            separation_radius: overrides.separation_radius.or(self.separation_radius),
            separation_multiplier: overrides
                .separation_multiplier
                .or(self.separation_multiplier),
            cohesion_radius: overrides.cohesion_radius.or(self.cohesion_radius),
            cohesion_multiplier: overrides.cohesion_multiplier.or(self.cohesion_multiplier),
            alignment_radius: overrides.alignment_radius.or(self.alignment_radius),
            alignment_multiplier: overrides.alignment_multiplier.or(self.alignment_multiplier),
            step_size: overrides.step_size.or(self.step_size),
            boundary_policy: overrides.boundary_policy.or(self.boundary_policy),
        }
    }

    #[cfg(feature = "json")]
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[cfg(feature = "json")]
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Summary of a flock after a run, printed by the headless driver
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StatusReport {
    pub agent_count: usize,
    pub grid_side: usize,
    pub steps: u64,
    pub step_offset: u32,
    pub mean_speed: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    pub centroid: [f32; 3],
    /// Fraction of agents whose position lies inside the configured bounds
    pub inside_bounds: f32,
    /// Agents whose speed fell outside the configured range (tolerance applied)
    pub speed_violations: usize,
    pub elapsed_ms: f64,
    pub steps_per_second: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_contains() {
        let bounds = Bounds::cube(10.0);
        assert!(bounds.contains([0.0, 10.0, -10.0]));
        assert!(!bounds.contains([10.5, 0.0, 0.0]));
        assert!(!bounds.contains([0.0, 0.0, -11.0]));
    }

    #[test]
    fn test_missing_fields_lists_everything_unset() {
        let settings = FlockSettings {
            min_speed: Some(1.0),
            step_size: Some(1),
            ..Default::default()
        };
        let missing = settings.missing_fields();
        assert_eq!(missing.len(), 9);
        assert!(missing.contains(&"bounds"));
        assert!(missing.contains(&"maxSpeed"));
        assert!(!missing.contains(&"minSpeed"));
        assert!(!missing.contains(&"stepSize"));
    }

    #[test]
    fn test_boundary_policy_is_not_required() {
        let settings = presets::for_agent_count(1024).unwrap();
        assert!(settings.boundary_policy.is_none());
        assert!(settings.missing_fields().is_empty());
    }

    #[test]
    fn test_merge_prefers_overrides() {
        let base = presets::for_agent_count(1024).unwrap();
        let overrides = FlockSettings {
            max_speed: Some(9.0),
            boundary_policy: Some(BoundaryPolicy::AllAxes),
            ..Default::default()
        };
        let merged = base.clone().merged_with(overrides);
        assert_eq!(merged.max_speed, Some(9.0));
        assert_eq!(merged.min_speed, base.min_speed);
        assert_eq!(merged.boundary_policy, Some(BoundaryPolicy::AllAxes));
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_settings_parse_camel_case_json() {
        let json = r#"{
            "bounds": { "minX": -75, "maxX": 75, "minY": -75, "maxY": 75, "minZ": -75, "maxZ": 75 },
            "boundsMultiplier": 0.5,
            "minSpeed": 1.2,
            "maxSpeed": 3.5,
            "stepSize": 2,
            "boundaryPolicy": "all_axes"
        }"#;
        let settings = FlockSettings::from_json_str(json).unwrap();
        assert_eq!(settings.bounds, Some(Bounds::cube(75.0)));
        assert_eq!(settings.step_size, Some(2));
        assert_eq!(settings.boundary_policy, Some(BoundaryPolicy::AllAxes));
        assert!(settings.missing_fields().contains(&"cohesionRadius"));
    }
}
