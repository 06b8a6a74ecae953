use flock_shared::{presets, BoundaryPolicy, Bounds, FlockSettings};

use crate::error::ConfigError;

/// Radius and strength of one flocking rule
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuleParams {
    pub radius: f32,
    pub multiplier: f32,
}

impl RuleParams {
    pub fn new(radius: f32, multiplier: f32) -> Self {
        Self { radius, multiplier }
    }

    pub(crate) fn radius_squared(&self) -> f32 {
        self.radius * self.radius
    }
}

/// Fully specified flocking parameters, fixed for the lifetime of a run.
///
/// Changing any value means [`crate::Flock::reset`], which rebuilds the state
/// from scratch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlockParams {
    pub bounds: Bounds,
    /// Speed added on the violated axis when a projected position leaves the bounds
    pub bounds_multiplier: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    /// Only the radius takes part in the update: the separation push is
    /// clamped to the speed range rather than scaled.
    pub separation: RuleParams,
    pub cohesion: RuleParams,
    pub alignment: RuleParams,
    /// Number of frames one full neighbour scan is spread over
    pub step_size: u32,
    pub boundary_policy: BoundaryPolicy,
}

impl FlockParams {
    /// Tuned parameters for a supported population
    pub fn preset(agent_count: usize) -> Result<Self, ConfigError> {
        let settings = presets::for_agent_count(agent_count)
            .ok_or(ConfigError::UnsupportedAgentCount(agent_count))?;
        Self::try_from(settings)
    }

    pub fn with_boundary_policy(mut self, policy: BoundaryPolicy) -> Self {
        self.boundary_policy = policy;
        self
    }

    /// Check every value and numeric relationship.
    ///
    /// A `step_size` larger than the grid side is accepted; the frames whose
    /// offset has no matching column simply scan nothing.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let scalars = [
            ("bounds.minX", self.bounds.min_x),
            ("bounds.maxX", self.bounds.max_x),
            ("bounds.minY", self.bounds.min_y),
            ("bounds.maxY", self.bounds.max_y),
            ("bounds.minZ", self.bounds.min_z),
            ("bounds.maxZ", self.bounds.max_z),
            ("boundsMultiplier", self.bounds_multiplier),
            ("minSpeed", self.min_speed),
            ("maxSpeed", self.max_speed),
            ("separationRadius", self.separation.radius),
            ("separationMultiplier", self.separation.multiplier),
            ("cohesionRadius", self.cohesion.radius),
            ("cohesionMultiplier", self.cohesion.multiplier),
            ("alignmentRadius", self.alignment.radius),
            ("alignmentMultiplier", self.alignment.multiplier),
        ];
        for (field, value) in scalars {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field, value });
            }
        }

        for (axis, (min, max)) in ['x', 'y', 'z'].into_iter().zip(self.bounds.axes()) {
            if min > max {
                return Err(ConfigError::InvertedBounds { axis, min, max });
            }
            if !(max - min).is_finite() {
                return Err(ConfigError::UnboundedSpan { axis, min, max });
            }
        }

        // Everything after the six bounds coordinates must be non-negative
        for &(field, value) in &scalars[6..] {
            if value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }

        if self.min_speed > self.max_speed {
            return Err(ConfigError::InvertedSpeedRange {
                min: self.min_speed,
                max: self.max_speed,
            });
        }

        if self.step_size == 0 {
            return Err(ConfigError::ZeroStepSize);
        }

        Ok(())
    }
}

impl TryFrom<FlockSettings> for FlockParams {
    type Error = ConfigError;

    fn try_from(settings: FlockSettings) -> Result<Self, Self::Error> {
        match settings {
            FlockSettings {
                bounds: Some(bounds),
                bounds_multiplier: Some(bounds_multiplier),
                min_speed: Some(min_speed),
                max_speed: Some(max_speed),
                separation_radius: Some(separation_radius),
                separation_multiplier: Some(separation_multiplier),
                cohesion_radius: Some(cohesion_radius),
                cohesion_multiplier: Some(cohesion_multiplier),
                alignment_radius: Some(alignment_radius),
                alignment_multiplier: Some(alignment_multiplier),
                step_size: Some(step_size),
                boundary_policy,
            } => {
                let params = Self {
                    bounds,
                    bounds_multiplier,
                    min_speed,
                    max_speed,
                    separation: RuleParams::new(separation_radius, separation_multiplier),
                    cohesion: RuleParams::new(cohesion_radius, cohesion_multiplier),
                    alignment: RuleParams::new(alignment_radius, alignment_multiplier),
                    step_size,
                    boundary_policy: boundary_policy.unwrap_or_default(),
                };
                params.validate()?;
                Ok(params)
            }
            incomplete => Err(ConfigError::MissingParameters(
                incomplete.missing_fields(),
            )),
        }
    }
}

impl From<&FlockParams> for FlockSettings {
    fn from(params: &FlockParams) -> Self {
        Self {
            bounds: Some(params.bounds),
            bounds_multiplier: Some(params.bounds_multiplier),
            min_speed: Some(params.min_speed),
            max_speed: Some(params.max_speed),
            separation_radius: Some(params.separation.radius),
            separation_multiplier: Some(params.separation.multiplier),
            cohesion_radius: Some(params.cohesion.radius),
            cohesion_multiplier: Some(params.cohesion.multiplier),
            alignment_radius: Some(params.alignment.radius),
            alignment_multiplier: Some(params.alignment.multiplier),
            step_size: Some(params.step_size),
            boundary_policy: Some(params.boundary_policy),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> FlockParams {
        FlockParams::preset(1024).unwrap()
    }

    #[test]
    fn test_preset_values() {
        let p = params();
        assert_eq!(p.bounds, Bounds::cube(75.0));
        assert_eq!(p.min_speed, 1.2);
        assert_eq!(p.max_speed, 3.5);
        assert_eq!(p.alignment, RuleParams::new(15.0, 0.125));
        assert_eq!(p.step_size, 1);
        assert_eq!(p.boundary_policy, BoundaryPolicy::FirstAxis);
    }

    #[test]
    fn test_missing_settings_are_enumerated() {
        let settings = FlockSettings {
            bounds: Some(Bounds::cube(10.0)),
            ..Default::default()
        };
        match FlockParams::try_from(settings) {
            Err(ConfigError::MissingParameters(fields)) => {
                assert_eq!(fields.len(), 10);
                assert_eq!(fields[0], "boundsMultiplier");
                assert_eq!(fields[9], "stepSize");
            }
            other => panic!("expected missing parameters, got {:?}", other),
        }
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let mut p = params();
        p.bounds.min_y = 100.0;
        assert_eq!(
            p.validate(),
            Err(ConfigError::InvertedBounds {
                axis: 'y',
                min: 100.0,
                max: 75.0
            })
        );
    }

    #[test]
    fn test_inverted_speed_rejected() {
        let mut p = params();
        p.min_speed = 5.0;
        assert!(matches!(
            p.validate(),
            Err(ConfigError::InvertedSpeedRange { .. })
        ));
    }

    #[test]
    fn test_negative_radius_rejected() {
        let mut p = params();
        p.cohesion.radius = -1.0;
        assert_eq!(
            p.validate(),
            Err(ConfigError::Negative {
                field: "cohesionRadius",
                value: -1.0
            })
        );
    }

    #[test]
    fn test_non_finite_rejected() {
        let mut p = params();
        p.max_speed = f32::NAN;
        assert!(matches!(
            p.validate(),
            Err(ConfigError::NonFinite {
                field: "maxSpeed",
                ..
            })
        ));
    }

    #[test]
    fn test_zero_step_size_rejected() {
        let mut p = params();
        p.step_size = 0;
        assert_eq!(p.validate(), Err(ConfigError::ZeroStepSize));
        // Wider than any grid side is fine
        p.step_size = 16;
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_overflowing_bounds_span_rejected() {
        let mut p = params();
        p.bounds = Bounds::cube(3.0e38);
        assert_eq!(
            p.validate(),
            Err(ConfigError::UnboundedSpan {
                axis: 'x',
                min: -3.0e38,
                max: 3.0e38
            })
        );

        // A huge but representable span still validates
        p.bounds = Bounds::cube(1.0e38);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_settings_roundtrip_keeps_policy() {
        let p = params().with_boundary_policy(BoundaryPolicy::AllAxes);
        let settings = FlockSettings::from(&p);
        assert_eq!(FlockParams::try_from(settings).unwrap(), p);
    }
}
