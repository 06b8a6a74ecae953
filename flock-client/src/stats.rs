use flock_core::{Flock, Vector3D};

/// Slack allowed when checking speeds against the configured range
pub const SPEED_TOLERANCE: f32 = 1e-3;

/// Aggregate view of the current buffer pair
#[derive(Debug, Clone, PartialEq)]
pub struct FlockStats {
    pub mean_speed: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    pub centroid: Vector3D,
    /// Fraction of agents inside the configured bounds
    pub inside_bounds: f32,
    /// Non-zero velocities whose magnitude is outside the configured range
    pub speed_violations: usize,
}

impl FlockStats {
    pub fn measure(flock: &Flock) -> Self {
        let params = flock.params();
        let (positions, velocities) = flock.current();
        let count = positions.len() as f32;

        let mut min_speed = f32::INFINITY;
        let mut max_speed = 0.0f32;
        let mut total_speed = 0.0f32;
        let mut speed_violations = 0;
        for v in velocities {
            let speed = v.magnitude();
            min_speed = min_speed.min(speed);
            max_speed = max_speed.max(speed);
            total_speed += speed;
            if !v.is_zero()
                && (speed < params.min_speed - SPEED_TOLERANCE
                    || speed > params.max_speed + SPEED_TOLERANCE)
            {
                speed_violations += 1;
            }
        }

        let inside = positions
            .iter()
            .filter(|p| params.bounds.contains(p.to_array()))
            .count();

        Self {
            mean_speed: total_speed / count,
            min_speed,
            max_speed,
            centroid: positions.iter().copied().sum::<Vector3D>() / count,
            inside_bounds: inside as f32 / count,
            speed_violations,
        }
    }
}
