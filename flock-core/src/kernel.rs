//! Per-agent update kernels.
//!
//! The velocity pass reads only the previous frame's committed state and the
//! position pass reads only the previous positions plus the velocities the
//! velocity pass just wrote, so every agent can be computed independently.
//! With the `parallel` feature both passes run on the rayon pool.

use flock_shared::{BoundaryPolicy, Bounds};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::grid::AgentGrid;
use crate::params::FlockParams;
use crate::vector::Vector3D;
use crate::window::NeighborWindow;

/// Weight of the summed flocking rules relative to the current velocity
pub const RULE_GAIN: f32 = 0.2;

/// Radius of the point-avoidance zone
pub const DEFAULT_AVOID_RADIUS: f32 = 5.0;

/// Rescale `v` so its magnitude lies in `min..=max`; zero stays zero
pub fn clamp_speed(v: Vector3D, min: f32, max: f32) -> Vector3D {
    if v.is_zero() {
        return Vector3D::zero();
    }
    v.with_magnitude(v.magnitude().max(min).min(max))
}

/// Corrective velocity for a projected position outside `bounds`.
///
/// Each axis is checked max first, then min. Under
/// [`BoundaryPolicy::FirstAxis`] only the first violated axis in X, Y, Z order
/// is steered.
pub fn boundary_steering(
    projected: Vector3D,
    bounds: &Bounds,
    multiplier: f32,
    policy: BoundaryPolicy,
) -> Vector3D {
    let coords = projected.to_array();
    let mut steering = [0.0f32; 3];

    for (axis, &(min, max)) in bounds.axes().iter().enumerate() {
        let push = if coords[axis] > max {
            -multiplier
        } else if coords[axis] < min {
            multiplier
        } else {
            continue;
        };
        steering[axis] = push;
        if policy == BoundaryPolicy::FirstAxis {
            break;
        }
    }

    Vector3D::from(steering)
}

/// Repulsion from a fixed point, used for scripted one-off effects
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Avoidance {
    pub target: Vector3D,
    pub radius: f32,
}

impl Default for Avoidance {
    fn default() -> Self {
        Self::new(Vector3D::zero())
    }
}

impl Avoidance {
    pub fn new(target: Vector3D) -> Self {
        Self {
            target,
            radius: DEFAULT_AVOID_RADIUS,
        }
    }

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    /// Push directly away from the target, growing with distance inside the zone
    pub fn push(&self, position: Vector3D) -> Vector3D {
        if position.distance(&self.target) < self.radius {
            position - self.target
        } else {
            Vector3D::zero()
        }
    }
}

/// Clamped rule outputs for one agent over one frame's neighbour slice
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RuleContributions {
    pub separation: Vector3D,
    pub cohesion: Vector3D,
    pub alignment: Vector3D,
}

impl RuleContributions {
    pub fn total(&self) -> Vector3D {
        self.separation + self.cohesion + self.alignment
    }
}

/// Everything the velocity pass reads, shared by all agents of one frame
pub(crate) struct VelocityKernel<'a> {
    pub params: &'a FlockParams,
    pub grid: AgentGrid,
    pub window: NeighborWindow,
    pub avoidance: Option<Avoidance>,
    pub positions: &'a [Vector3D],
    pub velocities: &'a [Vector3D],
}

impl VelocityKernel<'_> {
    fn clamp(&self, v: Vector3D) -> Vector3D {
        clamp_speed(v, self.params.min_speed, self.params.max_speed)
    }

    pub fn contributions(&self, index: usize) -> RuleContributions {
        let position = self.positions[index];
        let velocity = self.velocities[index];

        let separation_sq = self.params.separation.radius_squared();
        let cohesion_sq = self.params.cohesion.radius_squared();
        let alignment_sq = self.params.alignment.radius_squared();

        let mut centroid = Vector3D::zero();
        let mut cohesion_count = 0u32;
        let mut heading = Vector3D::zero();
        let mut alignment_count = 0u32;
        let mut push = Vector3D::zero();

        for column in self.window.columns() {
            for row in 0..self.grid.side() {
                let neighbor = self.grid.index(row, column);
                let neighbor_position = self.positions[neighbor];
                let delta = neighbor_position - position;
                let dist_sq = delta.magnitude_squared();

                if dist_sq < cohesion_sq {
                    centroid += neighbor_position;
                    cohesion_count += 1;
                }
                if dist_sq < alignment_sq {
                    heading += self.velocities[neighbor];
                    alignment_count += 1;
                }
                if dist_sq < separation_sq {
                    push -= delta;
                }
            }
        }

        let cohesion = if cohesion_count > 0 {
            let centroid = centroid / cohesion_count as f32;
            self.clamp((centroid - position) * self.params.cohesion.multiplier)
        } else {
            Vector3D::zero()
        };

        let alignment = if alignment_count > 0 {
            let heading = heading / alignment_count as f32;
            self.clamp((heading - velocity) * self.params.alignment.multiplier)
        } else {
            Vector3D::zero()
        };

        RuleContributions {
            separation: self.clamp(push),
            cohesion,
            alignment,
        }
    }

    pub fn velocity(&self, index: usize) -> Vector3D {
        let position = self.positions[index];
        let mut velocity = self.velocities[index] + self.contributions(index).total() * RULE_GAIN;

        if let Some(avoidance) = &self.avoidance {
            velocity += avoidance.push(position);
        }

        velocity += boundary_steering(
            position + velocity,
            &self.params.bounds,
            self.params.bounds_multiplier,
            self.params.boundary_policy,
        );

        self.clamp(velocity)
    }

    /// Fill `out` with the next velocity of every agent
    pub fn run(&self, out: &mut [Vector3D]) {
        #[cfg(feature = "parallel")]
        out.par_iter_mut()
            .enumerate()
            .for_each(|(index, v)| *v = self.velocity(index));

        #[cfg(not(feature = "parallel"))]
        out.iter_mut()
            .enumerate()
            .for_each(|(index, v)| *v = self.velocity(index));
    }
}

/// `out[i] = positions[i] + velocities[i]`
pub(crate) fn integrate_positions(
    positions: &[Vector3D],
    velocities: &[Vector3D],
    out: &mut [Vector3D],
) {
    #[cfg(feature = "parallel")]
    out.par_iter_mut()
        .zip(positions.par_iter().zip(velocities.par_iter()))
        .for_each(|(p_out, (&p, &v))| *p_out = p + v);

    #[cfg(not(feature = "parallel"))]
    out.iter_mut()
        .zip(positions.iter().zip(velocities.iter()))
        .for_each(|(p_out, (&p, &v))| *p_out = p + v);
}
