//! Double-buffered agent state.
//!
//! Two fixed slots hold positions and two hold velocities. One slot of each
//! pair is active (readable); a step writes the other slot and then flips the
//! active bit. Readers never name a slot, they only ask for the current pair.

use flock_shared::Bounds;
use rand::Rng;
use rand_distr::{Distribution, UnitSphere};

use crate::error::{ConfigError, FlockError};
use crate::vector::Vector3D;

/// Read side of the active pair plus write side of the inactive pair
pub(crate) struct Frame<'a> {
    pub positions: &'a [Vector3D],
    pub velocities: &'a [Vector3D],
    pub next_positions: &'a mut [Vector3D],
    pub next_velocities: &'a mut [Vector3D],
}

#[derive(Debug)]
pub struct StateStore {
    positions: [Vec<Vector3D>; 2],
    velocities: [Vec<Vector3D>; 2],
    active: usize,
    generation: u64,
}

fn reserve(buffer: &'static str, agents: usize) -> Result<Vec<Vector3D>, FlockError> {
    let mut data = Vec::new();
    data.try_reserve_exact(agents)
        .map_err(|source| FlockError::ResourceExhausted {
            buffer,
            agents,
            source,
        })?;
    Ok(data)
}

fn duplicate(buffer: &'static str, data: &[Vector3D]) -> Result<Vec<Vector3D>, FlockError> {
    let mut copy = reserve(buffer, data.len())?;
    copy.extend_from_slice(data);
    Ok(copy)
}

impl StateStore {
    /// Random agents spread uniformly over `bounds`, each moving in a random
    /// direction at a speed drawn uniformly from `min_speed..=max_speed`.
    ///
    /// Both slots of each pair start with identical contents.
    pub fn initialize<R: Rng + ?Sized>(
        agent_count: usize,
        bounds: &Bounds,
        min_speed: f32,
        max_speed: f32,
        rng: &mut R,
    ) -> Result<Self, FlockError> {
        let mut positions = reserve("position", agent_count)?;
        let mut velocities = reserve("velocity", agent_count)?;

        let [(min_x, max_x), (min_y, max_y), (min_z, max_z)] = bounds.axes();
        positions.extend((0..agent_count).map(|_| {
            Vector3D::new(
                min_x + rng.gen::<f32>() * (max_x - min_x),
                min_y + rng.gen::<f32>() * (max_y - min_y),
                min_z + rng.gen::<f32>() * (max_z - min_z),
            )
        }));

        // Direction and magnitude are sampled independently; the direction is
        // always a unit vector.
        velocities.extend((0..agent_count).map(|_| {
            let direction: [f32; 3] = UnitSphere.sample(rng);
            let speed = min_speed + rng.gen::<f32>() * (max_speed - min_speed);
            Vector3D::from(direction) * speed
        }));

        Self::from_state(agent_count, positions, velocities)
    }

    /// Start from caller supplied state; both vectors must hold `agent_count` entries
    pub fn from_state(
        agent_count: usize,
        positions: Vec<Vector3D>,
        velocities: Vec<Vector3D>,
    ) -> Result<Self, FlockError> {
        for (buffer, actual) in [("position", positions.len()), ("velocity", velocities.len())] {
            if actual != agent_count {
                return Err(ConfigError::StateLength {
                    buffer,
                    expected: agent_count,
                    actual,
                }
                .into());
            }
        }

        let positions_back = duplicate("position", &positions)?;
        let velocities_back = duplicate("velocity", &velocities)?;

        Ok(Self {
            positions: [positions, positions_back],
            velocities: [velocities, velocities_back],
            active: 0,
            generation: 0,
        })
    }

    pub fn agent_count(&self) -> usize {
        self.positions[self.active].len()
    }

    /// Number of swaps since the state was created
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn current(&self) -> (&[Vector3D], &[Vector3D]) {
        (
            &self.positions[self.active],
            &self.velocities[self.active],
        )
    }

    pub(crate) fn frame_mut(&mut self) -> Frame<'_> {
        let [p0, p1] = &mut self.positions;
        let [v0, v1] = &mut self.velocities;
        let ((positions, next_positions), (velocities, next_velocities)) = if self.active == 0 {
            ((p0, p1), (v0, v1))
        } else {
            ((p1, p0), (v1, v0))
        };

        Frame {
            positions: positions.as_slice(),
            velocities: velocities.as_slice(),
            next_positions: next_positions.as_mut_slice(),
            next_velocities: next_velocities.as_mut_slice(),
        }
    }

    /// Make the slots written by the last step current
    pub fn swap(&mut self) {
        self.active ^= 1;
        self.generation += 1;
    }

    /// Free all four buffers
    pub fn release(self) {
        log::trace!(
            "releasing state for {} agents after {} generations",
            self.agent_count(),
            self.generation
        );
    }
}
