use flock_shared::FlockSettings;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::FlockError;
use crate::grid::AgentGrid;
use crate::kernel::{integrate_positions, Avoidance, RuleContributions, VelocityKernel};
use crate::params::FlockParams;
use crate::state::{Frame, StateStore};
use crate::vector::Vector3D;
use crate::window::NeighborWindow;

/// A validated population size and parameter set, ready to be given state.
///
/// Produced by [`Flock::create`] and handed back by [`Flock::release`], so the
/// same configuration can be initialized again.
#[derive(Debug, Clone, PartialEq)]
pub struct FlockSetup {
    grid: AgentGrid,
    params: FlockParams,
}

impl FlockSetup {
    pub fn grid(&self) -> AgentGrid {
        self.grid
    }

    pub fn params(&self) -> &FlockParams {
        &self.params
    }

    /// Random initial state from the thread-local generator
    pub fn initialize(self) -> Result<Flock, FlockError> {
        self.initialize_with_rng(&mut rand::thread_rng())
    }

    /// Reproducible random initial state
    pub fn initialize_seeded(self, seed: u64) -> Result<Flock, FlockError> {
        self.initialize_with_rng(&mut StdRng::seed_from_u64(seed))
    }

    pub fn initialize_with_rng<R: Rng + ?Sized>(self, rng: &mut R) -> Result<Flock, FlockError> {
        let state = StateStore::initialize(
            self.grid.agent_count(),
            &self.params.bounds,
            self.params.min_speed,
            self.params.max_speed,
            rng,
        )?;
        Ok(self.into_flock(state))
    }

    /// Start from explicit positions and velocities, one entry per agent
    pub fn initialize_from(
        self,
        positions: Vec<Vector3D>,
        velocities: Vec<Vector3D>,
    ) -> Result<Flock, FlockError> {
        let state = StateStore::from_state(self.grid.agent_count(), positions, velocities)?;
        Ok(self.into_flock(state))
    }

    fn into_flock(self, state: StateStore) -> Flock {
        log::debug!(
            "initialized {} agents inside {:?}",
            self.grid.agent_count(),
            self.params.bounds
        );
        let window = NeighborWindow::new(self.grid.side(), self.params.step_size);
        Flock {
            setup: self,
            state,
            window,
            avoidance: None,
        }
    }
}

/// A running flock: parameters, double-buffered state and scan position
#[derive(Debug)]
pub struct Flock {
    setup: FlockSetup,
    state: StateStore,
    window: NeighborWindow,
    avoidance: Option<Avoidance>,
}

impl Flock {
    /// Validate the population size and parameters.
    ///
    /// `agent_count` must be `side * side` for a side in
    /// [`crate::grid::SUPPORTED_GRID_SIDES`].
    pub fn create(agent_count: usize, params: FlockParams) -> Result<FlockSetup, FlockError> {
        let grid = AgentGrid::for_agent_count(agent_count)?;
        params.validate()?;
        log::debug!(
            "creating flock of {} agents on a {}x{} grid, step size {}, {:?} boundary steering",
            agent_count,
            grid.side(),
            grid.side(),
            params.step_size,
            params.boundary_policy
        );
        Ok(FlockSetup { grid, params })
    }

    /// [`create`](Self::create) from possibly incomplete settings
    pub fn create_with_settings(
        agent_count: usize,
        settings: FlockSettings,
    ) -> Result<FlockSetup, FlockError> {
        let params = FlockParams::try_from(settings)?;
        Self::create(agent_count, params)
    }

    /// Advance the simulation by one tick.
    ///
    /// New velocities are computed from the current pair, new positions from
    /// the current positions and the new velocities, then the written slots
    /// become current.
    pub fn step(&mut self) {
        let Frame {
            positions,
            velocities,
            next_positions,
            next_velocities,
        } = self.state.frame_mut();

        let kernel = VelocityKernel {
            params: &self.setup.params,
            grid: self.setup.grid,
            window: self.window,
            avoidance: self.avoidance,
            positions,
            velocities,
        };
        kernel.run(next_velocities);
        integrate_positions(positions, next_velocities, next_positions);

        self.window.advance();
        self.state.swap();

        log::trace!(
            "step {} done, next neighbour offset {}",
            self.state.generation(),
            self.window.offset()
        );
    }

    pub fn current_positions(&self) -> &[Vector3D] {
        self.state.current().0
    }

    pub fn current_velocities(&self) -> &[Vector3D] {
        self.state.current().1
    }

    /// `(positions, velocities)` of the current pair
    pub fn current(&self) -> (&[Vector3D], &[Vector3D]) {
        self.state.current()
    }

    /// Clamped rule outputs the next step would compute for agent `index`,
    /// or `None` past the end of the population
    pub fn rule_contributions(&self, index: usize) -> Option<RuleContributions> {
        if index >= self.agent_count() {
            return None;
        }
        let (positions, velocities) = self.state.current();
        let kernel = VelocityKernel {
            params: &self.setup.params,
            grid: self.setup.grid,
            window: self.window,
            avoidance: self.avoidance,
            positions,
            velocities,
        };
        Some(kernel.contributions(index))
    }

    pub fn agent_count(&self) -> usize {
        self.setup.grid.agent_count()
    }

    /// Side of the square agent grid; agent `i` is at row `i / side`, column `i % side`
    pub fn agent_grid_side(&self) -> usize {
        self.setup.grid.side()
    }

    pub fn grid(&self) -> AgentGrid {
        self.setup.grid
    }

    pub fn params(&self) -> &FlockParams {
        &self.setup.params
    }

    /// First neighbour column the next step scans
    pub fn step_offset(&self) -> usize {
        self.window.offset()
    }

    /// Number of completed steps
    pub fn generation(&self) -> u64 {
        self.state.generation()
    }

    pub fn avoidance(&self) -> Option<Avoidance> {
        self.avoidance
    }

    /// Enable, move or disable the avoidance point for subsequent steps
    pub fn set_avoidance(&mut self, avoidance: Option<Avoidance>) {
        self.avoidance = avoidance;
    }

    /// Drop all state, keeping the validated configuration
    pub fn release(self) -> FlockSetup {
        log::debug!(
            "releasing flock of {} agents after {} steps",
            self.agent_count(),
            self.generation()
        );
        self.state.release();
        self.setup
    }

    /// Replace the parameters: release, create and initialize with fresh random state
    pub fn reset(self, params: FlockParams) -> Result<Flock, FlockError> {
        let agent_count = self.agent_count();
        self.release();
        Flock::create(agent_count, params)?.initialize()
    }

    /// [`reset`](Self::reset) drawing the new state from `rng`
    pub fn reset_with_rng<R: Rng + ?Sized>(
        self,
        params: FlockParams,
        rng: &mut R,
    ) -> Result<Flock, FlockError> {
        let agent_count = self.agent_count();
        self.release();
        Flock::create(agent_count, params)?.initialize_with_rng(rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;

    #[test]
    fn test_create_rejects_unsupported_count() {
        let err = Flock::create(1000, FlockParams::preset(1024).unwrap()).unwrap_err();
        assert!(matches!(
            err,
            FlockError::Config(ConfigError::UnsupportedAgentCount(1000))
        ));
    }

    #[test]
    fn test_create_accepts_step_size_beyond_grid() {
        let mut params = FlockParams::preset(16).unwrap();
        params.step_size = 8;
        let mut flock = Flock::create(16, params).unwrap().initialize_seeded(6).unwrap();
        for expected in [1, 2, 3, 4, 5, 6, 7, 0] {
            flock.step();
            assert_eq!(flock.step_offset(), expected);
        }

        params.step_size = 0;
        assert!(matches!(
            Flock::create(16, params),
            Err(FlockError::Config(ConfigError::ZeroStepSize))
        ));
    }

    #[test]
    fn test_rule_contributions_out_of_range() {
        let flock = Flock::create(4, FlockParams::preset(4).unwrap())
            .unwrap()
            .initialize_seeded(12)
            .unwrap();
        assert!(flock.rule_contributions(3).is_some());
        assert_eq!(flock.rule_contributions(4), None);
        assert_eq!(flock.rule_contributions(usize::MAX), None);
    }

    #[test]
    fn test_create_with_incomplete_settings() {
        let err = Flock::create_with_settings(64, FlockSettings::default()).unwrap_err();
        match err {
            FlockError::Config(ConfigError::MissingParameters(fields)) => assert_eq!(fields.len(), 11),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_step_advances_generation_and_offset() {
        let mut params = FlockParams::preset(64).unwrap();
        params.step_size = 4;
        let mut flock = Flock::create(64, params).unwrap().initialize_seeded(3).unwrap();
        assert_eq!(flock.agent_grid_side(), 8);
        assert_eq!(flock.step_offset(), 0);

        for expected in [1, 2, 3, 0, 1] {
            flock.step();
            assert_eq!(flock.step_offset(), expected);
        }
        assert_eq!(flock.generation(), 5);
    }

    #[test]
    fn test_release_returns_reusable_setup() {
        let flock = Flock::create(16, FlockParams::preset(16).unwrap())
            .unwrap()
            .initialize_seeded(1)
            .unwrap();
        let setup = flock.release();
        assert_eq!(setup.grid().agent_count(), 16);
        let again = setup.initialize_seeded(2).unwrap();
        assert_eq!(again.generation(), 0);
    }

    #[test]
    fn test_reset_applies_new_params() {
        let flock = Flock::create(16, FlockParams::preset(16).unwrap())
            .unwrap()
            .initialize_seeded(1)
            .unwrap();
        let mut params = FlockParams::preset(16).unwrap();
        params.max_speed = 10.0;
        let flock = flock.reset(params).unwrap();
        assert_eq!(flock.params().max_speed, 10.0);
        assert_eq!(flock.generation(), 0);
    }
}
