//! Time-sliced, double-buffered flocking simulation.
//!
//! A [`Flock`] holds a fixed population of agents laid out on a square grid.
//! Every [`Flock::step`] computes new velocities from separation, cohesion and
//! alignment over a rotating slice of neighbours, steers agents back into the
//! domain, clamps speeds, then moves every agent by its new velocity.
//!
//! ```
//! use flock_core::{Flock, FlockParams};
//!
//! let params = FlockParams::preset(1024).unwrap();
//! let mut flock = Flock::create(1024, params).unwrap().initialize_seeded(42).unwrap();
//! flock.step();
//! assert_eq!(flock.current_positions().len(), 1024);
//! ```

pub mod error;
pub mod flock;
pub mod grid;
pub mod heading;
pub mod kernel;
pub mod params;
pub mod state;
pub mod vector;
pub mod window;

pub use error::{ConfigError, FlockError};
pub use flock::{Flock, FlockSetup};
pub use grid::{AgentGrid, SUPPORTED_GRID_SIDES};
pub use heading::Heading;
pub use kernel::{boundary_steering, clamp_speed, Avoidance, RuleContributions};
pub use params::{FlockParams, RuleParams};
pub use state::StateStore;
pub use vector::Vector3D;
pub use window::NeighborWindow;

pub use flock_shared::{BoundaryPolicy, Bounds, FlockSettings};
