//! Mapping between flat agent indices and the square grid the neighbour scan
//! walks over.
//!
//! Agent `index` sits at `row = index / side`, `column = index % side`. Any
//! storage (flat array, 2D texture) that respects this mapping yields the same
//! neighbour chunks.

use crate::error::ConfigError;

/// Grid sides the engine accepts; the population is always `side * side`
pub const SUPPORTED_GRID_SIDES: [usize; 8] = [1, 2, 4, 8, 16, 32, 64, 128];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentGrid {
    side: usize,
}

impl AgentGrid {
    pub fn for_agent_count(agent_count: usize) -> Result<Self, ConfigError> {
        SUPPORTED_GRID_SIDES
            .iter()
            .find(|&&side| side * side == agent_count)
            .map(|&side| Self { side })
            .ok_or(ConfigError::UnsupportedAgentCount(agent_count))
    }

    /// Number of rows (and columns)
    pub fn side(&self) -> usize {
        self.side
    }

    pub fn agent_count(&self) -> usize {
        self.side * self.side
    }

    pub fn index(&self, row: usize, column: usize) -> usize {
        debug_assert!(row < self.side && column < self.side);
        row * self.side + column
    }

    /// `(row, column)` of a flat agent index
    pub fn cell(&self, index: usize) -> (usize, usize) {
        debug_assert!(index < self.agent_count());
        (index / self.side, index % self.side)
    }
}
