//! Time-sliced neighbour scan.
//!
//! Scanning every agent against every other agent each frame is quadratic in
//! the population. Instead each frame visits all rows of the neighbour grid but
//! only the columns congruent to the current offset modulo `step_size`. The
//! offset advances by one every step, so `step_size` consecutive frames cover
//! every column exactly once and the flocking statistics are complete once per
//! cycle. A `step_size` of 1 scans the whole population every frame.

/// Which grid columns the current frame scans
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NeighborWindow {
    grid_side: usize,
    step_size: usize,
    offset: usize,
}

impl NeighborWindow {
    /// Caller guarantees `step_size >= 1`
    pub fn new(grid_side: usize, step_size: u32) -> Self {
        debug_assert!(step_size >= 1);
        Self {
            grid_side,
            step_size: step_size as usize,
            offset: 0,
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn step_size(&self) -> usize {
        self.step_size
    }

    /// Columns scanned this frame, in increasing order
    pub fn columns(&self) -> impl Iterator<Item = usize> + Clone {
        (self.offset..self.grid_side).step_by(self.step_size)
    }

    /// Upper bound on columns per frame: `ceil(grid_side / step_size)`
    pub fn max_columns(&self) -> usize {
        self.grid_side.div_ceil(self.step_size)
    }

    /// Move to the next slice, wrapping back to column 0 after a full cycle
    pub fn advance(&mut self) {
        self.offset = (self.offset + 1) % self.step_size;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_size_one_scans_everything() {
        let mut window = NeighborWindow::new(8, 1);
        assert_eq!(window.columns().collect::<Vec<_>>(), (0..8).collect::<Vec<_>>());
        window.advance();
        assert_eq!(window.offset(), 0);
    }

    #[test]
    fn test_columns_follow_offset() {
        let mut window = NeighborWindow::new(8, 4);
        assert_eq!(window.columns().collect::<Vec<_>>(), vec![0, 4]);
        window.advance();
        assert_eq!(window.columns().collect::<Vec<_>>(), vec![1, 5]);
        assert_eq!(window.max_columns(), 2);
    }

    #[test]
    fn test_cycle_visits_each_column_once() {
        for (side, step) in [(8, 1), (8, 2), (8, 3), (8, 8), (16, 5), (128, 16), (8, 16)] {
            let mut window = NeighborWindow::new(side, step);
            let mut visits = vec![0u32; side];
            for _ in 0..step {
                let columns: Vec<_> = window.columns().collect();
                assert!(columns.len() <= window.max_columns());
                for column in columns {
                    visits[column] += 1;
                }
                window.advance();
            }
            assert!(visits.iter().all(|&v| v == 1), "side {} step {}", side, step);
            assert_eq!(window.offset(), 0);
        }
    }

    #[test]
    fn test_offset_wraps_deterministically() {
        let mut window = NeighborWindow::new(32, 3);
        let offsets: Vec<_> = (0..7)
            .map(|_| {
                let offset = window.offset();
                window.advance();
                offset
            })
            .collect();
        assert_eq!(offsets, vec![0, 1, 2, 0, 1, 2, 0]);
    }
}
