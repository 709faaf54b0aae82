//! Randomized depth-first backtracker that carves a perfect maze one step at a time.
//!
//! The generator keeps the active carving path as a stack of positions. Each step either extends
//! the path into a random unvisited neighbour, knocking down the wall pair between them, or
//! backtracks by popping a dead end. Generation is over when the stack is empty, at which point
//! every cell has been visited and exactly `columns * rows - 1` wall pairs are gone.

use log::{debug, trace};
use rand::{rngs::StdRng, seq::SliceRandom as _, Rng, SeedableRng as _};

use crate::{
    direction::{Direction, Position},
    error::MazeError,
    grid::Grid,
};

/// Outcome of a single generation step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GenerationStatus {
    /// Cells remain on the carving path.
    InProgress,
    /// The spanning tree is complete.
    Complete,
}

impl GenerationStatus {
    /// Returns `true` for [`GenerationStatus::Complete`].
    #[must_use]
    pub const fn is_complete(self) -> bool {
        matches!(self, Self::Complete)
    }
}

/// Stateful backtracker over a [`Grid`].
///
/// The generator never owns cells; it only remembers positions on the current path.
#[derive(Clone, Debug)]
pub struct Generator<R = StdRng> {
    /// Active carving path, with the current cell on top.
    stack: Vec<Position>,
    /// Source of the neighbour choices.
    rng: R,
    /// Wall pairs removed so far.
    carved: usize,
}

impl Generator<StdRng> {
    /// Builds a generator whose choices are fully determined by `seed`.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Generator<R> {
    /// Starts a generator at [`Grid::START`], which [`Grid::new`] has already marked visited.
    pub fn new(rng: R) -> Self {
        Self {
            stack: vec![Grid::START],
            rng,
            carved: 0,
        }
    }

    /// Advances generation by one carve or one backtrack.
    ///
    /// Once the stack has emptied, further calls do nothing and keep reporting
    /// [`GenerationStatus::Complete`].
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::OutOfRange`] if the grid is smaller than the positions this generator
    /// has already recorded, which means it was driven against a different grid.
    pub fn step(&mut self, grid: &mut Grid) -> Result<GenerationStatus, MazeError> {
        let Some(&current) = self.stack.last() else {
            return Ok(GenerationStatus::Complete);
        };

        let mut candidates: Vec<(Direction, Position)> = Vec::with_capacity(Direction::ALL.len());
        for (direction, neighbour) in grid.neighbors_by_direction(current.column, current.row)? {
            if !grid.cell_at(neighbour.column, neighbour.row)?.visited() {
                candidates.push((direction, neighbour));
            }
        }

        if let Some(&(direction, next)) = candidates.choose(&mut self.rng) {
            grid.cell_at_mut(next.column, next.row)?.mark_visited();
            let _ = grid.carve(current, direction)?;
            self.carved += 1;
            self.stack.push(next);
            trace!("carved {direction:?} from {current:?} into {next:?}");
        } else if let Some(dead_end) = self.stack.pop() {
            trace!("backtracked from {dead_end:?}");
        }

        if self.stack.is_empty() {
            debug!(
                "generation complete: {} wall pairs carved over a {}x{} grid",
                self.carved,
                grid.columns(),
                grid.rows()
            );
            Ok(GenerationStatus::Complete)
        } else {
            Ok(GenerationStatus::InProgress)
        }
    }

    /// Cell on top of the carving path, for highlighting.
    #[must_use]
    pub fn current(&self) -> Option<Position> {
        self.stack.last().copied()
    }

    /// Whole carving path, bottom first.
    #[must_use]
    pub fn frontier(&self) -> &[Position] {
        &self.stack
    }

    /// Number of wall pairs removed so far.
    #[must_use]
    pub const fn carved(&self) -> usize {
        self.carved
    }

    /// Returns `true` once the carving path is empty.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.stack.is_empty()
    }

    /// Random stream used for neighbour choices, so callers can keep drawing from it.
    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }
}

/// Carves a complete perfect maze into `grid` in one call.
///
/// # Errors
///
/// Propagates any [`MazeError`] raised by [`Generator::step`].
pub fn generate<R: Rng>(grid: &mut Grid, rng: R) -> Result<(), MazeError> {
    let mut generator = Generator::new(rng);
    while !generator.step(grid)?.is_complete() {}

    Ok(())
}
