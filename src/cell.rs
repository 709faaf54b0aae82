//! A single maze cell: its walls, its generation flag and its search scores.

use crate::direction::{Direction, Position};

/// The set of walls still standing around a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Walls(u8);

impl Walls {
    /// All four walls present.
    pub const ALL: Self = Self(0b1111);

    /// Returns `true` if the wall facing `direction` is still standing.
    #[must_use]
    pub const fn contains(self, direction: Direction) -> bool {
        self.0 & direction.bit() != 0
    }

    /// Knocks down the wall facing `direction`. Walls are never put back.
    pub(crate) fn remove(&mut self, direction: Direction) {
        self.0 &= !direction.bit();
    }

    /// Returns `true` while no wall has been removed.
    #[must_use]
    pub const fn is_closed(self) -> bool {
        self.0 == Self::ALL.0
    }

    /// Iterates over the directions whose wall has been removed.
    pub fn openings(self) -> impl Iterator<Item = Direction> {
        Direction::ALL
            .into_iter()
            .filter(move |direction| !self.contains(*direction))
    }
}

impl Default for Walls {
    fn default() -> Self {
        Self::ALL
    }
}

/// One unit of the maze.
///
/// The coordinates are fixed at construction. Walls only ever come down, the visited flag only
/// ever goes up and the g-score only ever decreases while a search runs.
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    /// Where the cell sits in its grid.
    position: Position,
    /// Walls still standing.
    walls: Walls,
    /// Set once the generator reaches the cell or the solver claims it as the goal.
    visited: bool,
    /// Cost of the cheapest known route from the search start.
    g_score: u32,
    /// `g_score` plus the heuristic estimate to the goal.
    f_score: f64,
}

impl Cell {
    /// Sentinel g-score of a cell no search has reached.
    pub const UNREACHED_G: u32 = u32::MAX;
    /// Sentinel f-score of a cell no search has reached.
    pub const UNREACHED_F: f64 = f64::MAX;

    /// Creates a fully walled, unvisited and unscored cell.
    #[must_use]
    pub const fn new(column: usize, row: usize) -> Self {
        Self {
            position: Position::new(column, row),
            walls: Walls::ALL,
            visited: false,
            g_score: Self::UNREACHED_G,
            f_score: Self::UNREACHED_F,
        }
    }

    /// Column of the cell.
    #[must_use]
    pub const fn column(&self) -> usize {
        self.position.column
    }

    /// Row of the cell.
    #[must_use]
    pub const fn row(&self) -> usize {
        self.position.row
    }

    /// Column and row together.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Walls still standing around the cell.
    #[must_use]
    pub const fn walls(&self) -> Walls {
        self.walls
    }

    /// Returns `true` if the wall facing `direction` is still standing.
    #[must_use]
    pub const fn has_wall(&self, direction: Direction) -> bool {
        self.walls.contains(direction)
    }

    /// Whether the generator or the solver has claimed this cell.
    #[must_use]
    pub const fn visited(&self) -> bool {
        self.visited
    }

    /// Cumulative route cost from the search start, or [`Cell::UNREACHED_G`].
    #[must_use]
    pub const fn g_score(&self) -> u32 {
        self.g_score
    }

    /// Route cost plus heuristic, or [`Cell::UNREACHED_F`].
    #[must_use]
    pub const fn f_score(&self) -> f64 {
        self.f_score
    }

    /// Returns `true` once a search has assigned the cell a finite g-score.
    #[must_use]
    pub const fn is_scored(&self) -> bool {
        self.g_score != Self::UNREACHED_G
    }

    pub(crate) fn remove_wall(&mut self, direction: Direction) {
        self.walls.remove(direction);
    }

    pub(crate) fn mark_visited(&mut self) {
        self.visited = true;
    }

    pub(crate) fn set_scores(&mut self, g_score: u32, f_score: f64) {
        self.g_score = g_score;
        self.f_score = f_score;
    }

    /// Restores both scores to their sentinels.
    pub(crate) fn clear_scores(&mut self) {
        self.set_scores(Self::UNREACHED_G, Self::UNREACHED_F);
    }
}
