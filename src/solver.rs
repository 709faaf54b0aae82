//! Stepwise best-first search over a carved maze.
//!
//! The solver walks only through cleared walls, charges one unit per move and ranks its open set by
//! `g + heuristic`. The heuristic is the *product* of the axis distances to the goal rather than
//! their sum, which makes it inadmissible: the search always terminates correctly but is not
//! guaranteed to settle on a shortest route.

use log::{debug, trace};
use rand::Rng;

use crate::{direction::Position, error::MazeError, grid::Grid};

/// Outcome of a single solve step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SolveStatus {
    /// The open set still holds candidates.
    InProgress,
    /// The goal was the best candidate.
    GoalReached,
    /// The open set ran dry without reaching the goal.
    NoPath,
}

impl SolveStatus {
    /// Returns `true` for either terminal outcome.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

/// Estimated remaining cost from `cell` to `goal`: `|Δcolumn| × |Δrow|`.
///
/// The estimate is zero for any cell sharing a row or a column with the goal. The product is taken
/// in `f64`, so it stays exact well past `u32::MAX`; only an axis distance that does not fit in a
/// `u32` saturates to `f64::MAX`.
#[must_use]
pub fn heuristic(cell: Position, goal: Position) -> f64 {
    let (columns, rows) = cell.axis_distances(goal);
    match (u32::try_from(columns), u32::try_from(rows)) {
        (Ok(columns), Ok(rows)) => f64::from(columns) * f64::from(rows),
        _ => f64::MAX,
    }
}

/// Best-first search from a start cell to a fixed goal cell.
///
/// The open set keeps positions in insertion order next to their current f-score. The best
/// candidate is the lowest f-score, and among equal scores the one inserted first.
#[derive(Clone, Debug)]
pub struct Solver {
    /// Where the search began.
    start: Position,
    /// Fixed target of the search.
    goal: Position,
    /// Cells awaiting expansion with their f-score.
    open: Vec<(Position, f64)>,
    /// Last status reported.
    status: SolveStatus,
    /// Cells removed from the open set and expanded.
    expanded: usize,
}

impl Solver {
    /// Claims `goal`, scores `start` and seeds the open set with it.
    ///
    /// The grid's scores should still be at their sentinels; see [`Grid::reset_scores`] to search
    /// the same maze twice.
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::OutOfRange`] if either position lies outside the grid. The grid is left
    /// untouched in that case.
    pub fn new(grid: &mut Grid, start: Position, goal: Position) -> Result<Self, MazeError> {
        let _ = grid.index_of(start.column, start.row)?;
        let _ = grid.index_of(goal.column, goal.row)?;
        grid.cell_at_mut(goal.column, goal.row)?.mark_visited();
        grid.cell_at_mut(start.column, start.row)?
            .set_scores(0, heuristic(start, goal));

        debug!("solving from {start:?} towards {goal:?}");

        Ok(Self {
            start,
            goal,
            open: vec![(start, heuristic(start, goal))],
            status: SolveStatus::InProgress,
            expanded: 0,
        })
    }

    /// Picks a goal uniformly at random over the whole grid.
    pub fn random_goal<R: Rng + ?Sized>(grid: &Grid, rng: &mut R) -> Position {
        grid.random_position(rng)
    }

    /// Advances the search by one expansion.
    ///
    /// Once a terminal status has been reported, further calls repeat it without doing any work.
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::OutOfRange`] if the grid is smaller than the one the solver was set up
    /// on.
    pub fn step(&mut self, grid: &mut Grid) -> Result<SolveStatus, MazeError> {
        if self.status.is_terminal() {
            return Ok(self.status);
        }

        let Some((slot, current)) = self.best_slot() else {
            debug!("open set exhausted after {} expansions: no path", self.expanded);
            self.status = SolveStatus::NoPath;
            return Ok(self.status);
        };

        if current == self.goal {
            debug!(
                "goal {current:?} reached after {} expansions",
                self.expanded
            );
            self.status = SolveStatus::GoalReached;
            return Ok(self.status);
        }

        let _ = self.open.remove(slot);
        self.expanded += 1;

        let tentative = grid
            .cell_at(current.column, current.row)?
            .g_score()
            .saturating_add(1);
        for neighbour in grid.passable_neighbors(current.column, current.row)? {
            let cell = grid.cell_at_mut(neighbour.column, neighbour.row)?;
            if tentative >= cell.g_score() {
                continue;
            }

            let f_score = f64::from(tentative) + heuristic(neighbour, self.goal);
            cell.set_scores(tentative, f_score);

            if let Some(entry) = self.open.iter_mut().find(|(open, _)| *open == neighbour) {
                entry.1 = f_score;
            } else {
                self.open.push((neighbour, f_score));
            }
        }

        trace!(
            "expanded {current:?}, {} cells left in the open set",
            self.open.len()
        );

        Ok(self.status)
    }

    /// Slot and position of the best open entry.
    fn best_slot(&self) -> Option<(usize, Position)> {
        self.open
            .iter()
            .enumerate()
            .min_by(|(_, (_, left)), (_, (_, right))| left.total_cmp(right))
            .map(|(slot, (position, _))| (slot, *position))
    }

    /// Cell the next step will examine, for highlighting.
    #[must_use]
    pub fn best_candidate(&self) -> Option<Position> {
        self.best_slot().map(|(_, position)| position)
    }

    /// Positions awaiting expansion, in insertion order.
    pub fn open_set(&self) -> impl Iterator<Item = Position> + '_ {
        self.open.iter().map(|(position, _)| *position)
    }

    /// Last status reported by [`Solver::step`].
    #[must_use]
    pub const fn status(&self) -> SolveStatus {
        self.status
    }

    /// Where the search began.
    #[must_use]
    pub const fn start(&self) -> Position {
        self.start
    }

    /// Target of the search.
    #[must_use]
    pub const fn goal(&self) -> Position {
        self.goal
    }

    /// Number of cells expanded so far.
    #[must_use]
    pub const fn expanded(&self) -> usize {
        self.expanded
    }

    /// Route from start to goal read back off the recorded g-scores.
    ///
    /// Starting at the goal, each step moves to the passable neighbour with the lowest g-score
    /// strictly below the current one. Every scored cell other than the start was scored from such
    /// a neighbour, so the descent always ends at the start. Returns `None` unless the goal has
    /// been reached.
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::OutOfRange`] if the grid is smaller than the one the solver ran on.
    pub fn route(&self, grid: &Grid) -> Result<Option<Vec<Position>>, MazeError> {
        if self.status != SolveStatus::GoalReached {
            return Ok(None);
        }

        let mut route = vec![self.goal];
        let mut current = self.goal;
        let mut g_score = grid.cell_at(current.column, current.row)?.g_score();

        while current != self.start {
            let mut lower: Option<(Position, u32)> = None;
            for neighbour in grid.passable_neighbors(current.column, current.row)? {
                let score = grid.cell_at(neighbour.column, neighbour.row)?.g_score();
                if score < g_score && lower.map_or(true, |(_, best)| score < best) {
                    lower = Some((neighbour, score));
                }
            }

            let Some((next, score)) = lower else {
                return Ok(None);
            };
            route.push(next);
            current = next;
            g_score = score;
        }

        route.reverse();
        Ok(Some(route))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{cell::Cell, direction::Direction, generator::Generator};

    /// Builds a fully generated maze from a seed.
    fn maze(columns: usize, rows: usize, seed: u64) -> Grid {
        let mut grid = Grid::new(columns, rows).expect("test sizes are valid");
        let mut generator = Generator::seeded(seed);
        while !generator
            .step(&mut grid)
            .expect("generation stays in bounds")
            .is_complete()
        {}
        grid
    }

    /// Steps a solver until it reports a terminal status, returning that status and the step count.
    fn solve(grid: &mut Grid, solver: &mut Solver) -> (SolveStatus, usize) {
        let mut steps = 0;
        loop {
            steps += 1;
            let status = solver.step(grid).expect("solving stays in bounds");
            if status.is_terminal() {
                return (status, steps);
            }
        }
    }

    /// Carves a straight corridor along row zero.
    fn corridor(length: usize) -> Grid {
        let mut grid = Grid::new(length, 1).expect("corridor size is valid");
        for column in 0..length - 1 {
            let _ = grid
                .carve(Position::new(column, 0), Direction::East)
                .expect("corridor stays in bounds");
        }
        grid
    }

    #[test]
    fn test_heuristic_is_a_product() {
        assert!((heuristic(Position::new(0, 0), Position::new(3, 4)) - 12.0).abs() < f64::EPSILON);
        assert!((heuristic(Position::new(5, 1), Position::new(2, 3)) - 6.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_heuristic_vanishes_on_shared_row_or_column() {
        assert!(heuristic(Position::new(0, 7), Position::new(40, 7)).abs() < f64::EPSILON);
        assert!(heuristic(Position::new(9, 0), Position::new(9, 30)).abs() < f64::EPSILON);
    }

    #[test]
    fn test_goal_equal_to_start_reached_on_first_step() {
        let mut grid = maze(3, 3, 8);
        let mut solver =
            Solver::new(&mut grid, Grid::START, Grid::START).expect("start is in bounds");

        assert_eq!(solver.step(&mut grid), Ok(SolveStatus::GoalReached));
        assert_eq!(
            grid.cell_at(0, 0).expect("start exists").g_score(),
            0,
            "start keeps a zero g-score"
        );
        assert_eq!(solver.expanded(), 0);
        assert_eq!(
            solver.route(&grid),
            Ok(Some(vec![Grid::START])),
            "trivial route is the start alone"
        );
    }

    #[test]
    fn test_setup_scores_start_and_claims_goal() {
        let mut grid = Grid::new(4, 4).expect("4x4 grid should build");
        let goal = Position::new(3, 2);
        let solver = Solver::new(&mut grid, Grid::START, goal).expect("positions are in bounds");

        let start = grid.cell_at(0, 0).expect("start exists");
        assert_eq!(start.g_score(), 0);
        assert!((start.f_score() - 6.0).abs() < f64::EPSILON, "f = 0 + 3 * 2");
        assert!(grid.cell_at(3, 2).expect("goal exists").visited(), "goal is claimed");
        assert_eq!(solver.open_set().collect::<Vec<_>>(), vec![Grid::START]);
        assert_eq!(solver.best_candidate(), Some(Grid::START));
        assert_eq!(solver.goal(), goal);
        assert_eq!(solver.start(), Grid::START);
    }

    #[test]
    fn test_setup_rejects_out_of_range_goal() {
        let mut grid = Grid::new(3, 3).expect("3x3 grid should build");

        assert!(matches!(
            Solver::new(&mut grid, Grid::START, Position::new(3, 0)),
            Err(MazeError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_setup_rejects_out_of_range_start_without_claiming_goal() {
        let mut grid = Grid::new(3, 3).expect("3x3 grid should build");
        let snapshot = grid.clone();

        assert!(matches!(
            Solver::new(&mut grid, Position::new(0, 5), Position::new(2, 2)),
            Err(MazeError::OutOfRange { .. })
        ));
        assert_eq!(grid, snapshot, "a rejected setup must not touch the grid");
        assert!(!grid.cell_at(2, 2).expect("goal exists").visited());
    }

    #[test]
    fn test_heuristic_is_exact_beyond_u32() {
        let far = Position::new(100_000, 100_000);

        assert!((heuristic(Grid::START, far) - 1.0e10).abs() < f64::EPSILON);
    }

    #[test]
    fn test_open_grid_rescores_queued_cells_in_place() {
        let mut grid = Grid::new(4, 4).expect("4x4 grid should build");
        for row in 0..4 {
            for column in 0..4 {
                let here = Position::new(column, row);
                if column < 3 {
                    let _ = grid.carve(here, Direction::East).expect("east stays in bounds");
                }
                if row < 3 {
                    let _ = grid.carve(here, Direction::South).expect("south stays in bounds");
                }
            }
        }
        let goal = Position::new(3, 3);
        let mut solver = Solver::new(&mut grid, Grid::START, goal).expect("goal is in bounds");
        let mut rescored_while_queued = 0;

        loop {
            let queued: Vec<Position> = solver.open_set().collect();
            let before: Vec<u32> = grid.cells().iter().map(Cell::g_score).collect();

            let status = solver.step(&mut grid).expect("solving stays in bounds");

            let open: Vec<Position> = solver.open_set().collect();
            for (slot, position) in open.iter().enumerate() {
                assert!(
                    !open.iter().skip(slot + 1).any(|other| other == position),
                    "{position:?} is queued twice"
                );
            }
            for &(position, f_score) in &solver.open {
                let cell = grid
                    .cell_at(position.column, position.row)
                    .expect("queued cells are in bounds");
                assert!(
                    (f_score - cell.f_score()).abs() < f64::EPSILON,
                    "queued f-score of {position:?} is stale"
                );
            }
            for (was, cell) in before.iter().zip(grid.cells()) {
                assert!(cell.g_score() <= *was, "g-score of {:?} increased", cell.position());
                if cell.g_score() < *was && queued.contains(&cell.position()) {
                    rescored_while_queued += 1;
                }
            }

            if status.is_terminal() {
                assert_eq!(status, SolveStatus::GoalReached);
                break;
            }
        }

        assert!(rescored_while_queued > 0, "an open grid has loops that re-score queued cells");
        assert_eq!(grid.cell_at(3, 3).expect("goal exists").g_score(), 6);
        let route = solver
            .route(&grid)
            .expect("route stays in bounds")
            .expect("goal was reached");
        assert_eq!(route.len(), 7, "open grid route is a shortest one");
    }

    #[test]
    fn test_corridor_scores_and_route() {
        let mut grid = corridor(4);
        let goal = Position::new(3, 0);
        let mut solver = Solver::new(&mut grid, Grid::START, goal).expect("goal is in bounds");

        let (status, steps) = solve(&mut grid, &mut solver);

        assert_eq!(status, SolveStatus::GoalReached);
        assert_eq!(steps, 4, "three expansions then the goal check");
        let g_scores: Vec<u32> = grid.cells().iter().map(Cell::g_score).collect();
        assert_eq!(g_scores, vec![0, 1, 2, 3]);
        assert_eq!(
            solver.route(&grid),
            Ok(Some((0..4).map(|column| Position::new(column, 0)).collect()))
        );
    }

    #[test]
    fn test_unreachable_goal_reports_no_path() {
        let mut grid = Grid::new(3, 1).expect("3x1 grid should build");
        let _ = grid
            .carve(Grid::START, Direction::East)
            .expect("east of start exists");
        let mut solver =
            Solver::new(&mut grid, Grid::START, Position::new(2, 0)).expect("goal is in bounds");

        let (status, _) = solve(&mut grid, &mut solver);

        assert_eq!(status, SolveStatus::NoPath);
        assert_eq!(solver.best_candidate(), None);
        assert_eq!(solver.route(&grid), Ok(None), "no route without reaching the goal");
        assert!(!grid.cell_at(2, 0).expect("goal exists").is_scored());
    }

    #[test]
    fn test_terminal_status_repeats_without_work() {
        let mut grid = corridor(3);
        let mut solver =
            Solver::new(&mut grid, Grid::START, Position::new(2, 0)).expect("goal is in bounds");
        let _ = solve(&mut grid, &mut solver);
        let expanded = solver.expanded();
        let snapshot = grid.clone();

        assert_eq!(solver.step(&mut grid), Ok(SolveStatus::GoalReached));
        assert_eq!(solver.expanded(), expanded);
        assert_eq!(grid, snapshot);
    }

    #[test]
    fn test_equal_scores_prefer_earliest_insertion() {
        // From the middle of a three-cell row both ends score f = 1 + 0.
        let mut grid = corridor(3);
        let start = Position::new(1, 0);
        let mut solver =
            Solver::new(&mut grid, start, Grid::START).expect("positions are in bounds");

        assert_eq!(solver.step(&mut grid), Ok(SolveStatus::InProgress));
        assert_eq!(
            solver.open_set().collect::<Vec<_>>(),
            vec![Position::new(2, 0), Grid::START],
            "neighbours enter in east, west order"
        );
        assert_eq!(
            solver.best_candidate(),
            Some(Position::new(2, 0)),
            "ties go to the earlier insertion"
        );

        assert_eq!(solver.step(&mut grid), Ok(SolveStatus::InProgress));
        assert_eq!(solver.step(&mut grid), Ok(SolveStatus::GoalReached));
        assert_eq!(solver.expanded(), 2);
    }

    #[test]
    fn test_solves_generated_mazes_with_monotonic_scores() {
        for seed in 0..6 {
            let mut grid = maze(8, 6, seed);
            let goal = Position::new(7, 5);
            let mut solver = Solver::new(&mut grid, Grid::START, goal).expect("goal is in bounds");
            let mut previous: Vec<u32> = grid.cells().iter().map(Cell::g_score).collect();

            loop {
                let status = solver.step(&mut grid).expect("solving stays in bounds");
                for (before, cell) in previous.iter_mut().zip(grid.cells()) {
                    assert!(cell.g_score() <= *before, "g-score increased on seed {seed}");
                    *before = cell.g_score();
                }
                if status.is_terminal() {
                    assert_eq!(status, SolveStatus::GoalReached, "perfect mazes are connected");
                    break;
                }
            }

            let route = solver
                .route(&grid)
                .expect("route stays in bounds")
                .expect("goal was reached");
            assert_eq!(route.first(), Some(&Grid::START));
            assert_eq!(route.last(), Some(&goal));
            for pair in route.windows(2) {
                if let [from, to] = pair {
                    assert!(
                        grid.passable_neighbors(from.column, from.row)
                            .expect("route stays in bounds")
                            .contains(to),
                        "route steps must cross cleared walls"
                    );
                }
            }
        }
    }

    #[test]
    fn test_random_goal_is_deterministic_for_a_seed() {
        let mut first = Generator::seeded(21);
        let mut second = Generator::seeded(21);
        let grid = Grid::new(10, 10).expect("10x10 grid should build");

        assert_eq!(
            Solver::random_goal(&grid, first.rng_mut()),
            Solver::random_goal(&grid, second.rng_mut())
        );
    }
}
