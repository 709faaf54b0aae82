//! Error type shared by the maze model, the generator and the solver.

use thiserror::Error;

/// Failures raised by the maze core.
///
/// An unreachable goal is not an error; the solver reports it as
/// [`SolveStatus::NoPath`](crate::solver::SolveStatus::NoPath).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum MazeError {
    /// A coordinate fell outside the grid.
    #[error("cell ({column}, {row}) lies outside the {columns}x{rows} grid")]
    OutOfRange {
        /// Requested column.
        column: usize,
        /// Requested row.
        row: usize,
        /// Number of columns in the grid.
        columns: usize,
        /// Number of rows in the grid.
        rows: usize,
    },
    /// A grid was requested with no cells or with more cells than can be addressed.
    #[error("cannot build a {columns}x{rows} grid: both sides must be positive and addressable")]
    InvalidDimensions {
        /// Requested number of columns.
        columns: usize,
        /// Requested number of rows.
        rows: usize,
    },
}
