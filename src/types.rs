//! Type definitions for the driver's state machine.

use crate::{
    generator::Generator,
    solver::{SolveStatus, Solver},
};

/// Stage the driver is animating.
///
/// The driver carves the maze first and only builds the solver once the generator reports
/// completion, so the two never touch the grid at the same time.
#[derive(Debug)]
pub(crate) enum Phase {
    /// The backtracker is still carving.
    Generating(Generator),
    /// The maze is complete and the search is running or has finished.
    Solving(Solver),
}

impl Phase {
    /// Short label for the status line.
    pub(crate) const fn label(&self) -> &'static str {
        match self {
            Self::Generating(_) => "generating",
            Self::Solving(solver) => match solver.status() {
                SolveStatus::InProgress => "solving",
                SolveStatus::GoalReached => "goal reached",
                SolveStatus::NoPath => "no path",
            },
        }
    }

    /// Returns `true` once there is nothing left to animate.
    pub(crate) const fn is_finished(&self) -> bool {
        match self {
            Self::Generating(_) => false,
            Self::Solving(solver) => solver.status().is_terminal(),
        }
    }
}
