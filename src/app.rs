//! Core application state and logic for the terminal driver.

use std::time::Instant;

use color_eyre::eyre::Result;
use ratatui::DefaultTerminal;

use crate::{
    config::Config,
    direction::Position,
    events,
    generator::Generator,
    grid::Grid,
    solver::Solver,
    types::Phase,
    ui,
};

/// Application state container for the maze animation.
///
/// This structure owns the grid and whichever of the generator or the solver is currently running.
/// Ratatui renders from it and Crossterm events drive it forward one step per tick.
#[derive(Debug)]
pub struct App {
    /// Application exit flag.
    ///
    /// This field indicates whether the application should exit. It is set to `true` when the user
    /// asks to quit but it starts off `false`.
    pub(crate) exit: bool,
    /// Pause flag.
    ///
    /// While set, ticks no longer advance the animation but single steps still can.
    pub(crate) paused: bool,
    /// Startup configuration.
    pub(crate) config: Config,
    /// Seed of the maze currently on screen.
    pub(crate) seed: u64,
    /// The maze being carved or searched.
    pub(crate) grid: Grid,
    /// Current stage and the state machine driving it.
    pub(crate) phase: Phase,
    /// Route found by the solver, filled once the goal is reached.
    pub(crate) route: Vec<Position>,
    /// Time of the last automatic step.
    pub(crate) last_tick: Instant,
}

impl App {
    /// Creates the application from its configuration.
    ///
    /// The grid is built and the goal validated here, before the terminal is taken over, so bad
    /// arguments are reported on a normal screen.
    ///
    /// # Errors
    ///
    /// Returns an error if the grid dimensions are invalid or the requested goal lies outside the
    /// grid.
    pub fn new(config: Config) -> Result<Self> {
        let seed = config.seed_or_now();
        let grid = Grid::new(config.columns, config.rows)?;
        if let Some(goal) = config.goal() {
            let _ = grid.cell_at(goal.column, goal.row)?;
        }

        Ok(Self {
            exit: false,
            paused: false,
            config,
            seed,
            grid,
            phase: Phase::Generating(Generator::seeded(seed)),
            route: Vec::new(),
            last_tick: Instant::now(),
        })
    }

    /// Runs the main loop of the application.
    ///
    /// This function draws a frame, then handles input and timed steps. The loop continues until
    /// the exit condition is `true`, after which the function returns to the call site.
    ///
    /// # Errors
    ///
    /// - [`std::io::Error`]
    /// - [`crate::error::MazeError`] if a step ever leaves the grid
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        while !self.exit {
            let _ = terminal.try_draw(|frame| {
                ui::draw(self, frame)
                    .map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err))
            })?;
            events::handle_events(self)?;
        }

        Ok(())
    }

    /// Advances whichever state machine is active by exactly one step.
    ///
    /// When generation completes, the solver is set up in the same call so the next tick already
    /// searches. The goal comes from the configuration or from the generator's random stream.
    pub(crate) fn advance(&mut self) -> Result<()> {
        match &mut self.phase {
            Phase::Generating(generator) => {
                if generator.step(&mut self.grid)?.is_complete() {
                    let goal = match self.config.goal() {
                        Some(goal) => goal,
                        None => Solver::random_goal(&self.grid, generator.rng_mut()),
                    };
                    let solver = Solver::new(&mut self.grid, Grid::START, goal)?;
                    self.phase = Phase::Solving(solver);
                }
            }
            Phase::Solving(solver) => {
                if !solver.status().is_terminal() && solver.step(&mut self.grid)?.is_terminal() {
                    self.route = solver.route(&self.grid)?.unwrap_or_default();
                }
            }
        }

        Ok(())
    }

    /// Throws the current maze away and starts carving a new one with the next seed.
    pub(crate) fn restart(&mut self) -> Result<()> {
        self.seed = self.seed.wrapping_add(1);
        self.grid = Grid::new(self.config.columns, self.config.rows)?;
        self.phase = Phase::Generating(Generator::seeded(self.seed));
        self.route.clear();
        self.last_tick = Instant::now();

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::SolveStatus;

    /// Configuration with a fixed seed so every run is reproducible.
    fn seeded_config(columns: usize, rows: usize) -> Config {
        Config {
            columns,
            rows,
            seed: Some(17),
            ..Config::default()
        }
    }

    /// Advances until the animation has nothing left to do, returning the number of steps.
    fn run_to_end(app: &mut App) -> usize {
        let mut steps = 0;
        while !app.phase.is_finished() {
            app.advance().expect("advancing stays in bounds");
            steps += 1;
        }
        steps
    }

    #[test]
    fn test_new_rejects_zero_columns() {
        assert!(App::new(seeded_config(0, 4)).is_err(), "zero columns is invalid");
    }

    #[test]
    fn test_new_rejects_goal_outside_grid() {
        let config = Config {
            goal_column: Some(9),
            goal_row: Some(0),
            ..seeded_config(3, 3)
        };

        assert!(App::new(config).is_err(), "goal must lie on the grid");
    }

    #[test]
    fn test_generation_hands_over_to_solver() {
        let mut app = App::new(seeded_config(2, 1)).expect("config is valid");

        app.advance().expect("first carve");
        assert!(matches!(app.phase, Phase::Generating(_)));
        app.advance().expect("backtrack");
        app.advance().expect("final backtrack");

        assert!(
            matches!(app.phase, Phase::Solving(_)),
            "completed generation starts the solver"
        );
        assert_eq!(app.grid.cleared_wall_pairs(), 1);
    }

    #[test]
    fn test_full_run_reaches_fixed_goal() {
        let config = Config {
            goal_column: Some(5),
            goal_row: Some(3),
            ..seeded_config(6, 4)
        };
        let mut app = App::new(config).expect("config is valid");

        let _ = run_to_end(&mut app);

        let Phase::Solving(solver) = &app.phase else {
            panic!("a finished run ends in the solving phase");
        };
        assert_eq!(solver.status(), SolveStatus::GoalReached);
        assert_eq!(solver.goal(), Position::new(5, 3));
        assert_eq!(app.route.first(), Some(&Grid::START));
        assert_eq!(app.route.last(), Some(&Position::new(5, 3)));
    }

    #[test]
    fn test_same_seed_same_run() {
        let mut first = App::new(seeded_config(7, 5)).expect("config is valid");
        let mut second = App::new(seeded_config(7, 5)).expect("config is valid");

        let first_steps = run_to_end(&mut first);
        let second_steps = run_to_end(&mut second);

        assert_eq!(first_steps, second_steps);
        assert_eq!(first.grid, second.grid, "seeded runs must be identical");
        assert_eq!(first.route, second.route);
    }

    #[test]
    fn test_advance_after_finish_is_a_no_op() {
        let mut app = App::new(seeded_config(3, 3)).expect("config is valid");
        let _ = run_to_end(&mut app);
        let grid = app.grid.clone();

        app.advance().expect("advancing a finished run succeeds");

        assert_eq!(app.grid, grid);
    }

    #[test]
    fn test_restart_uses_next_seed() {
        let mut app = App::new(seeded_config(4, 4)).expect("config is valid");
        let _ = run_to_end(&mut app);

        app.restart().expect("restart rebuilds a valid grid");

        assert_eq!(app.seed, 18);
        assert!(matches!(app.phase, Phase::Generating(_)));
        assert!(app.route.is_empty(), "old route is discarded");
        assert_eq!(app.grid.cleared_wall_pairs(), 0);
    }
}
