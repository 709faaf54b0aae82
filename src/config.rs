//! Command-line configuration for the terminal driver.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use clap::Parser;

use crate::direction::Position;

/// Settings the driver reads at startup. The maze core never sees this structure.
#[derive(Clone, Debug, PartialEq, Eq, Parser)]
#[command(version, about)]
pub struct Config {
    /// Number of maze columns.
    #[arg(short, long, default_value_t = 30)]
    pub columns: usize,
    /// Number of maze rows.
    #[arg(short, long, default_value_t = 20)]
    pub rows: usize,
    /// Column of the goal cell; a random cell is used when no goal is given.
    #[arg(long, requires = "goal_row")]
    pub goal_column: Option<usize>,
    /// Row of the goal cell; a random cell is used when no goal is given.
    #[arg(long, requires = "goal_column")]
    pub goal_row: Option<usize>,
    /// Seed for the maze layout and the random goal; the current time is used when absent.
    #[arg(short, long)]
    pub seed: Option<u64>,
    /// Delay between automatic steps, in milliseconds.
    #[arg(short, long, default_value_t = 16)]
    pub tick_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            columns: 30,
            rows: 20,
            goal_column: None,
            goal_row: None,
            seed: None,
            tick_ms: 16,
        }
    }
}

impl Config {
    /// Goal requested on the command line, if both coordinates were given.
    #[must_use]
    pub const fn goal(&self) -> Option<Position> {
        match (self.goal_column, self.goal_row) {
            (Some(column), Some(row)) => Some(Position::new(column, row)),
            _ => None,
        }
    }

    /// Requested seed, or the number of whole seconds since the Unix epoch.
    #[must_use]
    pub fn seed_or_now(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map_or(0, |elapsed| elapsed.as_secs())
        })
    }

    /// Delay between automatic steps.
    #[must_use]
    pub const fn tick(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}
