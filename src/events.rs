//! Event handling functions for user input and timed animation steps.

use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use ratatui::crossterm::event::{self, Event, KeyCode};

use crate::App;

/// Longest time to block waiting for input before checking the animation clock.
const POLL_TIMEOUT: Duration = Duration::from_millis(100);

/// Shortest poll, so a zero tick still yields the CPU between frames.
const MIN_POLL: Duration = Duration::from_millis(1);

/// How long to wait for input given the animation tick.
fn poll_timeout(tick: Duration) -> Duration {
    tick.clamp(MIN_POLL, POLL_TIMEOUT)
}

/// Handles input events and advances the animation when its tick has elapsed.
///
/// This function polls for keyboard events and dispatches them to [`handle_key`]. The poll waits
/// about one animation tick, at least a millisecond and at most [`POLL_TIMEOUT`], so that steps
/// keep flowing without input.
pub(crate) fn handle_events(app: &mut App) -> Result<()> {
    if event::poll(poll_timeout(app.config.tick()))? {
        if let Event::Key(key) = event::read()? {
            handle_key(app, key.code)?;
        }
    }

    handle_tick(app)
}

/// Applies a single key press to the application state.
///
/// - `q` quits.
/// - space pauses or resumes the animation.
/// - `n` advances exactly one step, paused or not.
/// - `r` regenerates the maze with the next seed.
pub(crate) fn handle_key(app: &mut App, code: KeyCode) -> Result<()> {
    match code {
        KeyCode::Char('q') => app.exit = true,
        KeyCode::Char(' ') => app.paused = !app.paused,
        KeyCode::Char('n') => app.advance()?,
        KeyCode::Char('r') => app.restart()?,
        _ => {}
    }

    Ok(())
}

/// Advances the animation by one step if it is running and a full tick has passed.
pub(crate) fn handle_tick(app: &mut App) -> Result<()> {
    if app.paused || app.phase.is_finished() {
        return Ok(());
    }

    if app.last_tick.elapsed() >= app.config.tick() {
        app.last_tick = Instant::now();
        app.advance()?;
    }

    Ok(())
}
