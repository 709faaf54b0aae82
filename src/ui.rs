//! User interface rendering for the maze animation.
//!
//! The maze is drawn on a lattice twice as fine as the grid plus one: cell `(c, r)` sits at lattice
//! point `(2c + 1, 2r + 1)`, the points between neighbouring cells are walls or carved passages and
//! the outer ring is always wall. Walls are simply left unpainted.

use color_eyre::eyre::{OptionExt as _, Result};
use ratatui::{
    layout::{Alignment, Constraint, Layout},
    style::{Color, Style},
    symbols::Marker,
    widgets::{
        canvas::{Canvas, Points},
        Block, BorderType, Borders, Clear,
    },
    Frame,
};

use crate::{
    direction::{Direction, Position},
    types::Phase,
    App,
};

/// Lattice coordinates grouped by the colour they are painted with.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct Layers {
    /// Cells the generator has not reached yet.
    pub(crate) unvisited: Vec<(usize, usize)>,
    /// Visited cells and the passages carved between them.
    pub(crate) carved: Vec<(usize, usize)>,
    /// Cells holding a finite g-score.
    pub(crate) scored: Vec<(usize, usize)>,
    /// Cells waiting in the solver's open set.
    pub(crate) open: Vec<(usize, usize)>,
    /// Route from start to goal, passages included.
    pub(crate) route: Vec<(usize, usize)>,
    /// Generator frontier top or solver best candidate.
    pub(crate) highlight: Vec<(usize, usize)>,
    /// Goal of the search.
    pub(crate) goal: Vec<(usize, usize)>,
}

/// Lattice point of a cell.
const fn lattice(position: Position) -> (usize, usize) {
    (position.column * 2 + 1, position.row * 2 + 1)
}

/// Lattice point of the passage between two adjacent cells.
const fn passage(from: Position, to: Position) -> (usize, usize) {
    (from.column + to.column + 1, from.row + to.row + 1)
}

/// Sorts the grid and the active state machine into paint layers.
pub(crate) fn maze_layers(app: &App) -> Layers {
    let mut layers = Layers::default();

    for cell in app.grid.cells() {
        let (column, row) = lattice(cell.position());
        if cell.visited() {
            layers.carved.push((column, row));
        } else {
            layers.unvisited.push((column, row));
        }
        if !cell.has_wall(Direction::East) {
            layers.carved.push((column + 1, row));
        }
        if !cell.has_wall(Direction::South) {
            layers.carved.push((column, row + 1));
        }
        if cell.is_scored() {
            layers.scored.push((column, row));
        }
    }

    match &app.phase {
        Phase::Generating(generator) => {
            layers.highlight.extend(generator.current().map(lattice));
        }
        Phase::Solving(solver) => {
            layers.open.extend(solver.open_set().map(lattice));
            if !solver.status().is_terminal() {
                layers.highlight.extend(solver.best_candidate().map(lattice));
            }
            layers.goal.push(lattice(solver.goal()));
        }
    }

    for pair in app.route.windows(2) {
        if let [from, to] = pair {
            layers.route.push(lattice(*from));
            layers.route.push(passage(*from, *to));
        }
    }
    layers.route.extend(app.route.last().copied().map(lattice));

    layers
}

/// Transforms lattice coordinates to screen coordinates for canvas rendering.
///
/// This function maps lattice coordinates `(col, row)` onto a canvas centred on the origin, with
/// `x = col - (n - 1) / 2` for columns and `y = (n - 1) / 2 - row` for rows so that row zero ends
/// up at the top.
///
/// # Errors
///
/// This function may return errors from coordinate conversion operations.
pub(crate) fn transform_lattice_to_screen_coords(
    coords: &[(usize, usize)],
    lattice_columns: usize,
    lattice_rows: usize,
) -> Result<Vec<(f64, f64)>> {
    let columns_n = f64::from(u32::try_from(lattice_columns)?);
    let rows_n = f64::from(u32::try_from(lattice_rows)?);

    coords
        .iter()
        .map(|&(col, row)| {
            let screen_x = f64::from(u32::try_from(col)?) - (columns_n - 1.) / 2.;
            let screen_y = (rows_n - 1.) / 2. - f64::from(u32::try_from(row)?);

            Ok((screen_x, screen_y))
        })
        .collect()
}

/// One-line summary of the run for the status bar.
pub(crate) fn status_line(app: &App) -> String {
    let cells = app.grid.cells().len();
    let progress = match &app.phase {
        Phase::Generating(generator) => {
            format!("carved {}/{}", generator.carved(), cells.saturating_sub(1))
        }
        Phase::Solving(solver) => {
            let scored = app.grid.cells().iter().filter(|cell| cell.is_scored()).count();
            if app.route.is_empty() {
                format!("expanded {}, scored {scored}/{cells}", solver.expanded())
            } else {
                format!(
                    "expanded {}, route of {} cells",
                    solver.expanded(),
                    app.route.len()
                )
            }
        }
    };
    let paused = if app.paused { " (paused)" } else { "" };

    format!("seed {} | {}{paused} | {progress}", app.seed, app.phase.label())
}

/// Clears the terminal screen by rendering a [`Clear`] widget.
pub(crate) fn clear(frame: &mut Frame) {
    frame.render_widget(Clear, frame.area());
}

/// Renders the maze and the status bar.
///
/// This function lays the maze lattice out in the centre of the screen, paints each layer of
/// [`maze_layers`] on a [`Canvas`] in turn and adds a status bar with the key bindings at the
/// bottom.
///
/// # Errors
///
/// This function may return errors from coordinate conversion operations or layout lookups.
pub(crate) fn draw(app: &App, frame: &mut Frame) -> Result<()> {
    clear(frame);

    let lattice_columns = app.grid.columns() * 2 + 1;
    let lattice_rows = app.grid.rows() * 2 + 1;

    let overall_layout = Layout::vertical([
        Constraint::Min(1),    // Maze and padding area
        Constraint::Length(3), // Status block
    ])
    .split(frame.area());

    let maze_content_area = *overall_layout
        .first()
        .ok_or_eyre("failed to get maze content area from layout")?;
    let status_area = *overall_layout
        .last()
        .ok_or_eyre("failed to get status area from layout")?;

    let space = Layout::vertical([
        Constraint::Min(1),
        Constraint::Length(u16::try_from(lattice_rows)?),
        Constraint::Min(1),
    ])
    .split(maze_content_area)
    .get(1)
    .copied()
    .ok_or_eyre("failed to get maze rows from vertical layout")?;
    let space = Layout::horizontal([
        Constraint::Min(1),
        Constraint::Length(u16::try_from(lattice_columns)?),
        Constraint::Min(1),
    ])
    .split(space)
    .get(1)
    .copied()
    .ok_or_eyre("failed to get maze space from horizontal layout")?;

    // Pre-compute screen coordinates to handle errors before the paint closure
    let layers = maze_layers(app);
    let painted = [
        (&layers.unvisited, Color::Blue),
        (&layers.carved, Color::White),
        (&layers.scored, Color::Cyan),
        (&layers.open, Color::Yellow),
        (&layers.route, Color::Magenta),
        (&layers.highlight, Color::Green),
        (&layers.goal, Color::Red),
    ]
    .into_iter()
    .map(|(coords, color)| {
        transform_lattice_to_screen_coords(coords, lattice_columns, lattice_rows)
            .map(|screen| (screen, color))
    })
    .collect::<Result<Vec<_>>>()?;

    let maze = Canvas::default()
        .x_bounds([
            (-rounded_div::i32(space.width.into(), 2)).into(),
            (rounded_div::i32(space.width.into(), 2)).into(),
        ])
        .y_bounds([
            (-rounded_div::i32(space.height.into(), 2)).into(),
            (rounded_div::i32(space.height.into(), 2)).into(),
        ])
        .marker(Marker::Block)
        .paint(|ctx| {
            for (coords, color) in &painted {
                ctx.draw(&Points {
                    coords,
                    color: *color,
                });
                ctx.layer();
            }
        });

    frame.render_widget(maze, space);

    let status = Block::bordered()
        .title(status_line(app))
        .title_bottom("(space) pause / (n) step / (r) regenerate / (q) quit")
        .title_alignment(Alignment::Center)
        .style(Style::default().fg(Color::Green))
        .border_type(BorderType::Plain)
        .borders(Borders::TOP);

    frame.render_widget(status, status_area);

    Ok(())
}
