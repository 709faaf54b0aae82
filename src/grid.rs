//! Fixed-size rectangular grid of maze cells.
//!
//! The grid stores its cells by value in a flat, row-major vector and hands out coordinates rather
//! than references, so the generator and the solver only ever keep plain [`Position`] values
//! between steps.

use rand::Rng;

use crate::{
    cell::Cell,
    direction::{Direction, Position},
    error::MazeError,
};

/// A `columns` by `rows` arena of [`Cell`]s.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    /// Number of columns, never zero.
    columns: usize,
    /// Number of rows, never zero.
    rows: usize,
    /// Cells in row-major order.
    cells: Vec<Cell>,
}

impl Grid {
    /// Cell where generation and solving both begin.
    pub const START: Position = Position::new(0, 0);

    /// Builds a fully walled grid with the start cell already marked visited.
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::InvalidDimensions`] if either side is zero or the cell count does not
    /// fit in memory addressing.
    pub fn new(columns: usize, rows: usize) -> Result<Self, MazeError> {
        let count = columns
            .checked_mul(rows)
            .filter(|count| *count > 0)
            .ok_or(MazeError::InvalidDimensions { columns, rows })?;

        let mut cells = Vec::with_capacity(count);
        for row in 0..rows {
            for column in 0..columns {
                cells.push(Cell::new(column, row));
            }
        }

        let mut grid = Self {
            columns,
            rows,
            cells,
        };
        grid.cell_at_mut(Self::START.column, Self::START.row)?
            .mark_visited();

        Ok(grid)
    }

    /// Number of columns.
    #[must_use]
    pub const fn columns(&self) -> usize {
        self.columns
    }

    /// Number of rows.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// All cells in row-major order.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Flat index of `(column, row)`.
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::OutOfRange`] if the coordinate lies outside the grid.
    pub const fn index_of(&self, column: usize, row: usize) -> Result<usize, MazeError> {
        if column < self.columns && row < self.rows {
            Ok(row * self.columns + column)
        } else {
            Err(MazeError::OutOfRange {
                column,
                row,
                columns: self.columns,
                rows: self.rows,
            })
        }
    }

    /// Cell at `(column, row)`.
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::OutOfRange`] if the coordinate lies outside the grid.
    pub fn cell_at(&self, column: usize, row: usize) -> Result<&Cell, MazeError> {
        let index = self.index_of(column, row)?;
        self.cells.get(index).ok_or(MazeError::OutOfRange {
            column,
            row,
            columns: self.columns,
            rows: self.rows,
        })
    }

    /// Mutable access is reserved to the crate so that walls and scores only change through the
    /// generator and the solver.
    pub(crate) fn cell_at_mut(&mut self, column: usize, row: usize) -> Result<&mut Cell, MazeError> {
        let index = self.index_of(column, row)?;
        let (columns, rows) = (self.columns, self.rows);
        self.cells.get_mut(index).ok_or(MazeError::OutOfRange {
            column,
            row,
            columns,
            rows,
        })
    }

    /// In-bounds neighbours of `(column, row)`, tagged with the direction leading to each.
    ///
    /// Neighbours come in north, east, south, west order; edge and corner cells simply have fewer
    /// of them. Walls are not consulted.
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::OutOfRange`] if the coordinate lies outside the grid.
    pub fn neighbors_by_direction(
        &self,
        column: usize,
        row: usize,
    ) -> Result<Vec<(Direction, Position)>, MazeError> {
        let _ = self.index_of(column, row)?;
        let origin = Position::new(column, row);

        Ok(Direction::ALL
            .into_iter()
            .filter_map(|direction| {
                origin
                    .step(direction, self.columns, self.rows)
                    .map(|target| (direction, target))
            })
            .collect())
    }

    /// Neighbours reachable from `(column, row)` through a cleared wall.
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::OutOfRange`] if the coordinate lies outside the grid.
    pub fn passable_neighbors(&self, column: usize, row: usize) -> Result<Vec<Position>, MazeError> {
        let walls = self.cell_at(column, row)?.walls();

        Ok(self
            .neighbors_by_direction(column, row)?
            .into_iter()
            .filter(|(direction, _)| !walls.contains(*direction))
            .map(|(_, target)| target)
            .collect())
    }

    /// Clears the wall between `from` and its neighbour in `direction`, on both cells.
    ///
    /// Returns the neighbour's position.
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::OutOfRange`] if `from` lies outside the grid or has no neighbour in
    /// `direction`. Neither cell is touched in that case.
    pub(crate) fn carve(&mut self, from: Position, direction: Direction) -> Result<Position, MazeError> {
        let _ = self.index_of(from.column, from.row)?;
        let to = from
            .step(direction, self.columns, self.rows)
            .ok_or(MazeError::OutOfRange {
                column: from.column,
                row: from.row,
                columns: self.columns,
                rows: self.rows,
            })?;

        self.cell_at_mut(from.column, from.row)?
            .remove_wall(direction);
        self.cell_at_mut(to.column, to.row)?
            .remove_wall(direction.opposite());

        Ok(to)
    }

    /// Number of wall pairs removed so far.
    ///
    /// Each pair is counted once, from the cell on its western or northern side.
    #[must_use]
    pub fn cleared_wall_pairs(&self) -> usize {
        self.cells
            .iter()
            .map(|cell| {
                usize::from(!cell.has_wall(Direction::East))
                    + usize::from(!cell.has_wall(Direction::South))
            })
            .sum()
    }

    /// Returns `true` once every cell has been visited.
    #[must_use]
    pub fn is_fully_visited(&self) -> bool {
        self.cells.iter().all(Cell::visited)
    }

    /// Picks a cell uniformly at random.
    pub fn random_position<R: Rng + ?Sized>(&self, rng: &mut R) -> Position {
        Position::new(rng.gen_range(0..self.columns), rng.gen_range(0..self.rows))
    }

    /// Puts every cell's scores back to their sentinels so the maze can be searched again.
    pub fn reset_scores(&mut self) {
        self.cells.iter_mut().for_each(Cell::clear_scores);
    }
}
