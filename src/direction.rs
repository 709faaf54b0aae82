//! Compass directions and grid coordinates shared by the maze model, the generator and the solver.

/// One of the four sides of a cell.
///
/// A direction both addresses a neighbouring cell and names the wall that separates the two.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards row zero.
    North,
    /// Towards the last column.
    East,
    /// Towards the last row.
    South,
    /// Towards column zero.
    West,
}

impl Direction {
    /// Every direction, in the order neighbours are enumerated.
    pub const ALL: [Self; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// Returns the direction pointing back the way this one came.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
        }
    }

    /// Returns the bit this direction occupies in a wall set.
    pub(crate) const fn bit(self) -> u8 {
        match self {
            Self::North => 0b0001,
            Self::East => 0b0010,
            Self::South => 0b0100,
            Self::West => 0b1000,
        }
    }
}

/// A `(column, row)` coordinate inside a grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    /// Horizontal coordinate, growing eastwards.
    pub column: usize,
    /// Vertical coordinate, growing southwards.
    pub row: usize,
}

impl Position {
    /// Builds a position from its column and row.
    #[must_use]
    pub const fn new(column: usize, row: usize) -> Self {
        Self { column, row }
    }

    /// Moves one cell in `direction`, staying inside a `columns` by `rows` grid.
    ///
    /// Returns `None` when the step would leave the grid.
    #[must_use]
    pub fn step(self, direction: Direction, columns: usize, rows: usize) -> Option<Self> {
        let (column, row) = match direction {
            Direction::North => (Some(self.column), self.row.checked_sub(1)),
            Direction::East => (self.column.checked_add(1), Some(self.row)),
            Direction::South => (Some(self.column), self.row.checked_add(1)),
            Direction::West => (self.column.checked_sub(1), Some(self.row)),
        };

        let (column, row) = (column?, row?);
        (column < columns && row < rows).then_some(Self { column, row })
    }

    /// Returns `|Δcolumn|` and `|Δrow|` between two positions.
    #[must_use]
    pub const fn axis_distances(self, other: Self) -> (usize, usize) {
        (
            self.column.abs_diff(other.column),
            self.row.abs_diff(other.row),
        )
    }
}
