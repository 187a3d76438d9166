#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the grid snake engine.
//!
//! This crate defines the message surface that connects hosts, the
//! authoritative world, and pure systems. Hosts submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then reports [`Event`] values describing what
//! changed. Systems and hosts read the snake through a borrowed [`BodyView`]
//! and respond exclusively with new command batches.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Smallest grid width that can hold a snake plus a reachable food cell.
pub const MIN_GRID_WIDTH: u32 = 3;

/// Number of bytes occupied by a single serialised [`CellIndex`].
pub const CELL_BYTES: usize = 4;

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    /// Queues a heading change that the next step will commit.
    ChangeDirection {
        /// Heading requested by the input source.
        direction: Direction,
    },
    /// Advances the simulation by exactly one tick.
    Step,
}

/// Events reported by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Event {
    /// Confirms that a heading change was accepted for the next step.
    DirectionQueued {
        /// Heading the next step will use.
        direction: Direction,
    },
    /// Confirms that the head moved between two cells.
    SnakeAdvanced {
        /// Cell the head occupied before the step.
        from: CellIndex,
        /// Cell the head occupies after the step.
        to: CellIndex,
    },
    /// Reports that the snake ate the food and grew by one segment.
    FoodConsumed {
        /// Cell that held the food.
        cell: CellIndex,
        /// Body length after growing.
        length: usize,
    },
    /// Announces the cell that now holds the food.
    FoodPlaced {
        /// Cell the food was relocated to.
        cell: CellIndex,
    },
    /// Announces that the game reached a terminal status.
    StatusChanged {
        /// Status that became active.
        status: Status,
    },
}

/// Linear row-major address of a grid cell.
///
/// The layout is a bare `u32` so a body buffer is a contiguous run of
/// 4-byte integers that a host can read in place.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(transparent)]
pub struct CellIndex(u32);

impl CellIndex {
    /// Creates a new cell index with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the index.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }
}

/// Side length of the square toroidal grid measured in cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridWidth(u32);

impl GridWidth {
    /// Creates a new width wrapper.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the number of cells along one edge.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Total number of cells, or `None` when `width²` does not fit a cell index.
    #[must_use]
    pub const fn cell_count(&self) -> Option<u32> {
        self.0.checked_mul(self.0)
    }

    /// Reports whether the index addresses a cell inside the grid.
    #[must_use]
    pub fn contains(&self, cell: CellIndex) -> bool {
        self.cell_count().map_or(false, |count| cell.get() < count)
    }

    /// Converts a linear index into column and row coordinates.
    #[must_use]
    pub fn coord_of(&self, cell: CellIndex) -> Option<CellCoord> {
        if !self.contains(cell) {
            return None;
        }
        Some(CellCoord::new(cell.get() % self.0, cell.get() / self.0))
    }

    /// Converts column and row coordinates into a linear index.
    #[must_use]
    pub fn index_of(&self, coord: CellCoord) -> Option<CellIndex> {
        if coord.column() >= self.0 || coord.row() >= self.0 {
            return None;
        }
        let index = coord.row().checked_mul(self.0)?.checked_add(coord.column())?;
        Some(CellIndex::new(index))
    }

    /// Returns the cell one step away in `direction`, wrapping across edges.
    #[must_use]
    pub fn neighbor(&self, cell: CellIndex, direction: Direction) -> Option<CellIndex> {
        let coord = self.coord_of(cell)?;
        let (row_delta, column_delta) = direction.delta();
        let width = i64::from(self.0);
        let row = (i64::from(coord.row()) + i64::from(row_delta)).rem_euclid(width);
        let column = (i64::from(coord.column()) + i64::from(column_delta)).rem_euclid(width);
        let row = u32::try_from(row).ok()?;
        let column = u32::try_from(column).ok()?;
        self.index_of(CellCoord::new(column, row))
    }

    /// Manhattan distance between two cells measured across the torus.
    #[must_use]
    pub fn wrapped_distance(&self, from: CellIndex, to: CellIndex) -> Option<u32> {
        let from = self.coord_of(from)?;
        let to = self.coord_of(to)?;
        let axis = |a: u32, b: u32| {
            let direct = a.abs_diff(b);
            direct.min(self.0 - direct)
        };
        Some(axis(from.column(), to.column()) + axis(from.row(), to.row()))
    }
}

/// Cardinal headings available to the snake.
///
/// Discriminants are the stable numeric encoding used across host
/// boundaries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    Up = 0,
    /// Movement toward increasing column indices.
    Right = 1,
    /// Movement toward increasing row indices.
    Down = 2,
    /// Movement toward decreasing column indices.
    Left = 3,
}

impl Direction {
    /// Every heading in encoding order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Heading pointing the opposite way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Right => Self::Left,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
        }
    }

    /// Reports whether `other` points exactly backwards.
    #[must_use]
    pub fn is_opposite(self, other: Direction) -> bool {
        self.opposite() == other
    }

    /// Signed `(row, column)` offset applied by one step.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (-1, 0),
            Self::Right => (0, 1),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
        }
    }

    /// Numeric code of the heading.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Decodes a numeric heading code, rejecting unknown values.
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Up),
            1 => Some(Self::Right),
            2 => Some(Self::Down),
            3 => Some(Self::Left),
            _ => None,
        }
    }
}

/// Lifecycle status of a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Status {
    /// The snake is alive and steps advance it.
    Playing = 0,
    /// The body filled every cell of the grid.
    Won = 1,
    /// The head ran into the body.
    Lost = 2,
}

impl Status {
    /// Reports whether steps no longer have any effect.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }

    /// Numeric code of the status.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Decodes a numeric status code, rejecting unknown values.
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Playing),
            1 => Some(Self::Won),
            2 => Some(Self::Lost),
            _ => None,
        }
    }
}

/// Read-only view of the snake body, head first.
///
/// The view borrows the world's own buffer, so holding one statically
/// prevents the world from stepping until it is dropped.
#[derive(Clone, Copy, Debug)]
pub struct BodyView<'a> {
    cells: &'a [CellIndex],
    width: GridWidth,
}

impl<'a> BodyView<'a> {
    /// Captures a new body view backed by the provided cell slice.
    #[must_use]
    pub fn new(cells: &'a [CellIndex], width: GridWidth) -> Self {
        Self { cells, width }
    }

    /// Body cells ordered from head to tail.
    #[must_use]
    pub fn cells(&self) -> &'a [CellIndex] {
        self.cells
    }

    /// Width of the grid the body lives on.
    #[must_use]
    pub const fn width(&self) -> GridWidth {
        self.width
    }

    /// Number of body segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Reports whether the view holds no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cell occupied by the head.
    #[must_use]
    pub fn head(&self) -> Option<CellIndex> {
        self.cells.first().copied()
    }

    /// Cell occupied by the last segment.
    #[must_use]
    pub fn tail(&self) -> Option<CellIndex> {
        self.cells.last().copied()
    }

    /// Reports whether any segment occupies the cell.
    #[must_use]
    pub fn contains(&self, cell: CellIndex) -> bool {
        self.cells.contains(&cell)
    }

    /// Iterator over the segments from head to tail.
    pub fn iter(&self) -> impl Iterator<Item = CellIndex> + 'a {
        self.cells.iter().copied()
    }

    /// Dense per-cell occupancy mask indexed by [`CellIndex`].
    #[must_use]
    pub fn occupancy(&self) -> Vec<bool> {
        let capacity = self
            .width
            .cell_count()
            .and_then(|count| usize::try_from(count).ok())
            .unwrap_or(0);
        let mut mask = vec![false; capacity];
        for cell in self.cells {
            if let Some(slot) = usize::try_from(cell.get())
                .ok()
                .and_then(|index| mask.get_mut(index))
            {
                *slot = true;
            }
        }
        mask
    }

    /// Appends the body as little-endian 4-byte integers.
    pub fn write_le_bytes(&self, out: &mut Vec<u8>) {
        out.reserve(self.cells.len() * CELL_BYTES);
        for cell in self.cells {
            out.extend_from_slice(&cell.get().to_le_bytes());
        }
    }

    /// Serialises the body as little-endian 4-byte integers.
    #[must_use]
    pub fn to_le_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        self.write_le_bytes(&mut bytes);
        bytes
    }
}

/// Errors raised while decoding a serialised body.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// The buffer length is not a whole number of cells.
    #[error("body buffer of {len} bytes is not a multiple of 4")]
    Misaligned {
        /// Length of the rejected buffer.
        len: usize,
    },
}

/// Decodes little-endian 4-byte cell indices produced by [`BodyView::write_le_bytes`].
pub fn decode_le_cells(bytes: &[u8]) -> Result<Vec<CellIndex>, DecodeError> {
    if bytes.len() % CELL_BYTES != 0 {
        return Err(DecodeError::Misaligned { len: bytes.len() });
    }

    Ok(bytes
        .chunks_exact(CELL_BYTES)
        .map(|chunk| CellIndex::new(u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]])))
        .collect())
}
