//! The 3×3 board and its cells.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Number of columns on the board.
pub const BOARD_WIDTH: u16 = 3;

/// Number of rows on the board.
pub const BOARD_HEIGHT: u16 = BOARD_WIDTH;

/// Total number of cells. The board is never resized.
pub const CELL_COUNT: usize = (BOARD_WIDTH * BOARD_HEIGHT) as usize;

// ---------------------------------------------------------------------------
// Cell
// ---------------------------------------------------------------------------

/// The content of one board cell.
///
/// The discriminants are the cell codes used in the serialized record and
/// by the sweep detection in [`rules`](crate::rules): `0b00`, `0b01`,
/// `0b10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Cell {
    #[default]
    Empty = 0,
    /// Marked by the match host.
    Host = 1,
    /// Marked by the challenger.
    Challenger = 2,
}

impl Cell {
    /// The single-byte code for this cell.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Parses a cell code. Returns `None` for anything but 0, 1 or 2.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Empty),
            1 => Some(Self::Host),
            2 => Some(Self::Challenger),
            _ => None,
        }
    }

    /// Returns `true` if nobody has marked this cell.
    pub fn is_empty(self) -> bool {
        self == Self::Empty
    }
}

// ---------------------------------------------------------------------------
// Board
// ---------------------------------------------------------------------------

/// A fixed 3×3 grid stored row-major.
///
/// Cell `(row, column)` lives at index `row * BOARD_WIDTH + column`.
///
/// Serializes as exactly nine single-byte cell codes, e.g.
/// `[1,0,0,0,2,0,0,0,0]` in JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board {
    cells: [Cell; CELL_COUNT],
}

impl Board {
    /// An all-empty board.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a board from row-major cells.
    pub fn from_cells(cells: [Cell; CELL_COUNT]) -> Self {
        Self { cells }
    }

    /// Row-major index of `(row, column)`, or `None` if out of bounds.
    pub fn index(row: u16, column: u16) -> Option<usize> {
        if row < BOARD_HEIGHT && column < BOARD_WIDTH {
            Some(usize::from(row * BOARD_WIDTH + column))
        } else {
            None
        }
    }

    /// The cell at `(row, column)`, or `None` if out of bounds.
    pub fn get(&self, row: u16, column: u16) -> Option<Cell> {
        Self::index(row, column).map(|i| self.cells[i])
    }

    /// All nine cells, row-major.
    pub fn cells(&self) -> &[Cell; CELL_COUNT] {
        &self.cells
    }

    /// Returns `true` if `(row, column)` is on the board and unmarked.
    pub fn is_open(&self, row: u16, column: u16) -> bool {
        self.get(row, column).is_some_and(Cell::is_empty)
    }

    /// Returns `true` once every cell is marked.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| !c.is_empty())
    }

    /// Coordinates of every unmarked cell, row-major.
    pub fn open_cells(&self) -> Vec<(u16, u16)> {
        (0..BOARD_HEIGHT)
            .flat_map(|row| (0..BOARD_WIDTH).map(move |column| (row, column)))
            .filter(|&(row, column)| self.is_open(row, column))
            .collect()
    }

    /// Writes `mark` into an open cell.
    ///
    /// Returns `false` and leaves the board untouched when the cell is out
    /// of bounds or already marked, so a marked cell can never be
    /// overwritten or cleared through this method.
    pub fn place(&mut self, row: u16, column: u16, mark: Cell) -> bool {
        match Self::index(row, column) {
            Some(i) if self.cells[i].is_empty() && !mark.is_empty() => {
                self.cells[i] = mark;
                true
            }
            _ => false,
        }
    }

    /// Resets every cell to empty.
    pub fn clear(&mut self) {
        self.cells = [Cell::Empty; CELL_COUNT];
    }

    /// The cell codes as bytes, row-major.
    pub fn to_bytes(&self) -> [u8; CELL_COUNT] {
        self.cells.map(Cell::code)
    }

    /// Rebuilds a board from cell codes. Returns `None` if any byte is
    /// not a valid code.
    pub fn from_bytes(bytes: [u8; CELL_COUNT]) -> Option<Self> {
        let mut cells = [Cell::Empty; CELL_COUNT];
        for (cell, byte) in cells.iter_mut().zip(bytes) {
            *cell = Cell::from_code(byte)?;
        }
        Some(Self { cells })
    }
}

impl Serialize for Board {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_bytes().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bytes = <[u8; CELL_COUNT]>::deserialize(deserializer)?;
        Self::from_bytes(bytes).ok_or_else(|| {
            <D::Error as serde::de::Error>::custom("board cell codes must be 0, 1 or 2")
        })
    }
}
