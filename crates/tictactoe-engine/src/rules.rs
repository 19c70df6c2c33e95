//! Move legality and win/draw detection.
//!
//! # Sweep detection
//!
//! Every cell has a two-bit code: empty `00`, host `01`, challenger `10`.
//! Folding a line's three codes with bitwise AND, starting from `11`:
//!
//! ```text
//! 01 & 01 & 01 = 01   host swept the line
//! 10 & 10 & 10 = 10   challenger swept the line
//! anything mixed or containing 00 → 00
//! ```
//!
//! A single pass over the nine cells fills accumulators for the three
//! rows, three columns and both diagonals, so the whole check costs one
//! walk of the board.

use tictactoe_protocol::AccountName;

use crate::{BOARD_HEIGHT, BOARD_WIDTH, Board, Cell, Match, Outcome};

/// Seed for each line accumulator: both bits set.
const SWEEP_SEED: u8 = 0b11;

/// Returns `true` if `(row, column)` is on the board and still empty.
pub fn is_valid_movement(board: &Board, row: u16, column: u16) -> bool {
    board.is_open(row, column)
}

/// Folded AND value of every line, in inspection order: main diagonal,
/// anti-diagonal, the three rows, the three columns.
pub fn line_values(board: &Board) -> [u8; 8] {
    let width = usize::from(BOARD_WIDTH);
    let mut rows = [SWEEP_SEED; BOARD_HEIGHT as usize];
    let mut columns = [SWEEP_SEED; BOARD_WIDTH as usize];
    let mut diagonal = SWEEP_SEED;
    let mut anti_diagonal = SWEEP_SEED;

    for (i, cell) in board.cells().iter().enumerate() {
        let (row, column) = (i / width, i % width);
        let code = cell.code();

        rows[row] &= code;
        columns[column] &= code;
        if row == column {
            diagonal &= code;
        }
        if row + column == width - 1 {
            anti_diagonal &= code;
        }
    }

    [
        diagonal,
        anti_diagonal,
        rows[0],
        rows[1],
        rows[2],
        columns[0],
        columns[1],
        columns[2],
    ]
}

/// The mark that swept a line, if any.
///
/// The first swept line in [`line_values`] order decides. Only one player
/// can hold a sweep after any single move, so the order never changes the
/// answer for a board reached through legal play.
pub fn sweeping_mark(board: &Board) -> Option<Cell> {
    line_values(board).into_iter().find_map(|value| match value {
        v if v == Cell::Host.code() => Some(Cell::Host),
        v if v == Cell::Challenger.code() => Some(Cell::Challenger),
        _ => None,
    })
}

/// Computes the outcome of `board` for the given participants.
///
/// A sweep names its owner; otherwise a full board is a draw and anything
/// else is still undecided.
pub fn evaluate(board: &Board, host: &AccountName, challenger: &AccountName) -> Outcome {
    match sweeping_mark(board) {
        Some(Cell::Host) => Outcome::Won(host.clone()),
        Some(Cell::Challenger) => Outcome::Won(challenger.clone()),
        _ if board.is_full() => Outcome::Draw,
        _ => Outcome::Undecided,
    }
}

/// [`evaluate`] for a match record's own board and participants.
pub fn outcome_of(game: &Match) -> Outcome {
    evaluate(&game.board, &game.host, &game.challenger)
}
