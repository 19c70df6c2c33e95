//! The match record: one game between a host and a challenger.

use serde::{Deserialize, Serialize};
use tictactoe_protocol::AccountName;

use crate::{Board, Cell};

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// Who, if anyone, has won the match.
///
/// ```text
///   Undecided ──(sweep)──→ Won(account)
///       │
///       └──(full board, no sweep)──→ Draw
/// ```
///
/// Anything other than `Undecided` means the match is decided and no
/// further moves are accepted until a restart.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The game is still being played.
    #[default]
    Undecided,
    /// The board filled up without a sweep.
    Draw,
    /// The named participant swept a line.
    Won(AccountName),
}

impl Outcome {
    /// Returns `true` once the match has a winner or ended in a draw.
    pub fn is_decided(&self) -> bool {
        !matches!(self, Self::Undecided)
    }

    /// The winning account, if any.
    pub fn winner(&self) -> Option<&AccountName> {
        match self {
            Self::Won(account) => Some(account),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Match
// ---------------------------------------------------------------------------

/// One match record, stored under the host's namespace and keyed by the
/// challenger.
///
/// Field order is the serialized record layout:
/// `challenger, host, turn, winner, board`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    /// The invited player. Also the record's key inside the host namespace.
    pub challenger: AccountName,

    /// The player who opened the match. Always moves first.
    pub host: AccountName,

    /// Whoever must move next. Always `host` or `challenger`.
    pub turn: AccountName,

    /// Current outcome.
    pub winner: Outcome,

    /// The 3×3 grid.
    pub board: Board,
}

impl Match {
    /// A fresh match: empty board, host to move, undecided.
    ///
    /// Doesn't check `challenger != host`; the engine rejects that before
    /// calling this.
    pub fn new(challenger: AccountName, host: AccountName) -> Self {
        Self {
            turn: host.clone(),
            challenger,
            host,
            winner: Outcome::Undecided,
            board: Board::new(),
        }
    }

    /// Wipes the board and hands the first move back to the host.
    pub fn reset(&mut self) {
        self.board.clear();
        self.turn = self.host.clone();
        self.winner = Outcome::Undecided;
    }

    /// Returns `true` if `account` is the host or the challenger.
    pub fn is_participant(&self, account: &AccountName) -> bool {
        *account == self.host || *account == self.challenger
    }

    /// The mark `account` places, or `None` for outsiders.
    pub fn mark_for(&self, account: &AccountName) -> Option<Cell> {
        if *account == self.host {
            Some(Cell::Host)
        } else if *account == self.challenger {
            Some(Cell::Challenger)
        } else {
            None
        }
    }

    /// The other participant, or `None` for outsiders.
    pub fn opponent_of(&self, account: &AccountName) -> Option<&AccountName> {
        if *account == self.host {
            Some(&self.challenger)
        } else if *account == self.challenger {
            Some(&self.host)
        } else {
            None
        }
    }
}
