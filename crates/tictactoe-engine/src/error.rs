//! Error types for the engine layer.

use std::fmt;

use tictactoe_auth::AuthError;
use tictactoe_protocol::AccountName;

/// The lifecycle operation that raised an error.
///
/// Displayed as the action's ledger name so messages read
/// `"move: it's not your turn yet"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Create,
    Restart,
    Close,
    Move,
}

impl Operation {
    /// The ledger action name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Restart => "restart",
            Self::Close => "close",
            Self::Move => "move",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors reported by a [`MatchStore`](crate::MatchStore).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// `insert` found a record already under this key.
    #[error("record for {challenger} already exists in {host}'s table")]
    Duplicate {
        host: AccountName,
        challenger: AccountName,
    },

    /// `update` or `remove` found no record under this key.
    #[error("no record for {challenger} in {host}'s table")]
    Missing {
        host: AccountName,
        challenger: AccountName,
    },

    /// The backing store failed.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Stable, matchable category of an [`EngineError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidParticipants,
    AlreadyExists,
    NotFound,
    Unauthorized,
    NotAParticipant,
    NotYourTurn,
    GameAlreadyDecided,
    IllegalMove,
    Store,
}

/// Why a lifecycle operation was rejected.
///
/// Every variant except `Store` is a precondition violation found before
/// anything was written. None of them are worth retrying with the same
/// arguments.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Host and challenger are the same account.
    #[error("{op}: challenger shouldn't be the same as host")]
    InvalidParticipants { op: Operation },

    /// A match for this (challenger, host) pair already exists.
    #[error("{op}: game already exists")]
    AlreadyExists { op: Operation },

    /// No match exists for this (challenger, host) pair.
    #[error("{op}: game doesn't exist")]
    NotFound { op: Operation },

    /// The caller lacks the required authority, or `by` is not one of the
    /// match's participants on `restart`.
    #[error("{op}: {detail}")]
    Unauthorized { op: Operation, detail: String },

    /// `by` is neither the host nor the challenger of the match.
    #[error("{op}: this is not your game")]
    NotAParticipant { op: Operation },

    /// `by` is a participant but the other one must move.
    #[error("{op}: it's not your turn yet")]
    NotYourTurn { op: Operation },

    /// The match already has a winner or ended in a draw.
    #[error("{op}: the game has ended")]
    GameAlreadyDecided { op: Operation },

    /// The target cell is off the board or already marked.
    #[error("{op}: ({row}, {column}) is not a valid movement")]
    IllegalMove { op: Operation, row: u16, column: u16 },

    /// The record store failed underneath the operation.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl EngineError {
    /// The category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidParticipants { .. } => ErrorKind::InvalidParticipants,
            Self::AlreadyExists { .. } => ErrorKind::AlreadyExists,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Unauthorized { .. } => ErrorKind::Unauthorized,
            Self::NotAParticipant { .. } => ErrorKind::NotAParticipant,
            Self::NotYourTurn { .. } => ErrorKind::NotYourTurn,
            Self::GameAlreadyDecided { .. } => ErrorKind::GameAlreadyDecided,
            Self::IllegalMove { .. } => ErrorKind::IllegalMove,
            Self::Store(_) => ErrorKind::Store,
        }
    }

    /// The operation that raised this error. `None` for store failures.
    pub fn operation(&self) -> Option<Operation> {
        match self {
            Self::InvalidParticipants { op }
            | Self::AlreadyExists { op }
            | Self::NotFound { op }
            | Self::Unauthorized { op, .. }
            | Self::NotAParticipant { op }
            | Self::NotYourTurn { op }
            | Self::GameAlreadyDecided { op }
            | Self::IllegalMove { op, .. } => Some(*op),
            Self::Store(_) => None,
        }
    }

    pub(crate) fn unauthorized(op: Operation, err: AuthError) -> Self {
        Self::Unauthorized {
            op,
            detail: err.to_string(),
        }
    }
}
