//! Unified error type for the contract facade.

use tictactoe_engine::{EngineError, ErrorKind};
use tictactoe_protocol::ProtocolError;

/// Top-level error that wraps the crate-specific errors.
///
/// When using the `tictactoe` facade you deal with this single error type
/// instead of importing errors from each sub-crate. The `#[from]`
/// attributes let `?` convert sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum TicTacToeError {
    /// The action bytes couldn't be decoded (bad JSON, bad account name).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// The engine rejected the action.
    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl TicTacToeError {
    /// The engine's error category, if the engine produced this error.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Engine(e) => Some(e.kind()),
            Self::Protocol(_) => None,
        }
    }
}
