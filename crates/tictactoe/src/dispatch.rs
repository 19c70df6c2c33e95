//! Routes a decoded action to the matching engine operation.

use tictactoe_auth::Authority;
use tictactoe_engine::{Engine, EngineError, Match, MatchStore};
use tictactoe_protocol::{AccountName, Action};

/// Applies `action` for `caller`. `close` yields `None`; every other
/// action yields the updated record.
pub(crate) fn apply<S: MatchStore, A: Authority>(
    engine: &mut Engine<S, A>,
    caller: &AccountName,
    action: Action,
) -> Result<Option<Match>, EngineError> {
    match action {
        Action::Create { challenger, host } => {
            engine.create(caller, &challenger, &host).map(Some)
        }
        Action::Restart {
            challenger,
            host,
            by,
        } => engine.restart(caller, &challenger, &host, &by).map(Some),
        Action::Close { challenger, host } => {
            engine.close(caller, &challenger, &host).map(|_| None)
        }
        Action::Move {
            challenger,
            host,
            by,
            row,
            column,
        } => engine
            .make_move(caller, &challenger, &host, &by, row, column)
            .map(Some),
    }
}
