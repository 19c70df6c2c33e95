//! The lifecycle operations: create, restart, close, move.
//!
//! Each operation follows the same shape:
//!
//! 1. Authorization — the caller must hold the required account's authority
//! 2. Lookup — exactly one record, by (host, challenger)
//! 3. Preconditions — checked in a fixed order, first failure wins
//! 4. Write — the full updated record goes back in one store call
//!
//! Nothing is written until every check has passed, so a rejected call
//! leaves the store exactly as it found it.
//!
//! ```text
//!               create                      move (sweep / full board)
//! NonExistent ─────────→ Active(turn) ────────────────────────────→ Decided
//!      ↑                  │   ↑   ↑                                   │
//!      │       close      │   │   └──────────── restart ──────────────┤
//!      ├──────────────────┘   └── restart                             │
//!      └──────────────────────────── close ───────────────────────────┘
//! ```

use tictactoe_auth::Authority;
use tictactoe_protocol::AccountName;

use crate::{EngineError, Match, MatchStore, Operation, rules};

/// The tic-tac-toe rules engine, bound to a record store and an authority.
///
/// `Engine` takes `&mut self` for every write and does no locking of its
/// own. Whoever owns it must make sure only one operation runs at a time
/// (the `tictactoe` facade wraps it in a mutex).
pub struct Engine<S: MatchStore, A: Authority> {
    store: S,
    authority: A,
}

impl<S: MatchStore, A: Authority> Engine<S, A> {
    /// Creates an engine over `store`, checking callers with `authority`.
    pub fn new(store: S, authority: A) -> Self {
        Self { store, authority }
    }

    /// Read access to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Looks up one match. No authorization needed to read.
    pub fn game(
        &self,
        host: &AccountName,
        challenger: &AccountName,
    ) -> Result<Option<Match>, EngineError> {
        Ok(self.store.find(host, challenger)?)
    }

    /// Opens a new match. `caller` must hold the host's authority.
    ///
    /// # Errors
    /// `Unauthorized`, `InvalidParticipants`, `AlreadyExists` (in that order).
    pub fn create(
        &mut self,
        caller: &AccountName,
        challenger: &AccountName,
        host: &AccountName,
    ) -> Result<Match, EngineError> {
        let op = Operation::Create;
        self.authorize(op, caller, host)?;

        if challenger == host {
            return Err(reject(EngineError::InvalidParticipants { op }));
        }
        if self.store.find(host, challenger)?.is_some() {
            return Err(reject(EngineError::AlreadyExists { op }));
        }

        let game = Match::new(challenger.clone(), host.clone());
        self.store.insert(host, game.clone())?;

        tracing::info!(%host, %challenger, "match created");
        Ok(game)
    }

    /// Clears the board and gives the first move back to the host.
    ///
    /// Allowed from either participant, whatever state the match is in.
    ///
    /// # Errors
    /// `Unauthorized` (caller isn't `by`), `NotFound`, `Unauthorized`
    /// (`by` isn't in this match).
    pub fn restart(
        &mut self,
        caller: &AccountName,
        challenger: &AccountName,
        host: &AccountName,
        by: &AccountName,
    ) -> Result<Match, EngineError> {
        let op = Operation::Restart;
        self.authorize(op, caller, by)?;

        let mut game = self.load(op, host, challenger)?;
        if !game.is_participant(by) {
            return Err(reject(EngineError::Unauthorized {
                op,
                detail: "this is not your game".into(),
            }));
        }

        game.reset();
        self.store.update(host, game.clone())?;

        tracing::info!(%host, %challenger, %by, "match restarted");
        Ok(game)
    }

    /// Deletes the match. `caller` must hold the host's authority.
    ///
    /// Returns the record as it was just before removal.
    ///
    /// # Errors
    /// `Unauthorized`, `NotFound`.
    pub fn close(
        &mut self,
        caller: &AccountName,
        challenger: &AccountName,
        host: &AccountName,
    ) -> Result<Match, EngineError> {
        let op = Operation::Close;
        self.authorize(op, caller, host)?;

        self.load(op, host, challenger)?;
        let game = self.store.remove(host, challenger)?;

        tracing::info!(%host, %challenger, "match closed");
        Ok(game)
    }

    /// Places `by`'s mark at `(row, column)`, passes the turn, and updates
    /// the outcome.
    ///
    /// # Errors
    /// In check order: `Unauthorized`, `NotFound`, `GameAlreadyDecided`,
    /// `NotAParticipant`, `NotYourTurn`, `IllegalMove`.
    pub fn make_move(
        &mut self,
        caller: &AccountName,
        challenger: &AccountName,
        host: &AccountName,
        by: &AccountName,
        row: u16,
        column: u16,
    ) -> Result<Match, EngineError> {
        let op = Operation::Move;
        self.authorize(op, caller, by)?;

        let mut game = self.load(op, host, challenger)?;
        if game.winner.is_decided() {
            return Err(reject(EngineError::GameAlreadyDecided { op }));
        }
        let (Some(mark), Some(next)) = (game.mark_for(by), game.opponent_of(by).cloned())
        else {
            return Err(reject(EngineError::NotAParticipant { op }));
        };
        if *by != game.turn {
            return Err(reject(EngineError::NotYourTurn { op }));
        }
        if !rules::is_valid_movement(&game.board, row, column) {
            return Err(reject(EngineError::IllegalMove { op, row, column }));
        }

        let placed = game.board.place(row, column, mark);
        debug_assert!(placed, "validated cell must accept the mark");
        game.turn = next;
        // Only reachable while undecided, so this is the single point where
        // an outcome is ever computed.
        game.winner = rules::outcome_of(&game);
        self.store.update(host, game.clone())?;

        tracing::info!(%host, %challenger, %by, row, column, "move accepted");
        if game.winner.is_decided() {
            tracing::info!(%host, %challenger, winner = ?game.winner, "match decided");
        }
        Ok(game)
    }

    fn authorize(
        &self,
        op: Operation,
        caller: &AccountName,
        account: &AccountName,
    ) -> Result<(), EngineError> {
        self.authority
            .require_auth(caller, account)
            .map_err(|e| reject(EngineError::unauthorized(op, e)))
    }

    fn load(
        &self,
        op: Operation,
        host: &AccountName,
        challenger: &AccountName,
    ) -> Result<Match, EngineError> {
        self.store
            .find(host, challenger)?
            .ok_or_else(|| reject(EngineError::NotFound { op }))
    }
}

/// Logs a rejected operation and hands the error back.
fn reject(err: EngineError) -> EngineError {
    tracing::debug!(kind = ?err.kind(), error = %err, "operation rejected");
    err
}

#[cfg(test)]
mod tests {
    use super::*;
    use tictactoe_auth::SignerAuthority;

    use crate::{Cell, ErrorKind, MemoryStore, Outcome};

    fn name(s: &str) -> AccountName {
        AccountName::new(s).unwrap()
    }

    fn engine() -> Engine<MemoryStore, SignerAuthority> {
        Engine::new(MemoryStore::new(), SignerAuthority)
    }

    /// alice hosts bob.
    fn engine_with_match() -> Engine<MemoryStore, SignerAuthority> {
        let mut e = engine();
        e.create(&name("alice"), &name("bob"), &name("alice")).unwrap();
        e
    }

    #[test]
    fn test_create_checks_authority_before_participants() {
        // carol signs a create for alice vs alice: the auth failure wins.
        let mut e = engine();
        let err = e
            .create(&name("carol"), &name("alice"), &name("alice"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
    }

    #[test]
    fn test_create_same_participants_rejected() {
        let mut e = engine();
        let err = e
            .create(&name("alice"), &name("alice"), &name("alice"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidParticipants);
        assert!(e.store().is_empty());
    }

    #[test]
    fn test_move_game_over_checked_before_membership() {
        // A decided match reports GameAlreadyDecided even to an outsider.
        let mut e = engine_with_match();
        let mut game = e.game(&name("alice"), &name("bob")).unwrap().unwrap();
        game.winner = Outcome::Draw;
        e.store.update(&name("alice"), game).unwrap();

        let err = e
            .make_move(&name("carol"), &name("bob"), &name("alice"), &name("carol"), 0, 0)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::GameAlreadyDecided);
    }

    #[test]
    fn test_move_outsider_is_not_a_participant() {
        let mut e = engine_with_match();
        let err = e
            .make_move(&name("carol"), &name("bob"), &name("alice"), &name("carol"), 0, 0)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotAParticipant);
        assert_eq!(err.to_string(), "move: this is not your game");
    }

    #[test]
    fn test_move_turn_checked_before_cell() {
        // bob moves out of turn onto an off-board cell: NotYourTurn wins.
        let mut e = engine_with_match();
        let err = e
            .make_move(&name("bob"), &name("bob"), &name("alice"), &name("bob"), 9, 9)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotYourTurn);
    }

    #[test]
    fn test_move_writes_mark_and_passes_turn() {
        let mut e = engine_with_match();
        let game = e
            .make_move(&name("alice"), &name("bob"), &name("alice"), &name("alice"), 2, 1)
            .unwrap();

        assert_eq!(game.board.get(2, 1), Some(Cell::Host));
        assert_eq!(game.turn, name("bob"));
        assert_eq!(game.winner, Outcome::Undecided);
        assert_eq!(e.game(&name("alice"), &name("bob")).unwrap(), Some(game));
    }

    #[test]
    fn test_restart_outsider_is_unauthorized() {
        let mut e = engine_with_match();
        let err = e
            .restart(&name("carol"), &name("bob"), &name("alice"), &name("carol"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
        assert_eq!(err.to_string(), "restart: this is not your game");
    }

    #[test]
    fn test_close_by_challenger_is_unauthorized() {
        let mut e = engine_with_match();
        let err = e.close(&name("bob"), &name("bob"), &name("alice")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
        assert!(e.game(&name("alice"), &name("bob")).unwrap().is_some());
    }
}
