//! Integration tests for the match lifecycle: create, move, restart, close.

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use tictactoe_auth::SignerAuthority;
use tictactoe_engine::{
    Board, CELL_COUNT, Cell, Engine, EngineError, ErrorKind, Match, MemoryStore, Outcome,
};
use tictactoe_protocol::AccountName;

// =========================================================================
// Helpers
// =========================================================================

type TestEngine = Engine<MemoryStore, SignerAuthority>;

fn name(s: &str) -> AccountName {
    AccountName::new(s).unwrap()
}

fn host() -> AccountName {
    name("alice")
}

fn challenger() -> AccountName {
    name("bob")
}

/// An engine with alice hosting bob.
fn setup() -> TestEngine {
    let mut engine = Engine::new(MemoryStore::new(), SignerAuthority);
    engine.create(&host(), &challenger(), &host()).unwrap();
    engine
}

fn current(engine: &TestEngine) -> Match {
    engine.game(&host(), &challenger()).unwrap().expect("match exists")
}

/// `by` signs and plays their own move.
fn play(
    engine: &mut TestEngine,
    by: &AccountName,
    row: u16,
    column: u16,
) -> Result<Match, EngineError> {
    engine.make_move(by, &challenger(), &host(), by, row, column)
}

/// Plays a list of cells alternating host, challenger, host, ...
fn play_all(engine: &mut TestEngine, cells: &[(u16, u16)]) -> Match {
    let mut last = current(engine);
    for (i, &(row, column)) in cells.iter().enumerate() {
        let by = if i % 2 == 0 { host() } else { challenger() };
        last = play(engine, &by, row, column)
            .unwrap_or_else(|e| panic!("move {i} at ({row}, {column}) failed: {e}"));
    }
    last
}

// =========================================================================
// create
// =========================================================================

#[test]
fn test_create_then_lookup_yields_fresh_match() {
    let engine = setup();
    let game = current(&engine);

    assert_eq!(game.host, host());
    assert_eq!(game.challenger, challenger());
    assert_eq!(game.turn, host());
    assert_eq!(game.winner, Outcome::Undecided);
    assert!(game.board.cells().iter().all(|c| c.is_empty()));
    assert_eq!(game.board.cells().len(), CELL_COUNT);
}

#[test]
fn test_create_existing_pair_fails_and_keeps_record() {
    let mut engine = setup();
    play(&mut engine, &host(), 1, 1).unwrap();
    let before = current(&engine);

    let err = engine.create(&host(), &challenger(), &host()).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::AlreadyExists);
    assert_eq!(current(&engine), before, "create must never overwrite");
}

#[test]
fn test_create_same_account_rejected() {
    let mut engine = Engine::new(MemoryStore::new(), SignerAuthority);
    let err = engine.create(&host(), &host(), &host()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidParticipants);
    assert_eq!(err.to_string(), "create: challenger shouldn't be the same as host");
}

#[test]
fn test_create_signed_by_challenger_unauthorized() {
    let mut engine = Engine::new(MemoryStore::new(), SignerAuthority);
    let err = engine.create(&challenger(), &challenger(), &host()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unauthorized);
    assert!(engine.store().is_empty());
}

#[test]
fn test_create_reversed_roles_is_separate_match() {
    let mut engine = setup();
    engine.create(&challenger(), &host(), &challenger()).unwrap();
    assert_eq!(engine.store().len(), 2);
}

// =========================================================================
// move
// =========================================================================

#[test]
fn test_move_turn_alternates_strictly() {
    let mut engine = setup();
    let moves = [(0, 0), (1, 1), (2, 2), (0, 2), (2, 0)];
    for (i, &(row, column)) in moves.iter().enumerate() {
        let (by, other) = if i % 2 == 0 {
            (host(), challenger())
        } else {
            (challenger(), host())
        };
        let game = play(&mut engine, &by, row, column).unwrap();
        assert_eq!(game.turn, other, "after move {i}");
    }
}

#[test]
fn test_move_on_occupied_cell_is_illegal_and_board_unchanged() {
    let mut engine = setup();
    play(&mut engine, &host(), 0, 0).unwrap();
    let before = current(&engine);

    let err = play(&mut engine, &challenger(), 0, 0).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::IllegalMove);
    assert_eq!(current(&engine), before);
}

#[test]
fn test_move_out_of_bounds_is_illegal_and_board_unchanged() {
    let mut engine = setup();
    let before = current(&engine);

    for (row, column) in [(3, 0), (0, 3), (3, 3), (u16::MAX, 1)] {
        let err = play(&mut engine, &host(), row, column).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IllegalMove, "({row}, {column})");
    }
    assert_eq!(current(&engine), before);
}

#[test]
fn test_move_by_non_turn_participant_rejected_and_state_unchanged() {
    let mut engine = setup();
    let before = current(&engine);

    let err = play(&mut engine, &challenger(), 1, 1).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotYourTurn);
    assert_eq!(current(&engine), before);
}

#[test]
fn test_move_signed_by_someone_else_unauthorized() {
    let mut engine = setup();
    let err = engine
        .make_move(&challenger(), &challenger(), &host(), &host(), 0, 0)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unauthorized);
}

#[test]
fn test_move_on_missing_match_not_found() {
    let mut engine = Engine::new(MemoryStore::new(), SignerAuthority);
    let err = play(&mut engine, &host(), 0, 0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(err.to_string(), "move: game doesn't exist");
}

// =========================================================================
// Scenarios
// =========================================================================

#[test]
fn test_host_top_row_wins() {
    //  H | H | H
    //  C | C | .
    //  . | . | .
    let mut engine = setup();
    let game = play_all(&mut engine, &[(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)]);
    assert_eq!(game.winner, Outcome::Won(host()));
}

#[test]
fn test_challenger_anti_diagonal_wins() {
    //  H | H | C
    //  . | C | .
    //  C | . | H
    let mut engine = setup();
    let game = play_all(
        &mut engine,
        &[(0, 0), (0, 2), (0, 1), (1, 1), (2, 2), (2, 0)],
    );
    assert_eq!(game.winner, Outcome::Won(challenger()));
}

#[test]
fn test_full_board_without_sweep_is_draw() {
    //  H | C | H
    //  H | C | C
    //  C | H | H
    let mut engine = setup();
    let game = play_all(
        &mut engine,
        &[
            (0, 0),
            (0, 1),
            (0, 2),
            (1, 1),
            (1, 0),
            (2, 0),
            (2, 1),
            (1, 2),
            (2, 2),
        ],
    );
    assert_eq!(game.winner, Outcome::Draw);
    assert!(game.board.is_full());
}

#[test]
fn test_decided_match_rejects_every_move_until_restart() {
    let mut engine = setup();
    play_all(&mut engine, &[(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)]);
    let decided = current(&engine);

    // Challenger holds the turn, but the game is over.
    for (row, column) in [(2, 2), (1, 2), (5, 5)] {
        let err = play(&mut engine, &challenger(), row, column).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::GameAlreadyDecided);
    }
    let err = play(&mut engine, &host(), 2, 2).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::GameAlreadyDecided);
    assert_eq!(current(&engine), decided);

    engine.restart(&challenger(), &challenger(), &host(), &challenger()).unwrap();
    assert!(play(&mut engine, &host(), 2, 2).is_ok());
}

// =========================================================================
// restart
// =========================================================================

#[test]
fn test_restart_from_either_participant_resets_everything() {
    for by in [host(), challenger()] {
        let mut engine = setup();
        play_all(&mut engine, &[(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)]);

        let game = engine.restart(&by, &challenger(), &host(), &by).unwrap();

        assert_eq!(game.turn, host());
        assert_eq!(game.winner, Outcome::Undecided);
        assert_eq!(game.board, Board::new());
        assert_eq!(current(&engine), game);
    }
}

#[test]
fn test_restart_mid_game_hands_turn_to_host() {
    let mut engine = setup();
    play(&mut engine, &host(), 1, 1).unwrap();
    assert_eq!(current(&engine).turn, challenger());

    let game = engine.restart(&challenger(), &challenger(), &host(), &challenger()).unwrap();
    assert_eq!(game.turn, host());
}

#[test]
fn test_restart_signed_by_someone_else_unauthorized_and_state_unchanged() {
    let mut engine = setup();
    play(&mut engine, &host(), 1, 1).unwrap();
    let before = current(&engine);
    let carol = name("carol");

    let err = engine
        .restart(&carol, &challenger(), &host(), &challenger())
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Unauthorized);
    assert_eq!(err.to_string(), "restart: missing authority of bob (caller: carol)");
    assert_eq!(current(&engine), before);
    assert_eq!(
        serde_json::to_vec(&current(&engine)).unwrap(),
        serde_json::to_vec(&before).unwrap()
    );
}

#[test]
fn test_restart_missing_match_not_found() {
    let mut engine = Engine::new(MemoryStore::new(), SignerAuthority);
    let err = engine.restart(&host(), &challenger(), &host(), &host()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

// =========================================================================
// close
// =========================================================================

#[test]
fn test_close_removes_record_and_later_ops_not_found() {
    let mut engine = setup();
    play(&mut engine, &host(), 0, 0).unwrap();

    let removed = engine.close(&host(), &challenger(), &host()).unwrap();
    assert_eq!(removed.board.get(0, 0), Some(Cell::Host));
    assert_eq!(engine.game(&host(), &challenger()).unwrap(), None);

    let kinds = [
        play(&mut engine, &challenger(), 1, 1).unwrap_err().kind(),
        engine
            .restart(&host(), &challenger(), &host(), &host())
            .unwrap_err()
            .kind(),
        engine.close(&host(), &challenger(), &host()).unwrap_err().kind(),
    ];
    assert_eq!(kinds, [ErrorKind::NotFound; 3]);
}

#[test]
fn test_close_then_create_starts_fresh() {
    let mut engine = setup();
    play(&mut engine, &host(), 0, 0).unwrap();
    engine.close(&host(), &challenger(), &host()).unwrap();

    let game = engine.create(&host(), &challenger(), &host()).unwrap();
    assert_eq!(game.board, Board::new());
}

// =========================================================================
// Random playouts
// =========================================================================

/// Plays seeded random games to completion and checks the record
/// invariants after every accepted move.
#[test]
fn test_random_playouts_preserve_invariants() {
    let mut rng = StdRng::seed_from_u64(20_261_019);

    for game_no in 0..300 {
        let mut engine = setup();
        let mut previous = current(&engine);

        while !previous.winner.is_decided() {
            let by = previous.turn.clone();
            let open = previous.board.open_cells();
            let &(row, column) = open.choose(&mut rng).expect("undecided board has open cells");

            // Occasionally throw in an out-of-turn attempt; it must bounce.
            if rng.random_bool(0.2) {
                let other = previous.opponent_of(&by).cloned().unwrap();
                let err = play(&mut engine, &other, row, column).unwrap_err();
                assert_eq!(err.kind(), ErrorKind::NotYourTurn);
                assert_eq!(current(&engine), previous);
            }

            let next = play(&mut engine, &by, row, column).unwrap();

            // Exactly one cell changed, from empty to the mover's mark.
            let changed: Vec<usize> = (0..CELL_COUNT)
                .filter(|&i| previous.board.cells()[i] != next.board.cells()[i])
                .collect();
            assert_eq!(changed.len(), 1, "game {game_no}");
            let idx = changed[0];
            assert!(previous.board.cells()[idx].is_empty());
            assert_eq!(Some(next.board.cells()[idx]), previous.mark_for(&by));

            // Turn went to the other participant.
            assert_eq!(Some(&next.turn), previous.opponent_of(&by));

            previous = next;
        }

        match &previous.winner {
            Outcome::Draw => assert!(previous.board.is_full()),
            Outcome::Won(w) => assert!(previous.is_participant(w)),
            Outcome::Undecided => unreachable!(),
        }
    }
}
