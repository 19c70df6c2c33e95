use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;
use tictactoe::prelude::*;

#[derive(Debug, thiserror::Error)]
enum DemoError {
    #[error(transparent)]
    Contract(#[from] TicTacToeError),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error("{step}: no match record for {host} vs {challenger}")]
    NoRecord {
        step: &'static str,
        host: AccountName,
        challenger: AccountName,
    },
}

impl DemoError {
    fn no_record(step: &'static str, host: &AccountName, challenger: &AccountName) -> Self {
        Self::NoRecord {
            step,
            host: host.clone(),
            challenger: challenger.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn render(board: &Board) -> String {
    let glyph = |c: &Cell| match c {
        Cell::Empty => '.',
        Cell::Host => 'X',
        Cell::Challenger => 'O',
    };
    board
        .cells()
        .chunks(3)
        .map(|row| row.iter().map(glyph).map(String::from).collect::<Vec<_>>().join(" | "))
        .collect::<Vec<_>>()
        .join("\n")
}

fn describe(outcome: &Outcome) -> String {
    match outcome.winner() {
        Some(account) => format!("{account} wins"),
        None if outcome.is_decided() => "draw".into(),
        None => "undecided".into(),
    }
}

// ---------------------------------------------------------------------------
// Matches
// ---------------------------------------------------------------------------

/// Plays a fixed game from raw ledger JSON: alice sweeps the top row.
async fn scripted_match(
    contract: &Contract<MemoryStore, SignerAuthority>,
) -> Result<Outcome, DemoError> {
    let alice = AccountName::new("alice")?;
    let bob = AccountName::new("bob")?;

    let script: [(&AccountName, serde_json::Value); 6] = [
        (&alice, serde_json::json!({"action": "create", "challenger": "bob", "host": "alice"})),
        (&alice, move_json("alice", 0, 0)),
        (&bob, move_json("bob", 1, 0)),
        (&alice, move_json("alice", 0, 1)),
        (&bob, move_json("bob", 1, 1)),
        (&alice, move_json("alice", 0, 2)),
    ];

    for (caller, action) in script {
        let data = serde_json::to_vec(&action).map_err(ProtocolError::Encode)?;
        contract.dispatch_encoded(caller, &data).await?;
    }

    let game = contract
        .game(&alice, &bob)
        .await?
        .ok_or_else(|| DemoError::no_record("lookup", &alice, &bob))?;
    tracing::info!("scripted match\n{}", render(&game.board));
    Ok(game.winner)
}

fn move_json(by: &str, row: u16, column: u16) -> serde_json::Value {
    serde_json::json!({
        "action": "move",
        "challenger": "bob",
        "host": "alice",
        "by": by,
        "row": row,
        "column": column,
    })
}

/// Plays random legal moves between `host` and `challenger` until the
/// match is decided, then restarts it.
async fn random_match(
    contract: &Contract<MemoryStore, SignerAuthority>,
    host: &AccountName,
    challenger: &AccountName,
    rng: &mut StdRng,
) -> Result<Outcome, DemoError> {
    let create = Action::Create {
        challenger: challenger.clone(),
        host: host.clone(),
    };
    let mut game = contract
        .dispatch(host, create)
        .await?
        .ok_or_else(|| DemoError::no_record("create", host, challenger))?;

    while !game.winner.is_decided() {
        let open = game.board.open_cells();
        let Some(&(row, column)) = open.choose(rng) else {
            break;
        };
        let by = game.turn.clone();
        let action = Action::Move {
            challenger: challenger.clone(),
            host: host.clone(),
            by: by.clone(),
            row,
            column,
        };
        game = contract
            .dispatch(&by, action)
            .await?
            .ok_or_else(|| DemoError::no_record("move", host, challenger))?;
    }

    tracing::info!(%host, %challenger, "random match\n{}", render(&game.board));
    let outcome = game.winner.clone();

    let restart = Action::Restart {
        challenger: challenger.clone(),
        host: host.clone(),
        by: challenger.clone(),
    };
    contract.dispatch(challenger, restart).await?;
    Ok(outcome)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tictactoe::init_logging("info");

    let seed = match std::env::args().nth(1) {
        Some(arg) => arg.parse()?,
        None => 7,
    };
    let mut rng = StdRng::seed_from_u64(seed);

    let contract = Contract::builder().build();

    let outcome = scripted_match(&contract).await?;
    tracing::info!(outcome = %describe(&outcome), "scripted match finished");

    let carol = AccountName::new("carol")?;
    let dave = AccountName::new("dave")?;
    let outcome = random_match(&contract, &carol, &dave, &mut rng).await?;
    tracing::info!(seed, outcome = %describe(&outcome), "random match finished");

    Ok(())
}
