//! Game-state engine for the tic-tac-toe contract.
//!
//! Owns the match record, the move-legality checks, win/draw detection,
//! and the four lifecycle operations that tie them to a record store.
//!
//! # Key types
//!
//! - [`Match`] — one game between a host and a challenger
//! - [`Board`] / [`Cell`] — the fixed 3×3 grid
//! - [`Outcome`] — undecided, draw, or a winner
//! - [`Engine`] — create / restart / close / move
//! - [`MatchStore`] — where records live ([`MemoryStore`] in memory)
//! - [`EngineError`] — why an operation was rejected

mod board;
mod engine;
mod error;
mod game;
pub mod rules;
mod store;

pub use board::{BOARD_HEIGHT, BOARD_WIDTH, Board, CELL_COUNT, Cell};
pub use engine::Engine;
pub use error::{EngineError, ErrorKind, Operation, StoreError};
pub use game::{Match, Outcome};
pub use store::{MatchStore, MemoryStore};
