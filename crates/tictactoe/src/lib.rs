//! # tictactoe
//!
//! A two-player tic-tac-toe contract for a ledger-style record store.
//!
//! The ledger authenticates callers and stores records; this crate decides
//! whether a requested transition is legal and what the resulting match
//! looks like. Four actions are exposed: `create`, `restart`, `close`,
//! `move`.
//!
//! ## Quick Start
//!
//! ```rust
//! use tictactoe::prelude::*;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), TicTacToeError> {
//! let contract = Contract::builder().build();
//! let alice = AccountName::new("alice")?;
//! let bob = AccountName::new("bob")?;
//!
//! contract
//!     .dispatch(&alice, Action::Create { challenger: bob.clone(), host: alice.clone() })
//!     .await?;
//! let game = contract.game(&alice, &bob).await?.unwrap();
//! assert_eq!(game.turn, alice);
//! # Ok(())
//! # }
//! ```

mod contract;
mod dispatch;
mod error;
mod logging;

pub use contract::{Contract, ContractBuilder, ContractConfig, DEFAULT_CONTRACT_ACCOUNT};
pub use error::TicTacToeError;
pub use logging::init_logging;

pub mod prelude {
    //! Everything needed to deploy and drive the contract.

    pub use crate::{Contract, ContractBuilder, ContractConfig, TicTacToeError, init_logging};
    pub use tictactoe_auth::{AuthError, Authority, DelegatedAuthority, SignerAuthority};
    pub use tictactoe_engine::{
        Board, Cell, EngineError, ErrorKind, Match, MatchStore, MemoryStore, Operation, Outcome,
        StoreError,
    };
    pub use tictactoe_protocol::{AccountName, Action, Codec, JsonCodec, ProtocolError};
}
