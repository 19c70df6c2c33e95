//! Wire protocol for the tic-tac-toe contract.
//!
//! This crate defines the "language" the ledger speaks to the contract:
//!
//! - **Identity** ([`AccountName`]) — the validated ledger account names
//!   that identify hosts, challengers, and callers.
//! - **Actions** ([`Action`]) — the four entry points the ledger can
//!   dispatch: `create`, `restart`, `close`, `move`.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]) — how actions and records
//!   are converted to/from bytes.
//! - **Errors** ([`ProtocolError`]) — what can go wrong while naming or
//!   decoding.
//!
//! # Architecture
//!
//! The protocol layer sits underneath the engine. It knows nothing about
//! boards or turns — only how to name accounts and carry action arguments.
//!
//! ```text
//! Ledger (bytes) → Protocol (Action) → Engine (Match record)
//! ```

mod codec;
mod error;
mod types;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use types::{AccountName, Action, MAX_NAME_LEN, NAME_CHARSET};
