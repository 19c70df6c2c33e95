//! Caller authorization for the tic-tac-toe contract.
//!
//! The ledger has already authenticated whoever signed an action. What's
//! left is the capability check every contract action starts with:
//! "is this caller allowed to act as account X?"
//!
//! # How it fits in the stack
//!
//! ```text
//! Engine (above)  ← calls require_auth before touching any record
//!     ↕
//! Auth Layer (this crate)  ← decides whether a caller may act as an account
//!     ↕
//! Protocol Layer (below)  ← provides AccountName
//! ```

mod auth;
mod error;

pub use auth::{Authority, DelegatedAuthority, SignerAuthority};
pub use error::AuthError;
