//! Error types for the auth layer.

use tictactoe_protocol::AccountName;

/// Errors raised by an [`Authority`](crate::Authority).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// The caller may not act on behalf of `account`.
    #[error("missing authority of {account} (caller: {caller})")]
    MissingAuthority {
        account: AccountName,
        caller: AccountName,
    },
}
