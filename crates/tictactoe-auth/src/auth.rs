//! Authorization hook for validating who may act as an account.
//!
//! The contract doesn't verify signatures itself — the ledger does that
//! before an action is ever dispatched. Instead the contract defines the
//! [`Authority`] trait: a single method that answers "may `caller` act as
//! `account`?". The engine calls it before reading or writing any record.
//!
//! # Why a trait?
//!
//! - A plain signer check (caller must BE the account) for the common case
//! - Delegated permissions (one account authorizes another) when the
//!   ledger supports them
//! - A mock authority in tests
//!
//! All without changing any engine code.

use std::collections::{HashMap, HashSet};

use tictactoe_protocol::AccountName;

use crate::AuthError;

/// Decides whether a caller may act on behalf of an account.
///
/// # Trait bounds
///
/// - `Send + Sync` → the authority is shared by the contract facade,
///   which may be used from several Tokio tasks.
/// - `'static` → it doesn't borrow temporary data.
///
/// # Example
///
/// ```rust
/// use tictactoe_auth::{AuthError, Authority};
/// use tictactoe_protocol::AccountName;
///
/// /// Lets a single admin account act as anyone.
/// struct AdminAuthority {
///     admin: AccountName,
/// }
///
/// impl Authority for AdminAuthority {
///     fn require_auth(
///         &self,
///         caller: &AccountName,
///         account: &AccountName,
///     ) -> Result<(), AuthError> {
///         if caller == account || *caller == self.admin {
///             return Ok(());
///         }
///         Err(AuthError::MissingAuthority {
///             account: account.clone(),
///             caller: caller.clone(),
///         })
///     }
/// }
/// ```
pub trait Authority: Send + Sync + 'static {
    /// Succeeds if `caller` may act as `account`.
    ///
    /// # Errors
    /// [`AuthError::MissingAuthority`] if the capability check fails. The
    /// whole action is aborted; nothing has been written yet.
    fn require_auth(
        &self,
        caller: &AccountName,
        account: &AccountName,
    ) -> Result<(), AuthError>;
}

// ---------------------------------------------------------------------------
// SignerAuthority
// ---------------------------------------------------------------------------

/// The default authority: the caller must be the account itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignerAuthority;

impl Authority for SignerAuthority {
    fn require_auth(
        &self,
        caller: &AccountName,
        account: &AccountName,
    ) -> Result<(), AuthError> {
        if caller == account {
            return Ok(());
        }
        tracing::debug!(%caller, %account, "signer check failed");
        Err(AuthError::MissingAuthority {
            account: account.clone(),
            caller: caller.clone(),
        })
    }
}

// ---------------------------------------------------------------------------
// DelegatedAuthority
// ---------------------------------------------------------------------------

/// An authority where accounts can delegate to other accounts.
///
/// Mirrors ledger permission levels in their simplest form: after
/// `grant(alice, bot)`, the account `bot` may sign actions that require
/// `alice`. An account can always act as itself.
#[derive(Debug, Clone, Default)]
pub struct DelegatedAuthority {
    /// For each account, the set of callers it has delegated to.
    delegates: HashMap<AccountName, HashSet<AccountName>>,
}

impl DelegatedAuthority {
    /// Creates an authority with no delegations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Lets `delegate` act on behalf of `owner`.
    pub fn grant(&mut self, owner: AccountName, delegate: AccountName) {
        tracing::info!(%owner, %delegate, "authority granted");
        self.delegates.entry(owner).or_default().insert(delegate);
    }

    /// Withdraws a delegation. Returns `true` if one existed.
    pub fn revoke(&mut self, owner: &AccountName, delegate: &AccountName) -> bool {
        let removed = self
            .delegates
            .get_mut(owner)
            .is_some_and(|set| set.remove(delegate));
        if removed {
            tracing::info!(%owner, %delegate, "authority revoked");
        }
        removed
    }
}

impl Authority for DelegatedAuthority {
    fn require_auth(
        &self,
        caller: &AccountName,
        account: &AccountName,
    ) -> Result<(), AuthError> {
        let delegated = self
            .delegates
            .get(account)
            .is_some_and(|set| set.contains(caller));
        if caller == account || delegated {
            return Ok(());
        }
        tracing::debug!(%caller, %account, "no delegation covers caller");
        Err(AuthError::MissingAuthority {
            account: account.clone(),
            caller: caller.clone(),
        })
    }
}

// =========================================================================
// Tests
// =========================================================================
