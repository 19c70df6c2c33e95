//! Core protocol types: account names and the actions the ledger dispatches.
//!
//! Everything here travels "on the wire" — action arguments arrive as
//! serialized bytes and match records leave as serialized table rows.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ProtocolError;

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// Longest account name the ledger accepts.
pub const MAX_NAME_LEN: usize = 12;

/// The characters a ledger account name may contain.
pub const NAME_CHARSET: &str = ".12345abcdefghijklmnopqrstuvwxyz";

/// A ledger account name: the identity of a host, a challenger, or the
/// caller of an action.
///
/// This is a validated newtype. You can only get one through
/// [`AccountName::new`] (or `FromStr` / deserialization, which call it), so
/// every `AccountName` in the system is known to be well-formed:
///
/// - 1 to [`MAX_NAME_LEN`] characters
/// - only characters from [`NAME_CHARSET`]
/// - no trailing `.`
///
/// `#[serde(try_from = "String", into = "String")]` makes serde go through
/// the same validation, so an action naming `"Bob!"` fails to decode
/// instead of reaching the engine. On the wire it is just a plain string.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct AccountName(String);

impl AccountName {
    /// Validates and wraps an account name.
    ///
    /// # Errors
    /// Returns [`ProtocolError::InvalidName`] describing the broken rule.
    pub fn new(name: impl Into<String>) -> Result<Self, ProtocolError> {
        let name = name.into();

        if name.is_empty() {
            return Err(ProtocolError::InvalidName(
                "name must not be empty".into(),
            ));
        }
        if name.len() > MAX_NAME_LEN {
            return Err(ProtocolError::InvalidName(format!(
                "{name:?} is longer than {MAX_NAME_LEN} characters"
            )));
        }
        if let Some(bad) = name.chars().find(|c| !NAME_CHARSET.contains(*c)) {
            return Err(ProtocolError::InvalidName(format!(
                "{name:?} contains {bad:?}"
            )));
        }
        if name.ends_with('.') {
            return Err(ProtocolError::InvalidName(format!(
                "{name:?} ends with '.'"
            )));
        }

        Ok(Self(name))
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for AccountName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for AccountName {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for AccountName {
    type Error = ProtocolError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AccountName> for String {
    fn from(name: AccountName) -> Self {
        name.0
    }
}

// ---------------------------------------------------------------------------
// Action — the contract's entry points
// ---------------------------------------------------------------------------

/// One externally callable contract action.
///
/// The ledger delivers each action with its arguments; the contract
/// routes it to the matching lifecycle operation.
///
/// `#[serde(tag = "action", rename_all = "lowercase")]` produces
/// internally tagged JSON using the action's ledger name:
///
/// ```text
/// { "action": "move", "challenger": "bob", "host": "alice",
///   "by": "alice", "row": 0, "column": 2 }
/// ```
///
/// `row` and `column` are zero-based; the engine rejects anything outside
/// `[0, 3)`. They are unsigned, so "negative" coordinates can't be
/// expressed at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum Action {
    /// The host opens a new match against `challenger`.
    Create {
        challenger: AccountName,
        host: AccountName,
    },

    /// Either participant wipes the board and starts over.
    Restart {
        challenger: AccountName,
        host: AccountName,
        by: AccountName,
    },

    /// The host deletes the match.
    Close {
        challenger: AccountName,
        host: AccountName,
    },

    /// A participant places their mark.
    Move {
        challenger: AccountName,
        host: AccountName,
        by: AccountName,
        row: u16,
        column: u16,
    },
}

impl Action {
    /// The ledger name of this action (`"create"`, `"move"`, ...).
    pub fn name(&self) -> &'static str {
        match self {
            Self::Create { .. } => "create",
            Self::Restart { .. } => "restart",
            Self::Close { .. } => "close",
            Self::Move { .. } => "move",
        }
    }

    /// The account whose authority this action requires.
    ///
    /// `create` and `close` need the host; `restart` and `move` need `by`.
    pub fn authorizer(&self) -> &AccountName {
        match self {
            Self::Create { host, .. } | Self::Close { host, .. } => host,
            Self::Restart { by, .. } | Self::Move { by, .. } => by,
        }
    }

    /// The `(host, challenger)` pair identifying the targeted match.
    pub fn match_key(&self) -> (&AccountName, &AccountName) {
        match self {
            Self::Create { challenger, host }
            | Self::Restart {
                challenger, host, ..
            }
            | Self::Close { challenger, host }
            | Self::Move {
                challenger, host, ..
            } => (host, challenger),
        }
    }
}

// =========================================================================
// Tests
// =========================================================================
