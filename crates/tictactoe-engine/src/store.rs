//! The keyed record store the engine reads and writes matches through.
//!
//! Every host owns a namespace (a "table scope" on the ledger), and inside
//! it each match is keyed by the challenger. A host can therefore have one
//! match per challenger, and the same two accounts can play two separate
//! matches by swapping roles.

use std::collections::HashMap;

use tictactoe_protocol::AccountName;

use crate::{Match, StoreError};

/// Storage contract for match records.
///
/// The engine only ever touches one record per call: it finds it, works on
/// a copy, and writes the whole record back (or removes it). It never
/// scans a namespace.
///
/// Implementations must make `insert`, `update` and `remove` atomic per
/// record; the engine relies on a failed write leaving the record as it
/// was.
pub trait MatchStore: Send + 'static {
    /// Looks up the match keyed by `challenger` in `host`'s namespace.
    fn find(
        &self,
        host: &AccountName,
        challenger: &AccountName,
    ) -> Result<Option<Match>, StoreError>;

    /// Adds a new record to `host`'s namespace.
    ///
    /// # Errors
    /// [`StoreError::Duplicate`] if the key is taken. Never overwrites.
    fn insert(&mut self, host: &AccountName, game: Match) -> Result<(), StoreError>;

    /// Replaces an existing record with `game`.
    ///
    /// # Errors
    /// [`StoreError::Missing`] if there is nothing to replace.
    fn update(&mut self, host: &AccountName, game: Match) -> Result<(), StoreError>;

    /// Deletes a record and returns it.
    ///
    /// # Errors
    /// [`StoreError::Missing`] if there is nothing to delete.
    fn remove(
        &mut self,
        host: &AccountName,
        challenger: &AccountName,
    ) -> Result<Match, StoreError>;
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

/// An in-memory [`MatchStore`]: one `HashMap` per host namespace.
#[derive(Debug, Default)]
pub struct MemoryStore {
    /// host → (challenger → match)
    tables: HashMap<AccountName, HashMap<AccountName, Match>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of records across all namespaces.
    pub fn len(&self) -> usize {
        self.tables.values().map(HashMap::len).sum()
    }

    /// Returns `true` if no records are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every match in `host`'s namespace, in no particular order.
    pub fn matches_hosted_by(&self, host: &AccountName) -> Vec<&Match> {
        self.tables
            .get(host)
            .map(|table| table.values().collect())
            .unwrap_or_default()
    }
}

impl MatchStore for MemoryStore {
    fn find(
        &self,
        host: &AccountName,
        challenger: &AccountName,
    ) -> Result<Option<Match>, StoreError> {
        Ok(self
            .tables
            .get(host)
            .and_then(|table| table.get(challenger))
            .cloned())
    }

    fn insert(&mut self, host: &AccountName, game: Match) -> Result<(), StoreError> {
        let table = self.tables.entry(host.clone()).or_default();
        if table.contains_key(&game.challenger) {
            return Err(StoreError::Duplicate {
                host: host.clone(),
                challenger: game.challenger,
            });
        }
        table.insert(game.challenger.clone(), game);
        Ok(())
    }

    fn update(&mut self, host: &AccountName, game: Match) -> Result<(), StoreError> {
        let slot = self
            .tables
            .get_mut(host)
            .and_then(|table| table.get_mut(&game.challenger));
        match slot {
            Some(existing) => {
                *existing = game;
                Ok(())
            }
            None => Err(StoreError::Missing {
                host: host.clone(),
                challenger: game.challenger,
            }),
        }
    }

    fn remove(
        &mut self,
        host: &AccountName,
        challenger: &AccountName,
    ) -> Result<Match, StoreError> {
        let missing = || StoreError::Missing {
            host: host.clone(),
            challenger: challenger.clone(),
        };
        let table = self.tables.get_mut(host).ok_or_else(missing)?;
        let game = table.remove(challenger).ok_or_else(missing)?;
        if table.is_empty() {
            self.tables.remove(host);
        }
        Ok(game)
    }
}
