//! Capability ports the character generator is written against.
//!
//! Each port is an object-safe async trait so the generator can hold it as
//! `Arc<dyn Port>` and tests can substitute stubs or mocks. Implementations
//! are free to suspend at every call (I/O, remote dice services); the
//! generator awaits each call before issuing the next.

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::actor::{Actor, ActorData, ActorId, Token, TokenId, TokenUpdate};
use crate::error::{FormulaError, LookupError, StoreResult};
use crate::item::ItemRecord;

/// Named integer values a formula may reference as `@name`.
pub type FormulaContext = BTreeMap<String, i64>;

/// Identifier and display label of a pack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackSummary {
    /// Pack identifier used in table addresses.
    pub id: String,
    /// Human-readable label.
    pub label: String,
}

/// Resolves pack/table names to random or fixed results.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait TableLookupPort: Send + Sync {
    /// Roll the named table and return the drawn result's display text.
    async fn draw_text(&self, pack: &str, table: &str) -> Result<String, LookupError>;

    /// Roll the named table and return the item embedded in the drawn result.
    async fn draw_item(&self, pack: &str, table: &str) -> Result<ItemRecord, LookupError>;

    /// Look up a named item template without rolling.
    async fn find_item(&self, pack: &str, name: &str) -> Result<ItemRecord, LookupError>;

    /// Every entry name (tables and items) in a pack.
    async fn list_entry_names(&self, pack: &str) -> Result<BTreeSet<String>, LookupError>;

    /// All packs, sorted by label.
    async fn list_packs(&self) -> Vec<PackSummary>;
}

/// Evaluates dice/arithmetic formulas to an integer total.
///
/// Repeated calls with the same formula may return different totals.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait FormulaOracle: Send + Sync {
    /// Evaluate `formula`, resolving `@name` references from `context`.
    async fn evaluate(&self, formula: &str, context: &FormulaContext) -> Result<i64, FormulaError>;
}

/// Persistence target for generated characters.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait ActorRepository: Send + Sync {
    /// Persist a brand-new actor.
    async fn create_actor(&self, data: ActorData) -> StoreResult<Actor>;

    /// Fetch an actor by ID.
    async fn get_actor(&self, id: ActorId) -> StoreResult<Actor>;

    /// Delete every embedded item of an actor. `render` controls whether the
    /// host should redraw the actor's sheet after the deletion.
    async fn delete_all_items(&self, id: ActorId, render: bool) -> StoreResult<usize>;

    /// Apply update data to an existing actor.
    async fn update_actor(&self, id: ActorId, data: ActorData) -> StoreResult<Actor>;

    /// Tokens of an actor that are currently placed.
    async fn active_tokens(&self, id: ActorId) -> StoreResult<Vec<Token>>;

    /// Overwrite a token's displayed name and image.
    async fn update_token(&self, id: TokenId, update: TokenUpdate) -> StoreResult<()>;
}
