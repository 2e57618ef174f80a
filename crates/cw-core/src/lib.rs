//! Core types for Cairnwright: actors, items, tokens, and the ports the
//! character generator consumes.
//!
//! This crate defines the persistence model that generated characters are
//! written into, plus the three capability ports (table lookup, formula
//! evaluation, actor persistence) that the generator is written against.
//! Reference adapters live in their own crates; the in-memory actor store
//! lives here because it owns the model it persists.

/// Actor, token, and actor-data types.
pub mod actor;
/// In-memory actor directory with name indexing and token placement.
pub mod directory;
/// Error types used by the ports and the in-memory store.
pub mod error;
/// Item records and flexible metadata values.
pub mod item;
/// `ActorRepository` adapter backed by an [`ActorDirectory`].
pub mod memory;
/// Capability ports consumed by the generator.
pub mod ports;

/// Re-export actor types.
pub use actor::{Actor, ActorData, ActorId, Token, TokenDisposition, TokenId, TokenUpdate};
/// Re-export the directory.
pub use directory::ActorDirectory;
/// Re-export error types.
pub use error::{FormulaError, LookupError, StoreError, StoreResult};
/// Re-export item types.
pub use item::{ItemId, ItemRecord, MetadataValue};
/// Re-export the in-memory repository.
pub use memory::InMemoryActorRepository;
/// Re-export port traits.
pub use ports::{ActorRepository, FormulaContext, FormulaOracle, PackSummary, TableLookupPort};
