//! Error types for the generation engine.

use thiserror::Error;

use cw_core::{FormulaError, LookupError, StoreError};

/// Result type for generation operations.
pub type GenerationResult<T> = Result<T, GenerationError>;

/// Result type for settings I/O.
pub type SettingsResult<T> = Result<T, SettingsError>;

/// A table address string could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    /// Fewer than two fields, or an empty pack or table.
    #[error("malformed table address \"{0}\" (expected \"<pack>;<table>[;<quantity>]\")")]
    Malformed(String),

    /// The quantity field is not a positive integer.
    #[error("invalid quantity \"{quantity}\" in table address \"{address}\"")]
    InvalidQuantity {
        /// The full address.
        address: String,
        /// The offending quantity field.
        quantity: String,
    },
}

/// Any failure that aborts a generation request.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// A configured address is malformed.
    #[error(transparent)]
    Address(#[from] AddressError),

    /// A pack, table or item could not be resolved.
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// A formula could not be evaluated.
    #[error(transparent)]
    Formula(#[from] FormulaError),

    /// The actor store rejected a write.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A configured pack fails the required-tables check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The configured pack does not exist.
    #[error("the selected {label} pack \"{pack}\" was not found")]
    PackNotFound {
        /// Which setting the pack was chosen for.
        label: String,
        /// The configured pack id.
        pack: String,
    },

    /// The pack exists but lacks required tables.
    #[error(
        "the selected {label} pack is missing the following required tables: {}",
        .missing.join(", ")
    )]
    MissingTables {
        /// Which setting the pack was chosen for.
        label: String,
        /// The configured pack id.
        pack: String,
        /// Every missing table name, in required-list order.
        missing: Vec<String>,
    },
}

/// Settings or rules files could not be read or written.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// File I/O failed.
    #[error("cannot access settings: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid JSON for the expected structure.
    #[error("invalid settings: {0}")]
    Json(#[from] serde_json::Error),
}
