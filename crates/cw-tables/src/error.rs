//! Error types for loading compendiums.

use thiserror::Error;

/// Result type for compendium loading.
pub type CompendiumResult<T> = Result<T, CompendiumError>;

/// Errors that can occur while loading a compendium.
#[derive(Debug, Error)]
pub enum CompendiumError {
    /// The compendium file could not be read.
    #[error("cannot read compendium: {0}")]
    Io(#[from] std::io::Error),

    /// The compendium file is not valid JSON for a compendium.
    #[error("invalid compendium: {0}")]
    Json(#[from] serde_json::Error),

    /// Two packs share an identifier.
    #[error("duplicate pack id: \"{0}\"")]
    DuplicatePack(String),
}
