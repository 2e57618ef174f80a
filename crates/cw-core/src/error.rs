use crate::actor::{ActorId, TokenId};

/// Alias for `Result<T, StoreError>`.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by a table lookup backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    /// No pack with the given identifier exists.
    #[error("pack not found: \"{0}\"")]
    PackNotFound(String),

    /// The pack exists but holds no table or item with the given name.
    #[error("table not found: \"{table}\" in pack \"{pack}\"")]
    TableNotFound {
        /// The pack that was searched.
        pack: String,
        /// The missing table or entry name.
        table: String,
    },

    /// The table has no results that can be drawn.
    #[error("table \"{0}\" has no drawable results")]
    EmptyTable(String),

    /// The drawn result carries text only, but an item was requested.
    #[error("result drawn from table \"{0}\" has no embedded item")]
    NoItemResult(String),
}

/// Errors raised while evaluating a dice formula.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormulaError {
    /// The formula could not be parsed.
    #[error("invalid formula \"{formula}\": {message}")]
    Syntax {
        /// The formula text.
        formula: String,
        /// What went wrong.
        message: String,
    },

    /// An `@name` variable was not present in the roll context.
    #[error("unknown formula variable: @{0}")]
    UnknownVariable(String),

    /// The formula divided by zero.
    #[error("division by zero in formula \"{0}\"")]
    DivisionByZero(String),

    /// A die term was out of range (e.g. `d0`).
    #[error("invalid die: {0}")]
    InvalidDie(String),
}

/// Errors raised by an actor store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The requested actor does not exist.
    #[error("actor not found: {0}")]
    ActorNotFound(ActorId),

    /// The requested token does not exist.
    #[error("token not found: {0}")]
    TokenNotFound(TokenId),

    /// Reading or writing the backing file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file is not valid JSON for an actor directory.
    #[error("invalid actor store: {0}")]
    Json(#[from] serde_json::Error),
}
