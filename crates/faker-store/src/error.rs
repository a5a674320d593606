//! Error types for the persistence layer.

use faker_core::{ConstraintError, RowError, SchemaError};
use json_types::JsonConversionError;
use thiserror::Error;

/// Errors that can occur while persisting or reading rows.
#[derive(Error, Debug)]
pub enum StoreError {
    /// No table has been created for the model.
    #[error("Table not found: {0}")]
    TableNotFound(String),

    /// Row belongs to a different model than the session writes.
    #[error("Session writes model '{expected}', got a row of '{found}'")]
    ModelMismatch { expected: String, found: String },

    /// Two rows share a primary key.
    #[error("UNIQUE constraint failed: {model}.{column} = {key}")]
    DuplicateKey {
        model: String,
        column: String,
        key: i64,
    },

    /// Every key after the largest one used is taken.
    #[error("No primary key left for {model}.{column} after {last}")]
    KeySpaceExhausted {
        model: String,
        column: String,
        last: i64,
    },

    /// Model metadata could not be introspected.
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// A column check failed.
    #[error("Constraint violation: {0}")]
    Constraint(#[from] ConstraintError),

    /// A row could not be read into a typed model.
    #[error("Row error: {0}")]
    Row(#[from] RowError),

    /// A stored JSON row could not be converted back.
    #[error("Conversion error on line {line}: {source}")]
    Conversion {
        line: usize,
        #[source]
        source: JsonConversionError,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
