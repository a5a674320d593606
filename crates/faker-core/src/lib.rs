//! Core types for the model-faker framework.
//!
//! This crate provides the foundational types used across the workspace,
//! including:
//!
//! - [`ColumnType`] - Declared semantic type of a column
//! - [`ColumnDefinition`] / [`ModelDefinition`] / [`ModelSchema`] - Raw model declarations
//! - [`ModelDescriptor`] / [`ColumnDescriptor`] - Introspected, validated metadata
//! - [`FieldValue`] / [`ModelRow`] - Generated values and rows
//! - [`Model`] - Adapter trait for typed Rust models
//! - [`Session`] - Persistence target for generated rows
//!
//! # Architecture
//!
//! ```text
//! faker-core (this crate)
//!    │
//!    ├─── faker-generator  (plans and generates rows from descriptors)
//!    ├─── faker-store      (in-memory and JSONL sessions)
//!    └─── json-types       (FieldValue <-> JSON)
//! ```
//!
//! # Example
//!
//! ```rust
//! use faker_core::{ColumnDefinition, ColumnInfo, ColumnType, ModelDefinition, ModelDescriptor};
//!
//! let model = ModelDefinition::new(
//!     "scores",
//!     vec![
//!         ColumnDefinition::new("id", ColumnType::Integer).primary_key(),
//!         ColumnDefinition::new("points", ColumnType::Integer)
//!             .with_info(ColumnInfo::range(0.0, 10.0)),
//!     ],
//! );
//!
//! let descriptor = ModelDescriptor::from_definition(&model).unwrap();
//! assert_eq!(descriptor.columns.len(), 2);
//! ```

pub mod introspect;
pub mod schema;
pub mod session;
pub mod types;
pub mod values;

// Re-exports for convenience
pub use introspect::{
    introspect, parse_datetime, ColumnDescriptor, ConstraintError, ModelDescriptor,
    NumericBounds,
};
pub use schema::{
    ColumnDefinition, ColumnInfo, JsonArraySchema, ModelDefinition, ModelSchema, SchemaError,
};
pub use session::Session;
pub use types::{ColumnType, JsonElementType};
pub use values::{FieldValue, Model, ModelRow, ModelRowBuilder, RowError};
