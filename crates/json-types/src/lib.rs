//! JSON type conversions for faker-core values.
//!
//! This crate provides bidirectional conversions between faker-core's
//! `FieldValue` and JSON.
//!
//! # Modules
//!
//! - [`forward`] - FieldValue → JSON value conversion
//! - [`reverse`] - JSON value → FieldValue conversion
//!
//! # Example
//!
//! ```rust
//! use faker_core::{ColumnType, FieldValue};
//! use json_types::{JsonValue, JsonValueWithSchema};
//!
//! // Forward: FieldValue → JSON value
//! let json: JsonValue = FieldValue::Int(42).into();
//! assert_eq!(json.into_inner(), serde_json::json!(42));
//!
//! // Reverse: JSON value → FieldValue
//! let value = JsonValueWithSchema::new(serde_json::json!(42), ColumnType::Integer)
//!     .to_field_value()
//!     .unwrap();
//! assert_eq!(value, FieldValue::Int(42));
//! ```

pub mod forward;
pub mod reverse;

pub use forward::{encode_json_array, row_to_json, JsonValue};
pub use reverse::{decode_json_array, json_to_row, JsonConversionError, JsonValueWithSchema};
