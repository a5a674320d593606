//! Value representations for the model-faker framework.
//!
//! This module defines the values produced by the generator, the row type
//! that carries them to a persistence session, and the [`Model`] trait typed
//! Rust structs implement to be introspected and read back.

use crate::schema::ModelDefinition;
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// A single column value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// SQL NULL
    Null,

    /// Boolean value
    Bool(bool),

    /// 64-bit signed integer
    Int(i64),

    /// 64-bit floating point
    Float(f64),

    /// String value (also used for encoded JSON text)
    String(String),

    /// Calendar date
    Date(NaiveDate),

    /// Date and time without timezone
    DateTime(NaiveDateTime),
}

impl FieldValue {
    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Try to get this value as a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to get this value as an i64.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get this value as an f64. Integers widen.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(f) => Some(*f),
            Self::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Try to get this value as a string reference.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to get this value as a date.
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// Try to get this value as a datetime.
    pub fn as_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            Self::DateTime(dt) => Some(*dt),
            _ => None,
        }
    }

    /// Runtime type name of the value.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::String(_) => "string",
            Self::Date(_) => "date",
            Self::DateTime(_) => "datetime",
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("NULL"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::String(s) => write!(f, "{s:?}"),
            Self::Date(d) => write!(f, "{d}"),
            Self::DateTime(dt) => write!(f, "{dt}"),
        }
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl From<NaiveDateTime> for FieldValue {
    fn from(value: NaiveDateTime) -> Self {
        Self::DateTime(value)
    }
}

/// Error reading a typed value out of a [`ModelRow`].
#[derive(Debug, thiserror::Error)]
pub enum RowError {
    /// Column missing from the row
    #[error("Row of model '{model}' has no value for column '{column}'")]
    MissingColumn { model: String, column: String },

    /// Column holds a value of another type
    #[error("Column '{column}': expected {expected}, found {found}")]
    TypeMismatch {
        column: String,
        expected: &'static str,
        found: &'static str,
    },
}

/// A row of one model.
///
/// A column absent from `fields` is unset; the persistence layer decides what
/// it becomes (its default, NULL, or an assigned primary key).
#[derive(Debug, Clone, PartialEq)]
pub struct ModelRow {
    /// Model name
    pub model: String,

    /// Generation index
    pub index: u64,

    /// Column values (column name -> value)
    pub fields: HashMap<String, FieldValue>,
}

impl ModelRow {
    /// Create a new row.
    pub fn new(model: impl Into<String>, index: u64, fields: HashMap<String, FieldValue>) -> Self {
        Self {
            model: model.into(),
            index,
            fields,
        }
    }

    /// Create a new row with a builder pattern.
    pub fn builder(model: impl Into<String>, index: u64) -> ModelRowBuilder {
        ModelRowBuilder {
            model: model.into(),
            index,
            fields: HashMap::new(),
        }
    }

    /// Get a field value by name.
    pub fn get_field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Whether a column has been given a value (NULL counts as a value).
    pub fn is_set(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Set a field value.
    pub fn set_field(&mut self, name: impl Into<String>, value: FieldValue) {
        self.fields.insert(name.into(), value);
    }

    /// Get the number of set fields.
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    fn require(&self, column: &str) -> Result<&FieldValue, RowError> {
        self.fields
            .get(column)
            .ok_or_else(|| RowError::MissingColumn {
                model: self.model.clone(),
                column: column.to_string(),
            })
    }

    fn mismatch(column: &str, expected: &'static str, found: &FieldValue) -> RowError {
        RowError::TypeMismatch {
            column: column.to_string(),
            expected,
            found: found.kind(),
        }
    }

    /// Read a non-null string column.
    pub fn get_string(&self, column: &str) -> Result<String, RowError> {
        let value = self.require(column)?;
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| Self::mismatch(column, "string", value))
    }

    /// Read a nullable string column.
    pub fn get_opt_string(&self, column: &str) -> Result<Option<String>, RowError> {
        match self.require(column)? {
            FieldValue::Null => Ok(None),
            FieldValue::String(s) => Ok(Some(s.clone())),
            other => Err(Self::mismatch(column, "string", other)),
        }
    }

    /// Read a non-null integer column.
    pub fn get_i64(&self, column: &str) -> Result<i64, RowError> {
        let value = self.require(column)?;
        value
            .as_i64()
            .ok_or_else(|| Self::mismatch(column, "integer", value))
    }

    /// Read a nullable integer column.
    pub fn get_opt_i64(&self, column: &str) -> Result<Option<i64>, RowError> {
        match self.require(column)? {
            FieldValue::Null => Ok(None),
            FieldValue::Int(i) => Ok(Some(*i)),
            other => Err(Self::mismatch(column, "integer", other)),
        }
    }

    /// Read a non-null float column.
    pub fn get_f64(&self, column: &str) -> Result<f64, RowError> {
        let value = self.require(column)?;
        value
            .as_f64()
            .ok_or_else(|| Self::mismatch(column, "float", value))
    }

    /// Read a non-null boolean column.
    pub fn get_bool(&self, column: &str) -> Result<bool, RowError> {
        let value = self.require(column)?;
        value
            .as_bool()
            .ok_or_else(|| Self::mismatch(column, "boolean", value))
    }

    /// Read a non-null date column.
    pub fn get_date(&self, column: &str) -> Result<NaiveDate, RowError> {
        let value = self.require(column)?;
        value
            .as_date()
            .ok_or_else(|| Self::mismatch(column, "date", value))
    }

    /// Read a non-null datetime column.
    pub fn get_datetime(&self, column: &str) -> Result<NaiveDateTime, RowError> {
        let value = self.require(column)?;
        value
            .as_datetime()
            .ok_or_else(|| Self::mismatch(column, "datetime", value))
    }
}

/// Builder for `ModelRow`.
pub struct ModelRowBuilder {
    model: String,
    index: u64,
    fields: HashMap<String, FieldValue>,
}

impl ModelRowBuilder {
    /// Add a field to the row.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Build the row.
    pub fn build(self) -> ModelRow {
        ModelRow {
            model: self.model,
            index: self.index,
            fields: self.fields,
        }
    }
}

/// A typed model: declares its columns and reads itself back from a row.
///
/// This is the adapter between a Rust struct and the faker. The declaration
/// is introspected into descriptors, so it only needs to state facts.
///
/// ```rust
/// use faker_core::{ColumnDefinition, ColumnType, Model, ModelDefinition, ModelRow, RowError};
///
/// struct Tag {
///     id: i64,
///     label: String,
/// }
///
/// impl Model for Tag {
///     fn definition() -> ModelDefinition {
///         ModelDefinition::new(
///             "tag",
///             vec![
///                 ColumnDefinition::new("id", ColumnType::Integer).primary_key(),
///                 ColumnDefinition::new("label", ColumnType::string(20)),
///             ],
///         )
///     }
///
///     fn from_row(row: &ModelRow) -> Result<Self, RowError> {
///         Ok(Self {
///             id: row.get_i64("id")?,
///             label: row.get_string("label")?,
///         })
///     }
/// }
/// ```
pub trait Model: Sized {
    /// Column declarations of this model.
    fn definition() -> ModelDefinition;

    /// Read an instance from a persisted row.
    fn from_row(row: &ModelRow) -> Result<Self, RowError>;
}
