//! Schema introspection.
//!
//! Turns raw [`ColumnDefinition`]s into validated [`ColumnDescriptor`]s: the
//! default is converted to a typed value, bounds are resolved to inclusive
//! ranges and every hint is checked against the column type. A descriptor is
//! also the single place that decides whether a value satisfies its column,
//! see [`ColumnDescriptor::check_value`].

use crate::schema::{ColumnDefinition, ColumnInfo, JsonArraySchema, ModelDefinition, SchemaError};
use crate::types::ColumnType;
use crate::values::{FieldValue, Model, ModelRow};
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::HashSet;

/// Span used to fill in the missing side of a bounds hint.
pub const DEFAULT_SPAN: i64 = 1_000_000;

/// Inclusive numeric range a column's values must fall in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericBounds {
    /// Integer range
    Int { min: i64, max: i64 },
    /// Float range
    Float { min: f64, max: f64 },
}

impl NumericBounds {
    /// Whether `value` lies inside the range.
    pub fn contains(&self, value: &FieldValue) -> bool {
        match (self, value) {
            (Self::Int { min, max }, FieldValue::Int(v)) => (*min..=*max).contains(v),
            (Self::Float { min, max }, FieldValue::Float(v)) => (*min..=*max).contains(v),
            (Self::Float { min, max }, FieldValue::Int(v)) => (*min..=*max).contains(&(*v as f64)),
            _ => false,
        }
    }
}

/// Error raised when a value does not satisfy its column.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConstraintError {
    /// NULL in a NOT NULL column
    #[error("NOT NULL constraint failed: {model}.{column}")]
    NotNull { model: String, column: String },

    /// Value of the wrong runtime type
    #[error("Column {model}.{column}: expected {expected}, found {found}")]
    TypeMismatch {
        model: String,
        column: String,
        expected: String,
        found: &'static str,
    },

    /// String longer than the declared length
    #[error("Column {model}.{column}: length {length} exceeds declared maximum {max_length}")]
    TooLong {
        model: String,
        column: String,
        length: usize,
        max_length: usize,
    },

    /// Number outside the declared bounds
    #[error("Column {model}.{column}: value {value} is outside the declared bounds")]
    OutOfBounds {
        model: String,
        column: String,
        value: String,
    },

    /// Value not in an enum's allowed set
    #[error("Column {model}.{column}: {value:?} is not one of the allowed values")]
    NotInEnum {
        model: String,
        column: String,
        value: String,
    },

    /// Text that does not decode to the declared JSON array
    #[error("Column {model}.{column}: {reason}")]
    JsonShape {
        model: String,
        column: String,
        reason: String,
    },

    /// Row carries a column the model does not declare
    #[error("Model {model} has no column {column}")]
    UnknownColumn { model: String, column: String },
}

/// Introspected, validated metadata for one column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDescriptor {
    /// Column name
    pub name: String,

    /// Semantic type
    pub column_type: ColumnType,

    /// Whether NULL is allowed
    pub nullable: bool,

    /// Whether the store assigns this column
    pub primary_key: bool,

    /// Typed static default
    pub default: Option<FieldValue>,

    /// Maximum length in characters, for bounded strings
    pub max_length: Option<usize>,

    /// Resolved numeric bounds
    pub bounds: Option<NumericBounds>,

    /// JSON-array element schema
    pub json_schema: Option<JsonArraySchema>,

    /// Documentation
    pub doc: Option<String>,
}

impl ColumnDescriptor {
    /// Introspect a single column declaration.
    pub fn from_definition(column: &ColumnDefinition) -> Result<Self, SchemaError> {
        let name = column.name.clone();

        let max_length = match &column.column_type {
            ColumnType::String { length: Some(0) } => {
                return Err(SchemaError::InvalidLength { column: name });
            }
            ColumnType::String {
                length: Some(length),
            } => Some(*length as usize),
            ColumnType::Enum { values } if values.is_empty() => {
                return Err(SchemaError::EmptyEnum { column: name });
            }
            _ => None,
        };

        if column.primary_key && column.column_type != ColumnType::Integer {
            return Err(SchemaError::UnsupportedPrimaryKey {
                column: name,
                column_type: column.column_type.to_string(),
            });
        }

        let bounds = column
            .info
            .map(|info| resolve_bounds(&name, &column.column_type, info))
            .transpose()?;

        if column.json_schema.is_some() && !column.column_type.holds_unbounded_text() {
            return Err(SchemaError::HintNotApplicable {
                column: name,
                hint: "JSON schema",
                column_type: column.column_type.to_string(),
            });
        }

        let mut descriptor = Self {
            name,
            column_type: column.column_type.clone(),
            nullable: column.nullable,
            primary_key: column.primary_key,
            default: None,
            max_length,
            bounds,
            json_schema: column.json_schema.clone(),
            doc: column.doc.clone(),
        };

        if let Some(raw) = &column.default {
            let value = convert_default(&descriptor.name, &descriptor.column_type, raw)?;
            // The default has to satisfy the column it belongs to.
            descriptor
                .check_value("", &value)
                .map_err(|e| SchemaError::InvalidDefault {
                    column: descriptor.name.clone(),
                    reason: e.to_string(),
                })?;
            descriptor.default = Some(value);
        }

        Ok(descriptor)
    }

    /// Check a value against this column's type and constraints.
    ///
    /// `model` only feeds the error message.
    pub fn check_value(&self, model: &str, value: &FieldValue) -> Result<(), ConstraintError> {
        let mismatch = || ConstraintError::TypeMismatch {
            model: model.to_string(),
            column: self.name.clone(),
            expected: self.column_type.to_string(),
            found: value.kind(),
        };

        if value.is_null() {
            return if self.nullable {
                Ok(())
            } else {
                Err(ConstraintError::NotNull {
                    model: model.to_string(),
                    column: self.name.clone(),
                })
            };
        }

        match (&self.column_type, value) {
            (ColumnType::String { .. } | ColumnType::Text, FieldValue::String(s)) => {
                if let Some(max_length) = self.max_length {
                    let length = s.chars().count();
                    if length > max_length {
                        return Err(ConstraintError::TooLong {
                            model: model.to_string(),
                            column: self.name.clone(),
                            length,
                            max_length,
                        });
                    }
                }
                if let Some(schema) = &self.json_schema {
                    check_json_array(schema, s).map_err(|reason| ConstraintError::JsonShape {
                        model: model.to_string(),
                        column: self.name.clone(),
                        reason,
                    })?;
                }
            }
            (ColumnType::Enum { values }, FieldValue::String(s)) => {
                if !values.iter().any(|v| v == s) {
                    return Err(ConstraintError::NotInEnum {
                        model: model.to_string(),
                        column: self.name.clone(),
                        value: s.clone(),
                    });
                }
            }
            (ColumnType::Integer, FieldValue::Int(_))
            | (ColumnType::Float, FieldValue::Float(_) | FieldValue::Int(_)) => {
                if let Some(bounds) = &self.bounds {
                    if !bounds.contains(value) {
                        return Err(ConstraintError::OutOfBounds {
                            model: model.to_string(),
                            column: self.name.clone(),
                            value: value.to_string(),
                        });
                    }
                }
            }
            (ColumnType::Boolean, FieldValue::Bool(_))
            | (ColumnType::Date, FieldValue::Date(_))
            | (ColumnType::DateTime, FieldValue::DateTime(_)) => {}
            _ => return Err(mismatch()),
        }

        Ok(())
    }
}

/// Introspected model: name plus column descriptors in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelDescriptor {
    /// Model name
    pub name: String,

    /// Column descriptors
    pub columns: Vec<ColumnDescriptor>,
}

impl ModelDescriptor {
    /// Introspect a model definition.
    pub fn from_definition(model: &ModelDefinition) -> Result<Self, SchemaError> {
        let mut seen = HashSet::new();
        let mut columns = Vec::with_capacity(model.columns.len());

        for column in &model.columns {
            if !seen.insert(column.name.as_str()) {
                return Err(SchemaError::DuplicateColumn {
                    model: model.name.clone(),
                    column: column.name.clone(),
                });
            }
            columns.push(ColumnDescriptor::from_definition(column)?);
        }

        Ok(Self {
            name: model.name.clone(),
            columns,
        })
    }

    /// Introspect a typed model.
    pub fn of<M: Model>() -> Result<Self, SchemaError> {
        Self::from_definition(&M::definition())
    }

    /// Get a column descriptor by name.
    pub fn get_column(&self, name: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// The integer primary key column, if any.
    pub fn primary_key(&self) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.primary_key)
    }

    /// Fill in what the persistence layer owns: unset columns get their
    /// default, or NULL when nullable. Primary keys are left to the caller.
    pub fn apply_defaults(&self, row: &mut ModelRow) {
        for column in &self.columns {
            if column.primary_key || row.is_set(&column.name) {
                continue;
            }
            if let Some(default) = &column.default {
                row.set_field(column.name.clone(), default.clone());
            } else if column.nullable {
                row.set_field(column.name.clone(), FieldValue::Null);
            }
        }
    }

    /// Check every column of a row, and reject columns the model lacks.
    ///
    /// An unset column counts as NULL.
    pub fn check_row(&self, row: &ModelRow) -> Result<(), ConstraintError> {
        if let Some(unknown) = row.fields.keys().find(|k| self.get_column(k).is_none()) {
            return Err(ConstraintError::UnknownColumn {
                model: self.name.clone(),
                column: unknown.clone(),
            });
        }

        for column in &self.columns {
            let value = row.get_field(&column.name).unwrap_or(&FieldValue::Null);
            column.check_value(&self.name, value)?;
        }
        Ok(())
    }
}

/// Introspect a typed model into its column descriptors.
pub fn introspect<M: Model>() -> Result<Vec<ColumnDescriptor>, SchemaError> {
    ModelDescriptor::of::<M>().map(|model| model.columns)
}

/// 2^63: the first float past `i64::MAX`. `-I64_LIMIT` is exactly `i64::MIN`.
const I64_LIMIT: f64 = 9_223_372_036_854_775_808.0;

fn resolve_bounds(
    column: &str,
    column_type: &ColumnType,
    info: ColumnInfo,
) -> Result<NumericBounds, SchemaError> {
    let span = DEFAULT_SPAN as f64;
    let (min, max) = match (info.min, info.max) {
        (Some(min), Some(max)) => (min, max),
        (Some(min), None) => (min, min + span),
        (None, Some(max)) => (max - span, max),
        (None, None) => (0.0, span),
    };

    let invalid = || SchemaError::InvalidBounds {
        column: column.to_string(),
        min,
        max,
    };

    match column_type {
        ColumnType::Integer => {
            // Round inward so every generated integer stays inside the hint.
            let lo = min.ceil();
            let hi = max.floor();
            if !lo.is_finite() || !hi.is_finite() || lo > hi {
                return Err(invalid());
            }
            if lo < -I64_LIMIT || hi >= I64_LIMIT {
                return Err(invalid());
            }
            Ok(NumericBounds::Int {
                min: lo as i64,
                max: hi as i64,
            })
        }
        ColumnType::Float => {
            if !min.is_finite() || !max.is_finite() || min > max {
                return Err(invalid());
            }
            // Uniform sampling scales by the span, which must stay finite.
            if !((max - min) / (1.0 - f64::EPSILON)).is_finite() {
                return Err(invalid());
            }
            Ok(NumericBounds::Float { min, max })
        }
        other => Err(SchemaError::HintNotApplicable {
            column: column.to_string(),
            hint: "bounds",
            column_type: other.to_string(),
        }),
    }
}

fn convert_default(
    column: &str,
    column_type: &ColumnType,
    raw: &serde_yaml::Value,
) -> Result<FieldValue, SchemaError> {
    use serde_yaml::Value as YamlValue;

    let invalid = |reason: String| SchemaError::InvalidDefault {
        column: column.to_string(),
        reason,
    };

    let value = match (column_type, raw) {
        (_, YamlValue::Null) => FieldValue::Null,
        (ColumnType::String { .. } | ColumnType::Text | ColumnType::Enum { .. }, YamlValue::String(s)) => {
            FieldValue::String(s.clone())
        }
        (ColumnType::Integer, YamlValue::Number(n)) => n
            .as_i64()
            .map(FieldValue::Int)
            .ok_or_else(|| invalid(format!("{n} is not an integer")))?,
        (ColumnType::Float, YamlValue::Number(n)) => n
            .as_f64()
            .map(FieldValue::Float)
            .ok_or_else(|| invalid(format!("{n} is not a number")))?,
        (ColumnType::Boolean, YamlValue::Bool(b)) => FieldValue::Bool(*b),
        (ColumnType::Date, YamlValue::String(s)) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(FieldValue::Date)
            .map_err(|e| invalid(format!("'{s}' is not a date: {e}")))?,
        (ColumnType::DateTime, YamlValue::String(s)) => parse_datetime(s)
            .map(FieldValue::DateTime)
            .ok_or_else(|| invalid(format!("'{s}' is not a datetime")))?,
        (other_type, YamlValue::Tagged(tagged)) => {
            return convert_default(column, other_type, &tagged.value);
        }
        (other_type, other) => {
            return Err(invalid(format!(
                "{} is not a valid {other_type} value",
                serde_yaml::to_string(other)
                    .map(|s| s.trim().to_string())
                    .unwrap_or_else(|_| "value".to_string())
            )));
        }
    };

    Ok(value)
}

/// Parse a datetime in ISO 8601 form, with or without fractional seconds.
pub fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(s, format).ok())
}

fn check_json_array(schema: &JsonArraySchema, text: &str) -> Result<(), String> {
    use serde_json::Value as JsonValue;

    let decoded: JsonValue =
        serde_json::from_str(text).map_err(|e| format!("not valid JSON: {e}"))?;
    let items = decoded
        .as_array()
        .ok_or_else(|| "JSON value is not an array".to_string())?;

    if items.len() != schema.len() {
        return Err(format!(
            "JSON array has {} elements, schema declares {}",
            items.len(),
            schema.len()
        ));
    }

    for (position, (item, expected)) in items.iter().zip(schema.elements()).enumerate() {
        if !expected.accepts(item) {
            return Err(format!(
                "JSON array element {position} is not a {expected}: {item}"
            ));
        }
    }

    Ok(())
}
