//! Reverse conversion: JSON value → FieldValue.

use crate::forward::DATE_FORMAT;
use chrono::NaiveDate;
use faker_core::{
    parse_datetime, ColumnType, FieldValue, JsonArraySchema, JsonElementType, ModelDescriptor,
    ModelRow,
};
use std::collections::HashMap;

/// Errors raised when JSON does not fit the expected type.
#[derive(Debug, thiserror::Error)]
pub enum JsonConversionError {
    /// Text is not JSON at all
    #[error("Invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// JSON value of the wrong shape for the column type
    #[error("Expected {expected}, found {found}")]
    Mismatch { expected: String, found: String },

    /// Object key that is not a column of the model
    #[error("Unknown column '{column}' for model '{model}'")]
    UnknownColumn { model: String, column: String },

    /// A JSON row that is not an object
    #[error("Expected a JSON object for a row of model '{0}'")]
    NotAnObject(String),

    /// JSON array of the wrong length for its schema
    #[error("Expected a JSON array of {expected} elements, found {found}")]
    Length { expected: usize, found: usize },
}

fn mismatch(expected: impl ToString, found: &serde_json::Value) -> JsonConversionError {
    JsonConversionError::Mismatch {
        expected: expected.to_string(),
        found: found.to_string(),
    }
}

/// JSON value paired with the column type it should become.
#[derive(Debug, Clone)]
pub struct JsonValueWithSchema {
    /// The JSON value.
    pub value: serde_json::Value,
    /// The expected column type.
    pub column_type: ColumnType,
}

impl JsonValueWithSchema {
    /// Create a new JsonValueWithSchema.
    pub fn new(value: serde_json::Value, column_type: ColumnType) -> Self {
        Self { value, column_type }
    }

    /// Convert to a FieldValue of the expected type.
    pub fn to_field_value(&self) -> Result<FieldValue, JsonConversionError> {
        use serde_json::Value;

        let value = &self.value;
        match (&self.column_type, value) {
            (_, Value::Null) => Ok(FieldValue::Null),

            (ColumnType::Boolean, Value::Bool(b)) => Ok(FieldValue::Bool(*b)),

            (ColumnType::Integer, Value::Number(n)) => n
                .as_i64()
                .map(FieldValue::Int)
                .ok_or_else(|| mismatch("integer", value)),

            (ColumnType::Float, Value::Number(n)) => n
                .as_f64()
                .map(FieldValue::Float)
                .ok_or_else(|| mismatch("float", value)),

            (
                ColumnType::String { .. } | ColumnType::Text | ColumnType::Enum { .. },
                Value::String(s),
            ) => Ok(FieldValue::String(s.clone())),

            (ColumnType::Date, Value::String(s)) => NaiveDate::parse_from_str(s, DATE_FORMAT)
                .map(FieldValue::Date)
                .map_err(|_| mismatch("date", value)),

            (ColumnType::DateTime, Value::String(s)) => parse_datetime(s)
                .map(FieldValue::DateTime)
                .ok_or_else(|| mismatch("datetime", value)),

            (column_type, _) => Err(mismatch(column_type, value)),
        }
    }
}

/// Convert a JSON object back into a row of `model`.
///
/// Columns missing from the object stay unset.
pub fn json_to_row(
    model: &ModelDescriptor,
    index: u64,
    json: &serde_json::Value,
) -> Result<ModelRow, JsonConversionError> {
    let obj = json
        .as_object()
        .ok_or_else(|| JsonConversionError::NotAnObject(model.name.clone()))?;

    let mut fields = HashMap::with_capacity(obj.len());
    for (key, value) in obj {
        let column = model
            .get_column(key)
            .ok_or_else(|| JsonConversionError::UnknownColumn {
                model: model.name.clone(),
                column: key.clone(),
            })?;
        let typed = JsonValueWithSchema::new(value.clone(), column.column_type.clone())
            .to_field_value()?;
        fields.insert(key.clone(), typed);
    }

    Ok(ModelRow::new(model.name.clone(), index, fields))
}

/// Decode JSON-array text, requiring its length and element types to match
/// `schema` exactly.
pub fn decode_json_array(
    text: &str,
    schema: &JsonArraySchema,
) -> Result<Vec<FieldValue>, JsonConversionError> {
    let decoded: serde_json::Value = serde_json::from_str(text)?;
    let items = decoded
        .as_array()
        .ok_or_else(|| mismatch("array", &decoded))?;

    if items.len() != schema.len() {
        return Err(JsonConversionError::Length {
            expected: schema.len(),
            found: items.len(),
        });
    }

    items
        .iter()
        .zip(schema.elements())
        .map(|(item, element)| element_to_field_value(item, *element))
        .collect()
}

fn element_to_field_value(
    item: &serde_json::Value,
    element: JsonElementType,
) -> Result<FieldValue, JsonConversionError> {
    use serde_json::Value;

    if !element.accepts(item) {
        return Err(mismatch(element, item));
    }

    match (element, item) {
        (JsonElementType::String, Value::String(s)) => Ok(FieldValue::String(s.clone())),
        (JsonElementType::Integer, Value::Number(n)) => n
            .as_i64()
            .map(FieldValue::Int)
            .ok_or_else(|| mismatch(element, item)),
        (JsonElementType::Number, Value::Number(n)) => n
            .as_f64()
            .map(FieldValue::Float)
            .ok_or_else(|| mismatch(element, item)),
        (JsonElementType::Boolean, Value::Bool(b)) => Ok(FieldValue::Bool(*b)),
        _ => Err(mismatch(element, item)),
    }
}
