//! Forward conversion: FieldValue → JSON value.

use faker_core::{FieldValue, ModelDescriptor, ModelRow};
use serde_json::json;

/// Date format used on the JSON side.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Datetime format used on the JSON side.
pub const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Wrapper for JSON values.
#[derive(Debug, Clone)]
pub struct JsonValue(pub serde_json::Value);

impl JsonValue {
    /// Get the inner JSON value.
    pub fn into_inner(self) -> serde_json::Value {
        self.0
    }

    /// Get a reference to the inner JSON value.
    pub fn as_inner(&self) -> &serde_json::Value {
        &self.0
    }
}

impl From<&FieldValue> for JsonValue {
    fn from(value: &FieldValue) -> Self {
        match value {
            FieldValue::Null => JsonValue(serde_json::Value::Null),
            FieldValue::Bool(b) => JsonValue(json!(*b)),
            FieldValue::Int(i) => JsonValue(json!(*i)),
            // Non-finite floats have no JSON form and become null
            FieldValue::Float(f) => JsonValue(json!(*f)),
            FieldValue::String(s) => JsonValue(json!(s)),
            FieldValue::Date(d) => JsonValue(json!(d.format(DATE_FORMAT).to_string())),
            FieldValue::DateTime(dt) => JsonValue(json!(dt.format(DATETIME_FORMAT).to_string())),
        }
    }
}

impl From<FieldValue> for JsonValue {
    fn from(value: FieldValue) -> Self {
        JsonValue::from(&value)
    }
}

/// Encode values as the text of a JSON array.
pub fn encode_json_array(values: &[FieldValue]) -> Result<String, serde_json::Error> {
    let items: Vec<serde_json::Value> = values
        .iter()
        .map(|v| JsonValue::from(v).into_inner())
        .collect();
    serde_json::to_string(&items)
}

/// Convert a row to a JSON object with columns in declaration order.
///
/// Unset columns are omitted.
pub fn row_to_json(
    row: &ModelRow,
    model: &ModelDescriptor,
) -> serde_json::Map<String, serde_json::Value> {
    let mut obj = serde_json::Map::new();

    for column in &model.columns {
        if let Some(value) = row.get_field(&column.name) {
            obj.insert(column.name.clone(), JsonValue::from(value).into_inner());
        }
    }

    obj
}
