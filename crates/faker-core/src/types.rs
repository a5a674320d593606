//! Column types for the model-faker framework.
//!
//! This module defines `ColumnType`, the declared semantic type of a model
//! column, and `JsonElementType`, the primitive element types allowed in a
//! JSON-array column schema.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

/// Declared semantic type of a model column.
///
/// # YAML Format
///
/// Simple types can be specified as strings:
/// ```yaml
/// type: integer
/// type: text
/// type: datetime
/// ```
///
/// Types with parameters use object format:
/// ```yaml
/// type:
///   type: string
///   length: 80
/// type:
///   type: enum
///   values: [draft, published]
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnType {
    /// Character string, optionally bounded
    String {
        /// Maximum length in characters
        length: Option<u32>,
    },

    /// Unbounded text
    Text,

    /// 64-bit signed integer
    Integer,

    /// 64-bit IEEE 754 floating point
    Float,

    /// Boolean value
    Boolean,

    /// Date only (YYYY-MM-DD)
    Date,

    /// Date and time without timezone
    DateTime,

    /// One of a fixed set of string values
    Enum {
        /// Allowed values
        values: Vec<String>,
    },
}

impl Serialize for ColumnType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeMap;

        match self {
            Self::String { length: None } => serializer.serialize_str("string"),
            Self::Text => serializer.serialize_str("text"),
            Self::Integer => serializer.serialize_str("integer"),
            Self::Float => serializer.serialize_str("float"),
            Self::Boolean => serializer.serialize_str("boolean"),
            Self::Date => serializer.serialize_str("date"),
            Self::DateTime => serializer.serialize_str("datetime"),

            Self::String {
                length: Some(length),
            } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "string")?;
                map.serialize_entry("length", length)?;
                map.end()
            }
            Self::Enum { values } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("type", "enum")?;
                map.serialize_entry("values", values)?;
                map.end()
            }
        }
    }
}

/// Resolve a parameterless type name, accepting the common aliases.
fn simple_type(name: &str) -> Option<ColumnType> {
    match name {
        "string" | "varchar" | "str" => Some(ColumnType::String { length: None }),
        "text" => Some(ColumnType::Text),
        "integer" | "int" | "big_int" | "bigint" => Some(ColumnType::Integer),
        "float" | "double" | "real" => Some(ColumnType::Float),
        "boolean" | "bool" => Some(ColumnType::Boolean),
        "date" => Some(ColumnType::Date),
        "datetime" | "date_time" | "timestamp" => Some(ColumnType::DateTime),
        _ => None,
    }
}

impl<'de> Deserialize<'de> for ColumnType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{Error, MapAccess, Visitor};

        struct ColumnTypeVisitor;

        impl<'de> Visitor<'de> for ColumnTypeVisitor {
            type Value = ColumnType;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string or map representing a column type")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: Error,
            {
                simple_type(value)
                    .ok_or_else(|| E::custom(format!("unsupported column type: {value}")))
            }

            fn visit_map<M>(self, mut map: M) -> Result<Self::Value, M::Error>
            where
                M: MapAccess<'de>,
            {
                let mut type_name: Option<String> = None;
                let mut fields: HashMap<String, serde_yaml::Value> = HashMap::new();

                while let Some(key) = map.next_key::<String>()? {
                    if key == "type" {
                        type_name = Some(map.next_value()?);
                    } else {
                        fields.insert(key, map.next_value()?);
                    }
                }

                let type_name = type_name.ok_or_else(|| M::Error::missing_field("type"))?;

                match type_name.as_str() {
                    "string" | "varchar" | "str" => {
                        let length = get_field::<u32, M::Error>(&fields, "length")?;
                        Ok(ColumnType::String { length })
                    }
                    "enum" => {
                        let values = get_field::<Vec<String>, M::Error>(&fields, "values")?
                            .ok_or_else(|| M::Error::missing_field("values"))?;
                        Ok(ColumnType::Enum { values })
                    }
                    other => simple_type(other).ok_or_else(|| {
                        M::Error::custom(format!("unsupported column type: {other}"))
                    }),
                }
            }
        }

        deserializer.deserialize_any(ColumnTypeVisitor)
    }
}

fn get_field<T: for<'de> Deserialize<'de>, E: serde::de::Error>(
    fields: &HashMap<String, serde_yaml::Value>,
    key: &'static str,
) -> Result<Option<T>, E> {
    match fields.get(key) {
        None | Some(serde_yaml::Value::Null) => Ok(None),
        Some(value) => serde_yaml::from_value(value.clone())
            .map(Some)
            .map_err(|e| E::custom(format!("invalid field '{key}': {e}"))),
    }
}

impl ColumnType {
    /// Create a String type bounded to `length` characters.
    pub fn string(length: u32) -> Self {
        Self::String {
            length: Some(length),
        }
    }

    /// Create an Enum type with the given values.
    pub fn enumeration<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Enum {
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Check if this type represents a numeric type.
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer | Self::Float)
    }

    /// Check if this type represents a string type.
    pub fn is_string(&self) -> bool {
        matches!(self, Self::String { .. } | Self::Text | Self::Enum { .. })
    }

    /// Check if this type represents a temporal type.
    pub fn is_temporal(&self) -> bool {
        matches!(self, Self::Date | Self::DateTime)
    }

    /// Whether a column of this type can hold arbitrarily long encoded text.
    pub fn holds_unbounded_text(&self) -> bool {
        matches!(self, Self::Text | Self::String { length: None })
    }

    /// Short name used in error messages and descriptor listings.
    pub fn name(&self) -> &'static str {
        match self {
            Self::String { .. } => "string",
            Self::Text => "text",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::DateTime => "datetime",
            Self::Enum { .. } => "enum",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String {
                length: Some(length),
            } => write!(f, "string({length})"),
            Self::Enum { values } => write!(f, "enum({})", values.join("|")),
            other => f.write_str(other.name()),
        }
    }
}

/// Primitive element type of a JSON-array column schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JsonElementType {
    /// JSON string
    String,
    /// JSON integer number
    Integer,
    /// JSON floating point number
    Number,
    /// JSON boolean
    Boolean,
}

impl JsonElementType {
    /// Name as written in a schema.
    pub fn name(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::Boolean => "boolean",
        }
    }

    /// Whether a decoded JSON element has this type.
    ///
    /// Integers must fit in an `i64`, the range an integer column holds.
    pub fn accepts(&self, item: &serde_json::Value) -> bool {
        match self {
            Self::String => item.is_string(),
            Self::Integer => item.is_i64(),
            Self::Number => item.is_number(),
            Self::Boolean => item.is_boolean(),
        }
    }
}

impl fmt::Display for JsonElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
