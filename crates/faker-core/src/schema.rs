//! Model declarations for the model-faker framework.
//!
//! ## Type Hierarchy
//!
//! - `ColumnDefinition` - Declared column metadata, as a model states it
//! - `ModelDefinition` - A model name plus its ordered columns
//! - `ModelSchema` - A YAML file holding several model definitions
//!
//! Declarations are raw. They are turned into validated
//! [`ColumnDescriptor`](crate::introspect::ColumnDescriptor)s by the
//! introspector before any value is generated.

use crate::types::{ColumnType, JsonElementType};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

// ============================================================================
// Error Types
// ============================================================================

/// Error type for schema operations.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// Error reading schema file
    #[error("Failed to read schema file: {0}")]
    IoError(#[from] std::io::Error),

    /// Error parsing YAML
    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Model not found in schema
    #[error("Model not found: {0}")]
    ModelNotFound(String),

    /// Column not found in model
    #[error("Column '{column}' not found in model '{model}'")]
    ColumnNotFound { model: String, column: String },

    /// Two columns with the same name
    #[error("Model '{model}' declares column '{column}' more than once")]
    DuplicateColumn { model: String, column: String },

    /// Zero-length string column
    #[error("Column '{column}': string length must be at least 1")]
    InvalidLength { column: String },

    /// A hint attached to a column whose type cannot use it
    #[error("Column '{column}': {hint} hint is not applicable to {column_type} columns")]
    HintNotApplicable {
        column: String,
        hint: &'static str,
        column_type: String,
    },

    /// Bounds hint with an empty range
    #[error("Column '{column}': invalid bounds, min {min} is greater than max {max}")]
    InvalidBounds { column: String, min: f64, max: f64 },

    /// Default value that does not fit the column
    #[error("Column '{column}': invalid default: {reason}")]
    InvalidDefault { column: String, reason: String },

    /// Primary key of a type the store cannot assign
    #[error("Column '{column}': primary keys must be integer, found {column_type}")]
    UnsupportedPrimaryKey { column: String, column_type: String },

    /// Malformed JSON-array schema text
    #[error("Column '{column}': invalid JSON schema: {reason}")]
    InvalidJsonSchema { column: String, reason: String },

    /// Enum column without values
    #[error("Column '{column}': enum columns need at least one value")]
    EmptyEnum { column: String },
}

// ============================================================================
// Column hints
// ============================================================================

/// Free-form numeric hint attached to a column, `{min, max}`.
///
/// Either side may be omitted; the introspector fills in the missing side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnInfo {
    /// Lower bound (inclusive)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,

    /// Upper bound (inclusive)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl ColumnInfo {
    /// Create a hint bounded on both sides.
    pub fn range(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }
}

/// Ordered element types of a JSON-array column.
///
/// A schema `["string", "integer"]` describes a two-element array whose first
/// element is a string and second an integer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JsonArraySchema(pub Vec<JsonElementType>);

impl JsonArraySchema {
    /// Create a schema from element types.
    pub fn new(elements: Vec<JsonElementType>) -> Self {
        Self(elements)
    }

    /// Parse a schema written as JSON text, e.g. `["string", "integer"]`.
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Element types in order.
    pub fn elements(&self) -> &[JsonElementType] {
        &self.0
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the schema describes an empty array.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// ============================================================================
// Declarations
// ============================================================================

/// Column declaration.
///
/// This is what a model states about one of its attributes; nothing here has
/// been validated yet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ColumnDefinition {
    /// Column name
    pub name: String,

    /// Column type
    #[serde(rename = "type")]
    pub column_type: ColumnType,

    /// Whether this column is nullable
    #[serde(default)]
    pub nullable: bool,

    /// Whether this column is the primary key
    #[serde(default)]
    pub primary_key: bool,

    /// Static default applied by the persistence layer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_yaml::Value>,

    /// Numeric bounds hint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info: Option<ColumnInfo>,

    /// Element types for a JSON-array column
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json_schema: Option<JsonArraySchema>,

    /// Documentation; never interpreted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
}

impl ColumnDefinition {
    /// Create a new non-nullable column definition.
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
            nullable: false,
            primary_key: false,
            default: None,
            info: None,
            json_schema: None,
            doc: None,
        }
    }

    /// Mark the column nullable.
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Mark the column as the primary key.
    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    /// Attach a static default.
    pub fn with_default(mut self, value: impl Into<serde_yaml::Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Attach a `{min, max}` bounds hint.
    pub fn with_info(mut self, info: ColumnInfo) -> Self {
        self.info = Some(info);
        self
    }

    /// Attach a JSON-array element-type schema.
    pub fn with_json_schema(mut self, schema: JsonArraySchema) -> Self {
        self.json_schema = Some(schema);
        self
    }

    /// Attach documentation.
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Convert a legacy declaration that kept its JSON-array schema in the
    /// documentation string into one with a proper `json_schema`.
    ///
    /// The documentation text is consumed; a column without documentation is
    /// returned unchanged.
    pub fn with_doc_schema(mut self) -> Result<Self, SchemaError> {
        let Some(doc) = self.doc.take() else {
            return Ok(self);
        };
        let schema =
            JsonArraySchema::parse(&doc).map_err(|e| SchemaError::InvalidJsonSchema {
                column: self.name.clone(),
                reason: e.to_string(),
            })?;
        self.json_schema = Some(schema);
        Ok(self)
    }
}

fn default_version() -> u32 {
    1
}

/// Model definition: a named, ordered set of columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelDefinition {
    /// Model (table) name
    pub name: String,

    /// Column declarations in declaration order
    pub columns: Vec<ColumnDefinition>,
}

impl ModelDefinition {
    /// Create a new model definition.
    pub fn new(name: impl Into<String>, columns: Vec<ColumnDefinition>) -> Self {
        Self {
            name: name.into(),
            columns,
        }
    }

    /// Get a column by name.
    pub fn get_column(&self, name: &str) -> Option<&ColumnDefinition> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Get the type of a column by name.
    pub fn get_column_type(&self, name: &str) -> Result<&ColumnType, SchemaError> {
        self.get_column(name)
            .map(|c| &c.column_type)
            .ok_or_else(|| SchemaError::ColumnNotFound {
                model: self.name.clone(),
                column: name.to_string(),
            })
    }

    /// Get all column names.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }
}

/// Schema file holding model definitions.
///
/// ```yaml
/// version: 1
/// seed: 42
/// models:
///   - name: users
///     columns:
///       - name: id
///         type: integer
///         primary_key: true
///       - name: email
///         type:
///           type: string
///           length: 80
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSchema {
    /// Schema version
    #[serde(default = "default_version")]
    pub version: u32,

    /// Default seed for generation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    /// Model definitions
    pub models: Vec<ModelDefinition>,

    /// Cached model lookup (not serialized)
    #[serde(skip)]
    model_map: HashMap<String, usize>,
}

impl ModelSchema {
    /// Create a schema from model definitions.
    pub fn new(models: Vec<ModelDefinition>) -> Self {
        let mut schema = Self {
            version: default_version(),
            seed: None,
            models,
            model_map: HashMap::new(),
        };
        schema.build_model_map();
        schema
    }

    /// Load schema from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SchemaError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse schema from YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, SchemaError> {
        let mut schema: ModelSchema = serde_yaml::from_str(yaml)?;
        schema.build_model_map();
        Ok(schema)
    }

    fn build_model_map(&mut self) {
        self.model_map = self
            .models
            .iter()
            .enumerate()
            .map(|(idx, model)| (model.name.clone(), idx))
            .collect();
    }

    /// Get a model definition by name.
    pub fn get_model(&self, name: &str) -> Option<&ModelDefinition> {
        self.model_map
            .get(name)
            .and_then(|&idx| self.models.get(idx))
    }

    /// Get a model definition by name, failing when it is absent.
    pub fn require_model(&self, name: &str) -> Result<&ModelDefinition, SchemaError> {
        self.get_model(name)
            .ok_or_else(|| SchemaError::ModelNotFound(name.to_string()))
    }

    /// Get all model names in declaration order.
    pub fn model_names(&self) -> Vec<&str> {
        self.models.iter().map(|m| m.name.as_str()).collect()
    }
}
