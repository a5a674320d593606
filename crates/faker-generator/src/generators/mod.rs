//! Individual value generators and the rule table that picks one per column.
//!
//! [`plan`] reads a column descriptor and decides once how that column is
//! filled; [`generate_value`] then dispatches on the resulting rule for every
//! row.

pub mod json_array;
pub mod numeric;
pub mod string;
pub mod temporal;

use faker_core::introspect::DEFAULT_SPAN;
use faker_core::{ColumnDescriptor, ColumnType, FieldValue, JsonArraySchema, NumericBounds};
use rand::Rng;

/// Errors raised when a rule cannot produce a value.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// Numeric range with no value to sample
    #[error("Cannot sample from range {min}..={max}")]
    InvalidRange { min: String, max: String },

    /// Choice rule with nothing to choose from
    #[error("No values to choose from")]
    EmptyChoice,

    /// JSON-array text could not be encoded
    #[error("Failed to encode JSON array: {0}")]
    JsonEncode(#[from] serde_json::Error),
}

/// How a column is filled.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationRule {
    /// Leave the column unset; the persistence layer owns it
    Skip,

    /// Always NULL
    Null,

    /// Random string of at most `max_length` characters
    String { max_length: usize },

    /// Random free text
    Text,

    /// Random integer in an inclusive range
    IntRange { min: i64, max: i64 },

    /// Random float in an inclusive range
    FloatRange { min: f64, max: f64 },

    /// Fair coin
    Bool,

    /// Random date
    Date,

    /// Random datetime
    DateTime,

    /// Random pick from a fixed set
    OneOf { values: Vec<String> },

    /// JSON array text following an element schema
    JsonArray { schema: JsonArraySchema },
}

impl GenerationRule {
    /// Short name used in logs and descriptor listings.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Skip => "skip",
            Self::Null => "null",
            Self::String { .. } => "string",
            Self::Text => "text",
            Self::IntRange { .. } => "int_range",
            Self::FloatRange { .. } => "float_range",
            Self::Bool => "bool",
            Self::Date => "date",
            Self::DateTime => "datetime",
            Self::OneOf { .. } => "one_of",
            Self::JsonArray { .. } => "json_array",
        }
    }
}

/// Decide how a column is filled.
///
/// Precedence: primary keys and defaulted columns are skipped, nullable
/// columns without a hint stay NULL, a JSON schema wins over the column type,
/// and everything else is dispatched on the type.
pub fn plan(column: &ColumnDescriptor) -> GenerationRule {
    if column.primary_key || column.default.is_some() {
        return GenerationRule::Skip;
    }

    if column.nullable && column.bounds.is_none() && column.json_schema.is_none() {
        return GenerationRule::Null;
    }

    if let Some(schema) = &column.json_schema {
        return GenerationRule::JsonArray {
            schema: schema.clone(),
        };
    }

    match &column.column_type {
        ColumnType::String { .. } => GenerationRule::String {
            max_length: column.max_length.unwrap_or(string::UNBOUNDED_MAX_LENGTH),
        },
        ColumnType::Text => GenerationRule::Text,
        ColumnType::Integer => match column.bounds {
            Some(NumericBounds::Int { min, max }) => GenerationRule::IntRange { min, max },
            _ => GenerationRule::IntRange {
                min: 0,
                max: DEFAULT_SPAN,
            },
        },
        ColumnType::Float => match column.bounds {
            Some(NumericBounds::Float { min, max }) => GenerationRule::FloatRange { min, max },
            _ => GenerationRule::FloatRange {
                min: 0.0,
                max: DEFAULT_SPAN as f64,
            },
        },
        ColumnType::Boolean => GenerationRule::Bool,
        ColumnType::Date => GenerationRule::Date,
        ColumnType::DateTime => GenerationRule::DateTime,
        ColumnType::Enum { values } => GenerationRule::OneOf {
            values: values.clone(),
        },
    }
}

/// Generate a value for a rule. `None` means the column stays unset.
///
/// Rules planned from a validated descriptor always succeed; a hand-built
/// rule with an empty range or choice set is an error.
pub fn generate_value<R: Rng>(
    rule: &GenerationRule,
    rng: &mut R,
) -> Result<Option<FieldValue>, GenerationError> {
    let value = match rule {
        GenerationRule::Skip => return Ok(None),

        GenerationRule::Null => FieldValue::Null,

        GenerationRule::String { max_length } => string::generate_string(rng, *max_length),

        GenerationRule::Text => string::generate_text(rng),

        GenerationRule::IntRange { min, max } => numeric::generate_int_range(rng, *min, *max)?,

        GenerationRule::FloatRange { min, max } => {
            numeric::generate_float_range(rng, *min, *max)?
        }

        GenerationRule::Bool => FieldValue::Bool(rng.gen_bool(0.5)),

        GenerationRule::Date => temporal::generate_date(rng),

        GenerationRule::DateTime => temporal::generate_datetime(rng),

        GenerationRule::OneOf { values } => {
            if values.is_empty() {
                return Err(GenerationError::EmptyChoice);
            }
            let idx = rng.gen_range(0..values.len());
            FieldValue::String(values[idx].clone())
        }

        GenerationRule::JsonArray { schema } => json_array::generate_json_array(rng, schema)?,
    };

    Ok(Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use faker_core::{ColumnDefinition, ColumnInfo, JsonElementType};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn descriptor(column: ColumnDefinition) -> ColumnDescriptor {
        ColumnDescriptor::from_definition(&column).unwrap()
    }

    #[test]
    fn test_plan_precedence() {
        let pk = descriptor(ColumnDefinition::new("id", ColumnType::Integer).primary_key());
        assert_eq!(plan(&pk), GenerationRule::Skip);

        let defaulted = descriptor(
            ColumnDefinition::new("status", ColumnType::string(80)).with_default("test123"),
        );
        assert_eq!(plan(&defaulted), GenerationRule::Skip);

        // Default wins even on a nullable column
        let nullable_default = descriptor(
            ColumnDefinition::new("status", ColumnType::string(80))
                .nullable()
                .with_default("x"),
        );
        assert_eq!(plan(&nullable_default), GenerationRule::Skip);

        let nullable = descriptor(ColumnDefinition::new("note", ColumnType::string(80)).nullable());
        assert_eq!(plan(&nullable), GenerationRule::Null);

        // A hint forces a value on a nullable column
        let nullable_bounded = descriptor(
            ColumnDefinition::new("n", ColumnType::Integer)
                .nullable()
                .with_info(ColumnInfo::range(1.0, 3.0)),
        );
        assert_eq!(
            plan(&nullable_bounded),
            GenerationRule::IntRange { min: 1, max: 3 }
        );

        let json = descriptor(
            ColumnDefinition::new("payload", ColumnType::Text)
                .with_json_schema(JsonArraySchema::new(vec![JsonElementType::Boolean])),
        );
        assert!(matches!(plan(&json), GenerationRule::JsonArray { .. }));
    }

    #[test]
    fn test_plan_by_type() {
        let cases = vec![
            (ColumnType::string(5), GenerationRule::String { max_length: 5 }),
            (
                ColumnType::String { length: None },
                GenerationRule::String {
                    max_length: string::UNBOUNDED_MAX_LENGTH,
                },
            ),
            (ColumnType::Text, GenerationRule::Text),
            (
                ColumnType::Integer,
                GenerationRule::IntRange {
                    min: 0,
                    max: DEFAULT_SPAN,
                },
            ),
            (ColumnType::Boolean, GenerationRule::Bool),
            (ColumnType::Date, GenerationRule::Date),
            (ColumnType::DateTime, GenerationRule::DateTime),
            (
                ColumnType::enumeration(["a", "b"]),
                GenerationRule::OneOf {
                    values: vec!["a".to_string(), "b".to_string()],
                },
            ),
        ];

        for (column_type, expected) in cases {
            let column = descriptor(ColumnDefinition::new("c", column_type));
            assert_eq!(plan(&column), expected);
        }
    }

    #[test]
    fn test_generate_value_types() {
        let mut rng = StdRng::seed_from_u64(42);

        assert_eq!(generate_value(&GenerationRule::Skip, &mut rng).unwrap(), None);
        assert_eq!(
            generate_value(&GenerationRule::Null, &mut rng).unwrap(),
            Some(FieldValue::Null)
        );
        assert!(matches!(
            generate_value(&GenerationRule::Bool, &mut rng).unwrap(),
            Some(FieldValue::Bool(_))
        ));
        assert!(matches!(
            generate_value(&GenerationRule::Date, &mut rng).unwrap(),
            Some(FieldValue::Date(_))
        ));
        assert!(matches!(
            generate_value(&GenerationRule::DateTime, &mut rng).unwrap(),
            Some(FieldValue::DateTime(_))
        ));

        let rule = GenerationRule::OneOf {
            values: vec!["x".to_string(), "y".to_string()],
        };
        for _ in 0..20 {
            let value = generate_value(&rule, &mut rng).unwrap().unwrap();
            assert!(matches!(value.as_str(), Some("x") | Some("y")));
        }
    }

    #[test]
    fn test_unsatisfiable_rules_are_errors() {
        let mut rng = StdRng::seed_from_u64(42);

        let empty = GenerationRule::OneOf { values: Vec::new() };
        assert!(matches!(
            generate_value(&empty, &mut rng),
            Err(GenerationError::EmptyChoice)
        ));

        let reversed = GenerationRule::IntRange { min: 5, max: 4 };
        assert!(matches!(
            generate_value(&reversed, &mut rng),
            Err(GenerationError::InvalidRange { .. })
        ));

        let reversed = GenerationRule::FloatRange { min: 1.0, max: 0.5 };
        assert!(matches!(
            generate_value(&reversed, &mut rng),
            Err(GenerationError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_generated_values_pass_column_checks() {
        let columns = vec![
            ColumnDefinition::new("short", ColumnType::string(1)),
            ColumnDefinition::new("medium", ColumnType::string(5)),
            ColumnDefinition::new("long", ColumnType::string(255)),
            ColumnDefinition::new("text", ColumnType::Text),
            ColumnDefinition::new("n", ColumnType::Integer).with_info(ColumnInfo::range(-3.0, 3.0)),
            ColumnDefinition::new("x", ColumnType::Float).with_info(ColumnInfo::range(0.5, 0.75)),
            ColumnDefinition::new("kind", ColumnType::enumeration(["a", "b", "c"])),
            ColumnDefinition::new("payload", ColumnType::Text).with_json_schema(
                JsonArraySchema::new(vec![
                    JsonElementType::String,
                    JsonElementType::Integer,
                    JsonElementType::Number,
                    JsonElementType::Boolean,
                ]),
            ),
        ];

        let mut rng = StdRng::seed_from_u64(7);
        for column in columns {
            let column = descriptor(column);
            let rule = plan(&column);
            for _ in 0..200 {
                let value = generate_value(&rule, &mut rng).unwrap().unwrap();
                column.check_value("test", &value).unwrap();
            }
        }
    }
}
