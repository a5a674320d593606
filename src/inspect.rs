//! `inspect` command: show what introspection makes of each model.

use crate::args::InspectArgs;
use crate::load_schema;
use anyhow::Context;
use faker_core::{ColumnDescriptor, ModelDescriptor, NumericBounds};
use faker_generator::plan;
use json_types::JsonValue;
use serde_json::json;
use std::fmt::Write;

fn bounds_text(bounds: &Option<NumericBounds>) -> String {
    match bounds {
        Some(NumericBounds::Int { min, max }) => format!("{min}..={max}"),
        Some(NumericBounds::Float { min, max }) => format!("{min}..={max}"),
        None => "-".to_string(),
    }
}

fn column_json(column: &ColumnDescriptor) -> serde_json::Value {
    json!({
        "name": column.name,
        "type": column.column_type.to_string(),
        "nullable": column.nullable,
        "primary_key": column.primary_key,
        "default": column.default.as_ref().map(|v| JsonValue::from(v).into_inner()),
        "max_length": column.max_length,
        "bounds": column.bounds.as_ref().map(|_| bounds_text(&column.bounds)),
        "json_schema": column
            .json_schema
            .as_ref()
            .map(|s| s.elements().iter().map(|e| e.name()).collect::<Vec<_>>()),
        "rule": plan(column).name(),
    })
}

/// Render the descriptors of `models` as a text table.
pub fn render_table(models: &[ModelDescriptor]) -> String {
    let mut out = String::new();
    for model in models {
        let _ = writeln!(out, "{}", model.name);
        for column in &model.columns {
            let mut flags = Vec::new();
            if column.primary_key {
                flags.push("pk".to_string());
            }
            if column.nullable {
                flags.push("null".to_string());
            }
            if let Some(default) = &column.default {
                flags.push(format!("default={default}"));
            }
            if let Some(schema) = &column.json_schema {
                let elements: Vec<&str> = schema.elements().iter().map(|e| e.name()).collect();
                flags.push(format!("json=[{}]", elements.join(",")));
            }

            let _ = writeln!(
                out,
                "  {:<24} {:<16} {:<12} {:<11} {}",
                column.name,
                column.column_type.to_string(),
                bounds_text(&column.bounds),
                plan(column).name(),
                flags.join(" ")
            );
        }
    }
    out
}

/// Render the descriptors of `models` as pretty JSON.
pub fn render_json(models: &[ModelDescriptor]) -> anyhow::Result<String> {
    let value: Vec<serde_json::Value> = models
        .iter()
        .map(|model| {
            json!({
                "name": model.name,
                "columns": model.columns.iter().map(column_json).collect::<Vec<_>>(),
            })
        })
        .collect();
    Ok(serde_json::to_string_pretty(&value)?)
}

/// Run the inspect command, returning the rendered output.
pub fn run_inspect(args: &InspectArgs) -> anyhow::Result<String> {
    let schema = load_schema(&args.schema.schema)?;

    let models = schema
        .models
        .iter()
        .map(|definition| {
            ModelDescriptor::from_definition(definition)
                .with_context(|| format!("Invalid model '{}'", definition.name))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    tracing::debug!("Introspected {} models", models.len());

    if args.json {
        render_json(&models)
    } else {
        Ok(render_table(&models))
    }
}
