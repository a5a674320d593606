//! `populate` command: write fake rows for each model to JSONL files.

use crate::args::PopulateArgs;
use crate::load_schema;
use anyhow::Context;
use faker_core::{ModelDescriptor, ModelSchema};
use faker_generator::ModelFaker;
use faker_store::JsonlSession;
use std::path::PathBuf;
use std::time::Duration;

/// Outcome of populating one model.
#[derive(Debug, Clone)]
pub struct PopulateReport {
    /// Model name.
    pub model: String,
    /// File the rows went to.
    pub path: PathBuf,
    /// Rows written by this run.
    pub rows_created: u64,
    /// Seed the rows were derived from.
    pub seed: u64,
    /// Time taken.
    pub duration: Duration,
}

/// Pick the models to populate: the requested ones, or every model.
fn select_models<'a>(
    schema: &'a ModelSchema,
    requested: &[String],
) -> anyhow::Result<Vec<&'a faker_core::ModelDefinition>> {
    if requested.is_empty() {
        return Ok(schema.models.iter().collect());
    }
    requested
        .iter()
        .map(|name| schema.require_model(name).map_err(anyhow::Error::from))
        .collect()
}

/// Run the populate command.
pub fn run_populate(args: &PopulateArgs) -> anyhow::Result<Vec<PopulateReport>> {
    let schema = load_schema(&args.schema.schema)?;
    let seed = args
        .seed
        .or(schema.seed)
        .unwrap_or_else(rand::random);

    std::fs::create_dir_all(&args.output_dir).with_context(|| {
        format!(
            "Failed to create output directory: {}",
            args.output_dir.display()
        )
    })?;

    let models = select_models(&schema, &args.models)?;
    tracing::info!(
        "Populating {} models with {} rows each (seed {})",
        models.len(),
        args.amount,
        seed
    );

    let mut reports = Vec::with_capacity(models.len());
    for definition in models {
        let descriptor = ModelDescriptor::from_definition(definition)
            .with_context(|| format!("Invalid model '{}'", definition.name))?;
        let path = args.output_dir.join(format!("{}.jsonl", definition.name));

        let mut session = if args.append {
            JsonlSession::append(&path, descriptor.clone())
        } else {
            JsonlSession::create(&path, descriptor.clone())
        }
        .with_context(|| format!("Failed to open {}", path.display()))?;

        let mut faker =
            ModelFaker::new(descriptor, seed).with_start_index(session.existing_rows());
        let metrics = faker
            .create(&mut session, args.amount)
            .with_context(|| format!("Failed to populate model '{}'", definition.name))?;

        reports.push(PopulateReport {
            model: definition.name.clone(),
            path,
            rows_created: metrics.rows_created,
            seed,
            duration: metrics.duration,
        });
    }

    Ok(reports)
}
