//! `verify` command: check a JSONL file against its model.

use crate::args::VerifyArgs;
use crate::load_schema;
use anyhow::{bail, Context};
use faker_core::ModelDescriptor;
use faker_store::read_jsonl;

/// Outcome of verifying one file.
#[derive(Debug, Clone, Default)]
pub struct VerifyReport {
    /// Rows read from the file.
    pub rows_checked: u64,
    /// One message per failing row.
    pub violations: Vec<String>,
}

impl VerifyReport {
    /// Whether every row passed.
    pub fn is_ok(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Run the verify command.
///
/// Rows that break a column constraint are collected in the report; an
/// unreadable file or a count mismatch is an error.
pub fn run_verify(args: &VerifyArgs) -> anyhow::Result<VerifyReport> {
    let schema = load_schema(&args.schema.schema)?;
    let definition = schema.require_model(&args.model)?;
    let model = ModelDescriptor::from_definition(definition)
        .with_context(|| format!("Invalid model '{}'", args.model))?;

    let rows = read_jsonl(&args.input, &model)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;

    let mut report = VerifyReport {
        rows_checked: rows.len() as u64,
        violations: Vec::new(),
    };

    for (i, row) in rows.iter().enumerate() {
        if let Err(e) = model.check_row(row) {
            tracing::warn!("Row {} of '{}' is invalid: {}", i + 1, args.model, e);
            report.violations.push(format!("row {}: {e}", i + 1));
        }
    }

    if let Some(expected) = args.expect_count {
        if report.rows_checked != expected {
            bail!(
                "Expected {} rows in {}, found {}",
                expected,
                args.input.display(),
                report.rows_checked
            );
        }
    }

    tracing::info!(
        "Verified {} rows of '{}': {} violations",
        report.rows_checked,
        args.model,
        report.violations.len()
    );

    Ok(report)
}
