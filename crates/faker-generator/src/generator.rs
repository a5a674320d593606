//! Row generator producing deterministic fake rows for one model.

use crate::generators::{generate_value, plan, GenerationError, GenerationRule};
use faker_core::{ModelDescriptor, ModelRow};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashMap;

/// Error type for generator operations.
#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    /// A column's rule could not produce a value
    #[error("Failed to generate column '{column}': {source}")]
    Generation {
        column: String,
        #[source]
        source: GenerationError,
    },
}

/// Generator that fills rows of a single model.
///
/// Each row is produced from its own RNG derived from the base seed and the
/// row index, so row N is the same whether generation started at 0 or at N.
pub struct RowGenerator {
    /// Model being generated
    model: ModelDescriptor,
    /// Per-column rules, in column order
    rules: Vec<(String, GenerationRule)>,
    /// Base seed
    seed: u64,
    /// Current row index
    index: u64,
}

impl RowGenerator {
    /// Create a new row generator for `model` with the given seed.
    pub fn new(model: ModelDescriptor, seed: u64) -> Self {
        let rules = model
            .columns
            .iter()
            .map(|column| (column.name.clone(), plan(column)))
            .collect();

        Self {
            model,
            rules,
            seed,
            index: 0,
        }
    }

    /// Set the starting index for row generation.
    pub fn with_start_index(mut self, index: u64) -> Self {
        self.index = index;
        self
    }

    /// Compute the RNG seed for a specific index.
    fn rng_seed_for_index(&self, index: u64) -> u64 {
        self.seed
            .wrapping_add(index.wrapping_mul(0x9E3779B97F4A7C15))
    }

    /// Get the current row index.
    pub fn current_index(&self) -> u64 {
        self.index
    }

    /// Get the base seed.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Get the model being generated.
    pub fn model(&self) -> &ModelDescriptor {
        &self.model
    }

    /// Get the rule chosen for each column, in column order.
    pub fn rules(&self) -> &[(String, GenerationRule)] {
        &self.rules
    }

    /// Generate the next row.
    ///
    /// Skipped columns (primary key, defaulted) are left unset.
    pub fn next_row(&mut self) -> Result<ModelRow, GeneratorError> {
        let index = self.index;
        let mut rng = StdRng::seed_from_u64(self.rng_seed_for_index(index));

        let mut fields = HashMap::with_capacity(self.rules.len());
        for (name, rule) in &self.rules {
            let value = generate_value(rule, &mut rng).map_err(|source| {
                GeneratorError::Generation {
                    column: name.clone(),
                    source,
                }
            })?;
            if let Some(value) = value {
                fields.insert(name.clone(), value);
            }
        }

        self.index += 1;

        Ok(ModelRow::new(self.model.name.clone(), index, fields))
    }

    /// Generate `count` rows lazily.
    pub fn rows(&mut self, count: u64) -> RowIterator<'_> {
        RowIterator {
            generator: self,
            remaining: count,
        }
    }
}

/// Iterator that lazily generates rows.
pub struct RowIterator<'a> {
    generator: &'a mut RowGenerator,
    remaining: u64,
}

impl Iterator for RowIterator<'_> {
    type Item = Result<ModelRow, GeneratorError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        self.remaining -= 1;
        Some(self.generator.next_row())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for RowIterator<'_> {}
