//! model-faker library
//!
//! Fills database models with random rows that satisfy their column
//! metadata: type, nullability, length, default, `{min, max}` bounds and
//! JSON-array shape.
//!
//! # Crates
//!
//! - `faker_core` - column types, model schema, introspection, row values, `Session`
//! - `faker_generator` - per-column generation rules and `ModelFaker`
//! - `faker_store` - in-memory and JSONL sessions
//! - `json_types` - JSON conversion of row values
//!
//! # CLI Usage
//!
//! ```bash
//! # Five rows per model into ./out/<model>.jsonl
//! model-faker populate --schema demos/models.yaml --output-dir out --amount 5 --seed 42
//!
//! # Show how each column will be filled
//! model-faker inspect --schema demos/models.yaml
//!
//! # Check a file against its model
//! model-faker verify --schema demos/models.yaml --model my_model --input out/my_model.jsonl
//! ```

pub mod args;
pub mod inspect;
pub mod populate;
pub mod verify;

pub use args::{InspectArgs, PopulateArgs, SchemaArgs, VerifyArgs};
pub use inspect::run_inspect;
pub use populate::{run_populate, PopulateReport};
pub use verify::{run_verify, VerifyReport};

use anyhow::Context;
use faker_core::ModelSchema;
use std::path::Path;

/// Load and parse a model schema file.
pub fn load_schema(path: &Path) -> anyhow::Result<ModelSchema> {
    ModelSchema::from_file(path)
        .with_context(|| format!("Failed to load schema file: {}", path.display()))
}
