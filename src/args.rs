//! CLI argument definitions.

use clap::Args;
use std::path::PathBuf;

/// Arguments shared by every command that reads a model schema.
#[derive(Args, Clone, Debug)]
pub struct SchemaArgs {
    /// Path to model schema YAML file
    #[arg(long, short = 's', env = "MODEL_FAKER_SCHEMA")]
    pub schema: PathBuf,
}

/// Arguments for `populate`.
#[derive(Args, Clone, Debug)]
pub struct PopulateArgs {
    #[command(flatten)]
    pub schema: SchemaArgs,

    /// Output directory for JSONL files (one file per model)
    #[arg(long, short = 'o')]
    pub output_dir: PathBuf,

    /// Number of rows to create per model
    #[arg(long, short = 'n', default_value = "1")]
    pub amount: u64,

    /// Random seed (same seed = same data). Falls back to the schema's seed,
    /// then to a random one
    #[arg(long, env = "MODEL_FAKER_SEED")]
    pub seed: Option<u64>,

    /// Specific models to populate (comma-separated, empty = all models from schema)
    #[arg(long, value_delimiter = ',')]
    pub models: Vec<String>,

    /// Append to existing files instead of replacing them
    #[arg(long)]
    pub append: bool,
}

/// Arguments for `inspect`.
#[derive(Args, Clone, Debug)]
pub struct InspectArgs {
    #[command(flatten)]
    pub schema: SchemaArgs,

    /// Print descriptors as JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `verify`.
#[derive(Args, Clone, Debug)]
pub struct VerifyArgs {
    #[command(flatten)]
    pub schema: SchemaArgs,

    /// Model the file holds
    #[arg(long, short = 'm')]
    pub model: String,

    /// JSONL file to check
    #[arg(long, short = 'i')]
    pub input: PathBuf,

    /// Fail unless the file holds exactly this many rows
    #[arg(long)]
    pub expect_count: Option<u64>,
}
