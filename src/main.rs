//! Command-line interface for model-faker
//!
//! # Usage Examples
//!
//! ```bash
//! # Populate every model in the schema with 100 rows
//! model-faker populate --schema models.yaml --output-dir out --amount 100
//!
//! # Only some models, fixed seed, appending to earlier output
//! model-faker populate --schema models.yaml --output-dir out \
//!   --models users,orders --seed 7 --append
//!
//! # Inspect introspected column metadata
//! model-faker inspect --schema models.yaml --json
//!
//! # Verify a populated file
//! model-faker verify --schema models.yaml --model users --input out/users.jsonl
//! ```

use clap::{Parser, Subcommand};
use model_faker::{
    run_inspect, run_populate, run_verify, InspectArgs, PopulateArgs, VerifyArgs,
};

#[derive(Parser)]
#[command(name = "model-faker")]
#[command(about = "Fill database models with random rows that satisfy their column metadata")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate fake rows and write one JSONL file per model
    Populate(PopulateArgs),

    /// Print the introspected column descriptors of every model
    Inspect(InspectArgs),

    /// Check a JSONL file against its model's column metadata
    Verify(VerifyArgs),
}

fn main() -> anyhow::Result<()> {
    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
    Ok(())
}

fn run() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Populate(args) => {
            let reports = run_populate(&args)?;
            for report in reports {
                println!(
                    "{}: {} rows -> {} (seed {}, {:?})",
                    report.model,
                    report.rows_created,
                    report.path.display(),
                    report.seed,
                    report.duration
                );
            }
        }
        Commands::Inspect(args) => {
            print!("{}", run_inspect(&args)?);
        }
        Commands::Verify(args) => {
            let report = run_verify(&args)?;
            for violation in &report.violations {
                println!("{violation}");
            }
            if !report.is_ok() {
                anyhow::bail!(
                    "{} of {} rows violate model '{}'",
                    report.violations.len(),
                    report.rows_checked,
                    args.model
                );
            }
            println!("{} rows OK", report.rows_checked);
        }
    }

    Ok(())
}
