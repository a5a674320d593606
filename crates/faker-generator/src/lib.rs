//! Fake row generation for model-faker.
//!
//! This crate turns an introspected [`ModelDescriptor`](faker_core::ModelDescriptor)
//! into random rows that satisfy every column's metadata, and persists them
//! through any [`Session`](faker_core::Session).
//!
//! # Example
//!
//! ```ignore
//! use faker_generator::ModelFaker;
//!
//! let mut faker = ModelFaker::for_model_seeded::<User>(42)?;
//! let metrics = faker.create(&mut db.session(), 100)?;
//! println!("{} rows", metrics.rows_created);
//! ```

pub mod faker;
pub mod generator;
pub mod generators;

pub use faker::{CreateMetrics, FakerError, ModelFaker};
pub use generator::{GeneratorError, RowGenerator, RowIterator};
pub use generators::{generate_value, plan, GenerationError, GenerationRule};
