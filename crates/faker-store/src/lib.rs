//! Persistence sessions for model-faker.
//!
//! Two [`Session`](faker_core::Session) implementations:
//!
//! - [`MemoryDatabase`] / [`MemorySession`] - a throwaway in-memory database
//!   with unit-of-work flush semantics, used by tests and the `verify`
//!   command
//! - [`JsonlSession`] - writes rows of one model as JSON Lines
//!
//! Both materialize rows identically on flush: unset columns receive their
//! default or NULL, an unset integer primary key receives the next id, and
//! every column is checked against its descriptor.
//!
//! # Example
//!
//! ```ignore
//! use faker_store::MemoryDatabase;
//!
//! let mut db = MemoryDatabase::new();
//! db.create_table_for::<User>()?;
//! ModelFaker::for_model::<User>()?.create(&mut db.session(), 5)?;
//! assert_eq!(db.count("users")?, 5);
//! ```

pub mod error;
pub mod jsonl;
pub mod memory;
mod table;

pub use error::StoreError;
pub use jsonl::{read_jsonl, JsonlSession, DEFAULT_BUFFER_SIZE};
pub use memory::{MemoryDatabase, MemorySession};
