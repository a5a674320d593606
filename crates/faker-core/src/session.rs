//! Persistence session abstraction.
//!
//! A session is where generated rows go. Rows are added one at a time and
//! made durable by `flush`; what "durable" means is up to the implementation
//! (an in-memory table, a JSONL file, ...).

use crate::values::ModelRow;

/// A persistence target rows are added to and flushed through.
pub trait Session {
    /// Error raised by the backing store.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Stage a row. Nothing is guaranteed to be persisted until `flush`.
    fn add(&mut self, row: ModelRow) -> Result<(), Self::Error>;

    /// Persist every staged row, returning how many were written.
    fn flush(&mut self) -> Result<u64, Self::Error>;
}

impl<S: Session + ?Sized> Session for &mut S {
    type Error = S::Error;

    fn add(&mut self, row: ModelRow) -> Result<(), Self::Error> {
        (**self).add(row)
    }

    fn flush(&mut self) -> Result<u64, Self::Error> {
        (**self).flush()
    }
}
