//! `ModelFaker`: generate rows for a model and persist them through a session.

use crate::generator::{GeneratorError, RowGenerator};
use faker_core::{Model, ModelDescriptor, SchemaError, Session};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Error type for faker operations.
#[derive(Debug, thiserror::Error)]
pub enum FakerError {
    /// Model metadata could not be introspected
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// A row could not be generated
    #[error("Generator error: {0}")]
    Generator(#[from] GeneratorError),

    /// The session rejected a row or failed to flush
    #[error("Session error: {0}")]
    Session(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Metrics from a create operation.
#[derive(Debug, Clone, Default)]
pub struct CreateMetrics {
    /// Number of rows handed to the session and flushed.
    pub rows_created: u64,
    /// Total time taken.
    pub duration: Duration,
}

impl CreateMetrics {
    /// Calculate rows per second.
    pub fn rows_per_second(&self) -> f64 {
        if self.duration.as_secs_f64() > 0.0 {
            self.rows_created as f64 / self.duration.as_secs_f64()
        } else {
            0.0
        }
    }
}

/// Fills a model's table with random rows that satisfy its column metadata.
///
/// # Example
///
/// ```ignore
/// let mut faker = ModelFaker::for_model::<User>()?;
/// faker.create(&mut db.session(), 5)?;
/// ```
pub struct ModelFaker {
    generator: RowGenerator,
}

impl ModelFaker {
    /// Create a faker for an already introspected model.
    pub fn new(model: ModelDescriptor, seed: u64) -> Self {
        Self {
            generator: RowGenerator::new(model, seed),
        }
    }

    /// Introspect `M` and create a faker with a random seed.
    pub fn for_model<M: Model>() -> Result<Self, FakerError> {
        Self::for_model_seeded::<M>(rand::random())
    }

    /// Introspect `M` and create a faker with a fixed seed.
    pub fn for_model_seeded<M: Model>(seed: u64) -> Result<Self, FakerError> {
        Ok(Self::new(ModelDescriptor::of::<M>()?, seed))
    }

    /// Set the starting row index (for appending to earlier runs).
    pub fn with_start_index(mut self, index: u64) -> Self {
        self.generator = self.generator.with_start_index(index);
        self
    }

    /// Get the introspected model.
    pub fn model(&self) -> &ModelDescriptor {
        self.generator.model()
    }

    /// Get the seed rows are derived from.
    pub fn seed(&self) -> u64 {
        self.generator.seed()
    }

    /// Get the row generator.
    pub fn generator(&self) -> &RowGenerator {
        &self.generator
    }

    /// Create a single row.
    pub fn create_one<S: Session>(&mut self, session: &mut S) -> Result<CreateMetrics, FakerError> {
        self.create(session, 1)
    }

    /// Generate `amount` rows, add each to `session` and flush once.
    ///
    /// An amount of 0 adds nothing but still flushes.
    pub fn create<S: Session>(
        &mut self,
        session: &mut S,
        amount: u64,
    ) -> Result<CreateMetrics, FakerError> {
        let start_time = Instant::now();
        let model = self.generator.model().name.clone();

        info!(
            "Creating {} fake rows for model '{}' (seed {})",
            amount,
            model,
            self.generator.seed()
        );

        for _ in 0..amount {
            let row = self.generator.next_row()?;
            session
                .add(row)
                .map_err(|e| FakerError::Session(Box::new(e)))?;

            let added = self.generator.current_index();
            if added % 10000 == 0 {
                debug!("Added {} rows", added);
            }
        }

        let rows_created = session
            .flush()
            .map_err(|e| FakerError::Session(Box::new(e)))?;

        let metrics = CreateMetrics {
            rows_created,
            duration: start_time.elapsed(),
        };

        info!(
            "Created {} rows for model '{}' in {:?} ({:.2} rows/sec)",
            metrics.rows_created,
            model,
            metrics.duration,
            metrics.rows_per_second()
        );

        Ok(metrics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use faker_core::{
        ColumnDefinition, ColumnType, FieldValue, ModelDefinition, ModelRow, RowError,
    };

    /// Session that keeps rows in a vector.
    #[derive(Default)]
    struct VecSession {
        pending: Vec<ModelRow>,
        flushed: Vec<ModelRow>,
        flushes: usize,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("session closed")]
    struct Closed;

    impl Session for VecSession {
        type Error = Closed;

        fn add(&mut self, row: ModelRow) -> Result<(), Closed> {
            self.pending.push(row);
            Ok(())
        }

        fn flush(&mut self) -> Result<u64, Closed> {
            self.flushes += 1;
            let n = self.pending.len() as u64;
            self.flushed.append(&mut self.pending);
            Ok(n)
        }
    }

    /// Session that refuses every row.
    struct ClosedSession;

    impl Session for ClosedSession {
        type Error = Closed;

        fn add(&mut self, _row: ModelRow) -> Result<(), Closed> {
            Err(Closed)
        }

        fn flush(&mut self) -> Result<u64, Closed> {
            Err(Closed)
        }
    }

    struct Item;

    impl Model for Item {
        fn definition() -> ModelDefinition {
            ModelDefinition::new(
                "items",
                vec![
                    ColumnDefinition::new("id", ColumnType::Integer).primary_key(),
                    ColumnDefinition::new("label", ColumnType::string(12)),
                    ColumnDefinition::new("note", ColumnType::Text).nullable(),
                ],
            )
        }

        fn from_row(_row: &ModelRow) -> Result<Self, RowError> {
            Ok(Item)
        }
    }

    #[test]
    fn test_create_adds_and_flushes_once() {
        let mut faker = ModelFaker::for_model_seeded::<Item>(42).unwrap();
        let mut session = VecSession::default();

        let metrics = faker.create(&mut session, 5).unwrap();

        assert_eq!(metrics.rows_created, 5);
        assert_eq!(session.flushes, 1);
        assert_eq!(session.flushed.len(), 5);
        for row in &session.flushed {
            assert_eq!(row.model, "items");
            assert_eq!(row.get_field("note"), Some(&FieldValue::Null));
            assert!(!row.is_set("id"));
        }
    }

    #[test]
    fn test_create_one_and_zero() {
        let mut faker = ModelFaker::for_model_seeded::<Item>(1).unwrap();
        let mut session = VecSession::default();

        assert_eq!(faker.create_one(&mut session).unwrap().rows_created, 1);
        assert_eq!(faker.create(&mut session, 0).unwrap().rows_created, 0);
        assert_eq!(session.flushes, 2);
        assert_eq!(session.flushed.len(), 1);
    }

    #[test]
    fn test_create_through_mutable_reference() {
        let mut faker = ModelFaker::for_model_seeded::<Item>(1).unwrap();
        let mut session = VecSession::default();
        let mut by_ref = &mut session;

        faker.create(&mut by_ref, 3).unwrap();
        assert_eq!(session.flushed.len(), 3);
    }

    #[test]
    fn test_session_error_is_surfaced() {
        let mut faker = ModelFaker::for_model_seeded::<Item>(1).unwrap();
        let err = faker.create(&mut ClosedSession, 2).unwrap_err();
        assert!(matches!(err, FakerError::Session(_)));
        assert!(err.to_string().contains("session closed"));
    }

    #[test]
    fn test_same_seed_same_rows() {
        let mut a = VecSession::default();
        let mut b = VecSession::default();
        ModelFaker::for_model_seeded::<Item>(7)
            .unwrap()
            .create(&mut a, 4)
            .unwrap();
        ModelFaker::for_model_seeded::<Item>(7)
            .unwrap()
            .create(&mut b, 4)
            .unwrap();

        let fields = |s: &VecSession| s.flushed.iter().map(|r| r.fields.clone()).collect::<Vec<_>>();
        assert_eq!(fields(&a), fields(&b));
    }
}
