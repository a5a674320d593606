//! In-memory database and its unit-of-work session.

use crate::error::StoreError;
use crate::table::TableState;
use faker_core::{Model, ModelDescriptor, ModelRow, Session};
use std::collections::BTreeMap;
use tracing::{debug, info};

#[derive(Debug, Clone)]
struct Table {
    state: TableState,
    rows: Vec<ModelRow>,
}

/// A throwaway in-memory database holding one table per model.
///
/// Rows only become visible through a [`MemorySession`] flush, which
/// materializes defaults, assigns primary keys and checks every column.
#[derive(Debug, Default)]
pub struct MemoryDatabase {
    tables: BTreeMap<String, Table>,
}

impl MemoryDatabase {
    /// Create an empty database.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the table for `model`. An existing table is kept as is.
    pub fn create_table(&mut self, model: ModelDescriptor) {
        if self.tables.contains_key(&model.name) {
            debug!("Table '{}' already exists", model.name);
            return;
        }
        info!("Creating table '{}' ({} columns)", model.name, model.columns.len());
        self.tables.insert(
            model.name.clone(),
            Table {
                state: TableState::new(model),
                rows: Vec::new(),
            },
        );
    }

    /// Introspect `M` and create its table.
    pub fn create_table_for<M: Model>(&mut self) -> Result<(), StoreError> {
        self.create_table(ModelDescriptor::of::<M>()?);
        Ok(())
    }

    /// Create the tables for every model.
    pub fn create_all(&mut self, models: impl IntoIterator<Item = ModelDescriptor>) {
        for model in models {
            self.create_table(model);
        }
    }

    /// Drop every table and its rows.
    pub fn drop_all(&mut self) {
        info!("Dropping {} tables", self.tables.len());
        self.tables.clear();
    }

    /// Names of the existing tables, sorted.
    pub fn table_names(&self) -> Vec<&str> {
        self.tables.keys().map(String::as_str).collect()
    }

    /// Open a session. Rows added to it are committed on flush.
    pub fn session(&mut self) -> MemorySession<'_> {
        MemorySession {
            db: self,
            pending: Vec::new(),
        }
    }

    fn table(&self, model: &str) -> Result<&Table, StoreError> {
        self.tables
            .get(model)
            .ok_or_else(|| StoreError::TableNotFound(model.to_string()))
    }

    /// Get the descriptor a table was created with.
    pub fn model(&self, model: &str) -> Result<&ModelDescriptor, StoreError> {
        Ok(&self.table(model)?.state.model)
    }

    /// All committed rows of a table, in insertion order.
    pub fn all(&self, model: &str) -> Result<&[ModelRow], StoreError> {
        Ok(&self.table(model)?.rows)
    }

    /// The first committed row of a table.
    pub fn first(&self, model: &str) -> Result<Option<&ModelRow>, StoreError> {
        Ok(self.table(model)?.rows.first())
    }

    /// Number of committed rows in a table.
    pub fn count(&self, model: &str) -> Result<usize, StoreError> {
        Ok(self.table(model)?.rows.len())
    }

    /// All committed rows of `M`, read into the typed model.
    pub fn query<M: Model>(&self) -> Result<Vec<M>, StoreError> {
        let name = M::definition().name;
        self.all(&name)?
            .iter()
            .map(|row| M::from_row(row).map_err(StoreError::from))
            .collect()
    }

    /// The first committed row of `M`, read into the typed model.
    pub fn first_as<M: Model>(&self) -> Result<Option<M>, StoreError> {
        let name = M::definition().name;
        self.first(&name)?
            .map(|row| M::from_row(row).map_err(StoreError::from))
            .transpose()
    }
}

/// Unit of work against a [`MemoryDatabase`].
///
/// A flush either commits every pending row or none of them. Rows still
/// pending when the session is dropped are discarded.
pub struct MemorySession<'db> {
    db: &'db mut MemoryDatabase,
    pending: Vec<ModelRow>,
}

impl MemorySession<'_> {
    /// Number of rows waiting for a flush.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Read access to the database behind this session.
    pub fn database(&self) -> &MemoryDatabase {
        self.db
    }

    /// Discard every pending row.
    pub fn rollback(&mut self) {
        if !self.pending.is_empty() {
            debug!("Rolling back {} pending rows", self.pending.len());
        }
        self.pending.clear();
    }
}

impl Session for MemorySession<'_> {
    type Error = StoreError;

    fn add(&mut self, row: ModelRow) -> Result<(), StoreError> {
        if !self.db.tables.contains_key(&row.model) {
            return Err(StoreError::TableNotFound(row.model));
        }
        self.pending.push(row);
        Ok(())
    }

    fn flush(&mut self) -> Result<u64, StoreError> {
        let pending = std::mem::take(&mut self.pending);
        let count = pending.len() as u64;

        // Stage against copies of the table state so a failure commits nothing
        let mut staged: BTreeMap<String, (TableState, Vec<ModelRow>)> = BTreeMap::new();
        for row in pending {
            if !staged.contains_key(&row.model) {
                let table = self.db.table(&row.model)?;
                staged.insert(row.model.clone(), (table.state.clone(), Vec::new()));
            }
            if let Some((state, rows)) = staged.get_mut(&row.model) {
                rows.push(state.materialize(row)?);
            }
        }

        for (name, (state, rows)) in staged {
            if let Some(table) = self.db.tables.get_mut(&name) {
                debug!("Committing {} rows to '{}'", rows.len(), name);
                table.state = state;
                table.rows.extend(rows);
            }
        }

        Ok(count)
    }
}
