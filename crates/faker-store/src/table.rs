//! Per-model table state shared by the session implementations.

use crate::error::StoreError;
use faker_core::{FieldValue, ModelDescriptor, ModelRow};
use std::collections::HashSet;

/// A model plus its primary-key counter and the keys already used.
#[derive(Debug, Clone)]
pub(crate) struct TableState {
    pub(crate) model: ModelDescriptor,
    next_id: i64,
    used_keys: HashSet<i64>,
}

impl TableState {
    pub(crate) fn new(model: ModelDescriptor) -> Self {
        Self {
            model,
            next_id: 1,
            used_keys: HashSet::new(),
        }
    }

    /// Mark keys already stored elsewhere as used; assignment continues
    /// after the largest of them.
    pub(crate) fn with_existing_keys(mut self, keys: impl IntoIterator<Item = i64>) -> Self {
        for key in keys {
            self.used_keys.insert(key);
            self.next_id = self.next_id.max(key.saturating_add(1));
        }
        self
    }

    /// Turn a pending row into the row that is stored.
    ///
    /// Unset columns get their default or NULL, an unset integer primary key
    /// gets the next free id, and every column is checked.
    pub(crate) fn materialize(&mut self, mut row: ModelRow) -> Result<ModelRow, StoreError> {
        self.model.apply_defaults(&mut row);

        if let Some(pk) = self.model.primary_key() {
            if row.get_field(&pk.name).map_or(true, FieldValue::is_null) {
                let key = self.next_free_id(&pk.name)?;
                row.set_field(pk.name.clone(), FieldValue::Int(key));
            }
        }

        self.model.check_row(&row)?;

        if let Some(pk) = self.model.primary_key() {
            if let Some(key) = row.get_field(&pk.name).and_then(FieldValue::as_i64) {
                if !self.used_keys.insert(key) {
                    return Err(StoreError::DuplicateKey {
                        model: self.model.name.clone(),
                        column: pk.name.clone(),
                        key,
                    });
                }
                self.next_id = self.next_id.max(key.saturating_add(1));
            }
        }

        Ok(row)
    }

    fn next_free_id(&self, column: &str) -> Result<i64, StoreError> {
        let mut key = self.next_id;
        while self.used_keys.contains(&key) {
            key = key
                .checked_add(1)
                .ok_or_else(|| StoreError::KeySpaceExhausted {
                    model: self.model.name.clone(),
                    column: column.to_string(),
                    last: key,
                })?;
        }
        Ok(key)
    }
}
