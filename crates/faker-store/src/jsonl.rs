//! JSONL session: persist rows of one model as JSON Lines.

use crate::error::StoreError;
use crate::table::TableState;
use faker_core::{FieldValue, ModelDescriptor, ModelRow, Session};
use json_types::{json_to_row, row_to_json};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Default buffer size for JSONL writing.
pub const DEFAULT_BUFFER_SIZE: usize = 8192;

/// Session writing one JSON object per line, columns in declaration order.
///
/// Rows are materialized the same way as in the in-memory store. A flush
/// checks every pending row before writing any of them.
pub struct JsonlSession {
    table: TableState,
    path: PathBuf,
    writer: BufWriter<File>,
    pending: Vec<ModelRow>,
    existing_rows: u64,
    rows_written: u64,
}

impl JsonlSession {
    /// Create (or truncate) `path` and write rows of `model` to it.
    pub fn create<P: AsRef<Path>>(path: P, model: ModelDescriptor) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        info!(
            "Writing model '{}' to JSONL file '{}'",
            model.name,
            path.display()
        );

        let file = File::create(&path)?;
        Ok(Self {
            table: TableState::new(model),
            path,
            writer: BufWriter::with_capacity(DEFAULT_BUFFER_SIZE, file),
            pending: Vec::new(),
            existing_rows: 0,
            rows_written: 0,
        })
    }

    /// Append rows of `model` to `path`, continuing primary keys after the
    /// largest one already in the file.
    pub fn append<P: AsRef<Path>>(path: P, model: ModelDescriptor) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();

        let existing = if path.exists() {
            read_jsonl(&path, &model)?
        } else {
            Vec::new()
        };

        let keys: Vec<i64> = model
            .primary_key()
            .map(|pk| {
                existing
                    .iter()
                    .filter_map(|row| row.get_field(&pk.name).and_then(FieldValue::as_i64))
                    .collect()
            })
            .unwrap_or_default();
        let table = TableState::new(model).with_existing_keys(keys);

        info!(
            "Appending model '{}' to JSONL file '{}' ({} existing rows)",
            table.model.name,
            path.display(),
            existing.len()
        );

        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            table,
            path,
            writer: BufWriter::with_capacity(DEFAULT_BUFFER_SIZE, file),
            pending: Vec::new(),
            existing_rows: existing.len() as u64,
            rows_written: 0,
        })
    }

    /// Path of the output file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rows the file already held when an appending session was opened.
    pub fn existing_rows(&self) -> u64 {
        self.existing_rows
    }

    /// Rows written by this session so far.
    pub fn rows_written(&self) -> u64 {
        self.rows_written
    }

    /// Model this session writes.
    pub fn model(&self) -> &ModelDescriptor {
        &self.table.model
    }
}

impl Session for JsonlSession {
    type Error = StoreError;

    fn add(&mut self, row: ModelRow) -> Result<(), StoreError> {
        if row.model != self.table.model.name {
            return Err(StoreError::ModelMismatch {
                expected: self.table.model.name.clone(),
                found: row.model,
            });
        }
        self.pending.push(row);
        Ok(())
    }

    fn flush(&mut self) -> Result<u64, StoreError> {
        let pending = std::mem::take(&mut self.pending);

        let mut staged = self.table.clone();
        let rows = pending
            .into_iter()
            .map(|row| staged.materialize(row))
            .collect::<Result<Vec<_>, _>>()?;

        for row in &rows {
            let json = row_to_json(row, &staged.model);
            serde_json::to_writer(&mut self.writer, &json)?;
            writeln!(self.writer)?;
        }
        self.writer.flush()?;
        self.table = staged;

        let count = rows.len() as u64;
        self.rows_written += count;
        debug!(
            "Flushed {} rows to '{}' ({} total)",
            count,
            self.path.display(),
            self.rows_written
        );

        Ok(count)
    }
}

/// Read a JSONL file back into rows of `model`. Blank lines are skipped.
pub fn read_jsonl<P: AsRef<Path>>(
    path: P,
    model: &ModelDescriptor,
) -> Result<Vec<ModelRow>, StoreError> {
    let reader = BufReader::new(File::open(path.as_ref())?);
    let mut rows = Vec::new();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let json: serde_json::Value = serde_json::from_str(&line)?;
        let row = json_to_row(model, rows.len() as u64, &json).map_err(|source| {
            StoreError::Conversion {
                line: line_no + 1,
                source,
            }
        })?;
        rows.push(row);
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use faker_core::{ColumnDefinition, ColumnType, ModelDefinition};
    use tempfile::TempDir;

    fn model() -> ModelDescriptor {
        ModelDescriptor::from_definition(&ModelDefinition::new(
            "events",
            vec![
                ColumnDefinition::new("id", ColumnType::Integer).primary_key(),
                ColumnDefinition::new("name", ColumnType::string(16)),
                ColumnDefinition::new("level", ColumnType::Integer).with_default(3i64),
                ColumnDefinition::new("note", ColumnType::Text).nullable(),
            ],
        ))
        .unwrap()
    }

    fn event(name: &str) -> ModelRow {
        ModelRow::builder("events", 0).field("name", name).build()
    }

    #[test]
    fn test_write_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("events.jsonl");

        let mut session = JsonlSession::create(&path, model()).unwrap();
        session.add(event("start")).unwrap();
        session.add(event("stop")).unwrap();
        assert_eq!(session.flush().unwrap(), 2);
        assert_eq!(session.rows_written(), 2);

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(
            lines,
            vec![
                r#"{"id":1,"name":"start","level":3,"note":null}"#,
                r#"{"id":2,"name":"stop","level":3,"note":null}"#,
            ]
        );
    }

    #[test]
    fn test_invalid_row_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("events.jsonl");

        let mut session = JsonlSession::create(&path, model()).unwrap();
        session.add(event("fine")).unwrap();
        session
            .add(ModelRow::builder("events", 1).field("name", FieldValue::Null).build())
            .unwrap();
        assert!(matches!(
            session.flush(),
            Err(StoreError::Constraint(_))
        ));

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn test_wrong_model_rejected() {
        let dir = TempDir::new().unwrap();
        let mut session = JsonlSession::create(dir.path().join("e.jsonl"), model()).unwrap();
        let err = session
            .add(ModelRow::builder("other", 0).build())
            .unwrap_err();
        assert!(matches!(err, StoreError::ModelMismatch { .. }));
    }

    #[test]
    fn test_append_continues_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("events.jsonl");

        let mut first = JsonlSession::create(&path, model()).unwrap();
        first.add(event("a")).unwrap();
        first.add(event("b")).unwrap();
        first.flush().unwrap();
        drop(first);

        let mut second = JsonlSession::append(&path, model()).unwrap();
        assert_eq!(second.existing_rows(), 2);
        second.add(event("c")).unwrap();
        second.flush().unwrap();
        drop(second);

        let rows = read_jsonl(&path, &model()).unwrap();
        let ids: Vec<i64> = rows.iter().map(|r| r.get_i64("id").unwrap()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(rows[2].get_string("name").unwrap(), "c");
    }

    #[test]
    fn test_append_after_largest_key_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("events.jsonl");
        std::fs::write(
            &path,
            format!("{{\"id\":{},\"name\":\"last\"}}\n", i64::MAX),
        )
        .unwrap();

        let mut session = JsonlSession::append(&path, model()).unwrap();
        session.add(event("next")).unwrap();
        assert!(matches!(
            session.flush(),
            Err(StoreError::KeySpaceExhausted { .. })
        ));

        // A key already in the file is a duplicate
        session
            .add(
                ModelRow::builder("events", 0)
                    .field("id", i64::MAX)
                    .field("name", "again")
                    .build(),
            )
            .unwrap();
        assert!(matches!(
            session.flush(),
            Err(StoreError::DuplicateKey { .. })
        ));
        assert_eq!(read_jsonl(&path, &model()).unwrap().len(), 1);
    }

    #[test]
    fn test_read_reports_line() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.jsonl");
        std::fs::write(&path, "{\"id\":1,\"name\":\"x\"}\n\n{\"id\":\"two\"}\n").unwrap();

        let err = read_jsonl(&path, &model()).unwrap_err();
        assert!(matches!(err, StoreError::Conversion { line: 3, .. }));
    }
}
