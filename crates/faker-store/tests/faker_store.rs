//! Generated rows flowing through both session kinds.

use faker_core::{ColumnDefinition, ColumnInfo, ColumnType, ModelDefinition, ModelDescriptor};
use faker_generator::ModelFaker;
use faker_store::{read_jsonl, JsonlSession, MemoryDatabase};
use tempfile::TempDir;

fn orders() -> ModelDescriptor {
    ModelDescriptor::from_definition(&ModelDefinition::new(
        "orders",
        vec![
            ColumnDefinition::new("id", ColumnType::Integer).primary_key(),
            ColumnDefinition::new("customer", ColumnType::string(30)),
            ColumnDefinition::new("quantity", ColumnType::Integer)
                .with_info(ColumnInfo::range(1.0, 9.0)),
            ColumnDefinition::new("state", ColumnType::enumeration(["open", "closed"])),
            ColumnDefinition::new("channel", ColumnType::string(10)).with_default("web"),
            ColumnDefinition::new("placed_at", ColumnType::DateTime),
            ColumnDefinition::new("comment", ColumnType::Text).nullable(),
        ],
    ))
    .unwrap()
}

#[test]
fn test_memory_and_jsonl_store_the_same_rows() {
    let mut db = MemoryDatabase::new();
    db.create_table(orders());
    ModelFaker::new(orders(), 11)
        .create(&mut db.session(), 20)
        .unwrap();

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("orders.jsonl");
    let mut session = JsonlSession::create(&path, orders()).unwrap();
    ModelFaker::new(orders(), 11).create(&mut session, 20).unwrap();
    drop(session);

    let from_memory = db.all("orders").unwrap();
    let from_file = read_jsonl(&path, &orders()).unwrap();
    assert_eq!(from_memory.len(), 20);
    assert_eq!(from_file.len(), 20);

    for (a, b) in from_memory.iter().zip(&from_file) {
        assert_eq!(a.fields, b.fields);
    }
}

#[test]
fn test_stored_rows_respect_metadata() {
    let model = orders();
    let mut db = MemoryDatabase::new();
    db.create_table(model.clone());
    ModelFaker::new(model.clone(), 3)
        .create(&mut db.session(), 100)
        .unwrap();

    for (i, row) in db.all("orders").unwrap().iter().enumerate() {
        model.check_row(row).unwrap();
        assert_eq!(row.get_i64("id").unwrap(), i as i64 + 1);
        assert_eq!(row.get_string("channel").unwrap(), "web");
        assert!(row.get_opt_string("comment").unwrap().is_none());
        assert!((1..=9).contains(&row.get_i64("quantity").unwrap()));
    }
}
