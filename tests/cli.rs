//! CLI command handlers against the sample schema.

use model_faker::{
    run_inspect, run_populate, run_verify, InspectArgs, PopulateArgs, SchemaArgs, VerifyArgs,
};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn demo_schema() -> SchemaArgs {
    SchemaArgs {
        schema: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos/models.yaml"),
    }
}

fn populate_args(output_dir: &Path, amount: u64) -> PopulateArgs {
    PopulateArgs {
        schema: demo_schema(),
        output_dir: output_dir.to_path_buf(),
        amount,
        seed: Some(42),
        models: vec![],
        append: false,
    }
}

fn verify_args(input: PathBuf, model: &str, expect_count: Option<u64>) -> VerifyArgs {
    VerifyArgs {
        schema: demo_schema(),
        model: model.to_string(),
        input,
        expect_count,
    }
}

#[test]
fn test_populate_then_verify() {
    let dir = TempDir::new().unwrap();
    let reports = run_populate(&populate_args(dir.path(), 25)).unwrap();

    let models: Vec<&str> = reports.iter().map(|r| r.model.as_str()).collect();
    assert_eq!(models, vec!["my_model", "orders"]);

    for report in &reports {
        assert_eq!(report.rows_created, 25);
        assert_eq!(report.seed, 42);

        let verified = run_verify(&verify_args(report.path.clone(), &report.model, Some(25))).unwrap();
        assert!(verified.is_ok(), "{:?}", verified.violations);
        assert_eq!(verified.rows_checked, 25);
    }
}

#[test]
fn test_populate_is_deterministic() {
    let a = TempDir::new().unwrap();
    let b = TempDir::new().unwrap();
    run_populate(&populate_args(a.path(), 10)).unwrap();
    run_populate(&populate_args(b.path(), 10)).unwrap();

    let read = |dir: &Path| std::fs::read_to_string(dir.join("orders.jsonl")).unwrap();
    assert_eq!(read(a.path()), read(b.path()));
}

#[test]
fn test_populate_append_continues() {
    let dir = TempDir::new().unwrap();
    let mut args = populate_args(dir.path(), 3);
    args.models = vec!["orders".to_string()];
    run_populate(&args).unwrap();

    args.append = true;
    args.amount = 2;
    run_populate(&args).unwrap();

    let content = std::fs::read_to_string(dir.path().join("orders.jsonl")).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 5);
    assert!(lines[4].starts_with(r#"{"id":5,"#));
    assert!(!dir.path().join("my_model.jsonl").exists());

    let report = run_verify(&verify_args(dir.path().join("orders.jsonl"), "orders", Some(5))).unwrap();
    assert!(report.is_ok());
}

#[test]
fn test_populate_unknown_model() {
    let dir = TempDir::new().unwrap();
    let mut args = populate_args(dir.path(), 1);
    args.models = vec!["nope".to_string()];
    assert!(run_populate(&args).is_err());
}

#[test]
fn test_verify_reports_violations() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("orders.jsonl");
    std::fs::write(
        &path,
        concat!(
            r#"{"id":1,"customer":"ann","status":"pending","total":10.0,"note":null}"#,
            "\n",
            r#"{"id":2,"customer":"bob","status":"lost","total":10.0,"note":null}"#,
            "\n",
        ),
    )
    .unwrap();

    let report = run_verify(&verify_args(path.clone(), "orders", None)).unwrap();
    assert_eq!(report.rows_checked, 2);
    assert_eq!(report.violations.len(), 1);
    assert!(report.violations[0].starts_with("row 2:"));

    assert!(run_verify(&verify_args(path, "orders", Some(3))).is_err());
}

#[test]
fn test_inspect_outputs() {
    let table = run_inspect(&InspectArgs {
        schema: demo_schema(),
        json: false,
    })
    .unwrap();
    assert!(table.contains("my_model"));
    assert!(table.contains(r#"default="test123""#));
    assert!(table.contains("json=[string,integer]"));
    assert!(table.contains("100..=101"));

    let json = run_inspect(&InspectArgs {
        schema: demo_schema(),
        json: true,
    })
    .unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    let columns = parsed[0]["columns"].as_array().unwrap();
    assert_eq!(columns[0]["name"], "id");
    assert_eq!(columns[0]["rule"], "skip");
    assert_eq!(columns[4]["rule"], "null");
    assert_eq!(columns[11]["json_schema"], serde_json::json!(["string", "integer"]));
}
