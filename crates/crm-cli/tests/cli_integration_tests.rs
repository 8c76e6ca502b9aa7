//! CLI integration tests
//!
//! Each test runs the built binary against its own database file.

use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

fn db_path(temp_dir: &TempDir) -> PathBuf {
    temp_dir.path().join("data").join("store.db")
}

fn run(db: &Path, args: &[&str]) -> Output {
    let cli_bin = env!("CARGO_BIN_EXE_crm-cli");
    Command::new(cli_bin)
        .arg("--db")
        .arg(db)
        .args(args)
        .env("RUST_LOG", "off")
        .output()
        .expect("Failed to execute CLI")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "CLI command should succeed. Stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

fn create_customer(db: &Path, first: &str, last: &str) -> String {
    let output = run(
        db,
        &["customer", "create", "--first-name", first, "--last-name", last],
    );
    assert_success(&output);
    stdout(&output).trim().to_string()
}

#[test]
fn test_seed_then_query_finds_john3() {
    let temp_dir = TempDir::new().unwrap();
    let db = db_path(&temp_dir);

    assert_success(&run(&db, &["seed"]));
    create_customer(&db, "Julien", "Kern");

    let output = run(
        &db,
        &["query", "--first-name-like", "J%", "--min-orders", "1", "--project"],
    );
    assert_success(&output);
    let out = stdout(&output);
    assert_eq!(out.lines().count(), 1, "unexpected rows: {}", out);
    assert!(out.contains("John3 Doe3 (2 orders)"));
}

#[test]
fn test_in_memory_query_matches_store_query() {
    let temp_dir = TempDir::new().unwrap();
    let db = db_path(&temp_dir);
    assert_success(&run(&db, &["seed"]));
    create_customer(&db, "Jane", "Klein");
    create_customer(&db, "Maximiliam", "Cesar");

    let args = ["query", "--order-by", "last-name", "--json"];
    let from_sql = run(&db, &args);
    let mut in_memory_args = args.to_vec();
    in_memory_args.push("--in-memory");
    let in_memory = run(&db, &in_memory_args);

    assert_success(&from_sql);
    assert_success(&in_memory);
    assert_eq!(stdout(&from_sql), stdout(&in_memory));
}

#[test]
fn test_show_renders_orders() {
    let temp_dir = TempDir::new().unwrap();
    let db = db_path(&temp_dir);
    assert_success(&run(&db, &["seed"]));

    let conn = Connection::open(&db).unwrap();
    let id: String = conn
        .query_row("SELECT id FROM customers", [], |row| row.get(0))
        .unwrap();
    drop(conn);

    let output = run(&db, &["customer", "show", &id, "--fetch", "select"]);
    assert_success(&output);
    let out = stdout(&output);
    assert!(out.contains("Name: John3 Doe3"));
    assert!(out.contains("Orders (2):"));
    assert!(out.contains("Mons"));
}

#[test]
fn test_lazy_show_of_missing_customer_fails() {
    let temp_dir = TempDir::new().unwrap();
    let db = db_path(&temp_dir);

    let output = run(&db, &["customer", "show", "c-404", "--lazy"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERR_ENTITY_NOT_FOUND"), "stderr: {}", stderr);
}

#[test]
fn test_order_add_then_delete_cascades() {
    let temp_dir = TempDir::new().unwrap();
    let db = db_path(&temp_dir);
    let id = create_customer(&db, "Jane", "Klein");

    assert_success(&run(&db, &["order", "add", &id, "--city", "Mons"]));
    assert_success(&run(&db, &["order", "add", &id, "--shipped"]));

    let output = run(&db, &["customer", "delete", &id]);
    assert_success(&output);
    assert!(stdout(&output).contains("and 2 orders"));

    let conn = Connection::open(&db).unwrap();
    let orders: i64 = conn
        .query_row("SELECT COUNT(*) FROM orders", [], |row| row.get(0))
        .unwrap();
    assert_eq!(orders, 0);
}

#[test]
fn test_order_add_for_missing_customer_fails() {
    let temp_dir = TempDir::new().unwrap();
    let db = db_path(&temp_dir);

    let output = run(&db, &["order", "add", "c-404"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("ERR_ENTITY_NOT_FOUND"));
}

#[test]
fn test_create_rejects_overlong_name() {
    let temp_dir = TempDir::new().unwrap();
    let db = db_path(&temp_dir);
    let long_name = "D".repeat(100);

    let output = run(
        &db,
        &["customer", "create", "--first-name", "John3", "--last-name", &long_name],
    );
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("ERR_VALIDATION_FAILURE"));
}

#[test]
fn test_rename_and_list() {
    let temp_dir = TempDir::new().unwrap();
    let db = db_path(&temp_dir);
    let id = create_customer(&db, "John", "Doe");

    assert_success(&run(&db, &["customer", "rename", &id, "--last-name", "Doe3"]));

    let output = run(&db, &["customer", "list"]);
    assert_success(&output);
    let out = stdout(&output);
    assert!(out.contains(&id));
    assert!(out.contains("John Doe3"));
}
