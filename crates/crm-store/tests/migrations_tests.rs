// Migration discipline: tables, idempotency, checksum verification

use rusqlite::Connection;

fn setup_test_db() -> Connection {
    Connection::open_in_memory().expect("Failed to create in-memory database")
}

fn table_names(conn: &Connection) -> Vec<String> {
    let mut stmt = conn
        .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
        .unwrap();
    stmt.query_map([], |row| row.get(0))
        .unwrap()
        .collect::<Result<Vec<String>, _>>()
        .unwrap()
}

#[test]
fn test_apply_migrations_on_empty_db() {
    let mut conn = setup_test_db();
    crm_store::migrations::apply_migrations(&mut conn).unwrap();

    assert_eq!(
        table_names(&conn),
        vec!["customers", "orders", "schema_version"]
    );
}

#[test]
fn test_migration_idempotency() {
    let mut conn = setup_test_db();
    crm_store::migrations::apply_migrations(&mut conn).unwrap();
    crm_store::migrations::apply_migrations(&mut conn).unwrap();

    let applied = crm_store::migrations::applied_migrations(&conn).unwrap();
    assert_eq!(applied, vec!["001_initial_schema"]);
}

#[test]
fn test_checksum_recorded() {
    let mut conn = setup_test_db();
    crm_store::migrations::apply_migrations(&mut conn).unwrap();

    let checksum: String = conn
        .query_row(
            "SELECT checksum FROM schema_version WHERE migration_id = '001_initial_schema'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(checksum.len(), 64);
}

#[test]
fn test_tampered_checksum_rejected() {
    let mut conn = setup_test_db();
    crm_store::migrations::apply_migrations(&mut conn).unwrap();
    conn.execute(
        "UPDATE schema_version SET checksum = 'deadbeef' WHERE migration_id = '001_initial_schema'",
        [],
    )
    .unwrap();

    let err = crm_store::migrations::apply_migrations(&mut conn).unwrap_err();
    assert_eq!(
        err.kind(),
        crm_core::errors::ExErrorKind::ConstraintViolation
    );
    assert!(err.message().contains("001_initial_schema"));
}
