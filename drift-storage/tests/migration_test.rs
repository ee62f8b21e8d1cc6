//! Schema migration tests: a fresh connection reaches the latest version,
//! every table the 6 `IDrift*` traits depend on exists with the expected
//! columns, and running migrations twice is a no-op the second time.

use drift_storage::migrations;
use rusqlite::Connection;

fn get_table_columns(conn: &Connection, table: &str) -> Vec<String> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table})")).unwrap();
    stmt.query_map([], |row| row.get::<_, String>(1)).unwrap().filter_map(|r| r.ok()).collect()
}

#[test]
fn fresh_database_migrates_to_latest_version() {
    let conn = Connection::open_in_memory().unwrap();
    let applied = migrations::run_migrations(&conn).unwrap();
    assert_eq!(applied, migrations::LATEST_VERSION);
    assert_eq!(migrations::current_version(&conn).unwrap(), migrations::LATEST_VERSION);

    let columns = get_table_columns(&conn, "file_metadata");
    assert!(columns.contains(&"path".to_string()));
    assert!(columns.contains(&"content_hash".to_string()));

    let columns = get_table_columns(&conn, "functions");
    assert!(columns.contains(&"qualified_name".to_string()));
    assert!(columns.contains(&"body_hash".to_string()));
    assert!(columns.contains(&"signature_hash".to_string()));

    let columns = get_table_columns(&conn, "call_edges");
    assert!(columns.contains(&"caller_id".to_string()));
    assert!(columns.contains(&"resolution".to_string()));
    assert!(columns.contains(&"confidence".to_string()));

    let columns = get_table_columns(&conn, "boundaries");
    assert!(columns.contains(&"framework".to_string()));
    assert!(columns.contains(&"sensitivity".to_string()));

    let columns = get_table_columns(&conn, "pattern_status");
    assert!(columns.contains(&"pattern_id".to_string()));
    assert!(columns.contains(&"user_set".to_string()));
    assert!(columns.contains(&"status".to_string()));
}

#[test]
fn running_migrations_twice_is_idempotent() {
    let conn = Connection::open_in_memory().unwrap();
    let first_pass = migrations::run_migrations(&conn).unwrap();
    assert_eq!(first_pass, migrations::LATEST_VERSION);

    let second_pass = migrations::run_migrations(&conn).unwrap();
    assert_eq!(second_pass, 0, "no migrations should apply once already at the latest version");
    assert_eq!(migrations::current_version(&conn).unwrap(), migrations::LATEST_VERSION);
}
