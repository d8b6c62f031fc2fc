use rusqlite::Connection;
use taskzen_core::db::migrations::latest_version;
use taskzen_core::db::{open_db, open_db_in_memory, DbError};
use taskzen_core::{
    RepoError, SessionConfig, SlotRepository, SqliteSlotRepository, StaticSeedSource, SystemClock,
    Task, TaskSession,
};

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "slots");
}

#[test]
fn opening_the_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("taskzen.db");

    let first = open_db(&path).unwrap();
    assert_eq!(schema_version(&first), latest_version());
    drop(first);

    let second = open_db(&path).unwrap();
    assert_eq!(schema_version(&second), latest_version());
    assert_table_exists(&second, "slots");
}

#[test]
fn opening_a_database_with_a_newer_schema_version_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn slot_write_read_roundtrip_and_overwrite() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteSlotRepository::try_new(&conn).unwrap();

    assert!(repo.read("tasks").unwrap().is_none());

    repo.write("tasks", "[1]").unwrap();
    assert_eq!(repo.read("tasks").unwrap().as_deref(), Some("[1]"));

    repo.write("tasks", "[1,2]").unwrap();
    assert_eq!(repo.read("tasks").unwrap().as_deref(), Some("[1,2]"));
}

#[test]
fn repository_rejects_an_unmigrated_connection() {
    let conn = Connection::open_in_memory().unwrap();

    let result = SqliteSlotRepository::try_new(&conn);
    match result {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert!(expected_version > 0),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_a_connection_without_the_slots_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteSlotRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredTable("slots"))
    ));
}

#[test]
fn a_session_roundtrips_through_the_sqlite_slot() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.db");

    let expected = {
        let conn = open_db(&path).unwrap();
        let repo = SqliteSlotRepository::try_new(&conn).unwrap();
        let seeds = StaticSeedSource::new(vec![Task::new(1, "persisted")]);
        let mut session = TaskSession::start(repo, &seeds, SystemClock, SessionConfig::default());
        session.add("second").unwrap();
        session.tasks().to_vec()
    };

    let conn = open_db(&path).unwrap();
    let repo = SqliteSlotRepository::try_new(&conn).unwrap();
    let seeds = StaticSeedSource::new(Vec::new());
    let session = TaskSession::start(repo, &seeds, SystemClock, SessionConfig::default());

    assert_eq!(session.tasks(), expected.as_slice());
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
