use crate::logger;
use rusqlite::types::Type;
use rusqlite::{Connection, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

pub mod flashcard;
pub mod note;
pub mod quiz;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

pub(crate) fn now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

pub(crate) fn to_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

pub(crate) fn from_json<T: DeserializeOwned>(column: usize, raw: &str) -> Result<T> {
    serde_json::from_str(raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(column, Type::Text, Box::new(e)))
}

/// Open (or create) the database at `path` and bring its schema up to date.
///
/// The quiz worker keeps a second connection to the same file, so the journal
/// is switched to WAL and writers wait on each other instead of failing.
pub fn open_db(path: &Path) -> Result<Connection> {
    if let Some(parent) = path.parent()
        && let Err(e) = std::fs::create_dir_all(parent)
    {
        logger::log(&format!("Cannot create {}: {}", parent.display(), e));
        return Err(rusqlite::Error::InvalidPath(path.to_path_buf()));
    }

    let conn = Connection::open(path)?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    let _mode: String = conn.query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;

    run_migrations(&conn)?;

    Ok(conn)
}

pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS notes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL DEFAULT '',
            content TEXT NOT NULL DEFAULT '',
            tags TEXT NOT NULL DEFAULT '[]',
            pinned INTEGER NOT NULL DEFAULT 0,
            archived INTEGER NOT NULL DEFAULT 0,
            deleted INTEGER NOT NULL DEFAULT 0,
            created_at INTEGER NOT NULL,
            updated_at INTEGER NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_notes_listing ON notes(deleted, archived, pinned, updated_at)",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS flashcards (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            front TEXT NOT NULL DEFAULT '',
            back TEXT NOT NULL DEFAULT '',
            tags TEXT NOT NULL DEFAULT '[]',
            score INTEGER NOT NULL DEFAULT 0,
            mastered INTEGER NOT NULL DEFAULT 0,
            deleted INTEGER NOT NULL DEFAULT 0,
            created_at INTEGER NOT NULL,
            updated_at INTEGER NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_flashcards_listing ON flashcards(deleted, updated_at)",
        [],
    )?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS quizzes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL DEFAULT '',
            questions TEXT NOT NULL DEFAULT '[]',
            source_note_id INTEGER,
            deleted INTEGER NOT NULL DEFAULT 0,
            created_at INTEGER NOT NULL,
            updated_at INTEGER NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_quizzes_listing ON quizzes(deleted, updated_at)",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_quizzes_source_note ON quizzes(source_note_id)",
        [],
    )?;

    Ok(())
}

#[cfg(test)]
pub(crate) fn test_connection() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    run_migrations(&conn).unwrap();
    conn
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_create_tables() {
        let conn = test_connection();

        let tables: Vec<String> = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table'")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .filter_map(|r| r.ok())
            .collect();

        assert!(tables.contains(&"notes".to_string()));
        assert!(tables.contains(&"flashcards".to_string()));
        assert!(tables.contains(&"quizzes".to_string()));
    }

    #[test]
    fn test_migrations_are_idempotent() {
        let conn = test_connection();
        run_migrations(&conn).unwrap();
        run_migrations(&conn).unwrap();
    }

    #[test]
    fn test_open_db_creates_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        let db_path = temp_dir.path().join("nested").join("nq.db");

        let conn = open_db(&db_path).unwrap();
        assert!(db_path.exists());

        let mode: String = conn
            .query_row("PRAGMA journal_mode", [], |row| row.get(0))
            .unwrap();
        assert_eq!(mode.to_lowercase(), "wal");
    }

    #[test]
    fn test_open_db_reports_unusable_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        let blocker = temp_dir.path().join("blocker");
        std::fs::write(&blocker, "not a directory").unwrap();
        let db_path = blocker.join("nested").join("nq.db");

        let result = open_db(&db_path);
        assert!(matches!(result, Err(rusqlite::Error::InvalidPath(ref p)) if *p == db_path));
    }

    #[test]
    fn test_json_column_error_maps_to_conversion_failure() {
        let result: Result<Vec<String>> = from_json(3, "not json");
        assert!(matches!(
            result,
            Err(rusqlite::Error::FromSqlConversionFailure(3, Type::Text, _))
        ));
    }
}
