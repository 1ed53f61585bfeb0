use anyhow::Context;
use rusqlite::{Connection, OptionalExtension};
use std::path::Path;

use crate::model::Student;
use crate::store::Gateway;

pub const DB_FILE: &str = "roster.sqlite3";

/// Single key under which the whole serialized roster lives.
pub const STUDENTS_KEY: &str = "students";

pub fn open_db(workspace: &Path) -> anyhow::Result<Connection> {
    std::fs::create_dir_all(workspace)?;
    let db_path = workspace.join(DB_FILE);
    let conn = Connection::open(db_path)?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS kv(
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )",
        [],
    )?;

    Ok(conn)
}

pub fn kv_get(conn: &Connection, key: &str) -> anyhow::Result<Option<String>> {
    let value = conn
        .query_row("SELECT value FROM kv WHERE key = ?", [key], |r| r.get(0))
        .optional()?;
    Ok(value)
}

pub fn kv_set(conn: &Connection, key: &str, value: &str) -> anyhow::Result<()> {
    conn.execute(
        "INSERT INTO kv(key, value) VALUES(?, ?)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        (key, value),
    )?;
    Ok(())
}

/// Workspace-database implementation of the store's persistence seam.
pub struct SqliteGateway {
    conn: Connection,
}

impl SqliteGateway {
    pub fn new(conn: Connection) -> Self {
        SqliteGateway { conn }
    }
}

impl Gateway for SqliteGateway {
    fn load(&self) -> anyhow::Result<Option<Vec<Student>>> {
        match kv_get(&self.conn, STUDENTS_KEY)? {
            Some(text) => {
                let students =
                    serde_json::from_str(&text).context("saved roster is not valid JSON")?;
                Ok(Some(students))
            }
            None => Ok(None),
        }
    }

    fn save(&self, students: &[Student]) -> anyhow::Result<()> {
        let text = serde_json::to_string(students).context("serialize roster")?;
        kv_set(&self.conn, STUDENTS_KEY, &text)
    }
}
