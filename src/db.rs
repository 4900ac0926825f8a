use std::path::Path;
use std::sync::{Arc, Mutex};

use rand::Rng;
use rusqlite::{Connection, Result};
use time::OffsetDateTime;

use crate::error::ProcedureError;
use crate::models::Todo;

pub type DbPool = Arc<Mutex<Connection>>;

pub fn init_db<P: AsRef<Path>>(path: P) -> Result<DbPool> {
    let conn = Connection::open(path)?;

    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS todos (
            id TEXT PRIMARY KEY,
            task TEXT NOT NULL,
            due_date INTEGER NOT NULL,
            is_done INTEGER NOT NULL DEFAULT 0,
            created_at INTEGER DEFAULT (strftime('%s', 'now')),
            updated_at INTEGER DEFAULT (strftime('%s', 'now'))
        );
        ",
    )?;

    Ok(Arc::new(Mutex::new(conn)))
}

/// Opaque record identifier, assigned once at creation.
fn generate_id() -> String {
    const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
    let mut rng = rand::rng();
    (0..24)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

pub fn create_todo(
    pool: &DbPool,
    task: &str,
    due_date: OffsetDateTime,
) -> Result<Todo, ProcedureError> {
    let conn = pool.lock().unwrap();
    let id = generate_id();

    conn.execute(
        "INSERT INTO todos (id, task, due_date) VALUES (?1, ?2, ?3)",
        (&id, task, due_date.unix_timestamp()),
    )?;

    let mut stmt = conn.prepare(
        "SELECT id, task, due_date, is_done, created_at, updated_at FROM todos WHERE id = ?1",
    )?;
    let todo = stmt.query_row([&id], row_to_todo)?;

    Ok(todo)
}

pub fn list_todos(pool: &DbPool) -> Result<Vec<Todo>, ProcedureError> {
    let conn = pool.lock().unwrap();
    let mut stmt = conn.prepare(
        "SELECT id, task, due_date, is_done, created_at, updated_at FROM todos",
    )?;
    let todos = stmt
        .query_map([], row_to_todo)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(todos)
}

/// Full replace of the user-editable fields. Returns `None` if no row matches.
pub fn update_todo(
    pool: &DbPool,
    id: &str,
    task: &str,
    due_date: OffsetDateTime,
) -> Result<Option<Todo>, ProcedureError> {
    let conn = pool.lock().unwrap();
    let rows = conn.execute(
        "UPDATE todos SET task = ?1, due_date = ?2, updated_at = strftime('%s', 'now') WHERE id = ?3",
        (task, due_date.unix_timestamp(), id),
    )?;

    if rows == 0 {
        return Ok(None);
    }
    get_todo_internal(&conn, id)
}

pub fn set_todo_done(
    pool: &DbPool,
    id: &str,
    is_done: bool,
) -> Result<Option<Todo>, ProcedureError> {
    let conn = pool.lock().unwrap();
    let rows = conn.execute(
        "UPDATE todos SET is_done = ?1, updated_at = strftime('%s', 'now') WHERE id = ?2",
        (is_done as i32, id),
    )?;

    if rows == 0 {
        return Ok(None);
    }
    get_todo_internal(&conn, id)
}

pub fn delete_todo(pool: &DbPool, id: &str) -> Result<bool, ProcedureError> {
    let conn = pool.lock().unwrap();
    let rows = conn.execute("DELETE FROM todos WHERE id = ?1", [id])?;
    Ok(rows > 0)
}

fn get_todo_internal(conn: &Connection, id: &str) -> Result<Option<Todo>, ProcedureError> {
    let mut stmt = conn.prepare(
        "SELECT id, task, due_date, is_done, created_at, updated_at FROM todos WHERE id = ?1",
    )?;
    let mut rows = stmt.query([id])?;

    if let Some(row) = rows.next()? {
        Ok(Some(row_to_todo(row)?))
    } else {
        Ok(None)
    }
}

fn row_to_todo(row: &rusqlite::Row<'_>) -> rusqlite::Result<Todo> {
    let due_date = OffsetDateTime::from_unix_timestamp(row.get(2)?).map_err(|err| {
        rusqlite::Error::FromSqlConversionFailure(
            2,
            rusqlite::types::Type::Integer,
            Box::new(err),
        )
    })?;

    Ok(Todo {
        id: row.get(0)?,
        task: row.get(1)?,
        due_date,
        is_done: row.get::<_, i32>(3)? != 0,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}
