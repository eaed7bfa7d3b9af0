use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use log::debug;
use rusqlite::Connection;

/// Open a connection to the database file and toggle `PRAGMA foreign_keys = ON`.
/// SQLite scopes that pragma to the connection, so every connection handed out
/// by the pool goes through here to keep booking references enforced.
pub fn open_connection(path: &Path, busy_timeout: Duration) -> Result<Connection> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).context("failed to create data directory")?;
    }

    let conn = Connection::open(path)
        .with_context(|| format!("failed to open SQLite database at {}", path.display()))?;
    conn.busy_timeout(busy_timeout)
        .context("failed to set busy timeout")?;
    conn.execute("PRAGMA foreign_keys = ON", [])
        .context("failed to enable foreign keys")?;

    debug!("opened connection to {}", path.display());
    Ok(conn)
}

/// Create the three booking tables when they are missing. Running it against an
/// already initialized database is a no-op, so startup calls it every time.
pub fn ensure_schema(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS users (
            user_id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            id_no TEXT NOT NULL,
            phone_number TEXT NOT NULL
        )",
        [],
    )
    .context("failed to create users table")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS trip_details (
            trip_id INTEGER PRIMARY KEY AUTOINCREMENT,
            start_location TEXT NOT NULL,
            end_location TEXT NOT NULL,
            trip_date TEXT NOT NULL
        )",
        [],
    )
    .context("failed to create trip_details table")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS bookings (
            booking_id INTEGER PRIMARY KEY AUTOINCREMENT,
            total_passengers INTEGER NOT NULL,
            price REAL NOT NULL,
            user_id INTEGER NOT NULL,
            trip_id INTEGER NOT NULL,
            FOREIGN KEY(user_id) REFERENCES users(user_id),
            FOREIGN KEY(trip_id) REFERENCES trip_details(trip_id)
        )",
        [],
    )
    .context("failed to create bookings table")?;

    Ok(())
}

/// In-memory database with the schema applied, for store tests.
#[cfg(test)]
pub(crate) fn open_in_memory() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute("PRAGMA foreign_keys = ON", []).unwrap();
    ensure_schema(&conn).unwrap();
    conn
}
