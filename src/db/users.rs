use anyhow::{Context, Result};
use log::debug;
use rusqlite::{params, Connection, OptionalExtension};

use crate::models::User;

/// Insert a new user row, returning the hydrated struct with the generated id.
pub fn create_user(conn: &Connection, name: &str, id_no: &str, phone_number: &str) -> Result<User> {
    conn.execute(
        "INSERT INTO users (name, id_no, phone_number) VALUES (?1, ?2, ?3)",
        params![name, id_no, phone_number],
    )
    .context("failed to insert user")?;

    let id = conn.last_insert_rowid();
    debug!("registered user {id}");
    Ok(User {
        id,
        name: name.to_string(),
        id_no: id_no.to_string(),
        phone_number: phone_number.to_string(),
    })
}

pub fn fetch_user(conn: &Connection, id: i64) -> Result<Option<User>> {
    conn.query_row(
        "SELECT user_id, name, id_no, phone_number FROM users WHERE user_id = ?1",
        params![id],
        |row| {
            Ok(User {
                id: row.get(0)?,
                name: row.get(1)?,
                id_no: row.get(2)?,
                phone_number: row.get(3)?,
            })
        },
    )
    .optional()
    .context("failed to load user")
}

/// Overwrite every editable user field. Returns `false` when no user has `id`.
pub fn update_user(
    conn: &Connection,
    id: i64,
    name: &str,
    id_no: &str,
    phone_number: &str,
) -> Result<bool> {
    let updated = conn
        .execute(
            "UPDATE users SET name = ?1, id_no = ?2, phone_number = ?3 WHERE user_id = ?4",
            params![name, id_no, phone_number, id],
        )
        .context("failed to update user")?;

    debug!("update of user {id} touched {updated} row(s)");
    Ok(updated > 0)
}
