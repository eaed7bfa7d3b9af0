use anyhow::{Context, Result};
use log::debug;
use rusqlite::{ffi, params, Connection, Error as SqlError, OptionalExtension};

use crate::error::StoreError;
use crate::models::{booking_price, Booking, BookingDetail, BookingSummary};

/// Book `total_passengers` seats on a trip. The price is derived from the
/// passenger count; referential checks are left to the foreign keys.
pub fn create_booking(
    conn: &Connection,
    user_id: i64,
    trip_id: i64,
    total_passengers: u32,
) -> Result<Booking> {
    let price = booking_price(total_passengers);
    conn.execute(
        "INSERT INTO bookings (total_passengers, price, user_id, trip_id) VALUES (?1, ?2, ?3, ?4)",
        params![total_passengers, price, user_id, trip_id],
    )
    .map_err(|err| map_foreign_key(err, user_id, trip_id))
    .context("failed to insert booking")?;

    let id = conn.last_insert_rowid();
    debug!("booked {total_passengers} passenger(s) on trip {trip_id} for user {user_id} as booking {id}");
    Ok(Booking {
        id,
        total_passengers,
        price,
        user_id,
        trip_id,
    })
}

pub fn fetch_booking(conn: &Connection, id: i64) -> Result<Option<Booking>> {
    conn.query_row(
        "SELECT booking_id, total_passengers, price, user_id, trip_id
         FROM bookings WHERE booking_id = ?1",
        params![id],
        |row| {
            Ok(Booking {
                id: row.get(0)?,
                total_passengers: row.get(1)?,
                price: row.get(2)?,
                user_id: row.get(3)?,
                trip_id: row.get(4)?,
            })
        },
    )
    .optional()
    .context("failed to load booking")
}

/// Every booking held by a user, joined with its trip. An unknown user simply
/// has no bookings.
pub fn list_bookings_for_user(conn: &Connection, user_id: i64) -> Result<Vec<BookingSummary>> {
    let mut stmt = conn
        .prepare(
            "SELECT b.booking_id, b.total_passengers, b.price,
                    td.start_location, td.end_location, td.trip_date
             FROM bookings b
             INNER JOIN trip_details td ON b.trip_id = td.trip_id
             WHERE b.user_id = ?1
             ORDER BY b.booking_id",
        )
        .context("failed to prepare user bookings query")?;

    let bookings = stmt
        .query_map([user_id], |row| {
            Ok(BookingSummary {
                booking_id: row.get(0)?,
                total_passengers: row.get(1)?,
                price: row.get(2)?,
                start_location: row.get(3)?,
                end_location: row.get(4)?,
                trip_date: row.get(5)?,
            })
        })
        .context("failed to iterate user bookings")?
        .collect::<Result<Vec<_>, _>>()
        .context("failed to collect user bookings")?;

    Ok(bookings)
}

pub fn get_booking_detail(conn: &Connection, booking_id: i64) -> Result<Option<BookingDetail>> {
    conn.query_row(
        "SELECT b.booking_id, b.total_passengers, b.price, u.name, u.phone_number,
                td.start_location, td.end_location, td.trip_date
         FROM bookings b
         INNER JOIN users u ON b.user_id = u.user_id
         INNER JOIN trip_details td ON b.trip_id = td.trip_id
         WHERE b.booking_id = ?1",
        params![booking_id],
        |row| {
            Ok(BookingDetail {
                booking_id: row.get(0)?,
                total_passengers: row.get(1)?,
                price: row.get(2)?,
                user_name: row.get(3)?,
                phone_number: row.get(4)?,
                start_location: row.get(5)?,
                end_location: row.get(6)?,
                trip_date: row.get(7)?,
            })
        },
    )
    .optional()
    .context("failed to load booking details")
}

/// Change the passenger count and recompute the price in the same statement.
pub fn update_booking(conn: &Connection, id: i64, total_passengers: u32) -> Result<bool> {
    let updated = conn
        .execute(
            "UPDATE bookings SET total_passengers = ?1, price = ?2 WHERE booking_id = ?3",
            params![total_passengers, booking_price(total_passengers), id],
        )
        .context("failed to update booking")?;

    debug!("update of booking {id} touched {updated} row(s)");
    Ok(updated > 0)
}

/// Remove a booking. Deleting an id that does not exist is not an error; the
/// returned flag tells the caller whether anything was removed.
pub fn delete_booking(conn: &Connection, id: i64) -> Result<bool> {
    let deleted = conn
        .execute("DELETE FROM bookings WHERE booking_id = ?1", params![id])
        .context("failed to delete booking")?;

    debug!("delete of booking {id} touched {deleted} row(s)");
    Ok(deleted > 0)
}

/// Turn a foreign-key violation into [`StoreError::MissingReference`] so the
/// shell can report it and keep going. Other SQLite errors pass through.
fn map_foreign_key(err: SqlError, user_id: i64, trip_id: i64) -> anyhow::Error {
    match &err {
        SqlError::SqliteFailure(failure, _)
            if failure.extended_code == ffi::SQLITE_CONSTRAINT_FOREIGNKEY =>
        {
            StoreError::MissingReference { user_id, trip_id }.into()
        }
        _ => err.into(),
    }
}
