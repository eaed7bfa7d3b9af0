use anyhow::{Context, Result};
use chrono::NaiveDate;
use log::debug;
use rusqlite::{params, Connection, OptionalExtension};

use crate::models::Trip;

/// Insert a trip. The date is stored as `YYYY-MM-DD` text.
pub fn create_trip(
    conn: &Connection,
    start_location: &str,
    end_location: &str,
    trip_date: NaiveDate,
) -> Result<Trip> {
    conn.execute(
        "INSERT INTO trip_details (start_location, end_location, trip_date) VALUES (?1, ?2, ?3)",
        params![start_location, end_location, trip_date],
    )
    .context("failed to insert trip")?;

    let id = conn.last_insert_rowid();
    debug!("added trip {id}");
    Ok(Trip {
        id,
        start_location: start_location.to_string(),
        end_location: end_location.to_string(),
        trip_date,
    })
}

pub fn fetch_trip(conn: &Connection, id: i64) -> Result<Option<Trip>> {
    conn.query_row(
        "SELECT trip_id, start_location, end_location, trip_date
         FROM trip_details WHERE trip_id = ?1",
        params![id],
        |row| {
            Ok(Trip {
                id: row.get(0)?,
                start_location: row.get(1)?,
                end_location: row.get(2)?,
                trip_date: row.get(3)?,
            })
        },
    )
    .optional()
    .context("failed to load trip")
}

/// Rewrite a trip's route and date. Bookings on the trip follow automatically
/// because they only hold the trip id.
pub fn update_trip(
    conn: &Connection,
    id: i64,
    start_location: &str,
    end_location: &str,
    trip_date: NaiveDate,
) -> Result<bool> {
    let updated = conn
        .execute(
            "UPDATE trip_details
             SET start_location = ?1, end_location = ?2, trip_date = ?3
             WHERE trip_id = ?4",
            params![start_location, end_location, trip_date, id],
        )
        .context("failed to update trip")?;

    debug!("update of trip {id} touched {updated} row(s)");
    Ok(updated > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connection::open_in_memory;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_create_then_fetch_trip() {
        let conn = open_in_memory();
        let trip = create_trip(&conn, "X", "Y", date(2024, 1, 1)).unwrap();

        assert_eq!(trip.id, 1);
        assert_eq!(fetch_trip(&conn, trip.id).unwrap(), Some(trip));
    }

    #[test]
    fn test_trip_date_stored_as_iso_text() {
        let conn = open_in_memory();
        let trip = create_trip(&conn, "X", "Y", date(2024, 1, 1)).unwrap();

        let raw: String = conn
            .query_row(
                "SELECT trip_date FROM trip_details WHERE trip_id = ?1",
                [trip.id],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(raw, "2024-01-01");
    }

    #[test]
    fn test_update_trip() {
        let conn = open_in_memory();
        let trip = create_trip(&conn, "X", "Y", date(2024, 1, 1)).unwrap();

        assert!(update_trip(&conn, trip.id, "Kiel", "Plön", date(2024, 6, 30)).unwrap());
        let stored = fetch_trip(&conn, trip.id).unwrap().unwrap();
        assert_eq!(stored.start_location, "Kiel");
        assert_eq!(stored.end_location, "Plön");
        assert_eq!(stored.trip_date, date(2024, 6, 30));

        assert!(!update_trip(&conn, 99, "A", "B", date(2024, 1, 1)).unwrap());
    }
}
