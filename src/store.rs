//! Record store: the single entry point the shell talks to. It owns the
//! connection pool built from [`Config`] and runs each operation on its own
//! scoped connection, so no call shares state with another beyond the file.

use anyhow::Result;
use chrono::NaiveDate;
use log::info;

use crate::config::Config;
use crate::db::{self, ConnectionPool};
use crate::models::{Booking, BookingDetail, BookingSummary, Trip, User};

pub struct BookingStore {
    pool: ConnectionPool,
}

impl BookingStore {
    /// Build the pool described by `config` and make sure the schema exists.
    /// Any failure here is fatal to startup.
    pub fn open(config: &Config) -> Result<Self> {
        let pool = ConnectionPool::new(
            config.database_path.clone(),
            config.busy_timeout,
            config.pool_size,
        );
        {
            let conn = pool.acquire()?;
            db::ensure_schema(&conn)?;
        }
        info!("booking store ready at {}", pool.path().display());
        Ok(Self { pool })
    }

    pub fn create_user(&self, name: &str, id_no: &str, phone_number: &str) -> Result<User> {
        db::create_user(&*self.pool.acquire()?, name, id_no, phone_number)
    }

    pub fn fetch_user(&self, user_id: i64) -> Result<Option<User>> {
        db::fetch_user(&*self.pool.acquire()?, user_id)
    }

    pub fn update_user(
        &self,
        user_id: i64,
        name: &str,
        id_no: &str,
        phone_number: &str,
    ) -> Result<bool> {
        db::update_user(&*self.pool.acquire()?, user_id, name, id_no, phone_number)
    }

    pub fn create_trip(
        &self,
        start_location: &str,
        end_location: &str,
        trip_date: NaiveDate,
    ) -> Result<Trip> {
        db::create_trip(&*self.pool.acquire()?, start_location, end_location, trip_date)
    }

    pub fn fetch_trip(&self, trip_id: i64) -> Result<Option<Trip>> {
        db::fetch_trip(&*self.pool.acquire()?, trip_id)
    }

    pub fn update_trip(
        &self,
        trip_id: i64,
        start_location: &str,
        end_location: &str,
        trip_date: NaiveDate,
    ) -> Result<bool> {
        db::update_trip(
            &*self.pool.acquire()?,
            trip_id,
            start_location,
            end_location,
            trip_date,
        )
    }

    /// Fails with [`crate::StoreError::MissingReference`] when either id is unknown.
    pub fn create_booking(
        &self,
        user_id: i64,
        trip_id: i64,
        total_passengers: u32,
    ) -> Result<Booking> {
        db::create_booking(&*self.pool.acquire()?, user_id, trip_id, total_passengers)
    }

    pub fn fetch_booking(&self, booking_id: i64) -> Result<Option<Booking>> {
        db::fetch_booking(&*self.pool.acquire()?, booking_id)
    }

    pub fn list_bookings_for_user(&self, user_id: i64) -> Result<Vec<BookingSummary>> {
        db::list_bookings_for_user(&*self.pool.acquire()?, user_id)
    }

    pub fn get_booking_detail(&self, booking_id: i64) -> Result<Option<BookingDetail>> {
        db::get_booking_detail(&*self.pool.acquire()?, booking_id)
    }

    pub fn update_booking(&self, booking_id: i64, total_passengers: u32) -> Result<bool> {
        db::update_booking(&*self.pool.acquire()?, booking_id, total_passengers)
    }

    pub fn delete_booking(&self, booking_id: i64) -> Result<bool> {
        db::delete_booking(&*self.pool.acquire()?, booking_id)
    }

    #[cfg(test)]
    pub(crate) fn idle_connections(&self) -> usize {
        self.pool.idle_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;

    fn open_temp() -> (tempfile::TempDir, BookingStore) {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::with_database_path(dir.path().join("bookings.sqlite"));
        let store = BookingStore::open(&config).unwrap();
        (dir, store)
    }

    #[test]
    fn test_reopen_keeps_data() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::with_database_path(dir.path().join("bookings.sqlite"));

        let user_id = {
            let store = BookingStore::open(&config).unwrap();
            store.create_user("Alice", "A1", "555-1111").unwrap().id
        };

        let store = BookingStore::open(&config).unwrap();
        let user = store.fetch_user(user_id).unwrap().unwrap();
        assert_eq!(user.name, "Alice");
    }

    #[test]
    fn test_connections_are_reused_across_operations() {
        let (_dir, store) = open_temp();
        assert_eq!(store.idle_connections(), 1);

        store.create_user("Alice", "A1", "555-1111").unwrap();
        store.list_bookings_for_user(1).unwrap();
        assert_eq!(store.idle_connections(), 1);
    }

    #[test]
    fn test_foreign_keys_enforced_on_pooled_connections() {
        let (_dir, store) = open_temp();
        let err = store.create_booking(1, 1, 2).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StoreError>(),
            Some(StoreError::MissingReference { .. })
        ));
        assert_eq!(store.idle_connections(), 1);
    }
}
