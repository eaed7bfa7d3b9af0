//! Persistence module split across logical submodules.

mod bookings;
mod connection;
mod pool;
mod trips;
mod users;

pub use bookings::{
    create_booking, delete_booking, fetch_booking, get_booking_detail, list_bookings_for_user,
    update_booking,
};
pub use connection::{ensure_schema, open_connection};
pub use pool::{ConnectionPool, PooledConnection};
pub use trips::{create_trip, fetch_trip, update_trip};
pub use users::{create_user, fetch_user, update_user};
