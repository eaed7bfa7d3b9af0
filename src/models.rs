//! Domain models that mirror the SQLite schema and get passed between the
//! store and the shell. These stay light-weight data holders so the other
//! layers can focus on persistence and presentation.

use std::fmt;

use chrono::NaiveDate;

/// Flat fare charged for every passenger on a booking.
pub const PRICE_PER_PASSENGER: f64 = 40.0;

/// Price of a booking carrying `total_passengers` people. Every write path
/// derives the stored price from this function; there is no other way to set it.
pub fn booking_price(total_passengers: u32) -> f64 {
    f64::from(total_passengers) * PRICE_PER_PASSENGER
}

#[derive(Debug, Clone, PartialEq)]
/// A registered traveller.
pub struct User {
    /// Primary key (`users.user_id`).
    pub id: i64,
    pub name: String,
    /// Free-form identity document number. Not unique.
    pub id_no: String,
    pub phone_number: String,
}

#[derive(Debug, Clone, PartialEq)]
/// A route offered on a given day.
pub struct Trip {
    /// Primary key (`trip_details.trip_id`).
    pub id: i64,
    pub start_location: String,
    pub end_location: String,
    pub trip_date: NaiveDate,
}

impl fmt::Display for Trip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} to {} on {}",
            self.start_location, self.end_location, self.trip_date
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Raw booking row linking a user to a trip.
pub struct Booking {
    pub id: i64,
    pub total_passengers: u32,
    pub price: f64,
    pub user_id: i64,
    pub trip_id: i64,
}

#[derive(Debug, Clone, PartialEq)]
/// One line of the "your bookings" listing: the booking joined with its trip.
pub struct BookingSummary {
    pub booking_id: i64,
    pub total_passengers: u32,
    pub price: f64,
    pub start_location: String,
    pub end_location: String,
    pub trip_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq)]
/// Full booking view joined with both the booking user and the trip.
pub struct BookingDetail {
    pub booking_id: i64,
    pub total_passengers: u32,
    pub price: f64,
    pub user_name: String,
    pub phone_number: String,
    pub start_location: String,
    pub end_location: String,
    pub trip_date: NaiveDate,
}
