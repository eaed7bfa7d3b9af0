//! Core library surface for the trip booking command-line application.
//!
//! The binary only wires these pieces together: configuration is resolved,
//! the record store is opened (which also ensures the schema), and the shell
//! drives the store from the terminal.
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod shell;
pub mod store;

pub use config::Config;
pub use error::{ShellError, StoreError};

/// Domain records and the flat fare policy.
pub use models::{
    booking_price, Booking, BookingDetail, BookingSummary, Trip, User, PRICE_PER_PASSENGER,
};

pub use shell::{MenuChoice, Shell};
pub use store::BookingStore;
