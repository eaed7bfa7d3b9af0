use std::io::{BufRead, Write};

use anyhow::Result;
use log::warn;

use super::helpers::{
    detail_lines, format_price, is_input_closed, summary_line, surface_error, StatusKind,
};
use super::menu::MenuChoice;
use super::prompt::Prompter;
use crate::error::StoreError;
use crate::store::BookingStore;

const WELCOME: &str = "Welcome to the Car Trip Booking!";
const FAREWELL: &str = "Thank you for using the Car Trip Booking. Goodbye!";

/// The interactive menu loop. Every menu action maps to exactly one store call.
pub struct Shell<'a, R, W> {
    store: &'a BookingStore,
    io: Prompter<R, W>,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    /// `color` enables green/red status lines and should only be set when
    /// `output` is a terminal.
    pub fn new(store: &'a BookingStore, input: R, output: W, color: bool) -> Self {
        Self {
            store,
            io: Prompter::new(input, output, color),
        }
    }

    /// Hand back the output stream, e.g. to inspect what a scripted session printed.
    pub fn into_output(self) -> W {
        self.io.into_output()
    }

    /// Run until the user picks Exit or input ends. Missing booking references
    /// are reported and the menu comes back; any other store failure ends the
    /// session with that error.
    pub fn run(&mut self) -> Result<()> {
        self.io.say(WELCOME)?;

        loop {
            self.print_menu()?;
            let prompt = format!("Please choose an option (1-{}): ", MenuChoice::ALL.len());
            let answer = match self.io.prompt_text(&prompt) {
                Ok(answer) => answer,
                Err(err) if is_input_closed(&err) => break,
                Err(err) => return Err(err),
            };

            let Some(choice) = MenuChoice::parse(&answer) else {
                self.io
                    .status(StatusKind::Error, "Invalid option, please try again.")?;
                continue;
            };

            if choice == MenuChoice::Exit {
                self.io.say(FAREWELL)?;
                break;
            }

            match self.dispatch(choice) {
                Ok(()) => {}
                Err(err) if is_input_closed(&err) => break,
                Err(err) if err.downcast_ref::<StoreError>().is_some() => {
                    warn!("{choice:?} failed: {err:#}");
                    self.io.status(StatusKind::Error, &surface_error(&err))?;
                }
                Err(err) => return Err(err),
            }
        }

        Ok(())
    }

    fn print_menu(&mut self) -> Result<()> {
        self.io.say("")?;
        self.io.say("Menu:")?;
        for choice in MenuChoice::ALL {
            self.io
                .say(&format!("{}. {}", choice.number(), choice.label()))?;
        }
        Ok(())
    }

    fn dispatch(&mut self, choice: MenuChoice) -> Result<()> {
        match choice {
            MenuChoice::RegisterUser => self.register_user(),
            MenuChoice::AddTrip => self.add_trip(),
            MenuChoice::BookTrip => self.book_trip(),
            MenuChoice::ViewBookings => self.view_bookings(),
            MenuChoice::ViewBookingDetails => self.view_booking_details(),
            MenuChoice::DeleteBooking => self.delete_booking(),
            MenuChoice::UpdateUser => self.update_user(),
            MenuChoice::UpdateTrip => self.update_trip(),
            MenuChoice::UpdateBooking => self.update_booking(),
            MenuChoice::Exit => Ok(()),
        }
    }

    fn register_user(&mut self) -> Result<()> {
        let name = self.io.prompt_text("Enter your name: ")?;
        let id_no = self.io.prompt_text("Enter your ID number: ")?;
        let phone = self.io.prompt_text("Enter your phone number: ")?;

        let user = self.store.create_user(&name, &id_no, &phone)?;
        self.io.status(
            StatusKind::Info,
            &format!("Registration successful! Your User ID is: {}", user.id),
        )
    }

    fn add_trip(&mut self) -> Result<()> {
        self.io.say("Please enter trip details:")?;
        let start = self.io.prompt_text("Start Location: ")?;
        let end = self.io.prompt_text("End Location: ")?;
        let date = self.io.prompt_date("Trip Date (YYYY-MM-DD): ")?;

        let trip = self.store.create_trip(&start, &end, date)?;
        self.io.status(
            StatusKind::Info,
            &format!("Trip added successfully! Trip ID is: {}", trip.id),
        )
    }

    fn book_trip(&mut self) -> Result<()> {
        let user_id = self.io.prompt_id("Enter your User ID: ")?;
        let passengers = self
            .io
            .prompt_passengers("Enter the number of passengers: ")?;
        let trip_id = self.io.prompt_id("Enter the Trip ID: ")?;

        let booking = self.store.create_booking(user_id, trip_id, passengers)?;
        self.io.status(
            StatusKind::Info,
            &format!(
                "Booking successful! Your Booking ID is: {} (total {})",
                booking.id,
                format_price(booking.price)
            ),
        )
    }

    fn view_bookings(&mut self) -> Result<()> {
        let user_id = self
            .io
            .prompt_id("Enter your User ID to view your bookings: ")?;
        let bookings = self.store.list_bookings_for_user(user_id)?;

        if bookings.is_empty() {
            return self
                .io
                .status(StatusKind::Info, "No bookings found for this user.");
        }

        self.io.say("Your Bookings:")?;
        for booking in &bookings {
            self.io.say(&summary_line(booking))?;
        }
        Ok(())
    }

    fn view_booking_details(&mut self) -> Result<()> {
        let booking_id = self.io.prompt_id("Enter the Booking ID to view details: ")?;

        match self.store.get_booking_detail(booking_id)? {
            Some(detail) => {
                for line in detail_lines(&detail) {
                    self.io.say(&line)?;
                }
                Ok(())
            }
            None => self.io.status(StatusKind::Error, "Booking not found."),
        }
    }

    fn delete_booking(&mut self) -> Result<()> {
        let booking_id = self.io.prompt_id("Enter the Booking ID to delete: ")?;

        if self.store.delete_booking(booking_id)? {
            self.io.status(
                StatusKind::Info,
                &format!("Booking ID {booking_id} deleted successfully."),
            )
        } else {
            self.io.status(
                StatusKind::Info,
                &format!("Booking ID {booking_id} not found, nothing to delete."),
            )
        }
    }

    fn update_user(&mut self) -> Result<()> {
        let user_id = self.io.prompt_id("Enter your User ID to update: ")?;
        let name = self.io.prompt_text("Enter new name: ")?;
        let id_no = self.io.prompt_text("Enter new ID number: ")?;
        let phone = self.io.prompt_text("Enter new phone number: ")?;

        if self.store.update_user(user_id, &name, &id_no, &phone)? {
            self.io
                .status(StatusKind::Info, "User information updated successfully.")
        } else {
            self.io
                .status(StatusKind::Error, &format!("User ID {user_id} not found."))
        }
    }

    fn update_trip(&mut self) -> Result<()> {
        let trip_id = self.io.prompt_id("Enter the Trip ID to update: ")?;
        let start = self.io.prompt_text("New Start Location: ")?;
        let end = self.io.prompt_text("New End Location: ")?;
        let date = self.io.prompt_date("New Trip Date (YYYY-MM-DD): ")?;

        if self.store.update_trip(trip_id, &start, &end, date)? {
            self.io
                .status(StatusKind::Info, "Trip details updated successfully.")
        } else {
            self.io
                .status(StatusKind::Error, &format!("Trip ID {trip_id} not found."))
        }
    }

    fn update_booking(&mut self) -> Result<()> {
        let booking_id = self.io.prompt_id("Enter the Booking ID to update: ")?;
        let passengers = self
            .io
            .prompt_passengers("Enter the new number of passengers: ")?;

        if self.store.update_booking(booking_id, passengers)? {
            self.io.status(StatusKind::Info, "Booking updated successfully.")
        } else {
            self.io.status(
                StatusKind::Error,
                &format!("Booking ID {booking_id} not found."),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::config::Config;

    fn run_script(store: &BookingStore, script: &str) -> String {
        let mut shell = Shell::new(store, Cursor::new(script.as_bytes().to_vec()), Vec::new(), false);
        shell.run().unwrap();
        String::from_utf8(shell.into_output()).unwrap()
    }

    fn temp_store() -> (tempfile::TempDir, BookingStore) {
        let dir = tempfile::tempdir().unwrap();
        let store =
            BookingStore::open(&Config::with_database_path(dir.path().join("shell.sqlite")))
                .unwrap();
        (dir, store)
    }

    #[test]
    fn test_invalid_choice_redisplays_menu() {
        let (_dir, store) = temp_store();
        let output = run_script(&store, "42\nhello\n10\n");

        assert_eq!(output.matches("Invalid option, please try again.").count(), 2);
        assert_eq!(output.matches("Menu:").count(), 3);
        assert!(output.ends_with(&format!("{FAREWELL}\n")));
    }

    #[test]
    fn test_end_of_input_exits_cleanly() {
        let (_dir, store) = temp_store();
        let output = run_script(&store, "1\nAlice\n");
        assert!(output.contains("Enter your ID number: "));
        assert!(store.fetch_user(1).unwrap().is_none());
    }

    #[test]
    fn test_register_book_and_view() {
        let (_dir, store) = temp_store();
        let script = "1\nAlice\nA1\n555-1111\n\
                      2\nX\nY\n2024-01-01\n\
                      3\n1\n3\n1\n\
                      4\n1\n\
                      5\n1\n\
                      10\n";
        let output = run_script(&store, script);

        assert!(output.contains("Registration successful! Your User ID is: 1"));
        assert!(output.contains("Trip added successfully! Trip ID is: 1"));
        assert!(output.contains("Booking successful! Your Booking ID is: 1 (total $120.00)"));
        assert!(output.contains(
            "Booking ID: 1, Passengers: 3, Price: $120.00, Trip: X to Y, Date: 2024-01-01"
        ));
        assert!(output.contains("User Name: Alice"));
        assert!(output.contains("User Phone Number: 555-1111"));
        assert!(output.contains("Trip Date: 2024-01-01"));
    }

    #[test]
    fn test_missing_reference_keeps_session_alive() {
        let (_dir, store) = temp_store();
        let output = run_script(&store, "3\n7\n2\n8\n4\n7\n10\n");

        assert!(output.contains("user 7 or trip 8 does not exist"));
        assert!(output.contains("No bookings found for this user."));
        assert!(output.contains(FAREWELL));
    }

    #[test]
    fn test_update_and_delete_flow() {
        let (_dir, store) = temp_store();
        let user = store.create_user("Alice", "A1", "555-1111").unwrap();
        let trip = store
            .create_trip("X", "Y", chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
            .unwrap();
        let booking = store.create_booking(user.id, trip.id, 3).unwrap();

        let script = format!(
            "9\n{b}\nfive\n5\n\
             7\n{u}\nAlice B\nA2\n555-2222\n\
             8\n{t}\nKiel\nPlön\n2024-07-01\n\
             6\n{b}\n\
             6\n{b}\n\
             5\n{b}\n\
             7\n999\nX\nX\nX\n\
             10\n",
            b = booking.id,
            u = user.id,
            t = trip.id
        );
        let output = run_script(&store, &script);

        assert!(output.contains("Booking updated successfully."));
        assert!(output.contains("User information updated successfully."));
        assert!(output.contains("Trip details updated successfully."));
        assert!(output.contains(&format!("Booking ID {} deleted successfully.", booking.id)));
        assert!(output.contains(&format!(
            "Booking ID {} not found, nothing to delete.",
            booking.id
        )));
        assert!(output.contains("Booking not found."));
        assert!(output.contains("User ID 999 not found."));

        let stored_user = store.fetch_user(user.id).unwrap().unwrap();
        assert_eq!(stored_user.name, "Alice B");
        let stored_trip = store.fetch_trip(trip.id).unwrap().unwrap();
        assert_eq!(stored_trip.end_location, "Plön");
        assert!(store.fetch_booking(booking.id).unwrap().is_none());
    }
}
