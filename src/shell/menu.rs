/// Entries of the numbered main menu, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    RegisterUser,
    AddTrip,
    BookTrip,
    ViewBookings,
    ViewBookingDetails,
    DeleteBooking,
    UpdateUser,
    UpdateTrip,
    UpdateBooking,
    Exit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 10] = [
        MenuChoice::RegisterUser,
        MenuChoice::AddTrip,
        MenuChoice::BookTrip,
        MenuChoice::ViewBookings,
        MenuChoice::ViewBookingDetails,
        MenuChoice::DeleteBooking,
        MenuChoice::UpdateUser,
        MenuChoice::UpdateTrip,
        MenuChoice::UpdateBooking,
        MenuChoice::Exit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MenuChoice::RegisterUser => "Register User",
            MenuChoice::AddTrip => "Add Trip",
            MenuChoice::BookTrip => "Book Trip",
            MenuChoice::ViewBookings => "View Your Bookings",
            MenuChoice::ViewBookingDetails => "View Booking Details",
            MenuChoice::DeleteBooking => "Delete Booking",
            MenuChoice::UpdateUser => "Update User Information",
            MenuChoice::UpdateTrip => "Update Trip Details",
            MenuChoice::UpdateBooking => "Update Booking",
            MenuChoice::Exit => "Exit",
        }
    }

    /// One-based position shown next to the label.
    pub fn number(self) -> usize {
        Self::ALL
            .iter()
            .position(|choice| *choice == self)
            .map_or(0, |idx| idx + 1)
    }

    /// Map the raw menu answer to a choice. Anything but a listed number is `None`.
    pub fn parse(input: &str) -> Option<Self> {
        let number: usize = input.trim().parse().ok()?;
        number
            .checked_sub(1)
            .and_then(|idx| Self::ALL.get(idx).copied())
    }
}
