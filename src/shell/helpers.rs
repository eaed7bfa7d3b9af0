use anyhow::Error;
use crossterm::style::Stylize;

use crate::error::ShellError;
use crate::models::{BookingDetail, BookingSummary};

/// Severity of a status line printed after an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StatusKind {
    Info,
    Error,
}

/// Render a status line, coloured only when writing to a terminal.
pub(crate) fn status_line(kind: StatusKind, text: &str, color: bool) -> String {
    if !color {
        return text.to_string();
    }
    match kind {
        StatusKind::Info => text.green().to_string(),
        StatusKind::Error => text.red().to_string(),
    }
}

pub(crate) fn format_price(price: f64) -> String {
    format!("${price:.2}")
}

pub(crate) fn summary_line(booking: &BookingSummary) -> String {
    format!(
        "Booking ID: {}, Passengers: {}, Price: {}, Trip: {} to {}, Date: {}",
        booking.booking_id,
        booking.total_passengers,
        format_price(booking.price),
        booking.start_location,
        booking.end_location,
        booking.trip_date
    )
}

pub(crate) fn detail_lines(detail: &BookingDetail) -> Vec<String> {
    vec![
        format!("Booking ID: {}", detail.booking_id),
        format!("Total Passengers: {}", detail.total_passengers),
        format!("Price: {}", format_price(detail.price)),
        format!("User Name: {}", detail.user_name),
        format!("User Phone Number: {}", detail.phone_number),
        format!("Trip Start Location: {}", detail.start_location),
        format!("Trip End Location: {}", detail.end_location),
        format!("Trip Date: {}", detail.trip_date),
    ]
}

/// Extract the most relevant error message from a chained error.
pub(crate) fn surface_error(err: &Error) -> String {
    err.chain()
        .last()
        .map(|cause| cause.to_string())
        .unwrap_or_else(|| err.to_string())
}

pub(crate) fn is_input_closed(err: &Error) -> bool {
    matches!(err.downcast_ref::<ShellError>(), Some(ShellError::InputClosed))
}

#[cfg(test)]
mod tests {
    use anyhow::{anyhow, Context};

    use super::*;

    #[test]
    fn test_plain_status_has_no_escape_codes() {
        assert_eq!(status_line(StatusKind::Error, "boom", false), "boom");
        assert_eq!(status_line(StatusKind::Info, "ok", false), "ok");
        assert!(status_line(StatusKind::Info, "ok", true).contains("ok"));
    }

    #[test]
    fn test_price_formatting() {
        assert_eq!(format_price(120.0), "$120.00");
        assert_eq!(format_price(0.0), "$0.00");
    }

    #[test]
    fn test_surface_error_prefers_root_cause() {
        let err = Err::<(), _>(anyhow!("user 9 or trip 1 does not exist"))
            .context("failed to insert booking")
            .unwrap_err();
        assert_eq!(surface_error(&err), "user 9 or trip 1 does not exist");
    }
}
