//! Client and parsers for the reservauto.net booking pages.
//!
//! The booking pages are classic-ASP HTML with no machine-readable
//! counterpart. Extraction rules are literal and deliberately brittle: a
//! page that no longer matches them is a hard error carrying the offending
//! fragment, never a partial result, since a mismatch usually means the
//! rules themselves have drifted out of date.

mod availability;
mod car;
mod client;
mod error;
mod reservations;

pub use availability::parse_availability;
pub use car::{CarDescription, parse_car_description};
pub use client::ReservautoClient;
pub use error::{FetchError, ParseError, ReservautoError};
pub use reservations::{
    ReservationRow, normalize_status, parse_reservation_rows, split_rate_price,
};
