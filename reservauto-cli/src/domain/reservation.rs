//! Reservation list records and the status filter.

use serde::Serialize;

/// Reservation status filter for the list query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    Ongoing,
    Upcoming,
    Past,
    Cancelled,
    All,
}

impl StatusFilter {
    /// The `ReservationStatus` code the list endpoint expects.
    pub fn wire_id(self) -> &'static str {
        match self {
            StatusFilter::Ongoing => "0",
            StatusFilter::Upcoming => "1",
            StatusFilter::Past => "2",
            StatusFilter::Cancelled => "3",
            StatusFilter::All => "4",
        }
    }
}

/// A booked or past use of a car by the authenticated user.
///
/// `status` is normalized display text rather than an enum: the site renders
/// it in the requested language, so only the early-return marker is
/// recognized structurally; everything else passes through trimmed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reservation {
    pub id: String,
    #[serde(rename = "car")]
    pub car_name: String,
    pub from: String,
    pub to: String,
    pub status: String,
    pub rate: String,
    pub price: String,
    pub station: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_ids_match_site_contract() {
        assert_eq!(StatusFilter::Ongoing.wire_id(), "0");
        assert_eq!(StatusFilter::Upcoming.wire_id(), "1");
        assert_eq!(StatusFilter::Past.wire_id(), "2");
        assert_eq!(StatusFilter::Cancelled.wire_id(), "3");
        assert_eq!(StatusFilter::All.wire_id(), "4");
    }
}
