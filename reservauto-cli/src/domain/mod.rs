//! Core value types shared across the crate.

mod availability;
mod criteria;
mod reservation;
mod station;

pub use availability::CarAvailability;
pub use criteria::{City, Language, SearchCriteria};
pub use reservation::{Reservation, StatusFilter};
pub use station::{InvalidStationId, Station, StationId};
