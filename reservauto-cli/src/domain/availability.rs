//! Availability search result records.

use serde::Serialize;

/// One candidate car returned by an availability search.
///
/// Rows have no identity beyond their position in the result sequence.
/// `distance_km` compares the car's live-reported position against the
/// station's stored position; the two can legitimately differ since a car
/// need not sit exactly at its home station.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CarAvailability {
    pub station_name: String,
    #[serde(rename = "distance")]
    pub distance_km: f64,
    pub car_name: String,
    #[serde(rename = "car_features")]
    pub features: String,
}
