//! Fetch and parse error types for the booking pages.

use crate::domain::StationId;

/// Transport-level failure fetching a page. Fatal; never retried.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The site answered with a non-success status
    #[error("unexpected status {status} from {url}")]
    Status { status: u16, url: String },
}

/// Structural failure extracting data from a fetched page.
///
/// Variants carry the offending fragment so markup drift on the remote
/// site can be diagnosed from the error alone. An availability page with
/// no table at all is a valid empty result, not one of these.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The three availability sub-sequences must align one entry per car
    #[error(
        "availability table mismatch: {stations} station links, \
         {coordinates} coordinate links, {descriptions} description cells"
    )]
    StructuralMismatch {
        stations: usize,
        coordinates: usize,
        descriptions: usize,
    },

    /// A station link carried no usable `StationID=` parameter
    #[error("station link without a usable StationID parameter: {href}")]
    BadStationLink { href: String },

    /// A scraped station id has no entry in the station directory
    #[error("station {0} not present in the station directory")]
    UnknownStation(StationId),

    /// A billing-rules link carried no readable coordinate pair
    #[error("cannot read coordinates from billing link: {href}")]
    BadCoordinates { href: String },

    /// The reservation list page had no table with the marker class
    #[error("no reservation table (class tblReservations) in page")]
    MissingReservationTable,

    /// A reservation row had fewer cells than the fixed layout requires
    #[error("reservation row has {cells} cells, expected at least {expected}: {fragment}")]
    MalformedRow {
        cells: usize,
        expected: usize,
        fragment: String,
    },

    /// A reservation row's car cell had no `CarID=` link
    #[error("reservation row car cell has no CarID link: {fragment}")]
    MissingCarId { fragment: String },

    /// A reservation row's rate/price cell was empty after normalization
    #[error("empty rate/price cell in reservation row")]
    EmptyRatePrice,

    /// The car description page lacked the expected styled text block
    #[error("no car description block in page")]
    MissingCarDescription,
}

/// Failure anywhere in a fetch-then-parse pipeline.
#[derive(Debug, thiserror::Error)]
pub enum ReservautoError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}
