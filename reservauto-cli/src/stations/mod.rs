//! Station directory: the static station reference table.
//!
//! Loaded eagerly at startup from a JSON file and read-only thereafter.
//! Availability parsing joins scraped station ids against this directory;
//! an id missing from it is a hard parse failure, never a silent default.

mod directory;
mod error;

pub use directory::StationDirectory;
pub use error::DirectoryError;
