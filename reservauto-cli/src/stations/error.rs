//! Station directory error types.

use crate::domain::StationId;

/// Errors loading the station directory file.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    /// The station file could not be read
    #[error("cannot read station file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The station file is not valid JSON or has the wrong shape
    #[error("malformed station file {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Two records share the same station id
    #[error("duplicate station id {0} in station file")]
    DuplicateId(StationId),
}
