//! Station id → station lookup.

use std::collections::HashMap;
use std::path::Path;

use crate::domain::{Station, StationId};

use super::error::DirectoryError;

/// Static lookup of station id → station record.
///
/// Loaded once at startup; read-only for the rest of the process lifetime.
#[derive(Debug, Clone)]
pub struct StationDirectory {
    stations: HashMap<StationId, Station>,
}

impl StationDirectory {
    /// Load the directory from a JSON array of station records.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DirectoryError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| DirectoryError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let stations: Vec<Station> =
            serde_json::from_str(&json).map_err(|source| DirectoryError::Json {
                path: path.display().to_string(),
                source,
            })?;

        Self::from_stations(stations)
    }

    /// Build a directory from already-loaded station records.
    pub fn from_stations(stations: Vec<Station>) -> Result<Self, DirectoryError> {
        let mut map = HashMap::with_capacity(stations.len());
        for station in stations {
            let id = station.id.clone();
            if map.insert(id.clone(), station).is_some() {
                return Err(DirectoryError::DuplicateId(id));
            }
        }
        Ok(Self { stations: map })
    }

    /// Look up a station by id.
    pub fn get(&self, id: &StationId) -> Option<&Station> {
        self.stations.get(id)
    }

    /// Number of stations in the directory.
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    /// Whether the directory holds no stations.
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}
