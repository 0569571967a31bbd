//! Constellation Catalog Library
//!
//! Loads the satellite TLE set and the ground-station list once at startup
//! and owns both record sets for the process lifetime. The catalog defines
//! the unified node-id space the rest of the simulation references:
//! satellites first (TLE group order), then ground stations, so
//! `NodeId(ground station i) = satellite count + i`.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

pub mod stations;
pub mod tle;

pub use stations::GroundStation;
pub use tle::Satellite;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed record in {source_name} at line {line}: {reason}")]
    MalformedRecord {
        source_name: String,
        line: usize,
        reason: String,
    },
    #[error("Empty input: {0} yielded no records")]
    EmptyInput(String),
    #[error("No {role} at offset {index} (catalog has {count})")]
    UnknownRole {
        role: NodeRole,
        index: u32,
        count: u32,
    },
}

pub type Result<T> = std::result::Result<T, CatalogError>;

/// Dense, zero-based identifier of a simulated entity.
///
/// Unique across the whole node population. Assignment order is
/// satellites first, then ground stations, preserving input-file order
/// so downstream references by offset stay valid.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// Which half of the node-id space a symbolic offset refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeRole {
    Satellite,
    GroundStation,
}

impl fmt::Display for NodeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeRole::Satellite => write!(f, "satellite"),
            NodeRole::GroundStation => write!(f, "ground station"),
        }
    }
}

/// Immutable record sets plus the node-id resolver.
#[derive(Debug, Clone)]
pub struct Catalog {
    satellites: Vec<Satellite>,
    stations: Vec<GroundStation>,
}

impl Catalog {
    /// Load both sources. Fails with `MalformedRecord` on an unparseable
    /// line and `EmptyInput` if either source yields zero records.
    pub fn load(tle_path: impl AsRef<Path>, stations_path: impl AsRef<Path>) -> Result<Catalog> {
        let satellites = tle::load_tles(tle_path)?;
        let stations = stations::load_stations(stations_path, satellites.len() as u32)?;

        info!(
            satellites = satellites.len(),
            ground_stations = stations.len(),
            "constellation catalog loaded"
        );

        Ok(Catalog {
            satellites,
            stations,
        })
    }

    /// Build a catalog from records already in memory. Same emptiness
    /// rules as `load`; ground-station node ids are recomputed against
    /// the satellite count.
    pub fn from_records(
        satellites: Vec<Satellite>,
        mut stations: Vec<GroundStation>,
    ) -> Result<Catalog> {
        if satellites.is_empty() {
            return Err(CatalogError::EmptyInput("TLE source".into()));
        }
        if stations.is_empty() {
            return Err(CatalogError::EmptyInput("ground-station source".into()));
        }
        let offset = satellites.len() as u32;
        for (i, gs) in stations.iter_mut().enumerate() {
            gs.node = NodeId(offset + i as u32);
        }
        Ok(Catalog {
            satellites,
            stations,
        })
    }

    pub fn num_satellites(&self) -> u32 {
        self.satellites.len() as u32
    }

    pub fn num_ground_stations(&self) -> u32 {
        self.stations.len() as u32
    }

    /// Size of the unified node-id space.
    pub fn total_node_count(&self) -> u32 {
        self.num_satellites() + self.num_ground_stations()
    }

    /// Deterministic id computation: satellites map to their catalog
    /// index, ground stations to `num_satellites + index`. Out-of-range
    /// offsets fail with `UnknownRole`.
    pub fn resolve(&self, role: NodeRole, index: u32) -> Result<NodeId> {
        let count = match role {
            NodeRole::Satellite => self.num_satellites(),
            NodeRole::GroundStation => self.num_ground_stations(),
        };
        if index >= count {
            return Err(CatalogError::UnknownRole { role, index, count });
        }
        Ok(match role {
            NodeRole::Satellite => NodeId(index),
            NodeRole::GroundStation => NodeId(self.num_satellites() + index),
        })
    }

    pub fn satellites(&self) -> &[Satellite] {
        &self.satellites
    }

    pub fn ground_stations(&self) -> &[GroundStation] {
        &self.stations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_catalog(sats: u32, stations: u32) -> Catalog {
        let satellites = (0..sats).map(tle::test_satellite).collect();
        let stations = (0..stations)
            .map(|i| stations::test_station(i, &format!("GS-{i}")))
            .collect();
        Catalog::from_records(satellites, stations).unwrap()
    }

    #[test]
    fn test_ground_station_resolution_is_offset_by_satellite_count() {
        let catalog = test_catalog(35, 40);
        for i in 0..40 {
            assert_eq!(
                catalog.resolve(NodeRole::GroundStation, i).unwrap(),
                NodeId(35 + i)
            );
        }
        assert_eq!(catalog.resolve(NodeRole::Satellite, 12).unwrap(), NodeId(12));
        assert_eq!(catalog.total_node_count(), 75);
    }

    #[test]
    fn test_out_of_range_offset_is_unknown_role() {
        let catalog = test_catalog(3, 2);
        let err = catalog.resolve(NodeRole::GroundStation, 2).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::UnknownRole {
                role: NodeRole::GroundStation,
                index: 2,
                count: 2,
            }
        ));
        assert!(catalog.resolve(NodeRole::Satellite, 3).is_err());
    }

    #[test]
    fn test_empty_record_sets_rejected() {
        let sats: Vec<Satellite> = (0..2).map(tle::test_satellite).collect();
        assert!(matches!(
            Catalog::from_records(sats, Vec::new()),
            Err(CatalogError::EmptyInput(_))
        ));
        assert!(matches!(
            Catalog::from_records(Vec::new(), vec![stations::test_station(0, "GS-0")]),
            Err(CatalogError::EmptyInput(_))
        ));
    }
}
