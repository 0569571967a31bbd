//! Shared fixtures for unit tests.

use constellation_catalog::{Catalog, GroundStation, NodeId, Satellite};

/// Catalog with synthetic records: `sats` satellites then `stations`
/// ground stations, node ids assigned the usual way.
pub(crate) fn test_catalog(sats: u32, stations: u32) -> Catalog {
    let satellites = (0..sats)
        .map(|i| Satellite {
            index: i,
            norad_id: 90_000 + i as u64,
            name: format!("SAT-{i}"),
            epoch: chrono::DateTime::UNIX_EPOCH,
            tle_line1: String::new(),
            tle_line2: String::new(),
            node: NodeId(i),
        })
        .collect();
    let stations = (0..stations)
        .map(|i| GroundStation {
            index: i,
            name: format!("GS-{i}"),
            latitude: 0.0,
            longitude: 0.0,
            elevation_m: 0.0,
            node: NodeId(sats + i),
        })
        .collect();
    Catalog::from_records(satellites, stations).unwrap()
}
