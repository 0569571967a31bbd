//! Ground-station source parsing.
//!
//! One record per line, `id,name,latitude,longitude,elevation_m`, with
//! `#` comments skipped. Catalog index = record position, and the record
//! id must agree with it; the loader refuses to guess intent when they
//! disagree. The resolved node id is `num_satellites + index`.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{CatalogError, NodeId, Result};

/// A ground station record. Immutable after load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroundStation {
    pub index: u32,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub elevation_m: f64,
    pub node: NodeId,
}

fn is_valid_latitude(lat: f64) -> bool {
    (-90.0..=90.0).contains(&lat) && lat.is_finite()
}

fn is_valid_longitude(lon: f64) -> bool {
    (-180.0..=180.0).contains(&lon) && lon.is_finite()
}

/// Load every ground-station record, assigning node ids after the
/// satellite block of the id space.
pub fn load_stations(path: impl AsRef<Path>, num_satellites: u32) -> Result<Vec<GroundStation>> {
    let path = path.as_ref();
    info!("loading ground stations from {:?}", path);
    let text = fs::read_to_string(path)?;
    let stations = parse_stations(&text, &path.display().to_string(), num_satellites)?;
    info!("loaded {} ground stations", stations.len());
    Ok(stations)
}

pub fn parse_stations(
    text: &str,
    source_name: &str,
    num_satellites: u32,
) -> Result<Vec<GroundStation>> {
    let malformed = |line: usize, reason: String| CatalogError::MalformedRecord {
        source_name: source_name.to_string(),
        line,
        reason,
    };

    let mut stations = Vec::new();

    for (lineno, line) in text.lines().enumerate().map(|(i, l)| (i + 1, l.trim())) {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() < 4 {
            return Err(malformed(
                lineno,
                format!("expected id,name,latitude,longitude[,elevation_m], got {} fields", fields.len()),
            ));
        }

        let index = stations.len() as u32;
        let id: u32 = fields[0]
            .parse()
            .map_err(|_| malformed(lineno, format!("unparseable station id {:?}", fields[0])))?;
        if id != index {
            return Err(malformed(
                lineno,
                format!("station id {id} does not match record position {index}"),
            ));
        }

        let name = fields[1].to_string();
        if name.is_empty() {
            return Err(malformed(lineno, "empty station name".into()));
        }

        let latitude: f64 = fields[2]
            .parse()
            .map_err(|_| malformed(lineno, format!("unparseable latitude {:?}", fields[2])))?;
        let longitude: f64 = fields[3]
            .parse()
            .map_err(|_| malformed(lineno, format!("unparseable longitude {:?}", fields[3])))?;
        if !is_valid_latitude(latitude) {
            return Err(malformed(lineno, format!("latitude {latitude} out of range")));
        }
        if !is_valid_longitude(longitude) {
            return Err(malformed(lineno, format!("longitude {longitude} out of range")));
        }

        let elevation_m: f64 = match fields.get(4) {
            Some(raw) => raw
                .parse()
                .map_err(|_| malformed(lineno, format!("unparseable elevation {raw:?}")))?,
            None => 0.0,
        };

        stations.push(GroundStation {
            index,
            name,
            latitude,
            longitude,
            elevation_m,
            node: NodeId(num_satellites + index),
        });
    }

    if stations.is_empty() {
        return Err(CatalogError::EmptyInput(source_name.to_string()));
    }

    Ok(stations)
}

#[cfg(test)]
pub(crate) fn test_station(index: u32, name: &str) -> GroundStation {
    GroundStation {
        index,
        name: name.to_string(),
        latitude: 0.0,
        longitude: 0.0,
        elevation_m: 0.0,
        node: NodeId(index),
    }
}
