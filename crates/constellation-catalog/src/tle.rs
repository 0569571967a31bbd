//! TLE source parsing.
//!
//! One satellite per two-line NORAD element group, optionally preceded by
//! a name line. Catalog index = group position in the file. Records are
//! validated through the `sgp4` element parser; the orbital parameters
//! themselves are opaque to this core.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{CatalogError, NodeId, Result};

/// A satellite derived from one TLE record. Created once at load,
/// immutable thereafter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Satellite {
    pub index: u32,
    pub norad_id: u64,
    pub name: String,
    pub epoch: DateTime<Utc>,
    pub tle_line1: String,
    pub tle_line2: String,
    pub node: NodeId,
}

/// Load and validate every TLE group in the file, in file order.
pub fn load_tles(path: impl AsRef<Path>) -> Result<Vec<Satellite>> {
    let path = path.as_ref();
    info!("loading TLEs from {:?}", path);
    let text = fs::read_to_string(path)?;
    let satellites = parse_tles(&text, &path.display().to_string())?;
    info!("loaded {} satellites", satellites.len());
    Ok(satellites)
}

pub fn parse_tles(text: &str, source_name: &str) -> Result<Vec<Satellite>> {
    let malformed = |line: usize, reason: String| CatalogError::MalformedRecord {
        source_name: source_name.to_string(),
        line,
        reason,
    };

    let lines: Vec<(usize, &str)> = text
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim_end()))
        .filter(|(_, l)| !l.trim().is_empty())
        .collect();

    let mut satellites = Vec::new();
    let mut pending_name: Option<String> = None;
    let mut i = 0;

    while i < lines.len() {
        let (lineno, line) = lines[i];
        if line.starts_with("1 ") {
            let &(line2_no, line2) = lines
                .get(i + 1)
                .ok_or_else(|| malformed(lineno, "TLE line 1 without a matching line 2".into()))?;
            if !line2.starts_with("2 ") {
                return Err(malformed(
                    line2_no,
                    "expected TLE line 2 after line 1".into(),
                ));
            }

            let index = satellites.len() as u32;
            let elements =
                sgp4::Elements::from_tle(pending_name.take(), line.as_bytes(), line2.as_bytes())
                    .map_err(|e| malformed(lineno, format!("invalid TLE: {e}")))?;

            let name = elements
                .object_name
                .clone()
                .unwrap_or_else(|| format!("SAT-{index}"));

            satellites.push(Satellite {
                index,
                norad_id: elements.norad_id,
                name,
                epoch: DateTime::from_naive_utc_and_offset(elements.datetime, Utc),
                tle_line1: line.to_string(),
                tle_line2: line2.to_string(),
                node: NodeId(index),
            });
            i += 2;
        } else if pending_name.is_none() {
            pending_name = Some(line.trim().to_string());
            i += 1;
        } else {
            return Err(malformed(
                lineno,
                "expected TLE line 1 after a name line".into(),
            ));
        }
    }

    if pending_name.is_some() {
        let (lineno, _) = lines[lines.len() - 1];
        return Err(malformed(lineno, "trailing name line without a TLE group".into()));
    }
    if satellites.is_empty() {
        return Err(CatalogError::EmptyInput(source_name.to_string()));
    }

    Ok(satellites)
}

#[cfg(test)]
pub(crate) fn test_satellite(index: u32) -> Satellite {
    Satellite {
        index,
        norad_id: 90_000 + index as u64,
        name: format!("SAT-{index}"),
        epoch: DateTime::UNIX_EPOCH,
        tle_line1: String::new(),
        tle_line2: String::new(),
        node: NodeId(index),
    }
}
