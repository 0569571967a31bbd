//! Snapshot loading.
//!
//! A dynamic-state sequence is a directory of interval files,
//! `isls_{index}.txt`, one per fixed-length simulated interval. Each file
//! lists the node-id pairs active during `[index*step, (index+1)*step)`,
//! one `a b` pair per line, `#` comments skipped. Parsing is pure; no
//! scheduling side effects happen here.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use sim_runtime::SimTime;
use tracing::debug;

use crate::link::LinkKey;
use crate::{Result, TopologyError};

use constellation_catalog::NodeId;

/// The set of links active during one simulated interval `[at, at+step)`.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub at: SimTime,
    pub links: HashSet<LinkKey>,
}

/// Lazy, finite, time-ordered snapshot iterator.
///
/// Element `i` carries timestamp `i * step`. The whole sequence is
/// checked for gaps at open time, before anything is scheduled; a missing
/// interval file is a fatal `CorruptSequence` because the engine refuses
/// to guess intent about missing intervals. Restartable only by
/// re-opening.
#[derive(Debug)]
pub struct SnapshotSequence {
    dir: PathBuf,
    step: SimTime,
    intervals: u64,
    node_count: u32,
    next_index: u64,
}

fn interval_file(dir: &Path, index: u64) -> PathBuf {
    dir.join(format!("isls_{index}.txt"))
}

impl SnapshotSequence {
    /// Open a sequence covering `[0, horizon)` at the given step.
    ///
    /// `node_count` bounds every node id the files may reference; a pair
    /// outside `[0, node_count)` is a fatal `UnresolvedNodeReference`
    /// when that interval is parsed.
    pub fn open(
        dir: impl AsRef<Path>,
        step: SimTime,
        horizon: SimTime,
        node_count: u32,
    ) -> Result<SnapshotSequence> {
        let dir = dir.as_ref().to_path_buf();

        if step == SimTime::ZERO {
            return Err(TopologyError::CorruptSequence(
                "step duration must be non-zero".into(),
            ));
        }
        if horizon == SimTime::ZERO || !horizon.is_multiple_of(step) {
            return Err(TopologyError::CorruptSequence(format!(
                "horizon {horizon} is not a positive multiple of step {step}"
            )));
        }

        let intervals = horizon.intervals(step);
        for index in 0..intervals {
            let file = interval_file(&dir, index);
            if !file.is_file() {
                return Err(TopologyError::CorruptSequence(format!(
                    "missing interval file {:?} (interval {index} of {intervals})",
                    file
                )));
            }
        }

        debug!(dir = ?dir, intervals, "snapshot sequence opened");
        Ok(SnapshotSequence {
            dir,
            step,
            intervals,
            node_count,
            next_index: 0,
        })
    }

    pub fn step(&self) -> SimTime {
        self.step
    }

    pub fn intervals(&self) -> u64 {
        self.intervals
    }

    fn read_interval(&self, index: u64) -> Result<Snapshot> {
        let path = interval_file(&self.dir, index);
        let text = fs::read_to_string(&path)?;
        let links = parse_pairs(&text, &path.display().to_string(), self.node_count)?;
        Ok(Snapshot {
            at: SimTime::from_millis(index * self.step.as_millis()),
            links,
        })
    }
}

impl Iterator for SnapshotSequence {
    type Item = Result<Snapshot>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_index >= self.intervals {
            return None;
        }
        let index = self.next_index;
        self.next_index += 1;
        Some(self.read_interval(index))
    }
}

/// Parse one interval file's pair list into a canonical link set.
pub fn parse_pairs(text: &str, source_name: &str, node_count: u32) -> Result<HashSet<LinkKey>> {
    let mut links = HashSet::new();

    for (lineno, line) in text.lines().enumerate().map(|(i, l)| (i + 1, l.trim())) {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() != 2 {
            return Err(TopologyError::MalformedRecord {
                source_name: source_name.to_string(),
                line: lineno,
                reason: format!("expected two node ids, got {} fields", fields.len()),
            });
        }

        let mut pair = [0u32; 2];
        for (slot, raw) in pair.iter_mut().zip(&fields) {
            *slot = raw.parse().map_err(|_| TopologyError::MalformedRecord {
                source_name: source_name.to_string(),
                line: lineno,
                reason: format!("unparseable node id {raw:?}"),
            })?;
        }
        for &node in &pair {
            if node >= node_count {
                return Err(TopologyError::UnresolvedNodeReference {
                    source_name: source_name.to_string(),
                    line: lineno,
                    node,
                    node_count,
                });
            }
        }

        let key = LinkKey::new(NodeId(pair[0]), NodeId(pair[1])).ok_or_else(|| {
            TopologyError::MalformedRecord {
                source_name: source_name.to_string(),
                line: lineno,
                reason: format!("self-link {} {}", pair[0], pair[1]),
            }
        })?;
        links.insert(key);
    }

    Ok(links)
}
