//! Topology Synchronization Library
//!
//! Converts a precomputed sequence of per-interval connectivity snapshots
//! (satellite-satellite and satellite-ground links) into a correctly
//! ordered stream of simulated-time events, and keeps the forwarding
//! information base consistent with the currently active topology: zero
//! overlap between adds and removes, no dangling routes, no duplicate
//! link installs.
//!
//! Pipeline: the snapshot loader hands time-ordered snapshots to the
//! diff engine, whose deltas the emitter turns into timestamped
//! install/remove actions on the simulation queue. The FIB synchronizer
//! runs only inside those callbacks, never ahead of the schedule.

use thiserror::Error;

pub mod diff;
pub mod driver;
pub mod emitter;
pub mod endpoints;
pub mod fib;
pub mod link;
pub mod snapshot;
#[cfg(test)]
mod test_util;

pub use diff::Delta;
pub use driver::{ScheduleStats, TopologyDriver};
pub use emitter::{Emitter, TopologyAction};
pub use endpoints::EndpointPlan;
pub use fib::{FibService, FibSynchronizer, LinkService, RouteEntry, DEFAULT_ROUTE_COST};
pub use link::{LinkKey, LinkState};
pub use snapshot::{Snapshot, SnapshotSequence};

use sim_runtime::SimTime;

#[derive(Error, Debug)]
pub enum TopologyError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Corrupt sequence: {0}")]
    CorruptSequence(String),
    #[error("Unresolved node reference in {source_name} at line {line}: node {node} outside [0, {node_count})")]
    UnresolvedNodeReference {
        source_name: String,
        line: usize,
        node: u32,
        node_count: u32,
    },
    #[error("Malformed record in {source_name} at line {line}: {reason}")]
    MalformedRecord {
        source_name: String,
        line: usize,
        reason: String,
    },
    #[error("Past deadline: schedule request at {requested} behind last scheduled {last_scheduled}")]
    PastDeadline {
        requested: SimTime,
        last_scheduled: SimTime,
    },
}

pub type Result<T> = std::result::Result<T, TopologyError>;
