//! Topology driver.
//!
//! Setup side: walks the snapshot sequence, diffs adjacent snapshots, and
//! schedules every resulting action. All taxonomy errors surface here,
//! before the event loop starts; a time-varying topology built on corrupt
//! data cannot be trusted to converge to a consistent FIB. Only the
//! previous and current snapshots are held at any point.
//!
//! Run side: `apply` executes one scheduled action against the link layer
//! and the FIB synchronizer when the simulation clock reaches it.

use sim_runtime::EventSink;
use tracing::info;

use crate::diff::Delta;
use crate::emitter::{Emitter, TopologyAction};
use crate::fib::{FibService, FibSynchronizer, LinkService};
use crate::link::LinkState;
use crate::snapshot::{Snapshot, SnapshotSequence};
use crate::Result;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScheduleStats {
    pub intervals: u64,
    pub installs_scheduled: u64,
    pub removals_scheduled: u64,
}

pub struct TopologyDriver {
    emitter: Emitter,
    fib: FibSynchronizer,
}

impl TopologyDriver {
    pub fn new(prefix: impl Into<String>) -> TopologyDriver {
        TopologyDriver {
            emitter: Emitter::new(),
            fib: FibSynchronizer::new(prefix),
        }
    }

    pub fn fib(&self) -> &FibSynchronizer {
        &self.fib
    }

    /// Diff and schedule the whole sequence. Any loader or emitter error
    /// aborts with nothing guaranteed about the sink's partial contents;
    /// callers treat every error here as fatal and never start the loop.
    pub fn schedule_sequence(
        &mut self,
        sequence: SnapshotSequence,
        sink: &mut impl EventSink<TopologyAction>,
    ) -> Result<ScheduleStats> {
        let mut stats = ScheduleStats::default();
        let mut previous: Option<Snapshot> = None;

        for snapshot in sequence {
            let snapshot = snapshot?;
            let delta = Delta::between(previous.as_ref(), &snapshot);

            for &key in &delta.added {
                self.fib.mark_installing(key);
            }
            self.emitter.schedule_delta(snapshot.at, &delta, sink)?;

            stats.intervals += 1;
            stats.installs_scheduled += delta.added.len() as u64;
            stats.removals_scheduled += delta.removed.len() as u64;
            previous = Some(snapshot);
        }

        info!(
            intervals = stats.intervals,
            installs = stats.installs_scheduled,
            removals = stats.removals_scheduled,
            "topology sequence scheduled"
        );
        Ok(stats)
    }

    /// Execute one scheduled callback. Install order is link first, then
    /// routes; removal order is routes first, then link. The synchronizer
    /// state machine absorbs redundant transitions, and the link layer is
    /// touched only when the state actually changes, so a link is never
    /// installed twice.
    pub fn apply(
        &mut self,
        action: TopologyAction,
        links: &mut impl LinkService,
        fib: &mut impl FibService,
    ) {
        match action {
            TopologyAction::InstallLink(key) => {
                if self.fib.state(key) != LinkState::Active {
                    links.install_link(key);
                }
                self.fib.on_link_active(key, fib);
            }
            TopologyAction::RemoveLink(key) => {
                if self.fib.on_link_inactive(key, fib) {
                    links.remove_link(key);
                }
            }
        }
    }
}
