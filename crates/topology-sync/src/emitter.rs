//! Scheduled-event emitter.
//!
//! Converts each delta into timestamped link actions on the simulation
//! queue. Within one delta the installs go in first; because a delta's
//! add and remove sets are disjoint, their relative order against each
//! other carries no semantic weight, but installs for an interval always
//! precede removals belonging to any later interval.

use sim_runtime::{EventSink, SimTime};
use tracing::trace;

use crate::diff::Delta;
use crate::link::LinkKey;
use crate::{Result, TopologyError};

/// A link mutation callback to run when the clock reaches its timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopologyAction {
    InstallLink(LinkKey),
    RemoveLink(LinkKey),
}

/// Stateless apart from the monotonicity guard.
///
/// Scheduling behind the highest timestamp already scheduled is a fatal
/// `PastDeadline`: it means the loader fed a non-monotonic sequence.
#[derive(Debug, Default)]
pub struct Emitter {
    last_scheduled: Option<SimTime>,
}

impl Emitter {
    pub fn new() -> Emitter {
        Emitter::default()
    }

    pub fn last_scheduled(&self) -> Option<SimTime> {
        self.last_scheduled
    }

    /// Schedule one install per added key and one removal per removed key,
    /// all at `at`.
    pub fn schedule_delta(
        &mut self,
        at: SimTime,
        delta: &Delta,
        sink: &mut impl EventSink<TopologyAction>,
    ) -> Result<()> {
        if let Some(last) = self.last_scheduled {
            if at < last {
                return Err(TopologyError::PastDeadline {
                    requested: at,
                    last_scheduled: last,
                });
            }
        }

        // Sorted iteration keeps the dispatch order reproducible run to run.
        let mut added: Vec<LinkKey> = delta.added.iter().copied().collect();
        added.sort_unstable();
        let mut removed: Vec<LinkKey> = delta.removed.iter().copied().collect();
        removed.sort_unstable();

        for key in added {
            trace!(%key, %at, "schedule link install");
            sink.schedule(at, TopologyAction::InstallLink(key));
        }
        for key in removed {
            trace!(%key, %at, "schedule link removal");
            sink.schedule(at, TopologyAction::RemoveLink(key));
        }

        self.last_scheduled = Some(at);
        Ok(())
    }
}
