//! Link-diff engine.

use std::collections::HashSet;

use crate::link::LinkKey;
use crate::snapshot::Snapshot;

/// The minimal add/remove difference between two consecutive snapshots.
///
/// Derived, never stored persistently. `added` and `removed` are always
/// disjoint by construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Delta {
    pub added: HashSet<LinkKey>,
    pub removed: HashSet<LinkKey>,
}

impl Delta {
    /// Pure set difference, O(|previous| + |current|). With no previous
    /// snapshot the whole current link set is an add.
    pub fn between(previous: Option<&Snapshot>, current: &Snapshot) -> Delta {
        match previous {
            None => Delta {
                added: current.links.clone(),
                removed: HashSet::new(),
            },
            Some(prev) => Delta {
                added: current.links.difference(&prev.links).copied().collect(),
                removed: prev.links.difference(&current.links).copied().collect(),
            },
        }
    }

    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use constellation_catalog::NodeId;
    use proptest::prelude::*;
    use sim_runtime::SimTime;

    fn key(a: u32, b: u32) -> LinkKey {
        LinkKey::new(NodeId(a), NodeId(b)).unwrap()
    }

    fn snap(at_ms: u64, links: &[(u32, u32)]) -> Snapshot {
        Snapshot {
            at: SimTime::from_millis(at_ms),
            links: links.iter().map(|&(a, b)| key(a, b)).collect(),
        }
    }

    #[test]
    fn test_first_delta_adds_everything() {
        let current = snap(0, &[(0, 1), (1, 2)]);
        let delta = Delta::between(None, &current);
        assert_eq!(delta.added, current.links);
        assert!(delta.removed.is_empty());
    }

    #[test]
    fn test_adjacent_deltas() {
        let s0 = snap(0, &[(0, 1)]);
        let s1 = snap(100, &[(0, 1), (1, 2)]);
        let s2 = snap(200, &[(1, 2)]);

        let d1 = Delta::between(Some(&s0), &s1);
        assert_eq!(d1.added, HashSet::from([key(1, 2)]));
        assert!(d1.removed.is_empty());

        let d2 = Delta::between(Some(&s1), &s2);
        assert!(d2.added.is_empty());
        assert_eq!(d2.removed, HashSet::from([key(0, 1)]));
    }

    #[test]
    fn test_identical_snapshots_yield_empty_delta() {
        let s0 = snap(0, &[(0, 1), (2, 3)]);
        let s1 = snap(100, &[(0, 1), (2, 3)]);
        assert!(Delta::between(Some(&s0), &s1).is_empty());
    }

    fn arb_link_set() -> impl Strategy<Value = HashSet<LinkKey>> {
        proptest::collection::hash_set((0u32..20, 0u32..20), 0..30).prop_map(|pairs| {
            pairs
                .into_iter()
                .filter_map(|(a, b)| LinkKey::new(NodeId(a), NodeId(b)))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_added_and_removed_disjoint(
            prev in arb_link_set(),
            cur in arb_link_set(),
        ) {
            let s0 = Snapshot { at: SimTime::ZERO, links: prev };
            let s1 = Snapshot { at: SimTime::from_millis(100), links: cur };
            let delta = Delta::between(Some(&s0), &s1);
            prop_assert!(delta.added.is_disjoint(&delta.removed));
        }

        #[test]
        fn prop_telescoping_reconstructs_final_snapshot(
            sets in proptest::collection::vec(arb_link_set(), 1..12),
        ) {
            // Replaying every delta from the empty state must land exactly
            // on the last snapshot's link set.
            let snapshots: Vec<Snapshot> = sets
                .into_iter()
                .enumerate()
                .map(|(i, links)| Snapshot {
                    at: SimTime::from_millis(i as u64 * 100),
                    links,
                })
                .collect();

            let mut replayed: HashSet<LinkKey> = HashSet::new();
            let mut previous: Option<&Snapshot> = None;
            for snapshot in &snapshots {
                let delta = Delta::between(previous, snapshot);
                for k in &delta.removed {
                    replayed.remove(k);
                }
                for k in &delta.added {
                    replayed.insert(*k);
                }
                previous = Some(snapshot);
            }

            prop_assert_eq!(&replayed, &snapshots.last().unwrap().links);
        }
    }
}
