//! Canonical link identity and per-link lifecycle state.

use std::fmt;

use constellation_catalog::NodeId;
use serde::{Deserialize, Serialize};

/// Unordered node pair identifying a potential link.
///
/// Canonicalized so `new(a, b)` and `new(b, a)` hash and compare
/// identically. Self-links are not representable; `new` returns `None`
/// for `a == b` and loaders report that as a malformed record.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct LinkKey {
    lower: NodeId,
    upper: NodeId,
}

impl LinkKey {
    pub fn new(a: NodeId, b: NodeId) -> Option<LinkKey> {
        if a == b {
            return None;
        }
        Some(LinkKey {
            lower: a.min(b),
            upper: a.max(b),
        })
    }

    pub fn lower(self) -> NodeId {
        self.lower
    }

    pub fn upper(self) -> NodeId {
        self.upper
    }

    /// Both endpoints, lower first.
    pub fn endpoints(self) -> (NodeId, NodeId) {
        (self.lower, self.upper)
    }
}

impl fmt::Display for LinkKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}<->{}", self.lower, self.upper)
    }
}

/// Lifecycle of one `LinkKey`.
///
/// `Absent --schedule--> Installing --install--> Active --remove--> Absent`;
/// transitions flow only from the diff engine's output and are never
/// reversed out of order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LinkState {
    #[default]
    Absent,
    Installing,
    Active,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_ordering() {
        let ab = LinkKey::new(NodeId(7), NodeId(3)).unwrap();
        let ba = LinkKey::new(NodeId(3), NodeId(7)).unwrap();
        assert_eq!(ab, ba);
        assert_eq!(ab.endpoints(), (NodeId(3), NodeId(7)));
    }

    #[test]
    fn test_self_link_rejected() {
        assert!(LinkKey::new(NodeId(4), NodeId(4)).is_none());
    }

    #[test]
    fn test_display() {
        let key = LinkKey::new(NodeId(12), NodeId(2)).unwrap();
        assert_eq!(key.to_string(), "n2<->n12");
    }
}
