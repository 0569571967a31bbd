//! In-memory stand-ins for the external collaborators: the
//! point-to-point link layer and the named-data FIB. They record the
//! effects the core drives through the `LinkService` and `FibService`
//! seams, which is all the scenario needs to report on.

use std::collections::{HashMap, HashSet};

use constellation_catalog::NodeId;
use topology_sync::{FibService, LinkKey, LinkService, RouteEntry};
use tracing::debug;

use crate::config::LinkConfig;

/// Installed point-to-point channels, all sharing one parameter set.
#[derive(Debug)]
pub struct PointToPointNetwork {
    config: LinkConfig,
    links: HashSet<LinkKey>,
    installs: u64,
    removals: u64,
}

impl PointToPointNetwork {
    pub fn new(config: LinkConfig) -> PointToPointNetwork {
        PointToPointNetwork {
            config,
            links: HashSet::new(),
            installs: 0,
            removals: 0,
        }
    }

    pub fn active_links(&self) -> usize {
        self.links.len()
    }

    pub fn installs(&self) -> u64 {
        self.installs
    }

    pub fn removals(&self) -> u64 {
        self.removals
    }
}

impl LinkService for PointToPointNetwork {
    fn install_link(&mut self, key: LinkKey) {
        debug!(%key, rate = %self.config.data_rate, "installing point-to-point link");
        self.links.insert(key);
        self.installs += 1;
    }

    fn remove_link(&mut self, key: LinkKey) {
        debug!(%key, "removing point-to-point link");
        self.links.remove(&key);
        self.removals += 1;
    }
}

/// Named-data forwarding table keyed by (origin, prefix, next-hop).
#[derive(Debug, Default)]
pub struct NdnFib {
    routes: HashMap<(NodeId, String, NodeId), u32>,
}

impl NdnFib {
    pub fn new() -> NdnFib {
        NdnFib::default()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = RouteEntry> + '_ {
        self.routes
            .iter()
            .map(|((origin, prefix, next_hop), cost)| RouteEntry {
                origin: *origin,
                prefix: prefix.clone(),
                next_hop: *next_hop,
                cost: *cost,
            })
    }

    pub fn routes_from(&self, origin: NodeId) -> usize {
        self.routes.keys().filter(|(o, _, _)| *o == origin).count()
    }
}

impl FibService for NdnFib {
    fn add_route(&mut self, origin: NodeId, prefix: &str, next_hop: NodeId, cost: u32) {
        debug!(%origin, prefix, %next_hop, cost, "add route");
        self.routes.insert((origin, prefix.to_string(), next_hop), cost);
    }

    fn remove_route(&mut self, origin: NodeId, prefix: &str, next_hop: NodeId) {
        debug!(%origin, prefix, %next_hop, "remove route");
        self.routes.remove(&(origin, prefix.to_string(), next_hop));
    }
}
