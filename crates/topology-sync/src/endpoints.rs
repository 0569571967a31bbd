//! Traffic endpoint selection.
//!
//! Maps symbolic role assignments ("consumer at ground-station offset N")
//! to concrete node ids through the catalog. Runs once at setup,
//! independent of the time-varying topology.

use constellation_catalog::{Catalog, NodeId, NodeRole};
use tracing::info;

/// Resolved consumer/producer placement for the traffic applications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointPlan {
    pub consumer: NodeId,
    pub producer: NodeId,
    pub prefix: String,
}

impl EndpointPlan {
    /// Resolve both ground-station offsets. Fails with `UnknownRole` when
    /// an offset exceeds the resolved station count.
    pub fn select(
        catalog: &Catalog,
        consumer_station: u32,
        producer_station: u32,
        prefix: &str,
    ) -> constellation_catalog::Result<EndpointPlan> {
        let consumer = catalog.resolve(NodeRole::GroundStation, consumer_station)?;
        let producer = catalog.resolve(NodeRole::GroundStation, producer_station)?;

        info!(
            %consumer,
            %producer,
            prefix,
            "traffic endpoints selected"
        );

        Ok(EndpointPlan {
            consumer,
            producer,
            prefix: prefix.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::test_catalog as catalog;
    use constellation_catalog::CatalogError;

    #[test]
    fn test_offsets_resolve_past_satellite_block() {
        let catalog = catalog(66, 40);
        let plan = EndpointPlan::select(&catalog, 35, 20, "/prefix").unwrap();

        assert_eq!(plan.consumer, NodeId(66 + 35));
        assert_eq!(plan.producer, NodeId(66 + 20));
        assert_eq!(plan.prefix, "/prefix");
    }

    #[test]
    fn test_out_of_range_offset_is_unknown_role() {
        let catalog = catalog(66, 10);
        let err = EndpointPlan::select(&catalog, 35, 2, "/prefix").unwrap_err();
        assert!(matches!(err, CatalogError::UnknownRole { index: 35, .. }));
    }
}
