//! Traffic application placement.
//!
//! The Interest/Data exchange itself belongs to the external protocol
//! stack; the scenario only configures where the applications sit and
//! with what parameters. Reference values: the consumer issues 2
//! interests per second, the producer answers with 1024-byte payloads.

use constellation_catalog::NodeId;
use serde::{Deserialize, Serialize};
use topology_sync::EndpointPlan;
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConsumerApp {
    pub node: NodeId,
    pub prefix: String,
    pub frequency_hz: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProducerApp {
    pub node: NodeId,
    pub prefix: String,
    pub payload_bytes: u32,
}

/// Instantiate both applications from the resolved endpoint plan.
pub fn install_apps(
    plan: &EndpointPlan,
    frequency_hz: f64,
    payload_bytes: u32,
) -> (ConsumerApp, ProducerApp) {
    let consumer = ConsumerApp {
        node: plan.consumer,
        prefix: plan.prefix.clone(),
        frequency_hz,
    };
    let producer = ProducerApp {
        node: plan.producer,
        prefix: plan.prefix.clone(),
        payload_bytes,
    };

    info!(
        node = %consumer.node,
        prefix = %consumer.prefix,
        frequency_hz,
        "consumer installed"
    );
    info!(
        node = %producer.node,
        prefix = %producer.prefix,
        payload_bytes,
        "producer installed"
    );

    (consumer, producer)
}
