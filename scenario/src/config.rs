//! Scenario configuration.
//!
//! Default link parameters match the reference scenario: 1 Mbps
//! point-to-point links, 10 ms propagation delay, 20-packet drop-tail
//! queues. A JSON file can override any field.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkConfig {
    /// Channel data rate, e.g. "1Mbps".
    pub data_rate: String,
    /// One-way propagation delay in milliseconds.
    pub delay_ms: u64,
    /// Drop-tail queue capacity in packets.
    pub queue_packets: u32,
}

impl Default for LinkConfig {
    fn default() -> Self {
        LinkConfig {
            data_rate: "1Mbps".to_string(),
            delay_ms: 10,
            queue_packets: 20,
        }
    }
}

impl LinkConfig {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<LinkConfig> {
        let path = path.as_ref();
        let file = File::open(path).with_context(|| format!("opening link config {path:?}"))?;
        let config = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("parsing link config {path:?}"))?;
        Ok(config)
    }
}
