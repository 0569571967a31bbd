//! LEO NDN Scenario Runner
//!
//! Loads the constellation catalog and the dynamic-state sequence, wires
//! the topology driver to a deterministic event queue, places the traffic
//! endpoints, and drains the queue to the stop time.
//!
//! Usage:
//!   ndn-leo --tles data/tles.txt \
//!           --ground-stations data/ground_stations.txt \
//!           --topology data/isls \
//!           --duration-s 500

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use constellation_catalog::Catalog;
use sim_runtime::{EventQueue, SimTime};
use topology_sync::{EndpointPlan, TopologyAction, TopologyDriver};

mod apps;
mod config;
mod network;

use config::LinkConfig;
use network::{NdnFib, PointToPointNetwork};

#[derive(Parser, Debug)]
#[command(name = "ndn-leo", about = "LEO constellation NDN scenario")]
struct Args {
    /// TLE source file
    #[arg(long, default_value = "data/tles.txt")]
    tles: PathBuf,

    /// Ground-station source file
    #[arg(long, default_value = "data/ground_stations.txt")]
    ground_stations: PathBuf,

    /// Dynamic-state sequence directory (isls_{index}.txt files)
    #[arg(long, default_value = "data/isls")]
    topology: PathBuf,

    /// Snapshot step in milliseconds
    #[arg(long, default_value_t = 100)]
    step_ms: u64,

    /// Simulation horizon in seconds
    #[arg(long, default_value_t = 500)]
    duration_s: u64,

    /// Consumer ground-station offset
    #[arg(long, default_value_t = 35)]
    consumer: u32,

    /// Producer ground-station offset
    #[arg(long, default_value_t = 20)]
    producer: u32,

    /// Name prefix the consumer requests and the producer serves
    #[arg(long, default_value = "/prefix")]
    prefix: String,

    /// Interests per second issued by the consumer
    #[arg(long, default_value_t = 2.0)]
    frequency: f64,

    /// Producer payload size in bytes
    #[arg(long, default_value_t = 1024)]
    payload: u32,

    /// Optional JSON file overriding the link defaults
    #[arg(long)]
    link_config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let link_config = match &args.link_config {
        Some(path) => LinkConfig::load(path)?,
        None => LinkConfig::default(),
    };
    info!(
        data_rate = %link_config.data_rate,
        delay_ms = link_config.delay_ms,
        queue_packets = link_config.queue_packets,
        "link parameters"
    );

    // All taxonomy errors surface during this setup block; the event loop
    // below only ever sees a fully validated schedule.
    let catalog = Catalog::load(&args.tles, &args.ground_stations)?;

    let step = SimTime::from_millis(args.step_ms);
    let horizon = SimTime::from_secs(args.duration_s);
    let sequence = topology_sync::SnapshotSequence::open(
        &args.topology,
        step,
        horizon,
        catalog.total_node_count(),
    )?;
    info!(intervals = sequence.intervals(), %step, %horizon, "dynamic-state sequence opened");

    let mut driver = TopologyDriver::new(args.prefix.as_str());
    let mut queue: EventQueue<TopologyAction> = EventQueue::new();
    let stats = driver.schedule_sequence(sequence, &mut queue)?;

    let plan = EndpointPlan::select(&catalog, args.consumer, args.producer, &args.prefix)?;
    let (consumer, producer) = apps::install_apps(&plan, args.frequency, args.payload);

    let mut network = PointToPointNetwork::new(link_config);
    let mut fib = NdnFib::new();

    info!(pending_events = queue.len(), "starting event loop");
    let mut clock = SimTime::ZERO;
    while let Some((at, action)) = queue.pop_next() {
        if at > horizon {
            break;
        }
        clock = at;
        driver.apply(action, &mut network, &mut fib);
    }

    info!("{}", "=".repeat(60));
    info!("SUMMARY");
    info!("{}", "=".repeat(60));
    info!("Simulated time reached: {}", clock);
    info!(
        "Intervals: {} ({} installs, {} removals scheduled)",
        stats.intervals, stats.installs_scheduled, stats.removals_scheduled
    );
    info!(
        "Links: {} active ({} installed, {} removed over the run)",
        network.active_links(),
        network.installs(),
        network.removals()
    );
    info!(
        "FIB entries: {} ({} at the consumer, {} at the producer)",
        fib.len(),
        fib.routes_from(plan.consumer),
        fib.routes_from(plan.producer)
    );
    if args.verbose {
        for entry in fib.entries() {
            tracing::debug!(
                origin = %entry.origin,
                prefix = %entry.prefix,
                next_hop = %entry.next_hop,
                cost = entry.cost,
                "fib entry"
            );
        }
    }
    info!(
        "Consumer {} ({} interests/s), producer {} ({} B payload), prefix {}",
        consumer.node, consumer.frequency_hz, producer.node, producer.payload_bytes, plan.prefix
    );

    Ok(())
}
