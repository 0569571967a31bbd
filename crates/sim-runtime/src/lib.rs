//! Simulation Runtime Library
//!
//! Deterministic discrete-event machinery for the constellation scenario:
//! a millisecond simulated clock and a time-ordered event queue. Events
//! scheduled at the same instant dispatch in insertion order, so two runs
//! over the same input always produce the same dispatch sequence.

pub mod queue;
pub mod time;

pub use queue::{EventQueue, EventSink};
pub use time::SimTime;
