//! Deterministic event queue.
//!
//! A `BinaryHeap` with reversed ordering on `(scheduled_at, seq)` acts as
//! a min-heap. Sequence numbers are strictly increasing, so events sharing
//! a timestamp dispatch in insertion order regardless of payload.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::time::SimTime;

/// Anything that can accept events for a future simulated instant.
///
/// The topology emitter writes through this trait; the concrete queue
/// below is the production implementation, and tests substitute
/// recording sinks.
pub trait EventSink<A> {
    fn schedule(&mut self, at: SimTime, action: A);
}

#[derive(Debug, Clone)]
struct Scheduled<A> {
    at: SimTime,
    seq: u64,
    action: A,
}

impl<A> PartialEq for Scheduled<A> {
    fn eq(&self, other: &Self) -> bool {
        self.at == other.at && self.seq == other.seq
    }
}

impl<A> Eq for Scheduled<A> {}

impl<A> PartialOrd for Scheduled<A> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<A> Ord for Scheduled<A> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so the BinaryHeap pops the earliest (time, seq) first.
        (other.at, other.seq).cmp(&(self.at, self.seq))
    }
}

/// Time-ordered event queue with FIFO tie-breaking at equal timestamps.
#[derive(Debug, Clone)]
pub struct EventQueue<A> {
    heap: BinaryHeap<Scheduled<A>>,
    next_seq: u64,
}

impl<A> EventQueue<A> {
    pub fn new() -> Self {
        EventQueue {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    /// Pop the next event (earliest time, lowest sequence number).
    pub fn pop_next(&mut self) -> Option<(SimTime, A)> {
        self.heap.pop().map(|s| (s.at, s.action))
    }

    /// Timestamp of the next event without removing it.
    pub fn peek_time(&self) -> Option<SimTime> {
        self.heap.peek().map(|s| s.at)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

impl<A> Default for EventQueue<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> EventSink<A> for EventQueue<A> {
    fn schedule(&mut self, at: SimTime, action: A) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Scheduled { at, seq, action });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_ordering() {
        let mut queue = EventQueue::new();
        queue.schedule(SimTime::from_millis(300), "late");
        queue.schedule(SimTime::from_millis(100), "early");
        queue.schedule(SimTime::from_millis(200), "mid");

        assert_eq!(queue.pop_next(), Some((SimTime::from_millis(100), "early")));
        assert_eq!(queue.pop_next(), Some((SimTime::from_millis(200), "mid")));
        assert_eq!(queue.pop_next(), Some((SimTime::from_millis(300), "late")));
        assert!(queue.pop_next().is_none());
    }

    #[test]
    fn test_fifo_at_same_time() {
        let mut queue = EventQueue::new();
        let t = SimTime::from_millis(100);
        queue.schedule(t, "first");
        queue.schedule(t, "second");
        queue.schedule(t, "third");

        assert_eq!(queue.pop_next().unwrap().1, "first");
        assert_eq!(queue.pop_next().unwrap().1, "second");
        assert_eq!(queue.pop_next().unwrap().1, "third");
    }

    #[test]
    fn test_determinism_across_runs() {
        fn drain() -> Vec<(SimTime, u32)> {
            let mut queue = EventQueue::new();
            queue.schedule(SimTime::from_millis(500), 0);
            queue.schedule(SimTime::from_millis(100), 1);
            queue.schedule(SimTime::from_millis(100), 2);
            queue.schedule(SimTime::from_millis(300), 3);
            let mut out = Vec::new();
            while let Some(e) = queue.pop_next() {
                out.push(e);
            }
            out
        }

        assert_eq!(drain(), drain());
    }

    #[test]
    fn test_peek_and_len() {
        let mut queue = EventQueue::new();
        assert!(queue.is_empty());
        queue.schedule(SimTime::from_millis(100), ());
        queue.schedule(SimTime::from_millis(50), ());
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.peek_time(), Some(SimTime::from_millis(50)));
    }
}
