//! Time-ordered event queue — the single shared mutable structure
//! driving a simulation run.
//!
//! Events are plain data payloads, not closures: each engine defines
//! its own payload enum and dispatches popped payloads through one
//! match. Entries pop in `(fire_time, sequence_id)` order, so events
//! scheduled for the same second execute in the order they were
//! enqueued. Given the same sequence of `schedule` calls, replay is
//! bit-for-bit deterministic.
//!
//! Repetition has no dedicated primitive: a periodic event is a
//! handler that reschedules its own payload after executing.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use crate::error::SimError;
use crate::types::SimTime;

struct Scheduled<E> {
    at: SimTime,
    seq: u64,
    payload: E,
}

impl<E> PartialEq for Scheduled<E> {
    fn eq(&self, other: &Self) -> bool {
        self.at == other.at && self.seq == other.seq
    }
}

impl<E> Eq for Scheduled<E> {}

impl<E> PartialOrd for Scheduled<E> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<E> Ord for Scheduled<E> {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.at, self.seq).cmp(&(other.at, other.seq))
    }
}

/// Global ordered queue of time-stamped event payloads.
pub struct EventQueue<E> {
    heap: BinaryHeap<Reverse<Scheduled<E>>>,
    next_seq: u64,
    now: SimTime,
}

impl<E> Default for EventQueue<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> EventQueue<E> {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_seq: 0,
            now: SimTime::ZERO,
        }
    }

    /// The current simulation time: the fire time of the most recently
    /// popped event. Monotonically non-decreasing.
    pub fn now(&self) -> SimTime {
        self.now
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Enqueue a payload to fire at `at`. O(log n).
    ///
    /// Scheduling strictly before the current clock is rejected with
    /// `ScheduledInPast`; the payload is discarded. Scheduling at
    /// exactly the current time is allowed and fires this same second,
    /// after everything already enqueued for it.
    pub fn schedule(&mut self, at: SimTime, payload: E) -> Result<(), SimError> {
        if at < self.now {
            return Err(SimError::ScheduledInPast { at, now: self.now });
        }
        self.heap.push(Reverse(Scheduled {
            at,
            seq: self.next_seq,
            payload,
        }));
        self.next_seq += 1;
        Ok(())
    }

    /// Enqueue a payload `delta_secs` from now.
    pub fn schedule_in(&mut self, delta_secs: u64, payload: E) -> Result<(), SimError> {
        self.schedule(self.now + delta_secs, payload)
    }

    /// Pop the earliest entry, advancing the clock to its fire time.
    pub fn pop(&mut self) -> Option<(SimTime, E)> {
        let Reverse(entry) = self.heap.pop()?;
        self.now = entry.at;
        Some((entry.at, entry.payload))
    }

    /// Fire time of the next pending entry, if any.
    pub fn peek_time(&self) -> Option<SimTime> {
        self.heap.peek().map(|Reverse(entry)| entry.at)
    }
}
