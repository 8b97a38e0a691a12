//! `EventQueue`: time-ordered agent resumption queue.
//!
//! Events are bucketed per distinct time: `BTreeMap<SimTime, VecDeque<AgentId>>`.
//! Buckets pop in ascending time order and each bucket pops front-first, so
//! events sharing a timestamp resume in exactly the order they were pushed.
//! A binary heap would need an explicit sequence number to get the same
//! tie-break.

use std::collections::{BTreeMap, VecDeque};

use cf_core::{AgentId, SimTime};

#[derive(Default, Debug)]
pub struct EventQueue {
    inner: BTreeMap<SimTime, VecDeque<AgentId>>,
    /// Cached total event count for O(1) `len()`.
    total: usize,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `agent` to resume at `time`, behind anything already queued
    /// for that time.
    pub fn push(&mut self, time: SimTime, agent: AgentId) {
        self.inner.entry(time).or_default().push_back(agent);
        self.total += 1;
    }

    /// Remove and return the earliest event.
    pub fn pop(&mut self) -> Option<(SimTime, AgentId)> {
        let mut bucket = self.inner.first_entry()?;
        let time = *bucket.key();
        let agent = bucket.get_mut().pop_front();
        if bucket.get().is_empty() {
            bucket.remove();
        }
        let agent = agent?;
        self.total -= 1;
        Some((time, agent))
    }

    /// Time of the earliest queued event, or `None` if empty.
    pub fn next_time(&self) -> Option<SimTime> {
        self.inner.keys().next().copied()
    }

    pub fn len(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }
}
