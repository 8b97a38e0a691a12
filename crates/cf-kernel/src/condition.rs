//! `Condition`: FIFO wait/wake bookkeeping with pending-wakeup memory.
//!
//! This type only tracks *who* should run; the [`Clock`][crate::Clock]
//! performs the actual resumption.  Keeping the two apart lets the clock hold
//! the running agent outside its slab while the condition is mutated.

use std::collections::VecDeque;

use cf_core::AgentId;

/// Sleep queue plus a signed count of wakeups that arrived with nobody
/// parked.
///
/// The counter never drops below zero through this API: `wake_one` on an
/// empty queue increments it and the next `sleep` consumes one unit.
#[derive(Default, Debug)]
pub struct Condition {
    sleepers: VecDeque<AgentId>,
    pending:  i64,
}

impl Condition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `agent` as sleeping.
    ///
    /// Returns `true` if a pending wakeup was consumed instead, meaning the
    /// caller must resume `agent` immediately rather than park it.
    pub fn sleep(&mut self, agent: AgentId) -> bool {
        if self.pending > 0 {
            self.pending -= 1;
            true
        } else {
            self.sleepers.push_back(agent);
            false
        }
    }

    /// Pop the earliest sleeper, or remember the wakeup if nobody is parked.
    pub fn wake_one(&mut self) -> Option<AgentId> {
        let woken = self.sleepers.pop_front();
        if woken.is_none() {
            self.pending += 1;
        }
        woken
    }

    /// Agents currently parked, in wake order.
    pub fn sleepers(&self) -> impl Iterator<Item = AgentId> + '_ {
        self.sleepers.iter().copied()
    }

    pub fn sleeper_count(&self) -> usize {
        self.sleepers.len()
    }

    /// Wakeups recorded while nobody was parked and not yet consumed.
    pub fn pending_wakeups(&self) -> i64 {
        self.pending
    }
}
