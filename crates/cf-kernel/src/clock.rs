//! The `Clock`: owns agents, conditions, and the event queue.

use cf_core::{AgentId, ConditionId, IdSequence, SimTime};

use crate::{Agent, ClockObserver, Condition, EventQueue, NoopObserver, Wait};

/// Single-threaded cooperative scheduler.
///
/// Agents live in a slab indexed by [`AgentId`].  While an agent runs its
/// slot is empty (the agent is borrowed out), which is what lets it receive
/// `&mut Clock` and still resume *other* agents inline through
/// [`wake_one`][Self::wake_one].
///
/// # Time
///
/// `now` never decreases.  An event scheduled at or before the current time
/// fires at `now`, after any events already queued for that instant.
pub struct Clock {
    now:        SimTime,
    queue:      EventQueue,
    agents:     Vec<Option<Box<dyn Agent>>>,
    conditions: Vec<Condition>,
    agent_ids:  IdSequence<AgentId>,
    /// Agents spawned and not yet `Done`.
    live:       usize,
    /// Stack of agents currently executing (inline resumes nest).
    running:    Vec<AgentId>,
    /// Slots of finished agents, reused by the next spawn.
    free_slots: Vec<AgentId>,
    observer:   Box<dyn ClockObserver>,
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock {
    /// A clock at time zero with no observer.
    pub fn new() -> Self {
        Self::starting_at(SimTime::ZERO)
    }

    pub fn starting_at(now: SimTime) -> Self {
        Self {
            now,
            queue:      EventQueue::new(),
            agents:     Vec::new(),
            conditions: Vec::new(),
            agent_ids:  IdSequence::new(),
            live:       0,
            running:    Vec::new(),
            free_slots: Vec::new(),
            observer:   Box::new(NoopObserver),
        }
    }

    /// Replace the observer (builder style).
    pub fn with_observer<O: ClockObserver + 'static>(mut self, observer: O) -> Self {
        self.observer = Box::new(observer);
        self
    }

    // ── Introspection ─────────────────────────────────────────────────────

    #[inline]
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// The innermost agent currently executing, if any.
    pub fn current_agent(&self) -> Option<AgentId> {
        self.running.last().copied()
    }

    /// Events waiting in the queue.
    pub fn pending_events(&self) -> usize {
        self.queue.len()
    }

    /// Agents spawned and not yet finished (queued, parked, or running).
    pub fn live_agents(&self) -> usize {
        self.live
    }

    /// Slots in the agent slab, live or free.
    pub fn agent_slots(&self) -> usize {
        self.agents.len()
    }

    /// Agents parked on `cond`, in wake order.
    pub fn sleepers(&self, cond: ConditionId) -> Vec<AgentId> {
        self.conditions[cond.index()].sleepers().collect()
    }

    pub fn pending_wakeups(&self, cond: ConditionId) -> i64 {
        self.conditions[cond.index()].pending_wakeups()
    }

    // ── Registration ──────────────────────────────────────────────────────

    /// Register `agent` and schedule its first resumption at `now`.
    pub fn spawn<A: Agent + 'static>(&mut self, agent: A) -> AgentId {
        let now = self.now;
        self.spawn_at(now, agent)
    }

    /// Register `agent` and schedule its first resumption at `time`.
    ///
    /// A `time` before `now` is treated as `now`.  The agent takes a slot
    /// freed by a finished agent when one is available, so an [`AgentId`] is
    /// unique only among live agents.
    pub fn spawn_at<A: Agent + 'static>(&mut self, time: SimTime, agent: A) -> AgentId {
        let id = match self.free_slots.pop() {
            Some(id) => {
                self.agents[id.index()] = Some(Box::new(agent));
                id
            }
            None => {
                let id = self.agent_ids.next_id();
                debug_assert_eq!(id.index(), self.agents.len());
                self.agents.push(Some(Box::new(agent)));
                id
            }
        };
        self.live += 1;
        self.queue.push(time.max(self.now), id);
        id
    }

    /// Allocate a new condition owned by this clock.
    pub fn condition(&mut self) -> ConditionId {
        let id = ConditionId(self.conditions.len() as u32);
        self.conditions.push(Condition::new());
        id
    }

    // ── Wait directives ───────────────────────────────────────────────────

    /// Directive: resume the current agent at `time`.
    #[inline]
    pub fn until(&self, time: SimTime) -> Wait {
        Wait::Until(time)
    }

    /// Directive: resume the current agent `duration` after `now`.
    #[inline]
    pub fn after(&self, duration: u64) -> Wait {
        Wait::Until(self.now.saturating_add(duration))
    }

    /// Directive: park the current agent on `cond`.
    ///
    /// If a wakeup is already pending on `cond` the agent is resumed straight
    /// away instead of parking.
    #[inline]
    pub fn sleep(&self, cond: ConditionId) -> Wait {
        Wait::Sleep(cond)
    }

    // ── Wake primitives ───────────────────────────────────────────────────

    /// Resume the earliest sleeper on `cond`, inline, or record a pending
    /// wakeup if nobody is parked.
    ///
    /// # Panics
    /// Panics if `cond` was not allocated by this clock.
    pub fn wake_one(&mut self, cond: ConditionId) {
        if let Some(agent) = self.conditions[cond.index()].wake_one() {
            self.resume(agent);
        }
    }

    /// Wake the agents parked on `cond` one at a time, in FIFO order.
    ///
    /// Only as many wakeups are issued as there were sleepers when the call
    /// started, and the loop stops early once the queue is empty, so an
    /// agent that re-parks on `cond` while being woken is not woken again by
    /// the same call and no wakeup is left pending.
    pub fn wake_all(&mut self, cond: ConditionId) {
        let parked = self.conditions[cond.index()].sleeper_count();
        for _ in 0..parked {
            if self.conditions[cond.index()].sleeper_count() == 0 {
                break;
            }
            self.wake_one(cond);
        }
    }

    // ── Event loop ────────────────────────────────────────────────────────

    /// Run until the event queue is empty.
    ///
    /// Agents parked on conditions that nobody wakes stay parked; the loop
    /// still terminates.  An agent that never suspends starves the loop.
    pub fn mainloop(&mut self) {
        while self.step() {}
        let parked = self.conditions.iter().map(Condition::sleeper_count).sum();
        self.observer.on_idle(self.now, parked);
    }

    /// Process every event scheduled at or before `limit`; later events stay
    /// queued.  Returns the number of events processed.
    pub fn run_until(&mut self, limit: SimTime) -> usize {
        let mut processed = 0;
        while self.queue.next_time().is_some_and(|t| t <= limit) {
            self.step();
            processed += 1;
        }
        processed
    }

    /// Pop and resume the earliest event.  Returns `false` if the queue was
    /// empty.
    pub fn step(&mut self) -> bool {
        let Some((time, agent)) = self.queue.pop() else {
            return false;
        };
        if time > self.now {
            self.now = time;
        }
        self.resume(agent);
        true
    }

    /// Run `id` until it suspends, then honour its directive.
    ///
    /// Loops rather than recursing when a sleep is satisfied by a pending
    /// wakeup, so long chains of pre-signalled sleeps do not grow the stack.
    fn resume(&mut self, id: AgentId) {
        loop {
            let Some(mut agent) = self.agents.get_mut(id.index()).and_then(Option::take) else {
                return;
            };

            let now = self.now;
            self.observer.on_resume(now, id);
            self.running.push(id);
            let wait = agent.resume(self);
            self.running.pop();

            match wait {
                Wait::Done => {
                    self.live -= 1;
                    self.free_slots.push(id);
                    let now = self.now;
                    self.observer.on_agent_done(now, id);
                    return;
                }
                Wait::Until(time) => {
                    self.agents[id.index()] = Some(agent);
                    self.queue.push(time.max(self.now), id);
                    return;
                }
                Wait::Sleep(cond) => {
                    self.agents[id.index()] = Some(agent);
                    if !self.conditions[cond.index()].sleep(id) {
                        return;
                    }
                }
            }
        }
    }
}
