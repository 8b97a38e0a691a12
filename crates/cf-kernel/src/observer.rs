//! Clock observer trait for progress reporting and tracing.

use cf_core::{AgentId, SimTime};

/// Callbacks invoked by the [`Clock`][crate::Clock] as agents run.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.  Hooks fire for every resumption,
/// including inline resumptions triggered by `wake_one`/`wake_all`.
///
/// # Example
///
/// ```rust,ignore
/// struct Counter(usize);
///
/// impl ClockObserver for Counter {
///     fn on_resume(&mut self, _time: SimTime, _agent: AgentId) {
///         self.0 += 1;
///     }
/// }
/// ```
pub trait ClockObserver {
    /// Called immediately before `agent` is resumed at `time`.
    fn on_resume(&mut self, _time: SimTime, _agent: AgentId) {}

    /// Called when `agent` returns [`Wait::Done`][crate::Wait::Done].
    fn on_agent_done(&mut self, _time: SimTime, _agent: AgentId) {}

    /// Called when `mainloop` drains the event queue.  `parked` agents are
    /// still asleep on conditions and will never run again.
    fn on_idle(&mut self, _time: SimTime, _parked: usize) {}
}

/// A [`ClockObserver`] that does nothing.
pub struct NoopObserver;

impl ClockObserver for NoopObserver {}

/// Forwards every hook to `tracing` at `TRACE` level.
pub struct TracingObserver;

impl ClockObserver for TracingObserver {
    fn on_resume(&mut self, time: SimTime, agent: AgentId) {
        tracing::trace!(%time, %agent, "resume");
    }

    fn on_agent_done(&mut self, time: SimTime, agent: AgentId) {
        tracing::trace!(%time, %agent, "agent done");
    }

    fn on_idle(&mut self, time: SimTime, parked: usize) {
        tracing::trace!(%time, parked, "event queue drained");
    }
}
