//! The `Agent` trait: a resumable unit of cooperative work.

use cf_core::{ConditionId, SimTime};

use crate::Clock;

/// What a suspended agent is waiting for.
///
/// Returned from [`Agent::resume`]; build one with [`Clock::until`],
/// [`Clock::after`] or [`Clock::sleep`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Wait {
    /// Resume at `SimTime`.  Times at or before `now` resume at `now`, after
    /// everything already queued for that instant.
    Until(SimTime),

    /// Park on a condition until another agent wakes it.
    Sleep(ConditionId),

    /// The agent has finished; the clock drops it.
    Done,
}

/// A suspended computation the [`Clock`] can resume.
///
/// Implement it as an explicit state machine: each call to `resume` runs one
/// leg of work and returns the directive describing the next suspension.
///
/// ```rust
/// use cf_core::SimTime;
/// use cf_kernel::{Agent, Clock, Wait};
///
/// /// Fires three times, 10 time units apart.
/// struct Beeper { left: u32 }
///
/// impl Agent for Beeper {
///     fn resume(&mut self, clock: &mut Clock) -> Wait {
///         if self.left == 0 {
///             return Wait::Done;
///         }
///         self.left -= 1;
///         clock.after(10)
///     }
/// }
///
/// let mut clock = Clock::new();
/// clock.spawn(Beeper { left: 3 });
/// clock.mainloop();
/// assert_eq!(clock.now(), SimTime(30));
/// ```
///
/// Closures of type `FnMut(&mut Clock) -> Wait` are agents too.
pub trait Agent {
    /// Run until the next suspension point.
    ///
    /// The agent may call [`Clock::wake_one`] / [`Clock::wake_all`] (which
    /// resume other agents inline), spawn new agents, or allocate conditions.
    fn resume(&mut self, clock: &mut Clock) -> Wait;
}

impl<F> Agent for F
where
    F: FnMut(&mut Clock) -> Wait,
{
    #[inline]
    fn resume(&mut self, clock: &mut Clock) -> Wait {
        self(clock)
    }
}
