//! Simulation time model.
//!
//! # Design
//!
//! Time is a unit-agnostic `u64` counter wrapped in [`SimTime`].  Callers fix
//! the unit (milliseconds, seconds, ...) and keep it consistent between the
//! job deadlines they supply and the durations their estimators return.
//!
//! Integer time keeps all deadline arithmetic exact, so boundary checks
//! ("arrives exactly at the deadline") never suffer from float drift.
//! Durations are plain `u64` values in the same unit.

use std::fmt;

/// An absolute point in simulated time.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimTime(pub u64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0);
    pub const MAX: SimTime = SimTime(u64::MAX);

    /// Duration elapsed from `earlier` to `self`, or 0 if `earlier` is later.
    #[inline]
    pub fn saturating_since(self, earlier: SimTime) -> u64 {
        self.0.saturating_sub(earlier.0)
    }

    /// `self + duration`, clamped at [`SimTime::MAX`].
    #[inline]
    pub fn saturating_add(self, duration: u64) -> SimTime {
        SimTime(self.0.saturating_add(duration))
    }
}

impl std::ops::Add<u64> for SimTime {
    type Output = SimTime;
    #[inline]
    fn add(self, rhs: u64) -> SimTime {
        SimTime(self.0 + rhs)
    }
}

impl std::ops::AddAssign<u64> for SimTime {
    #[inline]
    fn add_assign(&mut self, rhs: u64) {
        self.0 += rhs;
    }
}

impl std::ops::Sub for SimTime {
    type Output = u64;
    /// # Panics
    /// Panics in debug mode if `rhs > self`.
    #[inline]
    fn sub(self, rhs: SimTime) -> u64 {
        self.0 - rhs.0
    }
}

impl From<u64> for SimTime {
    #[inline]
    fn from(raw: u64) -> Self {
        SimTime(raw)
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t={}", self.0)
    }
}
