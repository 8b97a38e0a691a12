//! Duration estimators consumed by the planner.
//!
//! # Pluggability
//!
//! The planner asks an [`Estimators`] implementation for every drive, load
//! and unload duration, so applications can back it with an all-pairs
//! shortest-path table, a time-of-day congestion model, or anything else
//! without touching the search.  [`LinearEstimators`] is a simple reference
//! implementation for tests and toy fleets.
//!
//! # Units
//!
//! Durations are `u64` in whatever unit the caller's [`SimTime`] uses.  The
//! planner accepts any non-negative value, including zero.

use cf_core::{LocationId, SimTime};

/// Black-box duration model.
///
/// Implementations must be pure: the same arguments always give the same
/// duration, otherwise [`RoutePlanner::get_best_route`] is no longer
/// deterministic.
///
/// # Thread safety
///
/// `Send + Sync` so a planner can be shared by the assigner's optional
/// parallel candidate generation.
///
/// [`RoutePlanner::get_best_route`]: crate::RoutePlanner::get_best_route
pub trait Estimators: Send + Sync {
    /// Time to drive from `origin` to `destination` departing at `start`.
    fn transit_time(&self, origin: LocationId, destination: LocationId, start: SimTime) -> u64;

    /// Time to load `quantity` items at `location` starting at `start`.
    fn load_time(&self, location: LocationId, quantity: u32, start: SimTime) -> u64;

    /// Time to unload `quantity` items at `location` starting at `start`.
    fn unload_time(&self, location: LocationId, quantity: u32, start: SimTime) -> u64;
}

impl<E: Estimators + ?Sized> Estimators for &E {
    #[inline]
    fn transit_time(&self, origin: LocationId, destination: LocationId, start: SimTime) -> u64 {
        (**self).transit_time(origin, destination, start)
    }

    #[inline]
    fn load_time(&self, location: LocationId, quantity: u32, start: SimTime) -> u64 {
        (**self).load_time(location, quantity, start)
    }

    #[inline]
    fn unload_time(&self, location: LocationId, quantity: u32, start: SimTime) -> u64 {
        (**self).unload_time(location, quantity, start)
    }
}

// ── LinearEstimators ──────────────────────────────────────────────────────────

/// Locations laid out on a line; every cost is linear.
///
/// | Estimate | Formula                                        |
/// |----------|------------------------------------------------|
/// | transit  | `abs(origin − destination) × transit_per_unit` |
/// | load     | `quantity × load_per_item`                     |
/// | unload   | `quantity × unload_per_item`                   |
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinearEstimators {
    pub transit_per_unit: u64,
    pub load_per_item:    u64,
    pub unload_per_item:  u64,
}

impl Default for LinearEstimators {
    fn default() -> Self {
        Self { transit_per_unit: 100, load_per_item: 5, unload_per_item: 2 }
    }
}

impl Estimators for LinearEstimators {
    fn transit_time(&self, origin: LocationId, destination: LocationId, _start: SimTime) -> u64 {
        u64::from(origin.0.abs_diff(destination.0)) * self.transit_per_unit
    }

    fn load_time(&self, _location: LocationId, quantity: u32, _start: SimTime) -> u64 {
        u64::from(quantity) * self.load_per_item
    }

    fn unload_time(&self, _location: LocationId, quantity: u32, _start: SimTime) -> u64 {
        u64::from(quantity) * self.unload_per_item
    }
}
