//! Running search state and the single action-transition function.
//!
//! Both the search ([`RoutePlanner::get_best_route`]) and the diagnostic
//! replay ([`RoutePlanner::explain_plan`]) advance state exclusively through
//! [`RouteState::apply`], so an explained plan follows exactly the rules that
//! selected it.
//!
//! # Transition rules
//!
//! ```text
//! every action   drive: if location differs, time += transit(here, there, time)
//! Pickup         wait until `after` (unscored); time += load; payload += qty
//!                reject if payload > capacity
//! Dropoff        time += unload; payload -= qty (underflow is fatal)
//!                reject if time > before
//! Suspend        reject if arrival > suspend_time; time = max(time, resume_time)
//! working_time  += drive + service   (service = load, unload, or time off duty)
//! ```
//!
//! [`RoutePlanner::get_best_route`]: crate::RoutePlanner::get_best_route
//! [`RoutePlanner::explain_plan`]: crate::RoutePlanner::explain_plan

use std::fmt;

use cf_core::{Cart, JobId, LocationId, SimTime};

use crate::{Action, Estimators, PlanError, PlanResult};

/// A hypothetical copy of a cart's situation partway through a route.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteState {
    pub time:         SimTime,
    pub location:     LocationId,
    pub payload:      u32,
    /// Drive, load, unload and off-duty time accumulated so far.
    pub working_time: u64,
}

/// The accepted outcome of one action, with the durations that produced it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Step {
    pub state:   RouteState,
    pub drive:   u64,
    /// Idle time before a pickup window opens.  Not scored.
    pub wait:    u64,
    /// Load, unload, or off-duty duration.
    pub service: u64,
}

/// Why an action cannot be performed from a given state.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Rejection {
    OverCapacity {
        job:      JobId,
        payload:  u32,
        capacity: u32,
    },
    LateDropoff {
        job:      JobId,
        finished: SimTime,
        before:   SimTime,
    },
    LateSuspend {
        job:          JobId,
        arrival:      SimTime,
        suspend_time: SimTime,
    },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::OverCapacity { job, payload, capacity } => {
                write!(f, "{job} would raise payload to {payload} over capacity {capacity}")
            }
            Rejection::LateDropoff { job, finished, before } => {
                write!(f, "{job} dropoff finishes at {finished}, due before {before}")
            }
            Rejection::LateSuspend { job, arrival, suspend_time } => {
                write!(f, "{job} arrives at {arrival}, must suspend by {suspend_time}")
            }
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Transition {
    Accepted(Step),
    Rejected(Rejection),
}

impl RouteState {
    /// The state a route for `cart` starts from at `time`.
    pub fn start(cart: &Cart, time: SimTime) -> Self {
        Self {
            time,
            location:     cart.last_known_location,
            payload:      cart.payload,
            working_time: 0,
        }
    }

    /// Apply `action` to a copy of `self`.
    ///
    /// Returns `Ok(Rejected)` when a capacity or deadline check fails, and
    /// `Err(NegativePayload)` when a dropoff unloads more than is on board,
    /// which only a corrupt cart/job snapshot can cause.
    pub fn apply<E: Estimators>(
        &self,
        action:     &Action,
        capacity:   u32,
        estimators: &E,
    ) -> PlanResult<Transition> {
        let mut next = *self;

        let destination = action.location();
        let drive = if destination != next.location {
            estimators.transit_time(next.location, destination, next.time)
        } else {
            0
        };
        next.time = next.time.saturating_add(drive);
        next.location = destination;

        let mut wait = 0;
        let service;

        match *action {
            Action::Pickup { job, after, quantity, .. } => {
                if after > next.time {
                    wait = after - next.time;
                    next.time = after;
                }
                service = estimators.load_time(destination, quantity, next.time);
                next.time = next.time.saturating_add(service);
                next.payload = next.payload.saturating_add(quantity);
                if next.payload > capacity {
                    return Ok(Transition::Rejected(Rejection::OverCapacity {
                        job,
                        payload: next.payload,
                        capacity,
                    }));
                }
            }
            Action::Dropoff { job, before, quantity, .. } => {
                service = estimators.unload_time(destination, quantity, next.time);
                next.time = next.time.saturating_add(service);
                next.payload = next.payload.checked_sub(quantity).ok_or(PlanError::NegativePayload {
                    job,
                    payload: next.payload,
                    quantity,
                })?;
                if next.time > before {
                    return Ok(Transition::Rejected(Rejection::LateDropoff {
                        job,
                        finished: next.time,
                        before,
                    }));
                }
            }
            Action::Suspend { job, suspend_time, resume_time, .. } => {
                if next.time > suspend_time {
                    return Ok(Transition::Rejected(Rejection::LateSuspend {
                        job,
                        arrival: next.time,
                        suspend_time,
                    }));
                }
                service = resume_time.saturating_since(next.time);
                next.time = next.time.max(resume_time);
            }
        }

        next.working_time = next.working_time.saturating_add(drive).saturating_add(service);
        Ok(Transition::Accepted(Step { state: next, drive, wait, service }))
    }
}
