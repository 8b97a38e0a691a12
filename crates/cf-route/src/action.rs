//! Atomic route steps derived from jobs.

use std::fmt;

use cf_core::{Job, JobId, JobKind, LocationId, OutOfServiceState, SimTime, TransferState};

/// One step a cart performs on behalf of a job.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    /// Load `quantity` items at `location`, no earlier than `after`.
    Pickup {
        job:      JobId,
        location: LocationId,
        after:    SimTime,
        quantity: u32,
    },

    /// Unload `quantity` items at `location`, finishing by `before`.
    Dropoff {
        job:      JobId,
        location: LocationId,
        before:   SimTime,
        quantity: u32,
    },

    /// Arrive at `location` by `suspend_time` and stay out of service until
    /// `resume_time`.
    Suspend {
        job:          JobId,
        location:     LocationId,
        suspend_time: SimTime,
        resume_time:  SimTime,
    },
}

impl Action {
    pub fn job(&self) -> JobId {
        match self {
            Action::Pickup { job, .. } | Action::Dropoff { job, .. } | Action::Suspend { job, .. } => *job,
        }
    }

    pub fn location(&self) -> LocationId {
        match self {
            Action::Pickup { location, .. }
            | Action::Dropoff { location, .. }
            | Action::Suspend { location, .. } => *location,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Pickup { job, location, after, quantity } => {
                write!(f, "pickup {job} x{quantity} at {location} after {after}")
            }
            Action::Dropoff { job, location, before, quantity } => {
                write!(f, "dropoff {job} x{quantity} at {location} before {before}")
            }
            Action::Suspend { job, location, suspend_time, resume_time } => {
                write!(f, "suspend {job} at {location} by {suspend_time} until {resume_time}")
            }
        }
    }
}

/// Expand `jobs` into the planner's slot list.
///
/// Job `i` owns slots `2i` (initiation) and `2i + 1` (completion).  Steps
/// already performed, and steps no planner orders, are `None`:
///
/// | Job state                   | slot `2i`  | slot `2i + 1` |
/// |-----------------------------|------------|---------------|
/// | transfer, `BeforePickup`    | `Pickup`   | `Dropoff`     |
/// | transfer, `Enroute`         | `None`     | `Dropoff`     |
/// | out of service, `BeforeBreak` | `Suspend` | `None`       |
/// | out of service, `OnBreak`   | `None`     | `None`        |
pub fn derive_actions(jobs: &[Job]) -> Vec<Option<Action>> {
    let mut slots = Vec::with_capacity(jobs.len() * 2);
    for job in jobs {
        match &job.kind {
            JobKind::Transfer(t) => {
                let pickup = Action::Pickup {
                    job:      job.id,
                    location: t.pickup_location,
                    after:    t.pickup_after,
                    quantity: t.quantity,
                };
                let dropoff = Action::Dropoff {
                    job:      job.id,
                    location: t.dropoff_location,
                    before:   t.dropoff_before,
                    quantity: t.quantity,
                };
                match t.state {
                    TransferState::BeforePickup => slots.extend([Some(pickup), Some(dropoff)]),
                    TransferState::Enroute => slots.extend([None, Some(dropoff)]),
                }
            }
            JobKind::OutOfService(o) => match o.state {
                OutOfServiceState::BeforeBreak => slots.extend([
                    Some(Action::Suspend {
                        job:          job.id,
                        location:     o.suspend_location,
                        suspend_time: o.suspend_time,
                        resume_time:  o.resume_time,
                    }),
                    None,
                ]),
                OutOfServiceState::OnBreak => slots.extend([None, None]),
            },
        }
    }
    slots
}
