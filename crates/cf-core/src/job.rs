//! Job snapshots: transfers and out-of-service breaks.
//!
//! # Lifecycle
//!
//! ```text
//! TransferJob:      BeforePickup ──pickup──▶ Enroute ──dropoff──▶ (done)
//! OutOfServiceJob:  BeforeBreak  ──suspend─▶ OnBreak ──resume───▶ (done)
//! ```
//!
//! A job whose state is past its initiation step is "in flight": planners
//! emit only the remaining action for it.  Resuming from a break is the
//! job's natural completion, not an action a planner orders.

use crate::{CartId, CoreError, CoreResult, JobId, LocationId, SimTime};

// ── States ────────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransferState {
    BeforePickup,
    Enroute,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OutOfServiceState {
    BeforeBreak,
    OnBreak,
}

// ── Job payloads ──────────────────────────────────────────────────────────────

/// Move `quantity` items from `pickup_location` (available from
/// `pickup_after`) to `dropoff_location` (due by `dropoff_before`).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransferJob {
    pub quantity:         u32,
    pub pickup_location:  LocationId,
    pub pickup_after:     SimTime,
    pub dropoff_location: LocationId,
    pub dropoff_before:   SimTime,
    pub state:            TransferState,
}

impl TransferJob {
    /// A transfer that has not been picked up yet.
    pub fn new(
        quantity:         u32,
        pickup_location:  LocationId,
        pickup_after:     SimTime,
        dropoff_location: LocationId,
        dropoff_before:   SimTime,
    ) -> Self {
        Self {
            quantity,
            pickup_location,
            pickup_after,
            dropoff_location,
            dropoff_before,
            state: TransferState::BeforePickup,
        }
    }
}

/// Take the cart out of service at `suspend_location` no later than
/// `suspend_time`, until `resume_time`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OutOfServiceJob {
    pub suspend_location: LocationId,
    pub suspend_time:     SimTime,
    pub resume_time:      SimTime,
    pub state:            OutOfServiceState,
}

impl OutOfServiceJob {
    /// A break that has not started yet.
    pub fn new(suspend_location: LocationId, suspend_time: SimTime, resume_time: SimTime) -> Self {
        Self {
            suspend_location,
            suspend_time,
            resume_time,
            state: OutOfServiceState::BeforeBreak,
        }
    }
}

// ── Job ───────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum JobKind {
    Transfer(TransferJob),
    OutOfService(OutOfServiceJob),
}

/// One unit of required work, plus the cart (if any) it is committed to.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Job {
    pub id:          JobId,
    pub assigned_to: Option<CartId>,
    pub kind:        JobKind,
}

impl Job {
    pub fn transfer(id: JobId, transfer: TransferJob) -> Self {
        Self { id, assigned_to: None, kind: JobKind::Transfer(transfer) }
    }

    pub fn out_of_service(id: JobId, job: OutOfServiceJob) -> Self {
        Self { id, assigned_to: None, kind: JobKind::OutOfService(job) }
    }

    /// Builder-style commitment to `cart`.
    pub fn assigned(mut self, cart: CartId) -> Self {
        self.assigned_to = Some(cart);
        self
    }

    /// `true` once the initiation step (pickup or suspend) has happened.
    pub fn is_in_flight(&self) -> bool {
        match &self.kind {
            JobKind::Transfer(t) => t.state == TransferState::Enroute,
            JobKind::OutOfService(o) => o.state == OutOfServiceState::OnBreak,
        }
    }

    /// Reject windows that close before they open.
    pub fn validate(&self) -> CoreResult<()> {
        let (open, close) = match &self.kind {
            JobKind::Transfer(t) => (t.pickup_after, t.dropoff_before),
            JobKind::OutOfService(o) => (o.suspend_time, o.resume_time),
        };
        if close < open {
            return Err(CoreError::InvalidWindow { job: self.id, open, close });
        }
        Ok(())
    }
}
