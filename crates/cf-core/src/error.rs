//! Core error type.
//!
//! Downstream crates define their own enums (`PlanError`, `AssignError`) and
//! wrap each other with `#[from]` where errors cross crate boundaries.

use thiserror::Error;

use crate::{CartId, JobId, SimTime};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("{cart} payload {payload} exceeds capacity {capacity}")]
    PayloadExceedsCapacity {
        cart:     CartId,
        payload:  u32,
        capacity: u32,
    },

    #[error("{job} window closes at {close} before it opens at {open}")]
    InvalidWindow {
        job:   JobId,
        open:  SimTime,
        close: SimTime,
    },
}

/// Shorthand result type for `cf-core`.
pub type CoreResult<T> = Result<T, CoreError>;
