use cf_core::JobId;
use thiserror::Error;

/// Fatal planner conditions.  Infeasible job sets are not errors; they come
/// back as `Ok(None)`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlanError {
    #[error("{jobs} jobs exceed the planner limit of {max_jobs}")]
    TooManyJobs {
        jobs:     usize,
        max_jobs: usize,
    },

    #[error("planner configuration error: {0}")]
    Config(String),

    #[error("{job} unloads {quantity} with only {payload} on board")]
    NegativePayload {
        job:      JobId,
        payload:  u32,
        quantity: u32,
    },
}

pub type PlanResult<T> = Result<T, PlanError>;
