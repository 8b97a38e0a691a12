use cf_route::PlanError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AssignError {
    #[error("assigner configuration error: {0}")]
    Config(String),

    #[error("route planning failed: {0}")]
    Plan(#[from] PlanError),
}

pub type AssignResult<T> = Result<T, AssignError>;
