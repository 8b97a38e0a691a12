//! `cf-route`: best-route search for one cart and a handful of jobs.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                    |
//! |---------------|-------------------------------------------------------------|
//! | [`action`]    | `Action` (`Pickup`, `Dropoff`, `Suspend`), `derive_actions` |
//! | [`estimator`] | `Estimators` trait, `LinearEstimators`                      |
//! | [`trie`]      | `Trie`: precomputed legal slot orderings                    |
//! | [`state`]     | `RouteState::apply`: the one transition function            |
//! | [`plan`]      | `Plan`                                                      |
//! | [`planner`]   | `PlannerConfig`, `RoutePlanner`                             |
//! | [`explain`]   | `PlanLogger`, `TracingLogger`                               |
//! | [`error`]     | `PlanError`, `PlanResult<T>`                                |
//!
//! # Search outline
//!
//! ```text
//! jobs ──derive_actions──▶ slots [a0, a1, a2, a3, ...]   (2 per job, None = nothing to do)
//!                           │
//! Trie (built once) ────────┤  depth-first; a slot 2i+1 never precedes 2i
//!                           ▼
//!              RouteState::apply per slot ── reject ──▶ prune branch
//!                           │
//!                         leaf ──▶ candidate Plan (score = working time)
//!                           │
//!                     min score ──▶ get_best_route
//! ```
//!
//! Planning is pure and synchronous: it reads cart/job snapshots, never the
//! live entities, and never touches the scheduling kernel.

pub mod action;
pub mod error;
pub mod estimator;
pub mod explain;
pub mod plan;
pub mod planner;
pub mod state;
pub mod trie;

#[cfg(test)]
mod tests;

pub use action::{Action, derive_actions};
pub use error::{PlanError, PlanResult};
pub use estimator::{Estimators, LinearEstimators};
pub use explain::{PlanLogger, TracingLogger};
pub use plan::Plan;
pub use planner::{MAX_SUPPORTED_JOBS, PlannerConfig, RoutePlanner};
pub use state::{Rejection, RouteState, Step, Transition};
pub use trie::{Trie, TrieNode};
