//! `cf-assign`: fleet-wide job assignment on top of `cf-route`.
//!
//! # Crate layout
//!
//! | Module           | Contents                                               |
//! |------------------|--------------------------------------------------------|
//! | [`combinations`] | `combinations(select, from)`, `Combinations`           |
//! | [`assigner`]     | `AssignerConfig`, `JobAssigner`, `Assignment`          |
//! | [`error`]        | `AssignError`, `AssignResult<T>`                       |
//!
//! # Assignment outline
//!
//! ```text
//! jobs ──partition by assigned_to──▶ committed[cart]   pool (unassigned)
//!                                        │                │
//!   per cart: remaining = max_job_count − |committed|     │
//!     0     → one Forced candidate (committed slate)      │
//!     n > 0 → committed + each min(n, |pool|)-combination ◀┘
//!             └─ RoutePlanner::get_best_route ─▶ Planned(score) or dropped
//!                           │
//!          stable sort, lower score first ──▶ first candidate per cart wins
//! ```
//!
//! Planner calls grow as `carts × C(|pool|, max_job_count)`; keep the
//! lookahead small.

pub mod assigner;
pub mod combinations;
pub mod error;


pub use assigner::{AssignerConfig, Assignment, AssignmentScore, JobAssigner};
pub use combinations::{Combinations, combinations};
pub use error::{AssignError, AssignResult};
