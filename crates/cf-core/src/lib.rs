//! `cf-core`: foundational types for the `cart_fleet` simulation.
//!
//! Every other `cf-*` crate depends on this one.  It has no `cf-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                                     |
//! |------------|--------------------------------------------------------------|
//! | [`ids`]    | `CartId`, `JobId`, `LocationId`, `AgentId`, `IdSequence`     |
//! | [`time`]   | `SimTime`                                                    |
//! | [`cart`]   | `Cart` snapshot                                              |
//! | [`job`]    | `Job`, `JobKind`, `TransferJob`, `OutOfServiceJob`, states   |
//! | [`rng`]    | `SimRng` (seeded, deterministic)                             |
//! | [`error`]  | `CoreError`, `CoreResult`                                    |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public data types.   |

pub mod cart;
pub mod error;
pub mod ids;
pub mod job;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use cart::Cart;
pub use error::{CoreError, CoreResult};
pub use ids::{AgentId, CartId, ConditionId, IdSequence, JobId, LocationId, SequentialId};
pub use job::{Job, JobKind, OutOfServiceJob, OutOfServiceState, TransferJob, TransferState};
pub use rng::SimRng;
pub use time::SimTime;
