//! `cf-kernel`: cooperative discrete-event scheduling kernel.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                 |
//! |----------------|----------------------------------------------------------|
//! | [`agent`]      | `Agent` trait, `Wait` directive                          |
//! | [`queue`]      | `EventQueue` (`BTreeMap<SimTime, VecDeque<AgentId>>`)    |
//! | [`condition`]  | `Condition`: FIFO sleepers + pending-wakeup counter      |
//! | [`clock`]      | `Clock`: owns agents, conditions, and the event queue    |
//! | [`observer`]   | `ClockObserver`, `NoopObserver`, `TracingObserver`       |
//!
//! # Execution model
//!
//! ```text
//! mainloop:
//!   while let Some((t, agent)) = queue.pop():      // earliest time, FIFO ties
//!     now = max(now, t)
//!     wait = agent.resume(&mut clock)               // runs to next suspension
//!     Until(t')  → queue.push(t', agent)
//!     Sleep(c)   → park on c (or resume inline if a wakeup is pending)
//!     Done       → drop agent
//! ```
//!
//! Everything is single-threaded.  `wake_one`/`wake_all` resume sleepers
//! synchronously on the waker's stack, so a woken agent runs to its next
//! suspension point before the waker continues.

pub mod agent;
pub mod clock;
pub mod condition;
pub mod observer;
pub mod queue;


pub use agent::{Agent, Wait};
pub use clock::Clock;
pub use condition::Condition;
pub use observer::{ClockObserver, NoopObserver, TracingObserver};
pub use queue::EventQueue;
