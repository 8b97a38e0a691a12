//! The planner's output.

use cf_core::{Cart, JobId};

use crate::Action;

/// A feasible, ordered action sequence for one cart.
///
/// `score` is the route's working time (drive + load + unload + off-duty
/// time, excluding waits for pickup windows).  Lower is better.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Plan {
    /// Snapshot of the cart the plan was computed for.
    pub cart:    Cart,
    pub actions: Vec<Action>,
    pub score:   u64,
}

impl Plan {
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Jobs touched by the plan, in order of their first action.
    pub fn job_ids(&self) -> Vec<JobId> {
        let mut ids: Vec<JobId> = Vec::with_capacity(self.actions.len());
        for action in &self.actions {
            let job = action.job();
            if !ids.contains(&job) {
                ids.push(job);
            }
        }
        ids
    }
}
