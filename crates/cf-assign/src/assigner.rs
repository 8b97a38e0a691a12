//! `JobAssigner`: candidate generation and greedy per-cart selection.

use std::collections::BTreeMap;

use cf_core::{Cart, CartId, Job, JobId, SimTime};
use cf_route::{Estimators, Plan, RoutePlanner};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::{AssignError, AssignResult, combinations};

// ── Configuration ─────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AssignerConfig {
    /// Most jobs a cart may hold, committed plus newly assigned.  Also the
    /// lookahead: each cart is offered every combination of this many
    /// unassigned jobs (fewer if the pool is smaller).
    pub max_job_count: usize,

    /// Skip candidates that reuse a pool job already given to another cart.
    /// Off by default: the commit step downstream decides which copy of a
    /// shared job is realised.
    pub exclusive_jobs: bool,
}

impl Default for AssignerConfig {
    fn default() -> Self {
        Self { max_job_count: 3, exclusive_jobs: false }
    }
}

// ── Results ───────────────────────────────────────────────────────────────────

/// Candidate ranking.  Lower is better; `Forced` sorts before every planned
/// score so a full cart always keeps its committed slate.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AssignmentScore {
    Forced,
    Planned(u64),
}

/// The job slate chosen for one cart.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Assignment {
    pub cart:  CartId,
    /// Committed jobs first, then the pool jobs added by this assignment.
    pub jobs:  Vec<JobId>,
    pub score: AssignmentScore,
    /// The route behind a `Planned` score.  Forced assignments are not
    /// re-planned and carry `None`.
    pub plan:  Option<Plan>,
}

// ── Assigner ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct JobAssigner<E: Estimators> {
    config:  AssignerConfig,
    planner: RoutePlanner<E>,
}

impl<E: Estimators> JobAssigner<E> {
    pub fn new(config: AssignerConfig, planner: RoutePlanner<E>) -> AssignResult<Self> {
        if config.max_job_count == 0 {
            return Err(AssignError::Config("max_job_count must be at least 1".into()));
        }
        if config.max_job_count > planner.max_jobs() {
            return Err(AssignError::Config(format!(
                "max_job_count {} exceeds the planner limit of {}",
                config.max_job_count,
                planner.max_jobs()
            )));
        }
        Ok(Self { config, planner })
    }

    pub fn config(&self) -> &AssignerConfig {
        &self.config
    }

    pub fn planner(&self) -> &RoutePlanner<E> {
        &self.planner
    }

    /// Choose a job slate for each cart in `carts`.
    ///
    /// Jobs assigned to a cart stay with it; unassigned jobs form the pool
    /// that carts compete for.  Carts with no feasible slate are absent from
    /// the result.  Jobs assigned to a cart that is not in `carts` are
    /// ignored.
    pub fn create_assignment(
        &self,
        jobs:  &[Job],
        carts: &[Cart],
        time:  SimTime,
    ) -> AssignResult<BTreeMap<CartId, Assignment>> {
        let mut committed: FxHashMap<CartId, Vec<&Job>> =
            carts.iter().map(|c| (c.id, Vec::new())).collect();
        let mut pool: Vec<&Job> = Vec::new();
        for job in jobs {
            match job.assigned_to {
                None => pool.push(job),
                Some(cart) => match committed.get_mut(&cart) {
                    Some(list) => list.push(job),
                    None => tracing::trace!(job = %job.id, %cart, "job held by unknown cart, ignored"),
                },
            }
        }

        let mut candidates = self.all_candidates(carts, &committed, &pool, time)?;
        let generated = candidates.len();
        candidates.sort_by_key(|a| a.score);

        let mut result: BTreeMap<CartId, Assignment> = BTreeMap::new();
        let mut taken: FxHashSet<JobId> = FxHashSet::default();
        for candidate in candidates {
            if result.contains_key(&candidate.cart) {
                continue;
            }
            if self.config.exclusive_jobs && candidate.jobs.iter().any(|j| taken.contains(j)) {
                tracing::trace!(cart = %candidate.cart, "candidate reuses a taken job, skipped");
                continue;
            }
            tracing::trace!(cart = %candidate.cart, jobs = ?candidate.jobs, score = ?candidate.score, "accepted");
            if self.config.exclusive_jobs {
                taken.extend(candidate.jobs.iter().copied());
            }
            result.insert(candidate.cart, candidate);
        }

        tracing::debug!(
            carts = carts.len(),
            pool = pool.len(),
            candidates = generated,
            assigned = result.len(),
            "assignment complete"
        );
        Ok(result)
    }

    #[cfg(not(feature = "parallel"))]
    fn all_candidates(
        &self,
        carts:     &[Cart],
        committed: &FxHashMap<CartId, Vec<&Job>>,
        pool:      &[&Job],
        time:      SimTime,
    ) -> AssignResult<Vec<Assignment>> {
        let mut out = Vec::new();
        for cart in carts {
            out.extend(self.candidates_for(cart, committed_for(committed, cart.id), pool, time)?);
        }
        Ok(out)
    }

    #[cfg(feature = "parallel")]
    fn all_candidates(
        &self,
        carts:     &[Cart],
        committed: &FxHashMap<CartId, Vec<&Job>>,
        pool:      &[&Job],
        time:      SimTime,
    ) -> AssignResult<Vec<Assignment>> {
        use rayon::prelude::*;

        // Indexed collect keeps cart order, so the stable sort below sees the
        // same sequence as the sequential path.
        let per_cart: Vec<Vec<Assignment>> = carts
            .par_iter()
            .map(|cart| self.candidates_for(cart, committed_for(committed, cart.id), pool, time))
            .collect::<AssignResult<_>>()?;
        Ok(per_cart.into_iter().flatten().collect())
    }

    /// Every feasible slate for `cart`, in combination order.
    fn candidates_for(
        &self,
        cart:      &Cart,
        committed: &[&Job],
        pool:      &[&Job],
        time:      SimTime,
    ) -> AssignResult<Vec<Assignment>> {
        let remaining = self.config.max_job_count.saturating_sub(committed.len());

        if remaining == 0 {
            return Ok(vec![Assignment {
                cart:  cart.id,
                jobs:  committed.iter().map(|j| j.id).collect(),
                score: AssignmentScore::Forced,
                plan:  None,
            }]);
        }

        let mut out = Vec::new();
        let select = remaining.min(pool.len());
        if select == 0 {
            if !committed.is_empty() {
                let slate: Vec<Job> = committed.iter().map(|&j| j.clone()).collect();
                out.extend(self.plan_slate(cart, slate, time)?);
            }
            return Ok(out);
        }

        for combo in combinations(select, pool.len()) {
            let slate: Vec<Job> = committed
                .iter()
                .copied()
                .chain(combo.iter().map(|&i| pool[i]))
                .cloned()
                .collect();
            out.extend(self.plan_slate(cart, slate, time)?);
        }
        Ok(out)
    }

    fn plan_slate(&self, cart: &Cart, slate: Vec<Job>, time: SimTime) -> AssignResult<Option<Assignment>> {
        let jobs: Vec<JobId> = slate.iter().map(|j| j.id).collect();
        match self.planner.get_best_route(cart, &slate, time)? {
            Some(plan) => Ok(Some(Assignment {
                cart: cart.id,
                jobs,
                score: AssignmentScore::Planned(plan.score),
                plan: Some(plan),
            })),
            None => {
                tracing::trace!(cart = %cart.id, ?jobs, "slate infeasible");
                Ok(None)
            }
        }
    }
}

fn committed_for<'a, 'j>(committed: &'a FxHashMap<CartId, Vec<&'j Job>>, cart: CartId) -> &'a [&'j Job] {
    committed.get(&cart).map(Vec::as_slice).unwrap_or(&[])
}
