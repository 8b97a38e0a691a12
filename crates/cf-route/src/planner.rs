//! `RoutePlanner`: pruned exhaustive search over legal action orderings.

use std::sync::Arc;

use cf_core::{Cart, Job, SimTime};

use crate::{
    Action, Estimators, Plan, PlanError, PlanLogger, PlanResult, RouteState, Transition, Trie,
    TrieNode, derive_actions,
};

/// Largest `max_jobs` a planner accepts.  Five jobs already means 113 400
/// legal orderings per call; the tree for six would hold millions of nodes.
pub const MAX_SUPPORTED_JOBS: usize = 5;

/// Planner configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlannerConfig {
    /// Most jobs a single `get_best_route` call may receive.
    pub max_jobs: usize,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self { max_jobs: 3 }
    }
}

impl PlannerConfig {
    pub fn validate(&self) -> PlanResult<()> {
        if self.max_jobs == 0 || self.max_jobs > MAX_SUPPORTED_JOBS {
            return Err(PlanError::Config(format!(
                "max_jobs must be in 1..={MAX_SUPPORTED_JOBS}, got {}",
                self.max_jobs
            )));
        }
        Ok(())
    }

    /// Slots in the pruning tree: two per job.
    pub fn slot_count(&self) -> usize {
        self.max_jobs * 2
    }
}

/// Finds the cheapest feasible ordering of a cart's pickups, dropoffs and
/// suspensions.
///
/// Cloning a planner shares its pruning tree.
#[derive(Clone, Debug)]
pub struct RoutePlanner<E: Estimators> {
    config:     PlannerConfig,
    trie:       Arc<Trie>,
    estimators: E,
}

impl<E: Estimators> RoutePlanner<E> {
    /// Validate `config` and build the pruning tree for `2 × max_jobs` slots.
    pub fn new(config: PlannerConfig, estimators: E) -> PlanResult<Self> {
        config.validate()?;
        let trie = Arc::new(Trie::new(config.slot_count()));
        tracing::debug!(
            max_jobs = config.max_jobs,
            nodes = trie.node_count(),
            "built route pruning tree"
        );
        Ok(Self { config, trie, estimators })
    }

    pub fn max_jobs(&self) -> usize {
        self.config.max_jobs
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn trie(&self) -> &Trie {
        &self.trie
    }

    pub fn estimators(&self) -> &E {
        &self.estimators
    }

    // ── Search ────────────────────────────────────────────────────────────

    /// The minimum-working-time plan for `cart` to serve `jobs` starting at
    /// `start`, or `None` if no ordering meets every capacity and deadline
    /// constraint.
    ///
    /// Ties keep the first plan in walk order, so identical inputs always
    /// give identical plans.
    pub fn get_best_route(&self, cart: &Cart, jobs: &[Job], start: SimTime) -> PlanResult<Option<Plan>> {
        let slots = self.slots_for(jobs)?;
        let mut best: Option<(Vec<usize>, u64)> = None;
        self.search(cart, &slots, start, &mut |path: &[usize], state: &RouteState| {
            if best.as_ref().is_none_or(|(_, score)| state.working_time < *score) {
                best = Some((path.to_vec(), state.working_time));
            }
        })?;

        let plan = best.map(|(path, score)| Plan {
            cart: cart.clone(),
            actions: materialize(&slots, &path),
            score,
        });
        match &plan {
            Some(p) => tracing::debug!(cart = %cart.id, jobs = jobs.len(), score = p.score, "best route found"),
            None => tracing::debug!(cart = %cart.id, jobs = jobs.len(), "no feasible route"),
        }
        Ok(plan)
    }

    /// Every feasible plan, in walk order.
    pub fn routes(&self, cart: &Cart, jobs: &[Job], start: SimTime) -> PlanResult<Vec<Plan>> {
        let slots = self.slots_for(jobs)?;
        let mut plans = Vec::new();
        self.search(cart, &slots, start, &mut |path: &[usize], state: &RouteState| {
            plans.push(Plan {
                cart:    cart.clone(),
                actions: materialize(&slots, path),
                score:   state.working_time,
            });
        })?;
        Ok(plans)
    }

    /// Score a caller-chosen ordering with the planner's transition rules.
    ///
    /// Returns `None` if the ordering violates a capacity or deadline check.
    /// The pairing rule is not checked here: the caller owns the ordering.
    pub fn score_sequence(&self, cart: &Cart, actions: &[Action], start: SimTime) -> PlanResult<Option<u64>> {
        let mut state = RouteState::start(cart, start);
        for action in actions {
            match state.apply(action, cart.capacity, &self.estimators)? {
                Transition::Accepted(step) => state = step.state,
                Transition::Rejected(_) => return Ok(None),
            }
        }
        Ok(Some(state.working_time))
    }

    // ── Diagnostics ───────────────────────────────────────────────────────

    /// Replay `plan` from `start`, writing one line per transition.
    ///
    /// Returns the final state, or `None` if the replay hits a rejection
    /// (possible only when `start` differs from the time the plan was made
    /// for, or the plan was edited).
    pub fn explain_plan<L: PlanLogger>(
        &self,
        plan:   &Plan,
        start:  SimTime,
        logger: &mut L,
    ) -> PlanResult<Option<RouteState>> {
        let cart = &plan.cart;
        let mut state = RouteState::start(cart, start);
        logger.line(&format!(
            "{} {} at {} payload {}/{}, {} actions, score {}",
            state.time,
            cart.id,
            state.location,
            state.payload,
            cart.capacity,
            plan.actions.len(),
            plan.score,
        ));

        for (i, action) in plan.actions.iter().enumerate() {
            match state.apply(action, cart.capacity, &self.estimators)? {
                Transition::Accepted(step) => {
                    logger.line(&format!(
                        "#{i} {action}: drive +{} wait +{} service +{} -> {} payload {}/{} working {}",
                        step.drive,
                        step.wait,
                        step.service,
                        step.state.time,
                        step.state.payload,
                        cart.capacity,
                        step.state.working_time,
                    ));
                    state = step.state;
                }
                Transition::Rejected(reason) => {
                    logger.line(&format!("#{i} {action}: rejected, {reason}"));
                    return Ok(None);
                }
            }
        }

        logger.line(&format!(
            "done {} at {} working {}",
            state.time, state.location, state.working_time
        ));
        Ok(Some(state))
    }

    // ── Internals ─────────────────────────────────────────────────────────

    /// Derive the slot list, padded to the tree's slot count.
    fn slots_for(&self, jobs: &[Job]) -> PlanResult<Vec<Option<Action>>> {
        if jobs.len() > self.config.max_jobs {
            return Err(PlanError::TooManyJobs { jobs: jobs.len(), max_jobs: self.config.max_jobs });
        }
        let mut slots = derive_actions(jobs);
        slots.resize(self.trie.slot_count(), None);
        Ok(slots)
    }

    fn search<F>(&self, cart: &Cart, slots: &[Option<Action>], start: SimTime, on_leaf: &mut F) -> PlanResult<()>
    where
        F: FnMut(&[usize], &RouteState),
    {
        let mut path = Vec::with_capacity(slots.len());
        self.walk(self.trie.roots(), slots, cart.capacity, RouteState::start(cart, start), &mut path, on_leaf)
    }

    /// Depth-first walk.
    ///
    /// Empty slots never branch: whenever one is placeable, the walk takes
    /// the lowest-keyed such node and nothing else.  Every slot ordering that
    /// differs only in where empty slots sit collapses onto that single path,
    /// so each distinct action sequence is visited exactly once.
    fn walk<F>(
        &self,
        nodes:    &[TrieNode],
        slots:    &[Option<Action>],
        capacity: u32,
        state:    RouteState,
        path:     &mut Vec<usize>,
        on_leaf:  &mut F,
    ) -> PlanResult<()>
    where
        F: FnMut(&[usize], &RouteState),
    {
        if nodes.is_empty() {
            on_leaf(path, &state);
            return Ok(());
        }

        if let Some(empty) = nodes.iter().find(|n| slots[n.key].is_none()) {
            return self.walk(&empty.children, slots, capacity, state, path, on_leaf);
        }

        for node in nodes {
            let Some(action) = &slots[node.key] else {
                continue;
            };
            match state.apply(action, capacity, &self.estimators)? {
                Transition::Accepted(step) => {
                    path.push(node.key);
                    self.walk(&node.children, slots, capacity, step.state, path, on_leaf)?;
                    path.pop();
                }
                Transition::Rejected(reason) => {
                    tracing::trace!(%reason, depth = path.len(), "pruned");
                }
            }
        }
        Ok(())
    }
}

/// Resolve a path of slot keys into the actions they hold.
fn materialize(slots: &[Option<Action>], path: &[usize]) -> Vec<Action> {
    path.iter().filter_map(|&key| slots[key].clone()).collect()
}
