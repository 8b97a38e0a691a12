//! Unit tests for cf-route.

use std::collections::BTreeSet;

use cf_core::{
    Cart, CartId, Job, JobId, LocationId, OutOfServiceJob, OutOfServiceState, SimRng, SimTime,
    TransferJob, TransferState,
};

use crate::{
    Action, LinearEstimators, PlanError, PlannerConfig, Rejection, RoutePlanner, RouteState,
    Transition, Trie, derive_actions,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Transit `|Δ| × 100`, load `5 × qty`, unload `2 × qty`.
fn estimators() -> LinearEstimators {
    LinearEstimators { transit_per_unit: 100, load_per_item: 5, unload_per_item: 2 }
}

fn planner(max_jobs: usize) -> RoutePlanner<LinearEstimators> {
    RoutePlanner::new(PlannerConfig { max_jobs }, estimators()).unwrap()
}

fn cart(capacity: u32, payload: u32, location: u32) -> Cart {
    Cart::new(CartId(0), capacity, LocationId(location)).with_payload(payload).unwrap()
}

fn transfer(id: u32, qty: u32, pickup: u32, after: u64, dropoff: u32, before: u64) -> Job {
    Job::transfer(
        JobId(id),
        TransferJob::new(qty, LocationId(pickup), SimTime(after), LocationId(dropoff), SimTime(before)),
    )
}

fn enroute(id: u32, qty: u32, dropoff: u32, before: u64) -> Job {
    let mut job = TransferJob::new(qty, LocationId(0), SimTime(0), LocationId(dropoff), SimTime(before));
    job.state = TransferState::Enroute;
    Job::transfer(JobId(id), job)
}

fn out_of_service(id: u32, location: u32, suspend: u64, resume: u64) -> Job {
    Job::out_of_service(
        JobId(id),
        OutOfServiceJob::new(LocationId(location), SimTime(suspend), SimTime(resume)),
    )
}

fn pickup(job: u32, location: u32, after: u64, quantity: u32) -> Action {
    Action::Pickup { job: JobId(job), location: LocationId(location), after: SimTime(after), quantity }
}

fn dropoff(job: u32, location: u32, before: u64, quantity: u32) -> Action {
    Action::Dropoff { job: JobId(job), location: LocationId(location), before: SimTime(before), quantity }
}

fn accepted(t: Transition) -> crate::Step {
    match t {
        Transition::Accepted(step) => step,
        Transition::Rejected(r) => panic!("unexpected rejection: {r}"),
    }
}

/// All permutations of `0..n`.
fn permutations(n: usize) -> Vec<Vec<usize>> {
    fn go(rest: &mut Vec<usize>, cur: &mut Vec<usize>, out: &mut Vec<Vec<usize>>) {
        if rest.is_empty() {
            out.push(cur.clone());
            return;
        }
        for i in 0..rest.len() {
            let v = rest.remove(i);
            cur.push(v);
            go(rest, cur, out);
            cur.pop();
            rest.insert(i, v);
        }
    }
    let mut out = Vec::new();
    go(&mut (0..n).collect(), &mut Vec::new(), &mut out);
    out
}

/// Odd slot `2i+1` appears after `2i`.
fn respects_pairing(order: &[usize]) -> bool {
    let pos = |slot: usize| order.iter().position(|&s| s == slot);
    order
        .iter()
        .filter(|&&s| s % 2 == 1)
        .all(|&s| match (pos(s - 1), pos(s)) {
            (Some(a), Some(b)) => a < b,
            _ => true,
        })
}

// ── Trie ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod trie_tests {
    use super::*;

    #[test]
    fn leaf_count_matches_closed_form() {
        // (2k)! / 2^k
        for (k, expected) in [(1, 1), (2, 6), (3, 90), (4, 2_520)] {
            assert_eq!(Trie::new(2 * k).leaf_paths().len(), expected, "k = {k}");
        }
    }

    #[test]
    fn leaf_paths_equal_brute_force() {
        for k in 1..=3 {
            let trie = Trie::new(2 * k);
            let from_trie: BTreeSet<Vec<usize>> = trie.leaf_paths().into_iter().collect();
            let brute: BTreeSet<Vec<usize>> = permutations(2 * k)
                .into_iter()
                .filter(|p| respects_pairing(p))
                .collect();
            assert_eq!(from_trie, brute, "k = {k}");
            assert_eq!(trie.leaf_paths().len(), from_trie.len(), "no duplicate paths");
        }
    }

    #[test]
    fn only_initiation_slots_can_come_first() {
        let trie = Trie::new(6);
        let firsts: Vec<usize> = trie.roots().iter().map(|n| n.key).collect();
        assert_eq!(firsts, vec![0, 2, 4]);
        assert_eq!(trie.slot_count(), 6);
    }

    #[test]
    fn single_pair_is_a_chain() {
        let trie = Trie::new(2);
        assert_eq!(trie.node_count(), 2);
        assert_eq!(trie.leaf_paths(), vec![vec![0, 1]]);
    }

    #[test]
    fn zero_slots_is_empty() {
        let trie = Trie::new(0);
        assert!(trie.roots().is_empty());
        assert!(trie.leaf_paths().is_empty());
    }
}

// ── Action derivation ─────────────────────────────────────────────────────────

#[cfg(test)]
mod action_tests {
    use super::*;

    #[test]
    fn slots_follow_job_state() {
        let mut on_break = OutOfServiceJob::new(LocationId(7), SimTime(10), SimTime(20));
        on_break.state = OutOfServiceState::OnBreak;
        let jobs = vec![
            transfer(0, 5, 2, 300, 10, 3000),
            enroute(1, 3, 4, 900),
            out_of_service(2, 7, 10, 20),
            Job::out_of_service(JobId(3), on_break),
        ];
        let slots = derive_actions(&jobs);
        assert_eq!(slots.len(), 8);
        assert_eq!(slots[0], Some(pickup(0, 2, 300, 5)));
        assert_eq!(slots[1], Some(dropoff(0, 10, 3000, 5)));
        assert_eq!(slots[2], None);
        assert_eq!(slots[3], Some(dropoff(1, 4, 900, 3)));
        assert!(matches!(slots[4], Some(Action::Suspend { job: JobId(2), .. })));
        assert_eq!(slots[5], None);
        assert_eq!(slots[6], None);
        assert_eq!(slots[7], None);
    }

    #[test]
    fn accessors_and_display() {
        let a = pickup(4, 9, 300, 2);
        assert_eq!(a.job(), JobId(4));
        assert_eq!(a.location(), LocationId(9));
        assert_eq!(a.to_string(), "pickup JobId(4) x2 at LocationId(9) after t=300");
        assert_eq!(
            dropoff(4, 1, 50, 2).to_string(),
            "dropoff JobId(4) x2 at LocationId(1) before t=50"
        );
    }
}

// ── Transitions ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod state_tests {
    use super::*;

    #[test]
    fn pickup_wait_is_not_scored() {
        let start = RouteState::start(&cart(10, 0, 0), SimTime(0));
        let step = accepted(start.apply(&pickup(0, 2, 300, 5), 10, &estimators()).unwrap());
        assert_eq!(step.drive, 200);
        assert_eq!(step.wait, 100);
        assert_eq!(step.service, 25);
        assert_eq!(step.state.time, SimTime(325));
        assert_eq!(step.state.payload, 5);
        assert_eq!(step.state.location, LocationId(2));
        assert_eq!(step.state.working_time, 225);
    }

    #[test]
    fn same_location_needs_no_drive() {
        let start = RouteState::start(&cart(10, 0, 2), SimTime(400));
        let step = accepted(start.apply(&pickup(0, 2, 300, 1), 10, &estimators()).unwrap());
        assert_eq!(step.drive, 0);
        assert_eq!(step.wait, 0);
        assert_eq!(step.state.time, SimTime(405));
    }

    #[test]
    fn capacity_boundary() {
        let start = RouteState::start(&cart(10, 3, 0), SimTime(0));
        let est = estimators();
        assert!(matches!(start.apply(&pickup(0, 0, 0, 7), 10, &est).unwrap(), Transition::Accepted(_)));
        assert_eq!(
            start.apply(&pickup(0, 0, 0, 8), 10, &est).unwrap(),
            Transition::Rejected(Rejection::OverCapacity { job: JobId(0), payload: 11, capacity: 10 })
        );
    }

    #[test]
    fn dropoff_deadline_boundary() {
        // Drive 100 + unload 2 → finishes at 102.
        let start = RouteState::start(&cart(10, 1, 0), SimTime(0));
        let est = estimators();
        let step = accepted(start.apply(&dropoff(0, 1, 102, 1), 10, &est).unwrap());
        assert_eq!(step.state.payload, 0);
        assert_eq!(step.state.working_time, 102);
        assert_eq!(
            start.apply(&dropoff(0, 1, 101, 1), 10, &est).unwrap(),
            Transition::Rejected(Rejection::LateDropoff {
                job:      JobId(0),
                finished: SimTime(102),
                before:   SimTime(101),
            })
        );
    }

    #[test]
    fn suspend_boundary_and_off_duty_time() {
        let start = RouteState::start(&cart(10, 0, 0), SimTime(0));
        let est = estimators();
        let suspend = |by: u64| Action::Suspend {
            job:          JobId(5),
            location:     LocationId(3),
            suspend_time: SimTime(by),
            resume_time:  SimTime(1_000),
        };
        // Arrives at 300.
        let step = accepted(start.apply(&suspend(300), 10, &est).unwrap());
        assert_eq!(step.drive, 300);
        assert_eq!(step.service, 700);
        assert_eq!(step.state.time, SimTime(1_000));
        assert_eq!(step.state.working_time, 1_000);
        assert_eq!(
            start.apply(&suspend(299), 10, &est).unwrap(),
            Transition::Rejected(Rejection::LateSuspend {
                job:          JobId(5),
                arrival:      SimTime(300),
                suspend_time: SimTime(299),
            })
        );
    }

    #[test]
    fn unloading_more_than_on_board_is_fatal() {
        let start = RouteState::start(&cart(10, 2, 0), SimTime(0));
        let err = start.apply(&dropoff(3, 0, 100, 5), 10, &estimators()).unwrap_err();
        assert_eq!(err, PlanError::NegativePayload { job: JobId(3), payload: 2, quantity: 5 });
    }
}

// ── Planner ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod planner_tests {
    use super::*;

    #[test]
    fn config_bounds() {
        assert!(matches!(
            RoutePlanner::new(PlannerConfig { max_jobs: 0 }, estimators()),
            Err(PlanError::Config(_))
        ));
        assert!(matches!(
            RoutePlanner::new(PlannerConfig { max_jobs: crate::MAX_SUPPORTED_JOBS + 1 }, estimators()),
            Err(PlanError::Config(_))
        ));
        assert_eq!(PlannerConfig::default().max_jobs, 3);
        assert_eq!(planner(4).trie().slot_count(), 8);
    }

    #[test]
    fn clones_share_the_tree() {
        let a = planner(3);
        let b = a.clone();
        assert!(std::ptr::eq(a.trie(), b.trie()));
    }

    #[test]
    fn scenario_two_transfers_minimise_driving() {
        let jobs = vec![transfer(0, 5, 2, 300, 10, 3000), transfer(1, 5, 3, 300, 4, 3000)];
        let plan = planner(3)
            .get_best_route(&cart(10, 0, 0), &jobs, SimTime(0))
            .unwrap()
            .expect("feasible");

        assert_eq!(
            plan.actions,
            vec![
                pickup(0, 2, 300, 5),
                pickup(1, 3, 300, 5),
                dropoff(1, 4, 3000, 5),
                dropoff(0, 10, 3000, 5),
            ]
        );
        // Drive 200 + 100 + 100 + 600, load 2 × 25, unload 2 × 10.
        assert_eq!(plan.score, 1_070);
        assert_eq!(plan.job_ids(), vec![JobId(0), JobId(1)]);
        assert_eq!(plan.cart.id, CartId(0));
    }

    #[test]
    fn scenario_unreachable_break_is_infeasible() {
        // Location 10 is 1 000 away; the break must start by 500.
        let jobs = vec![out_of_service(0, 10, 500, 2_000)];
        let plan = planner(3).get_best_route(&cart(10, 0, 0), &jobs, SimTime(0)).unwrap();
        assert!(plan.is_none());
    }

    #[test]
    fn break_is_scheduled_before_work_when_it_must_be() {
        let jobs = vec![transfer(0, 1, 1, 0, 2, 10_000), out_of_service(1, 0, 50, 500)];
        let plan = planner(2)
            .get_best_route(&cart(10, 0, 0), &jobs, SimTime(0))
            .unwrap()
            .unwrap();
        assert!(matches!(plan.actions[0], Action::Suspend { job: JobId(1), .. }));
        // Off duty 500, drive 100, load 5, drive 100, unload 2.
        assert_eq!(plan.score, 707);
    }

    #[test]
    fn capacity_boundary() {
        let p = planner(1);
        let c = cart(10, 0, 0);
        assert!(p.get_best_route(&c, &[transfer(0, 10, 1, 0, 2, 10_000)], SimTime(0)).unwrap().is_some());
        assert!(p.get_best_route(&c, &[transfer(0, 11, 1, 0, 2, 10_000)], SimTime(0)).unwrap().is_none());
    }

    #[test]
    fn loads_that_do_not_fit_together_are_served_in_turn() {
        let p = planner(2);
        let jobs = vec![transfer(0, 6, 1, 0, 2, 100_000), transfer(1, 5, 3, 0, 4, 100_000)];
        let routes = p.routes(&cart(10, 0, 0), &jobs, SimTime(0)).unwrap();
        // Only the two strictly sequential orderings fit.
        assert_eq!(routes.len(), 2);
        for plan in &routes {
            assert!(matches!(plan.actions[0], Action::Pickup { .. }));
            assert!(matches!(plan.actions[1], Action::Dropoff { .. }));
        }
    }

    #[test]
    fn deadline_boundary() {
        // Load 5, drive 100, unload 2 → done at 107.
        let p = planner(1);
        let c = cart(10, 0, 0);
        assert!(p.get_best_route(&c, &[transfer(0, 1, 0, 0, 1, 107)], SimTime(0)).unwrap().is_some());
        assert!(p.get_best_route(&c, &[transfer(0, 1, 0, 0, 1, 106)], SimTime(0)).unwrap().is_none());
    }

    #[test]
    fn too_many_jobs_is_an_error() {
        let jobs: Vec<Job> = (0..3).map(|i| transfer(i, 1, 1, 0, 2, 10_000)).collect();
        assert_eq!(
            planner(2).get_best_route(&cart(10, 0, 0), &jobs, SimTime(0)),
            Err(PlanError::TooManyJobs { jobs: 3, max_jobs: 2 })
        );
    }

    #[test]
    fn empty_slate_is_an_empty_plan() {
        let plan = planner(2).get_best_route(&cart(10, 0, 0), &[], SimTime(0)).unwrap().unwrap();
        assert!(plan.is_empty());
        assert_eq!(plan.score, 0);
    }

    #[test]
    fn in_flight_jobs_emit_only_remaining_steps() {
        let mut on_break = OutOfServiceJob::new(LocationId(9), SimTime(0), SimTime(50));
        on_break.state = OutOfServiceState::OnBreak;
        let jobs = vec![enroute(0, 4, 2, 10_000), Job::out_of_service(JobId(1), on_break)];
        let plan = planner(2)
            .get_best_route(&cart(10, 4, 0), &jobs, SimTime(0))
            .unwrap()
            .unwrap();
        assert_eq!(plan.actions, vec![dropoff(0, 2, 10_000, 4)]);
        assert_eq!(plan.score, 208);
    }

    #[test]
    fn enroute_without_payload_is_fatal() {
        let result = planner(1).get_best_route(&cart(10, 0, 0), &[enroute(0, 4, 2, 10_000)], SimTime(0));
        assert_eq!(result, Err(PlanError::NegativePayload { job: JobId(0), payload: 0, quantity: 4 }));
    }

    #[test]
    fn each_action_sequence_is_visited_once() {
        // Dropoff A, pickup/dropoff B, suspend C: 4! / 2 orderings.
        let jobs = vec![
            enroute(0, 1, 5, 10_000_000),
            transfer(1, 1, 2, 0, 3, 10_000_000),
            out_of_service(2, 4, 1_000_000, 1_000_000),
        ];
        let routes = planner(3).routes(&cart(10, 1, 0), &jobs, SimTime(0)).unwrap();
        assert_eq!(routes.len(), 12);
        let distinct: BTreeSet<String> =
            routes.iter().map(|p| format!("{:?}", p.actions)).collect();
        assert_eq!(distinct.len(), 12);
    }

    #[test]
    fn best_route_is_minimum_over_all_routes() {
        let jobs = vec![
            transfer(0, 2, 7, 0, 1, 50_000),
            transfer(1, 3, 2, 400, 9, 50_000),
            transfer(2, 4, 5, 0, 3, 50_000),
        ];
        let p = planner(3);
        let c = cart(8, 0, 4);
        let best = p.get_best_route(&c, &jobs, SimTime(0)).unwrap().unwrap();
        let all = p.routes(&c, &jobs, SimTime(0)).unwrap();
        assert!(!all.is_empty());
        assert_eq!(best.score, all.iter().map(|r| r.score).min().unwrap());
        // First minimum in walk order wins ties.
        let first_min = all.iter().find(|r| r.score == best.score).unwrap();
        assert_eq!(&best, first_min);
    }

    #[test]
    fn search_is_idempotent() {
        let jobs = vec![
            transfer(0, 2, 7, 0, 1, 50_000),
            out_of_service(1, 3, 20_000, 21_000),
            transfer(2, 4, 5, 100, 3, 50_000),
        ];
        let p = planner(3);
        let c = cart(8, 0, 4);
        let a = p.get_best_route(&c, &jobs, SimTime(10)).unwrap();
        let b = p.get_best_route(&c, &jobs, SimTime(10)).unwrap();
        assert!(a.is_some());
        assert_eq!(a, b);
    }

    #[test]
    fn safe_slates_never_score_worse_than_in_order() {
        let mut rng = SimRng::new(7);
        let p = planner(3);
        for round in 0..200 {
            let n = rng.gen_range(1..=3u32);
            let jobs: Vec<Job> = (0..n)
                .map(|i| {
                    if rng.gen_bool(0.2) {
                        // Breaks a million apart, so any two fit back to back.
                        let suspend = 5_000_000 + u64::from(i) * 1_000_000;
                        let at = rng.gen_range(0..20u32);
                        out_of_service(i, at, suspend, suspend + rng.gen_range(0..500u64))
                    } else {
                        transfer(
                            i,
                            rng.gen_range(1..=5u32),
                            rng.gen_range(0..20u32),
                            rng.gen_range(0..2_000u64),
                            rng.gen_range(0..20u32),
                            10_000_000,
                        )
                    }
                })
                .collect();
            let c = cart(100, 0, rng.gen_range(0..20u32));

            let in_order: Vec<Action> = derive_actions(&jobs).into_iter().flatten().collect();
            let naive = p.score_sequence(&c, &in_order, SimTime(0)).unwrap().expect("safe slate");
            let best = p.get_best_route(&c, &jobs, SimTime(0)).unwrap().expect("safe slate");
            assert!(best.score <= naive, "round {round}: {} > {naive}", best.score);
        }
    }

    #[test]
    fn coincident_breaks_at_different_locations_are_infeasible() {
        let jobs = vec![out_of_service(0, 1, 5_000, 5_100), out_of_service(1, 7, 5_000, 5_100)];
        let p = planner(2);
        let c = cart(10, 0, 0);
        assert_eq!(p.get_best_route(&c, &jobs, SimTime(0)).unwrap(), None);
        let in_order: Vec<Action> = derive_actions(&jobs).into_iter().flatten().collect();
        assert_eq!(p.score_sequence(&c, &in_order, SimTime(0)).unwrap(), None);

        // Spaced apart, both orders fit and the nearer break goes first.
        let spaced = vec![out_of_service(0, 1, 5_000, 5_100), out_of_service(1, 7, 10_000, 10_100)];
        let plan = p.get_best_route(&c, &spaced, SimTime(0)).unwrap().unwrap();
        assert_eq!(plan.job_ids(), vec![JobId(0), JobId(1)]);
        // All time from 0 to the second resume is drive or off duty.
        assert_eq!(plan.score, 10_100);
    }

    #[test]
    fn score_sequence_rejects_infeasible_order() {
        let p = planner(1);
        // Dropoff due at 50 but the drive alone takes 100.
        let actions = vec![pickup(0, 0, 0, 1), dropoff(0, 1, 50, 1)];
        assert_eq!(p.score_sequence(&cart(10, 0, 0), &actions, SimTime(0)).unwrap(), None);
    }
}

// ── explain_plan ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod explain_tests {
    use super::*;

    #[test]
    fn replay_matches_search() {
        let p = planner(3);
        let jobs = vec![transfer(0, 5, 2, 300, 10, 3000), transfer(1, 5, 3, 300, 4, 3000)];
        let plan = p.get_best_route(&cart(10, 0, 0), &jobs, SimTime(0)).unwrap().unwrap();

        let mut lines: Vec<String> = Vec::new();
        let end = p.explain_plan(&plan, SimTime(0), &mut lines).unwrap().unwrap();

        assert_eq!(end.working_time, plan.score);
        assert_eq!(end.payload, 0);
        assert_eq!(end.time, SimTime(1_170));
        assert_eq!(lines.len(), plan.len() + 2);
        assert_eq!(lines[0], "t=0 CartId(0) at LocationId(0) payload 0/10, 4 actions, score 1070");
        assert_eq!(
            lines[1],
            "#0 pickup JobId(0) x5 at LocationId(2) after t=300: \
             drive +200 wait +100 service +25 -> t=325 payload 5/10 working 225"
        );
        assert_eq!(lines[5], "done t=1170 at LocationId(10) working 1070");
    }

    #[test]
    fn replay_from_a_later_start_reports_rejection() {
        let p = planner(1);
        let plan = p
            .get_best_route(&cart(10, 0, 0), &[transfer(0, 1, 0, 0, 1, 107)], SimTime(0))
            .unwrap()
            .unwrap();
        let mut lines: Vec<String> = Vec::new();
        assert_eq!(p.explain_plan(&plan, SimTime(1), &mut lines).unwrap(), None);
        assert!(lines.last().unwrap().contains("rejected"), "{lines:?}");
    }

    #[test]
    fn tracing_logger_accepts_lines() {
        let p = planner(1);
        let plan = p.get_best_route(&cart(10, 0, 0), &[], SimTime(0)).unwrap().unwrap();
        let end = p.explain_plan(&plan, SimTime(0), &mut crate::TracingLogger).unwrap();
        assert_eq!(end.map(|s| s.working_time), Some(0));
    }
}
