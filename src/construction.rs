//! Construction heuristics producing the initial assignment.
//!
//! Every heuristic returns a capacity-feasible [`Solution`]. Stops that no
//! vehicle can take are placed in the unvisited set and charged their skip
//! penalty.

use crate::local_search::utils::insertion_delta;
use crate::problem::Problem;
use crate::solution::Solution;

/// A strategy building a first solution from scratch.
pub trait Construction: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Build an evaluated, capacity-feasible solution.
    fn build(&self, problem: &Problem) -> Solution;
}

/// Greedy cheapest insertion over (stop, vehicle, position) triples.
#[derive(Debug, Clone, Copy, Default)]
pub struct CheapestInsertion;

impl CheapestInsertion {
    /// Insert `pending` stops into an existing solution one at a time, always
    /// choosing the triple with the smallest added distance.
    ///
    /// Ties go to the lowest stop, then the lowest vehicle, then the earliest
    /// position. Stops left without any capacity-feasible triple are moved to
    /// the unvisited set. The solution is re-evaluated before returning.
    pub fn insert_all(&self, solution: &mut Solution, problem: &Problem, mut pending: Vec<usize>) {
        pending.sort_unstable();
        pending.dedup();

        // Loads only grow, so a stop with no feasible triple now never gets one.
        while !pending.is_empty() {
            let mut best: Option<(i64, usize, usize, usize)> = None;

            for (p_idx, &customer) in pending.iter().enumerate() {
                let demand = problem.demand(customer);

                for (r_idx, route) in solution.routes.iter().enumerate() {
                    if route.load + demand > problem.capacity(route.vehicle) {
                        continue;
                    }

                    for pos in 0..=route.customers.len() {
                        let delta = insertion_delta(&route.customers, customer, pos, problem);
                        if best.map_or(true, |(best_delta, ..)| delta < best_delta) {
                            best = Some((delta, p_idx, r_idx, pos));
                        }
                    }
                }
            }

            let Some((delta, p_idx, r_idx, pos)) = best else {
                break;
            };

            let customer = pending.remove(p_idx);
            let route = &mut solution.routes[r_idx];
            route.customers.insert(pos, customer);
            route.modified = true;
            route.refresh(problem);

            log::trace!(
                "inserted node {} into vehicle {} at position {} (+{})",
                customer,
                r_idx,
                pos,
                delta
            );
        }

        for customer in pending {
            log::debug!("node {} has no capacity-feasible insertion, skipping", customer);
            solution.unvisited.insert(customer);
        }

        solution.evaluate(problem);
    }
}

impl Construction for CheapestInsertion {
    fn name(&self) -> &'static str {
        "cheapest-insertion"
    }

    fn build(&self, problem: &Problem) -> Solution {
        let mut solution = Solution::new(problem);
        self.insert_all(&mut solution, problem, problem.customers().collect());
        solution
    }
}

/// Extend each vehicle's path in turn by the cheapest arc to a stop that
/// still fits, moving to the next vehicle once nothing fits.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathCheapestArc;

impl Construction for PathCheapestArc {
    fn name(&self) -> &'static str {
        "path-cheapest-arc"
    }

    fn build(&self, problem: &Problem) -> Solution {
        let mut solution = Solution::new(problem);
        let mut pending: Vec<usize> = problem.customers().collect();

        for route in &mut solution.routes {
            let capacity = problem.capacity(route.vehicle);
            let mut last = problem.depot();
            let mut load = 0;

            loop {
                let next = pending
                    .iter()
                    .enumerate()
                    .filter(|&(_, &c)| load + problem.demand(c) <= capacity)
                    .min_by_key(|&(_, &c)| (problem.get_distance(last, c), c))
                    .map(|(p_idx, _)| p_idx);
                let Some(p_idx) = next else {
                    break;
                };

                let customer = pending.remove(p_idx);
                load += problem.demand(customer);
                route.customers.push(customer);
                last = customer;
            }

            route.modified = true;
        }

        for customer in pending {
            log::debug!("node {} does not fit any path, skipping", customer);
            solution.unvisited.insert(customer);
        }

        solution.evaluate(problem);
        solution
    }
}
