//! 2-Opt neighborhood for local search (intra-route).

use crate::problem::Problem;
use crate::solution::Solution;

use super::utils::{predecessor, successor};
use super::Neighborhood;

/// Reverses a contiguous chain of stops inside one route.
///
/// The delta accounts for the direction of every arc in the reversed chain,
/// so it stays exact on asymmetric matrices.
#[derive(Debug, Clone, Copy, Default)]
pub struct TwoOpt;

impl Neighborhood for TwoOpt {
    fn name(&self) -> &'static str {
        "2-opt"
    }

    fn improve(&self, solution: &mut Solution, problem: &Problem) -> Option<i64> {
        for r_idx in 0..solution.routes.len() {
            if let Some((i, j, delta)) = evaluate_two_opt(&solution.routes[r_idx].customers, problem) {
                let route = &mut solution.routes[r_idx];
                route.customers[i..=j].reverse();
                route.modified = true;

                log::trace!("reversed positions {}..={} of vehicle {} ({:+})", i, j, r_idx, delta);
                return Some(delta);
            }
        }

        None
    }
}

/// First `(i, j, delta)` whose reversal of `customers[i..=j]` shortens the route.
fn evaluate_two_opt(customers: &[usize], problem: &Problem) -> Option<(usize, usize, i64)> {
    let n = customers.len();

    for i in 0..n.saturating_sub(1) {
        let before = predecessor(customers, i, problem);
        let mut forward = 0;
        let mut backward = 0;

        for j in (i + 1)..n {
            forward += problem.get_distance(customers[j - 1], customers[j]);
            backward += problem.get_distance(customers[j], customers[j - 1]);
            let after = successor(customers, j + 1, problem);

            let old_cost = problem.get_distance(before, customers[i])
                + forward
                + problem.get_distance(customers[j], after);
            let new_cost = problem.get_distance(before, customers[j])
                + backward
                + problem.get_distance(customers[i], after);

            let delta = new_cost - old_cost;
            if delta < 0 {
                return Some((i, j, delta));
            }
        }
    }

    None
}
