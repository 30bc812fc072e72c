//! Moves trading route distance against skip penalties.

use crate::problem::Problem;
use crate::solution::Solution;

use super::utils::{cheapest_insertion, predecessor, removal_delta, successor};
use super::Neighborhood;

/// Exchanges stops between the routes and the unvisited set.
///
/// Tried in order:
/// 1. insert an unvisited stop at its cheapest feasible position when that
///    costs less than its penalty;
/// 2. drop a routed stop when the distance saved exceeds its penalty;
/// 3. replace a routed stop by an unvisited one in place when capacity allows
///    and the combined distance and penalty change is negative.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnvisitedExchange;

impl Neighborhood for UnvisitedExchange {
    fn name(&self) -> &'static str {
        "unvisited-exchange"
    }

    fn improve(&self, solution: &mut Solution, problem: &Problem) -> Option<i64> {
        try_insert(solution, problem)
            .or_else(|| try_remove(solution, problem))
            .or_else(|| try_replace(solution, problem))
    }
}

fn try_insert(solution: &mut Solution, problem: &Problem) -> Option<i64> {
    let candidates: Vec<usize> = solution.unvisited.iter().copied().collect();

    for customer in candidates {
        let Some(insertion) = cheapest_insertion(solution, customer, problem) else {
            continue;
        };

        let delta = insertion.delta - problem.skip_penalty(customer);
        if delta < 0 {
            let route = &mut solution.routes[insertion.route];
            route.customers.insert(insertion.position, customer);
            route.modified = true;
            solution.unvisited.remove(&customer);

            log::trace!("inserted unvisited node {} into vehicle {} ({:+})", customer, insertion.route, delta);
            return Some(delta);
        }
    }

    None
}

fn try_remove(solution: &mut Solution, problem: &Problem) -> Option<i64> {
    let found = solution.routes.iter().enumerate().find_map(|(r_idx, route)| {
        (0..route.customers.len()).find_map(|pos| {
            let customer = route.customers[pos];
            let delta = removal_delta(&route.customers, pos, problem) + problem.skip_penalty(customer);
            (delta < 0).then_some((r_idx, pos, delta))
        })
    });

    let (r_idx, pos, delta) = found?;
    let route = &mut solution.routes[r_idx];
    let customer = route.customers.remove(pos);
    route.modified = true;
    solution.unvisited.insert(customer);

    log::trace!("dropped node {} from vehicle {} ({:+})", customer, r_idx, delta);
    Some(delta)
}

fn try_replace(solution: &mut Solution, problem: &Problem) -> Option<i64> {
    let candidates: Vec<usize> = solution.unvisited.iter().copied().collect();

    let mut found = None;
    'search: for &incoming in &candidates {
        for (r_idx, route) in solution.routes.iter().enumerate() {
            let capacity = problem.capacity(route.vehicle);

            for pos in 0..route.customers.len() {
                let outgoing = route.customers[pos];
                if route.load - problem.demand(outgoing) + problem.demand(incoming) > capacity {
                    continue;
                }

                let prev = predecessor(&route.customers, pos, problem);
                let next = successor(&route.customers, pos + 1, problem);
                let delta = problem.get_distance(prev, incoming) + problem.get_distance(incoming, next)
                    - problem.get_distance(prev, outgoing)
                    - problem.get_distance(outgoing, next)
                    + problem.skip_penalty(outgoing)
                    - problem.skip_penalty(incoming);

                if delta < 0 {
                    found = Some((incoming, r_idx, pos, delta));
                    break 'search;
                }
            }
        }
    }

    let (incoming, r_idx, pos, delta) = found?;
    let route = &mut solution.routes[r_idx];
    let outgoing = std::mem::replace(&mut route.customers[pos], incoming);
    route.modified = true;
    solution.unvisited.remove(&incoming);
    solution.unvisited.insert(outgoing);

    log::trace!(
        "replaced node {} by unvisited node {} in vehicle {} ({:+})",
        outgoing,
        incoming,
        r_idx,
        delta
    );
    Some(delta)
}
