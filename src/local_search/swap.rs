//! Swap neighborhood for local search.

use crate::problem::Problem;
use crate::solution::Solution;

use super::utils::{predecessor, successor};
use super::Neighborhood;

/// Exchanges two stops, either between two routes or between two
/// non-adjacent positions of one route. Adjacent exchanges are 2-opt moves.
#[derive(Debug, Clone, Copy, Default)]
pub struct Swap;

#[derive(Debug, Clone, Copy)]
struct SwapMove {
    r1_idx: usize,
    c1_pos: usize,
    r2_idx: usize,
    c2_pos: usize,
    delta: i64,
}

impl Neighborhood for Swap {
    fn name(&self) -> &'static str {
        "swap"
    }

    fn improve(&self, solution: &mut Solution, problem: &Problem) -> Option<i64> {
        let swap = find_swap(solution, problem)?;
        apply_swap(solution, &swap);
        Some(swap.delta)
    }
}

/// Cost change of putting `incoming` where the stop at `pos` currently is.
fn replacement_delta(customers: &[usize], pos: usize, incoming: usize, problem: &Problem) -> i64 {
    let prev = predecessor(customers, pos, problem);
    let next = successor(customers, pos + 1, problem);
    let outgoing = customers[pos];

    problem.get_distance(prev, incoming) + problem.get_distance(incoming, next)
        - problem.get_distance(prev, outgoing)
        - problem.get_distance(outgoing, next)
}

fn find_swap(solution: &Solution, problem: &Problem) -> Option<SwapMove> {
    let routes = &solution.routes;

    for r1_idx in 0..routes.len() {
        let r1 = &routes[r1_idx];

        for c1_pos in 0..r1.customers.len() {
            let u = r1.customers[c1_pos];

            // Intra-route: positions far enough apart that the replaced arcs are disjoint
            for c2_pos in (c1_pos + 2)..r1.customers.len() {
                let v = r1.customers[c2_pos];
                let delta = replacement_delta(&r1.customers, c1_pos, v, problem)
                    + replacement_delta(&r1.customers, c2_pos, u, problem);
                if delta < 0 {
                    return Some(SwapMove {
                        r1_idx,
                        c1_pos,
                        r2_idx: r1_idx,
                        c2_pos,
                        delta,
                    });
                }
            }

            for r2_idx in (r1_idx + 1)..routes.len() {
                let r2 = &routes[r2_idx];

                for c2_pos in 0..r2.customers.len() {
                    let v = r2.customers[c2_pos];
                    let exchanged = problem.demand(v) - problem.demand(u);
                    if r1.load + exchanged > problem.capacity(r1.vehicle)
                        || r2.load - exchanged > problem.capacity(r2.vehicle)
                    {
                        continue;
                    }

                    let delta = replacement_delta(&r1.customers, c1_pos, v, problem)
                        + replacement_delta(&r2.customers, c2_pos, u, problem);
                    if delta < 0 {
                        return Some(SwapMove {
                            r1_idx,
                            c1_pos,
                            r2_idx,
                            c2_pos,
                            delta,
                        });
                    }
                }
            }
        }
    }

    None
}

fn apply_swap(solution: &mut Solution, swap: &SwapMove) {
    let u = solution.routes[swap.r1_idx].customers[swap.c1_pos];
    let v = solution.routes[swap.r2_idx].customers[swap.c2_pos];

    solution.routes[swap.r1_idx].customers[swap.c1_pos] = v;
    solution.routes[swap.r2_idx].customers[swap.c2_pos] = u;
    solution.routes[swap.r1_idx].modified = true;
    solution.routes[swap.r2_idx].modified = true;

    log::trace!("swapped nodes {} and {} ({:+})", u, v, swap.delta);
}
