//! Delta evaluation helpers shared by construction and local search.

use crate::problem::Problem;
use crate::solution::{Route, Solution};

/// A feasible place to insert a stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Insertion {
    pub route: usize,
    pub position: usize,
    pub delta: i64,
}

/// Node preceding position `pos` in a stop sequence (the depot at the start).
#[inline]
pub fn predecessor(customers: &[usize], pos: usize, problem: &Problem) -> usize {
    if pos > 0 {
        customers[pos - 1]
    } else {
        problem.depot()
    }
}

/// Node at position `pos`, or the depot when `pos` is past the end.
#[inline]
pub fn successor(customers: &[usize], pos: usize, problem: &Problem) -> usize {
    if pos < customers.len() {
        customers[pos]
    } else {
        problem.depot()
    }
}

/// Distance change from inserting `customer` before position `pos`.
pub fn insertion_delta(customers: &[usize], customer: usize, pos: usize, problem: &Problem) -> i64 {
    segment_insertion_delta(customers, customer, customer, pos, problem)
}

/// Distance change from inserting a segment running from `first` to `last`
/// before position `pos`. Arcs inside the segment are not counted.
pub fn segment_insertion_delta(
    customers: &[usize],
    first: usize,
    last: usize,
    pos: usize,
    problem: &Problem,
) -> i64 {
    let prev = predecessor(customers, pos, problem);
    let next = successor(customers, pos, problem);

    problem.get_distance(prev, first) + problem.get_distance(last, next)
        - problem.get_distance(prev, next)
}

/// Distance change from removing the stop at `pos`.
pub fn removal_delta(customers: &[usize], pos: usize, problem: &Problem) -> i64 {
    segment_removal_delta(customers, pos, 1, problem)
}

/// Distance change from removing `len` stops starting at `start`, arcs inside
/// the segment excluded.
pub fn segment_removal_delta(customers: &[usize], start: usize, len: usize, problem: &Problem) -> i64 {
    let prev = predecessor(customers, start, problem);
    let next = successor(customers, start + len, problem);
    let first = customers[start];
    let last = customers[start + len - 1];

    problem.get_distance(prev, next)
        - problem.get_distance(prev, first)
        - problem.get_distance(last, next)
}

/// Cheapest position for `customer` in a single route, earliest position on ties.
pub fn best_position(route: &Route, customer: usize, problem: &Problem) -> (usize, i64) {
    (0..=route.customers.len())
        .map(|pos| (pos, insertion_delta(&route.customers, customer, pos, problem)))
        .fold((0, i64::MAX), |best, candidate| {
            if candidate.1 < best.1 {
                candidate
            } else {
                best
            }
        })
}

/// Cheapest capacity-feasible insertion of `customer` over all routes.
///
/// Ties go to the lowest route index, then the earliest position.
pub fn cheapest_insertion(solution: &Solution, customer: usize, problem: &Problem) -> Option<Insertion> {
    let demand = problem.demand(customer);
    let mut best: Option<Insertion> = None;

    for (r_idx, route) in solution.routes.iter().enumerate() {
        if route.load + demand > problem.capacity(route.vehicle) {
            continue;
        }

        let (position, delta) = best_position(route, customer, problem);
        if best.map_or(true, |b| delta < b.delta) {
            best = Some(Insertion {
                route: r_idx,
                position,
                delta,
            });
        }
    }

    best
}
