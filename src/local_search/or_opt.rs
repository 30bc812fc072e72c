//! Or-opt neighborhood: move a short chain of consecutive stops.

use crate::problem::Problem;
use crate::solution::Solution;

use super::utils::{segment_insertion_delta, segment_removal_delta};
use super::Neighborhood;

/// Moves chains of 2..=`max_segment_length` stops to another position in the
/// same or another route, keeping their order. Single stops are handled by
/// [`super::Relocate`].
#[derive(Debug, Clone, Copy)]
pub struct OrOpt {
    pub max_segment_length: usize,
}

impl OrOpt {
    pub fn new(max_segment_length: usize) -> Self {
        OrOpt { max_segment_length }
    }
}

impl Neighborhood for OrOpt {
    fn name(&self) -> &'static str {
        "or-opt"
    }

    fn improve(&self, solution: &mut Solution, problem: &Problem) -> Option<i64> {
        (2..=self.max_segment_length).find_map(|len| {
            let segment_move = find_segment_move(solution, problem, len)?;
            apply_segment_move(solution, &segment_move);
            Some(segment_move.delta)
        })
    }
}

/// A segment of `len` stops leaving `from_route` at `start` and entering
/// `to_route` before `position` (counted after the removal when both routes
/// are the same).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SegmentMove {
    pub from_route: usize,
    pub start: usize,
    pub len: usize,
    pub to_route: usize,
    pub position: usize,
    pub delta: i64,
}

/// Scan routes, segment starts, target routes and positions in ascending
/// order and return the first strictly improving feasible move.
pub(crate) fn find_segment_move(solution: &Solution, problem: &Problem, len: usize) -> Option<SegmentMove> {
    for (r1_idx, r1) in solution.routes.iter().enumerate() {
        let n1 = r1.customers.len();
        if n1 < len {
            continue;
        }

        for start in 0..=(n1 - len) {
            let segment = &r1.customers[start..start + len];
            let first = segment[0];
            let last = segment[len - 1];
            let demand: i64 = segment.iter().map(|&c| problem.demand(c)).sum();
            let removal = segment_removal_delta(&r1.customers, start, len, problem);

            for (r2_idx, r2) in solution.routes.iter().enumerate() {
                if r2_idx == r1_idx {
                    let remaining: Vec<usize> = r1.customers[..start]
                        .iter()
                        .chain(&r1.customers[start + len..])
                        .copied()
                        .collect();

                    for position in (0..=remaining.len()).filter(|&p| p != start) {
                        let delta =
                            removal + segment_insertion_delta(&remaining, first, last, position, problem);
                        if delta < 0 {
                            return Some(SegmentMove {
                                from_route: r1_idx,
                                start,
                                len,
                                to_route: r2_idx,
                                position,
                                delta,
                            });
                        }
                    }
                    continue;
                }

                if r2.load + demand > problem.capacity(r2.vehicle) {
                    continue;
                }

                for position in 0..=r2.customers.len() {
                    let delta =
                        removal + segment_insertion_delta(&r2.customers, first, last, position, problem);
                    if delta < 0 {
                        return Some(SegmentMove {
                            from_route: r1_idx,
                            start,
                            len,
                            to_route: r2_idx,
                            position,
                            delta,
                        });
                    }
                }
            }
        }
    }

    None
}

/// Apply a segment move found by [`find_segment_move`].
pub(crate) fn apply_segment_move(solution: &mut Solution, segment_move: &SegmentMove) {
    let SegmentMove {
        from_route,
        start,
        len,
        to_route,
        position,
        ..
    } = *segment_move;

    let segment: Vec<usize> = solution.routes[from_route]
        .customers
        .drain(start..start + len)
        .collect();
    solution.routes[from_route].modified = true;

    solution.routes[to_route]
        .customers
        .splice(position..position, segment);
    solution.routes[to_route].modified = true;

    log::trace!(
        "moved {} stops from vehicle {} to vehicle {} ({:+})",
        len,
        from_route,
        to_route,
        segment_move.delta
    );
}
