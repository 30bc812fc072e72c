//! Relocate neighborhood for local search.

use crate::problem::Problem;
use crate::solution::Solution;

use super::or_opt::{apply_segment_move, find_segment_move};
use super::Neighborhood;

/// Moves one stop to another position, in its own route or any other route
/// with enough spare capacity.
#[derive(Debug, Clone, Copy, Default)]
pub struct Relocate;

impl Neighborhood for Relocate {
    fn name(&self) -> &'static str {
        "relocate"
    }

    fn improve(&self, solution: &mut Solution, problem: &Problem) -> Option<i64> {
        let relocation = find_segment_move(solution, problem, 1)?;
        apply_segment_move(solution, &relocation);
        Some(relocation.delta)
    }
}
