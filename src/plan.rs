//! Public, read-only view of a finished solve.

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::SolveError;
use crate::problem::Problem;
use crate::solution::Solution;

/// The routes of every vehicle with their distances and the skipped stops.
///
/// `total_distance` is `routed_distance + skip_penalty_total`, so a plan that
/// leaves stops out is directly comparable with one that serves them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutePlan {
    /// One depot-to-depot node sequence per vehicle; idle vehicles get `[depot, depot]`
    pub routes: Vec<Vec<usize>>,
    /// Stops served by no vehicle, ascending
    pub unvisited: Vec<usize>,
    /// Distance driven by each vehicle
    pub per_vehicle_distance: Vec<i64>,
    /// Demand carried by each vehicle
    pub per_vehicle_load: Vec<i64>,
    /// Sum of `per_vehicle_distance`
    pub routed_distance: i64,
    /// Sum of the skip penalties of `unvisited`
    pub skip_penalty_total: i64,
    /// `routed_distance + skip_penalty_total`
    pub total_distance: i64,
}

impl RoutePlan {
    /// Extract the plan for a solution, recomputing every figure from the
    /// problem's matrix.
    ///
    /// Fails with [`SolveError::Internal`] if the solution breaks the
    /// partition or capacity invariants.
    pub fn from_solution(solution: &Solution, problem: &Problem) -> Result<Self, SolveError> {
        solution.verify(problem).map_err(SolveError::Internal)?;

        let depot = problem.depot();
        let routes: Vec<Vec<usize>> = solution
            .routes
            .iter()
            .map(|route| route.sequence(depot))
            .collect();

        let per_vehicle_distance: Vec<i64> = routes
            .iter()
            .map(|nodes| {
                nodes
                    .iter()
                    .tuple_windows()
                    .map(|(&from, &to)| problem.get_distance(from, to))
                    .sum::<i64>()
            })
            .collect();

        let per_vehicle_load: Vec<i64> = routes
            .iter()
            .map(|nodes| nodes.iter().map(|&node| problem.demand(node)).sum::<i64>())
            .collect();

        let unvisited: Vec<usize> = solution.unvisited.iter().copied().collect();
        let routed_distance: i64 = per_vehicle_distance.iter().sum();
        let skip_penalty_total: i64 = unvisited.iter().map(|&node| problem.skip_penalty(node)).sum();

        Ok(RoutePlan {
            routes,
            unvisited,
            per_vehicle_distance,
            per_vehicle_load,
            routed_distance,
            skip_penalty_total,
            total_distance: routed_distance + skip_penalty_total,
        })
    }

    /// Number of vehicles that leave the depot.
    pub fn active_vehicles(&self) -> usize {
        self.routes.iter().filter(|nodes| nodes.len() > 2).count()
    }

    /// Serialize the plan as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, SolveError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for RoutePlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (vehicle, nodes) in self.routes.iter().enumerate() {
            writeln!(
                f,
                "Vehicle {}: {} (distance {}, load {})",
                vehicle + 1,
                nodes.iter().join(" -> "),
                self.per_vehicle_distance[vehicle],
                self.per_vehicle_load[vehicle]
            )?;
        }

        if !self.unvisited.is_empty() {
            writeln!(
                f,
                "Unvisited: {} (penalty {})",
                self.unvisited.iter().join(", "),
                self.skip_penalty_total
            )?;
        }

        write!(
            f,
            "Total distance: {} (routed {})",
            self.total_distance, self.routed_distance
        )
    }
}
