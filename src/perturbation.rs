//! Ruin-and-recreate perturbation used by randomized restarts.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::construction::CheapestInsertion;
use crate::problem::Problem;
use crate::solution::Solution;

/// Removes a random share of the routed stops and re-inserts them, together
/// with every unvisited stop, by cheapest insertion.
#[derive(Debug, Clone, Copy)]
pub struct RuinRecreate {
    /// Share of routed stops removed, in `[0, 1]`
    pub fraction: f64,
}

impl RuinRecreate {
    pub fn new(fraction: f64) -> Self {
        RuinRecreate {
            fraction: fraction.clamp(0.0, 1.0),
        }
    }

    /// Perturb `solution` in place. The result is evaluated and capacity-feasible.
    pub fn perturb<R: Rng>(&self, solution: &mut Solution, problem: &Problem, rng: &mut R) {
        let routed: Vec<usize> = solution
            .routes
            .iter()
            .flat_map(|route| route.customers.iter().copied())
            .collect();

        let count = ((routed.len() as f64 * self.fraction).round() as usize)
            .max(1)
            .min(routed.len());
        let mut removed: Vec<usize> = routed.choose_multiple(rng, count).copied().collect();

        for route in &mut solution.routes {
            let before = route.customers.len();
            route.customers.retain(|c| !removed.contains(c));
            if route.customers.len() != before {
                route.modified = true;
                route.refresh(problem);
            }
        }

        removed.extend(std::mem::take(&mut solution.unvisited));
        log::trace!("ruined {} of {} routed stops", count, routed.len());

        CheapestInsertion.insert_all(solution, problem, removed);
    }
}
