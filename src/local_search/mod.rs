//! Local search operators and the descent loop driving them.
//!
//! Each operator is a [`Neighborhood`] applying at most one strictly
//! improving move per call. [`LocalSearch`] cycles through its operators
//! until a full pass finds nothing or the move/time budget runs out.

pub mod or_opt;
pub mod relocate;
pub mod swap;
pub mod two_opt;
pub mod unvisited;
pub mod utils;

use crate::config::Config;
use crate::problem::Problem;
use crate::solution::Solution;
use std::time::Instant;

pub use self::or_opt::OrOpt;
pub use self::relocate::Relocate;
pub use self::swap::Swap;
pub use self::two_opt::TwoOpt;
pub use self::unvisited::UnvisitedExchange;

/// A move operator usable by [`LocalSearch`].
pub trait Neighborhood: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Apply the first strictly improving, capacity-feasible move found and
    /// return its cost change, or `None` when the solution is locally optimal
    /// for this operator.
    ///
    /// The solution must be evaluated on entry. Touched routes are left marked
    /// as modified; the caller re-evaluates.
    fn improve(&self, solution: &mut Solution, problem: &Problem) -> Option<i64>;
}

/// Why a descent stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// A full pass over every neighborhood found no improving move
    LocalOptimum,
    /// The configured number of moves was applied
    IterationLimit,
    /// The deadline passed
    TimeLimit,
}

/// Manages the improvement phase of the solver.
pub struct LocalSearch {
    neighborhoods: Vec<Box<dyn Neighborhood>>,
    /// Maximum number of moves applied by one call to [`LocalSearch::educate`]
    pub iteration_limit: Option<u64>,
    /// Moves applied by the last descent
    pub iterations: u64,
    /// Solution cost before the first move and after every applied move
    pub cost_trace: Vec<i64>,
}

impl LocalSearch {
    /// Create a local search with the default operators for a configuration.
    pub fn new(config: &Config) -> Self {
        Self::with_neighborhoods(
            vec![
                Box::new(UnvisitedExchange),
                Box::new(Relocate),
                Box::new(TwoOpt),
                Box::new(OrOpt::new(config.max_segment_length)),
                Box::new(Swap),
            ],
            config.iteration_limit,
        )
    }

    /// Create a local search over a custom list of operators.
    pub fn with_neighborhoods(
        neighborhoods: Vec<Box<dyn Neighborhood>>,
        iteration_limit: Option<u64>,
    ) -> Self {
        LocalSearch {
            neighborhoods,
            iteration_limit,
            iterations: 0,
            cost_trace: Vec::new(),
        }
    }

    /// Names of the operators in the order they are tried.
    pub fn neighborhood_names(&self) -> Vec<&'static str> {
        self.neighborhoods.iter().map(|n| n.name()).collect()
    }

    /// Run local search to improve a solution in place.
    pub fn educate(
        &mut self,
        solution: &mut Solution,
        problem: &Problem,
        deadline: Option<Instant>,
    ) -> Termination {
        self.iterations = 0;
        self.cost_trace.clear();

        solution.evaluate(problem);
        self.cost_trace.push(solution.cost);

        let mut improvement = true;
        while improvement {
            improvement = false;

            for idx in 0..self.neighborhoods.len() {
                if let Some(reason) = self.budget_exhausted(deadline) {
                    self.log_termination(reason, solution);
                    return reason;
                }

                let before = solution.cost;
                let Some(delta) = self.neighborhoods[idx].improve(solution, problem) else {
                    continue;
                };

                solution.evaluate(problem);
                debug_assert_eq!(
                    solution.cost,
                    before + delta,
                    "{} reported a delta that does not match re-evaluation",
                    self.neighborhoods[idx].name()
                );
                log::trace!(
                    "{}: cost {} -> {}",
                    self.neighborhoods[idx].name(),
                    before,
                    solution.cost
                );

                self.iterations += 1;
                self.cost_trace.push(solution.cost);
                improvement = true;
            }
        }

        self.log_termination(Termination::LocalOptimum, solution);
        Termination::LocalOptimum
    }

    fn budget_exhausted(&self, deadline: Option<Instant>) -> Option<Termination> {
        if self.iteration_limit.map_or(false, |limit| self.iterations >= limit) {
            return Some(Termination::IterationLimit);
        }
        if deadline.map_or(false, |deadline| Instant::now() >= deadline) {
            return Some(Termination::TimeLimit);
        }
        None
    }

    fn log_termination(&self, reason: Termination, solution: &Solution) {
        log::debug!(
            "local search stopped ({:?}) after {} moves at cost {}",
            reason,
            self.iterations,
            solution.cost
        );
    }
}
