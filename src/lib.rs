//! # depot_router
//!
//! Capacitated vehicle routing from a shared depot.
//!
//! A fleet of vehicles leaves the depot, serves stops with integer demands
//! without exceeding each vehicle's capacity, and returns. Stops may be left
//! out at a per-stop skip penalty, so a plan always exists. The solver builds
//! a first assignment with a construction heuristic, improves it with local
//! search over relocate, 2-opt, Or-opt, swap and skip/insert moves, and can
//! optionally diversify with seeded ruin-and-recreate restarts run in
//! parallel.

pub mod config;
pub mod construction;
pub mod error;
pub mod local_search;
pub mod matrix;
pub mod perturbation;
pub mod plan;
pub mod problem;
pub mod solution;
pub mod utils;

use crate::config::Config;
use crate::error::SolveError;
use crate::local_search::{LocalSearch, Termination};
use crate::perturbation::RuinRecreate;
use crate::plan::RoutePlan;
use crate::problem::Problem;
use crate::solution::Solution;
use crate::utils::SearchStatistics;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use std::time::{Duration, Instant};

/// Orchestrates construction, local search and optional restarts for one problem.
pub struct RoutingSolver {
    pub problem: Problem,
    pub config: Config,
    pub initial_solution: Option<Solution>,
    pub best_solution: Option<Solution>,
    pub run_time: Duration,
    pub iterations: u64,
    pub termination: Option<Termination>,
    /// Cost after construction and after every move of the first descent
    pub cost_trace: Vec<i64>,
    pub local_search: LocalSearch,
    pub start_time: Instant,
}

impl RoutingSolver {
    /// Create a solver for the given problem and configuration.
    pub fn new(problem: Problem, config: Config) -> Self {
        let local_search = LocalSearch::new(&config);
        RoutingSolver {
            problem,
            config,
            initial_solution: None,
            best_solution: None,
            run_time: Duration::from_secs(0),
            iterations: 0,
            termination: None,
            cost_trace: Vec::new(),
            local_search,
            start_time: Instant::now(),
        }
    }

    /// Build the first solution with the configured strategy.
    pub fn construct(&self) -> Solution {
        let construction = self.config.first_solution_strategy.construction();
        let solution = construction.build(&self.problem);

        log::info!(
            "{} built an initial solution: cost {} ({} unvisited)",
            construction.name(),
            solution.cost,
            solution.unvisited.len()
        );
        solution
    }

    /// Run the solver until the budget is spent or no move improves.
    pub fn run(&mut self) -> Result<&Solution, SolveError> {
        self.start_time = Instant::now();
        let deadline = self.config.time_limit.map(|limit| self.start_time + limit);

        log::info!(
            "solving '{}': {} stops, {} vehicles",
            self.problem.name,
            self.problem.get_customer_count(),
            self.problem.num_vehicles()
        );

        let initial = self.construct();
        let mut solution = initial.clone();
        self.initial_solution = Some(initial);

        let termination = self.local_search.educate(&mut solution, &self.problem, deadline);
        self.iterations = self.local_search.iterations;
        self.cost_trace = self.local_search.cost_trace.clone();
        self.termination = Some(termination);

        if self.config.restarts > 0 && termination == Termination::LocalOptimum {
            if let Some((restart, candidate)) = self.run_restarts(&solution, deadline) {
                if candidate.cost < solution.cost {
                    log::info!(
                        "restart {} improved cost {} -> {}",
                        restart,
                        solution.cost,
                        candidate.cost
                    );
                    solution = candidate;
                }
            }
        }

        solution.verify(&self.problem).map_err(SolveError::Internal)?;
        self.run_time = self.start_time.elapsed();

        log::info!(
            "finished in {}: cost {} (distance {}, {} unvisited)",
            utils::format_duration(self.run_time),
            solution.cost,
            solution.distance,
            solution.unvisited.len()
        );
        let best: &Solution = self.best_solution.insert(solution);
        Ok(best)
    }

    /// Perturb independent copies of `incumbent` in parallel and descend from
    /// each; the lowest cost wins, ties going to the lowest restart index.
    fn run_restarts(&self, incumbent: &Solution, deadline: Option<Instant>) -> Option<(usize, Solution)> {
        let ruin = RuinRecreate::new(self.config.ruin_fraction);

        (1..=self.config.restarts)
            .into_par_iter()
            .map(|restart| {
                let mut rng = ChaCha8Rng::seed_from_u64(self.config.seed.wrapping_add(restart as u64));
                let mut candidate = incumbent.clone();
                ruin.perturb(&mut candidate, &self.problem, &mut rng);

                let mut local_search = LocalSearch::new(&self.config);
                local_search.educate(&mut candidate, &self.problem, deadline);
                log::debug!("restart {} reached cost {}", restart, candidate.cost);

                (restart, candidate)
            })
            .min_by_key(|(restart, candidate)| (candidate.cost, *restart))
    }

    /// Extract the public plan of the best solution found by [`RoutingSolver::run`].
    pub fn plan(&self) -> Result<RoutePlan, SolveError> {
        let best = self.best_solution.as_ref().ok_or(SolveError::NoSolution)?;
        RoutePlan::from_solution(best, &self.problem)
    }

    /// Summarize the last run.
    pub fn statistics(&self) -> Option<SearchStatistics> {
        let best = self.best_solution.as_ref()?;
        let initial = self.initial_solution.as_ref()?;

        Some(SearchStatistics {
            iterations: self.iterations,
            runtime: self.run_time,
            initial_cost: initial.cost,
            best_cost: best.cost,
            best_distance: best.distance,
            unvisited: best.unvisited.len(),
            active_vehicles: best.routes.iter().filter(|route| !route.is_empty()).count(),
            restarts: self.config.restarts,
        })
    }
}

/// Solve a problem and return its plan.
pub fn solve(problem: &Problem, config: &Config) -> Result<RoutePlan, SolveError> {
    let mut solver = RoutingSolver::new(problem.clone(), config.clone());
    solver.run()?;
    solver.plan()
}
