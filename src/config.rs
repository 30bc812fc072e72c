//! Configuration parameters for the routing solver.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::construction::{CheapestInsertion, Construction, PathCheapestArc};

/// Heuristic used to build the first solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
pub enum FirstSolutionStrategy {
    /// Greedy insertion of the globally cheapest (stop, vehicle, position)
    #[default]
    CheapestInsertion,
    /// Extend one vehicle path at a time along the cheapest arc
    PathCheapestArc,
}

impl FirstSolutionStrategy {
    /// The construction heuristic implementing this strategy.
    pub fn construction(&self) -> Box<dyn Construction> {
        match self {
            FirstSolutionStrategy::CheapestInsertion => Box::new(CheapestInsertion),
            FirstSolutionStrategy::PathCheapestArc => Box::new(PathCheapestArc),
        }
    }
}

/// Configuration settings for the routing solver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Heuristic building the initial solution
    pub first_solution_strategy: FirstSolutionStrategy,
    /// Maximum number of improving moves applied per local search run
    pub iteration_limit: Option<u64>,
    /// Optional wall-clock budget for the whole solve
    pub time_limit: Option<Duration>,
    /// Longest segment moved by Or-opt
    pub max_segment_length: usize,
    /// Number of randomized ruin-and-recreate restarts after the first descent
    pub restarts: usize,
    /// Seed for the restart perturbations
    pub seed: u64,
    /// Share of routed stops removed by each restart perturbation
    pub ruin_fraction: f64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            first_solution_strategy: FirstSolutionStrategy::CheapestInsertion,
            iteration_limit: Some(100_000),
            time_limit: None,
            max_segment_length: 3,
            restarts: 0,
            seed: 0,
            ruin_fraction: 0.2,
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Config::default()
    }

    /// Set the first solution strategy.
    pub fn with_first_solution_strategy(mut self, strategy: FirstSolutionStrategy) -> Self {
        self.first_solution_strategy = strategy;
        self
    }

    /// Set the maximum number of improving moves.
    pub fn with_iteration_limit(mut self, iterations: u64) -> Self {
        self.iteration_limit = Some(iterations);
        self
    }

    /// Remove the move budget; search stops at a local optimum or the time limit.
    pub fn without_iteration_limit(mut self) -> Self {
        self.iteration_limit = None;
        self
    }

    /// Set the time limit.
    pub fn with_time_limit(mut self, duration: Duration) -> Self {
        self.time_limit = Some(duration);
        self
    }

    /// Set the longest segment length tried by Or-opt.
    pub fn with_max_segment_length(mut self, length: usize) -> Self {
        self.max_segment_length = length.max(1);
        self
    }

    /// Set the number of randomized restarts.
    pub fn with_restarts(mut self, restarts: usize) -> Self {
        self.restarts = restarts;
        self
    }

    /// Set the seed used by randomized restarts.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the share of routed stops removed per restart.
    pub fn with_ruin_fraction(mut self, fraction: f64) -> Self {
        self.ruin_fraction = fraction.clamp(0.0, 1.0);
        self
    }
}
