//! Command-line driver: solve a JSON instance and print or save the plan.

use clap::{Parser, ValueEnum};
use depot_router::config::{Config, FirstSolutionStrategy};
use depot_router::matrix::{HaversineProvider, Location, MatrixProvider};
use depot_router::problem::{Problem, ProblemInput};
use depot_router::utils::save_plan;
use depot_router::RoutingSolver;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Assign delivery stops to a fleet leaving from and returning to one depot.
#[derive(Debug, Parser)]
#[command(name = "depot-router", version, about)]
struct Args {
    /// JSON instance with a distance matrix, or locations to measure offline
    instance: PathBuf,

    /// Maximum number of improving moves per descent (0 removes the limit)
    #[arg(long, default_value_t = 100_000)]
    iterations: u64,

    /// Wall-clock budget in milliseconds
    #[arg(long)]
    time_limit_ms: Option<u64>,

    /// Randomized ruin-and-recreate restarts run after the first descent
    #[arg(long, default_value_t = 0)]
    restarts: usize,

    /// Seed for the restarts
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Construction heuristic for the first solution
    #[arg(long, value_enum, default_value_t = FirstSolutionStrategy::CheapestInsertion)]
    strategy: FirstSolutionStrategy,

    /// Longest chain of stops moved by Or-opt
    #[arg(long, default_value_t = 3)]
    max_segment_length: usize,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Write the plan to this file instead of standard output
    #[arg(long, short)]
    output: Option<PathBuf>,
}

/// An instance file: the problem itself plus optional coordinates used when
/// no matrix is given.
#[derive(Debug, Deserialize)]
struct InstanceFile {
    #[serde(flatten)]
    problem: ProblemInput,
    #[serde(default)]
    locations: Option<Vec<Location>>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    log::info!("loading instance from {}", args.instance.display());
    let instance: InstanceFile = serde_json::from_str(&fs::read_to_string(&args.instance)?)?;
    let mut input = instance.problem;

    if input.distance_matrix.is_empty() {
        if let Some(locations) = instance.locations {
            log::info!("measuring {} locations with the haversine provider", locations.len());
            input.distance_matrix = HaversineProvider::default().distance_matrix(&locations)?;
        }
    }

    let problem = Problem::from_input(input)?;

    let mut config = Config::new()
        .with_first_solution_strategy(args.strategy)
        .with_max_segment_length(args.max_segment_length)
        .with_restarts(args.restarts)
        .with_seed(args.seed);
    config = if args.iterations == 0 {
        config.without_iteration_limit()
    } else {
        config.with_iteration_limit(args.iterations)
    };
    if let Some(ms) = args.time_limit_ms {
        config = config.with_time_limit(Duration::from_millis(ms));
    }

    let mut solver = RoutingSolver::new(problem, config);
    solver.run()?;
    let plan = solver.plan()?;

    if let Some(statistics) = solver.statistics() {
        log::info!("{}", statistics.format());
    }

    match (args.format, args.output) {
        (OutputFormat::Text, Some(path)) => save_plan(&plan, &solver.problem, path)?,
        (OutputFormat::Json, Some(path)) => fs::write(path, plan.to_json()?)?,
        (OutputFormat::Text, None) => println!("{}", plan),
        (OutputFormat::Json, None) => println!("{}", plan.to_json()?),
    }

    Ok(())
}
