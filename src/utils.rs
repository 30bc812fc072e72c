//! Reporting helpers for finished solves.

use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::time::Duration;

use crate::plan::RoutePlan;
use crate::problem::Problem;

/// Format a duration as hours, minutes, seconds and milliseconds.
pub fn format_duration(duration: Duration) -> String {
    let total_seconds = duration.as_secs();
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!(
        "{}h {:02}m {:02}s {:03}ms",
        hours,
        minutes,
        seconds,
        duration.subsec_millis()
    )
}

/// Save a plan to a plain-text file.
pub fn save_plan<P: AsRef<Path>>(plan: &RoutePlan, problem: &Problem, path: P) -> std::io::Result<()> {
    let mut file = File::create(path)?;

    writeln!(file, "CVRP plan for instance: {}", problem.name)?;
    writeln!(file, "Total Distance: {}", plan.total_distance)?;
    writeln!(file, "Routed Distance: {}", plan.routed_distance)?;
    writeln!(file, "Active Vehicles: {}", plan.active_vehicles())?;
    writeln!(file)?;

    for (vehicle, nodes) in plan.routes.iter().enumerate() {
        write!(file, "Vehicle #{}: ", vehicle + 1)?;

        if nodes.len() <= 2 {
            writeln!(file, "Idle")?;
            continue;
        }

        let stops: Vec<String> = nodes.iter().map(|node| node.to_string()).collect();
        writeln!(file, "{}", stops.join(" -> "))?;
        writeln!(file, "  Distance: {}", plan.per_vehicle_distance[vehicle])?;
        writeln!(
            file,
            "  Load: {} / {}",
            plan.per_vehicle_load[vehicle],
            problem.capacity(vehicle)
        )?;
        writeln!(file)?;
    }

    if !plan.unvisited.is_empty() {
        writeln!(file, "Unvisited: {:?}", plan.unvisited)?;
        writeln!(file, "Skip Penalty: {}", plan.skip_penalty_total)?;
    }

    Ok(())
}

/// Summary of one solver run.
#[derive(Debug, Clone)]
pub struct SearchStatistics {
    pub iterations: u64,
    pub runtime: Duration,
    pub initial_cost: i64,
    pub best_cost: i64,
    pub best_distance: i64,
    pub unvisited: usize,
    pub active_vehicles: usize,
    pub restarts: usize,
}

impl SearchStatistics {
    /// Format the statistics as a string.
    pub fn format(&self) -> String {
        format!(
            "Search Statistics:
- Moves Applied: {}
- Runtime: {}
- Initial Cost: {}
- Best Cost: {}
- Best Distance: {}
- Unvisited Stops: {}
- Active Vehicles: {}
- Restarts: {}",
            self.iterations,
            format_duration(self.runtime),
            self.initial_cost,
            self.best_cost,
            self.best_distance,
            self.unvisited,
            self.active_vehicles,
            self.restarts
        )
    }
}
