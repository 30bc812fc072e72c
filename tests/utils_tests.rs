//! Unit tests for the reporting helpers.

use depot_router::plan::RoutePlan;
use depot_router::problem::{Problem, ProblemInput};
use depot_router::solution::{Route, Solution};
use depot_router::utils::{format_duration, save_plan, SearchStatistics};
use std::time::Duration;

fn create_test_problem() -> Problem {
    let matrix = vec![
        vec![0, 10, 15, 20],
        vec![10, 0, 35, 25],
        vec![15, 35, 0, 30],
        vec![20, 25, 30, 0],
    ];
    let input = ProblemInput::new(matrix, 2, vec![4, 4]).with_name("four-stops");
    Problem::from_input(input).unwrap()
}

#[test]
fn test_format_duration() {
    assert_eq!(format_duration(Duration::from_millis(0)), "0h 00m 00s 000ms");
    assert_eq!(format_duration(Duration::from_millis(1_234)), "0h 00m 01s 234ms");
    assert_eq!(
        format_duration(Duration::from_secs(3 * 3600 + 5 * 60 + 7)),
        "3h 05m 07s 000ms"
    );
}

#[test]
fn test_save_plan() {
    let problem = create_test_problem();
    let mut solution = Solution::new(&problem);
    solution.routes[0] = Route::with_customers(0, vec![1, 3], &problem);
    solution.unvisited.insert(2);
    solution.evaluate(&problem);
    let plan = RoutePlan::from_solution(&solution, &problem).unwrap();

    let path = std::env::temp_dir().join("depot_router_save_plan.txt");
    save_plan(&plan, &problem, &path).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();

    assert!(text.starts_with("CVRP plan for instance: four-stops"));
    assert!(text.contains("Total Distance: 100055"));
    assert!(text.contains("Vehicle #1: 0 -> 1 -> 3 -> 0"));
    assert!(text.contains("  Load: 2 / 4"));
    assert!(text.contains("Vehicle #2: Idle"));
    assert!(text.contains("Unvisited: [2]"));

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_statistics_format() {
    let statistics = SearchStatistics {
        iterations: 12,
        runtime: Duration::from_millis(250),
        initial_cost: 120,
        best_cost: 80,
        best_distance: 80,
        unvisited: 0,
        active_vehicles: 1,
        restarts: 2,
    };

    let text = statistics.format();
    assert!(text.contains("- Moves Applied: 12"));
    assert!(text.contains("- Runtime: 0h 00m 00s 250ms"));
    assert!(text.contains("- Initial Cost: 120"));
    assert!(text.contains("- Best Cost: 80"));
    assert!(text.contains("- Restarts: 2"));
}
