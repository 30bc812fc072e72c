//! Tests for extracting and reporting route plans.

use depot_router::error::SolveError;
use depot_router::plan::RoutePlan;
use depot_router::problem::{Problem, ProblemInput};
use depot_router::solution::{Route, Solution};

fn sample_matrix() -> Vec<Vec<i64>> {
    vec![
        vec![0, 10, 15, 20],
        vec![10, 0, 35, 25],
        vec![15, 35, 0, 30],
        vec![20, 25, 30, 0],
    ]
}

fn create_test_problem() -> Problem {
    Problem::new(sample_matrix(), 2, vec![0, 1, 1, 1], vec![5, 5]).unwrap()
}

fn one_vehicle_solution(problem: &Problem) -> Solution {
    let mut solution = Solution::new(problem);
    solution.routes[0] = Route::with_customers(0, vec![1, 3, 2], problem);
    solution.evaluate(problem);
    solution
}

#[test]
fn test_idle_vehicle_gets_depot_round_trip() {
    let problem = create_test_problem();
    let plan = RoutePlan::from_solution(&one_vehicle_solution(&problem), &problem).unwrap();

    assert_eq!(plan.routes, vec![vec![0, 1, 3, 2, 0], vec![0, 0]]);
    assert_eq!(plan.per_vehicle_distance, vec![80, 0]);
    assert_eq!(plan.per_vehicle_load, vec![3, 0]);
    assert_eq!(plan.routed_distance, 80);
    assert_eq!(plan.skip_penalty_total, 0);
    assert_eq!(plan.total_distance, 80);
    assert_eq!(plan.active_vehicles(), 1);
}

#[test]
fn test_unvisited_stops_are_charged() {
    let problem = create_test_problem();
    let mut solution = Solution::new(&problem);
    solution.routes[1] = Route::with_customers(1, vec![3], &problem);
    solution.unvisited.extend([2, 1]);
    solution.evaluate(&problem);

    let plan = RoutePlan::from_solution(&solution, &problem).unwrap();

    assert_eq!(plan.unvisited, vec![1, 2]);
    assert_eq!(plan.routed_distance, 40);
    assert_eq!(plan.skip_penalty_total, 200_000);
    assert_eq!(plan.total_distance, solution.cost);
}

#[test]
fn test_broken_solution_is_an_internal_error() {
    let problem = create_test_problem();

    // Nothing routed and nothing marked unvisited
    let empty = Solution::new(&problem);
    assert!(matches!(
        RoutePlan::from_solution(&empty, &problem),
        Err(SolveError::Internal(_))
    ));
}

#[test]
fn test_non_zero_depot() {
    let input = ProblemInput::new(sample_matrix(), 1, vec![5]).with_depot(2);
    let problem = Problem::from_input(input).unwrap();

    let mut solution = Solution::new(&problem);
    solution.routes[0] = Route::with_customers(0, vec![0, 1], &problem);
    solution.unvisited.insert(3);
    solution.evaluate(&problem);

    let plan = RoutePlan::from_solution(&solution, &problem).unwrap();

    assert_eq!(plan.routes, vec![vec![2, 0, 1, 2]]);
    assert_eq!(plan.per_vehicle_distance, vec![15 + 10 + 35]);
    assert_eq!(plan.per_vehicle_load, vec![2]);
    assert_eq!(plan.unvisited, vec![3]);
    assert_eq!(plan.total_distance, 60 + 100_000);
}

#[test]
fn test_display() {
    let problem = create_test_problem();
    let plan = RoutePlan::from_solution(&one_vehicle_solution(&problem), &problem).unwrap();

    assert_eq!(
        plan.to_string(),
        "Vehicle 1: 0 -> 1 -> 3 -> 2 -> 0 (distance 80, load 3)\n\
         Vehicle 2: 0 -> 0 (distance 0, load 0)\n\
         Total distance: 80 (routed 80)"
    );
}

#[test]
fn test_json_round_trip() {
    let problem = create_test_problem();
    let plan = RoutePlan::from_solution(&one_vehicle_solution(&problem), &problem).unwrap();

    let json = plan.to_json().unwrap();
    assert!(json.contains("\"total_distance\": 80"));

    let parsed: RoutePlan = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, plan);
}
