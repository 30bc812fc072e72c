//! Unit tests for problem validation.

use depot_router::error::{ProblemError, SolveError};
use depot_router::problem::{value_limit, Problem, ProblemInput, DEFAULT_SKIP_PENALTY};

/// The four-node instance used throughout the tests.
fn sample_matrix() -> Vec<Vec<i64>> {
    vec![
        vec![0, 10, 15, 20],
        vec![10, 0, 35, 25],
        vec![15, 35, 0, 30],
        vec![20, 25, 30, 0],
    ]
}

fn invalid(input: ProblemInput) -> ProblemError {
    match Problem::from_input(input) {
        Err(SolveError::InvalidProblem(error)) => error,
        other => panic!("expected an invalid problem, got {:?}", other.map(|p| p.name)),
    }
}

#[test]
fn test_valid_problem() {
    let problem = Problem::new(sample_matrix(), 2, vec![0, 1, 2, 3], vec![5, 6]).unwrap();

    assert_eq!(problem.node_count(), 4);
    assert_eq!(problem.get_customer_count(), 3);
    assert_eq!(problem.depot(), 0);
    assert_eq!(problem.num_vehicles(), 2);
    assert_eq!(problem.demand(3), 3);
    assert_eq!(problem.capacity(1), 6);
    assert_eq!(problem.get_distance(1, 3), 25);
    assert_eq!(problem.customers().collect::<Vec<_>>(), vec![1, 2, 3]);
    assert!(problem.distance_matrix().is_symmetric());
}

#[test]
fn test_default_demands_and_penalties() {
    let problem = Problem::from_input(ProblemInput::new(sample_matrix(), 1, vec![3])).unwrap();

    assert_eq!(problem.demands(), &[0, 1, 1, 1]);
    assert_eq!(problem.skip_penalty(0), 0);
    for node in 1..4 {
        assert_eq!(problem.skip_penalty(node), DEFAULT_SKIP_PENALTY);
    }
}

#[test]
fn test_custom_depot() {
    let input = ProblemInput::new(sample_matrix(), 1, vec![3]).with_depot(2);
    let problem = Problem::from_input(input).unwrap();

    assert_eq!(problem.depot(), 2);
    assert_eq!(problem.demands(), &[1, 1, 0, 1]);
    assert_eq!(problem.customers().collect::<Vec<_>>(), vec![0, 1, 3]);
    assert_eq!(problem.skip_penalty(2), 0);
}

#[test]
fn test_per_node_penalties() {
    let input = ProblemInput::new(sample_matrix(), 1, vec![3]).with_skip_penalties(vec![7, 1, 2, 3]);
    let problem = Problem::from_input(input).unwrap();

    // The depot never carries a penalty
    assert_eq!(problem.skip_penalty(0), 0);
    assert_eq!(problem.skip_penalty(3), 3);
}

#[test]
fn test_matrix_errors() {
    assert_eq!(
        invalid(ProblemInput::new(vec![], 1, vec![1])),
        ProblemError::EmptyMatrix
    );
    assert_eq!(
        invalid(ProblemInput::new(vec![vec![0, 1], vec![1]], 1, vec![1])),
        ProblemError::NonSquareMatrix {
            row: 1,
            len: 1,
            expected: 2
        }
    );
    assert_eq!(
        invalid(ProblemInput::new(vec![vec![0, -1], vec![1, 0]], 1, vec![1])),
        ProblemError::NegativeDistance {
            from: 0,
            to: 1,
            value: -1
        }
    );
    assert_eq!(
        invalid(ProblemInput::new(vec![vec![0, 1], vec![1, 5]], 1, vec![1])),
        ProblemError::NonZeroDiagonal { index: 1, value: 5 }
    );
}

#[test]
fn test_depot_and_fleet_errors() {
    assert_eq!(
        invalid(ProblemInput::new(sample_matrix(), 1, vec![1]).with_depot(4)),
        ProblemError::DepotOutOfRange { depot: 4, size: 4 }
    );
    assert_eq!(
        invalid(ProblemInput::new(sample_matrix(), 5, vec![1; 5])),
        ProblemError::TooManyVehicles {
            vehicles: 5,
            nodes: 4
        }
    );
    assert_eq!(
        invalid(ProblemInput::new(sample_matrix(), 2, vec![1])),
        ProblemError::CapacityLength {
            len: 1,
            expected: 2
        }
    );
    assert_eq!(
        invalid(ProblemInput::new(sample_matrix(), 2, vec![1, -3])),
        ProblemError::NegativeCapacity {
            vehicle: 1,
            value: -3
        }
    );
}

#[test]
fn test_zero_vehicles_is_infeasible() {
    let result = Problem::from_input(ProblemInput::new(sample_matrix(), 0, vec![]));
    assert!(matches!(result, Err(SolveError::Infeasible(_))));
}

#[test]
fn test_demand_errors() {
    let base = || ProblemInput::new(sample_matrix(), 1, vec![3]);

    assert_eq!(
        invalid(base().with_demands(vec![0, 1, 1])),
        ProblemError::DemandLength {
            len: 3,
            expected: 4
        }
    );
    assert_eq!(
        invalid(base().with_demands(vec![2, 1, 1, 1])),
        ProblemError::DepotDemand { value: 2 }
    );
    assert_eq!(
        invalid(base().with_demands(vec![0, 1, -1, 1])),
        ProblemError::NegativeDemand { node: 2, value: -1 }
    );
}

#[test]
fn test_penalty_errors() {
    let base = || ProblemInput::new(sample_matrix(), 1, vec![3]);

    assert_eq!(
        invalid(base().with_skip_penalties(vec![0, 1])),
        ProblemError::PenaltyLength {
            len: 2,
            expected: 4
        }
    );
    assert_eq!(
        invalid(base().with_skip_penalty(-5)),
        ProblemError::NegativePenalty { node: 1, value: -5 }
    );
}

#[test]
fn test_capacity_below_demand_is_not_an_error() {
    let problem = Problem::new(sample_matrix(), 2, vec![0, 1, 9, 1], vec![3, 4]).unwrap();
    assert_eq!(problem.unservable_nodes(), vec![2]);
}

#[test]
fn test_error_messages_name_the_invariant() {
    let err = Problem::new(sample_matrix(), 1, vec![1, 1, 1, 1], vec![3]).unwrap_err();
    assert_eq!(err.to_string(), "invalid problem: depot demand must be 0, found 1");
}

#[test]
fn test_from_file() {
    let path = std::env::temp_dir().join("depot_router_problem_from_file.json");
    std::fs::write(
        &path,
        r#"{
            "name": "four-stops",
            "distance_matrix": [[0,10,15,20],[10,0,35,25],[15,35,0,30],[20,25,30,0]],
            "num_vehicles": 1,
            "capacities": [10]
        }"#,
    )
    .unwrap();

    let input = ProblemInput::from_file(&path).unwrap();
    assert_eq!(input.name, "four-stops");
    assert_eq!(input.depot, 0);
    assert_eq!(input.skip_penalty, DEFAULT_SKIP_PENALTY);
    assert!(input.demands.is_none());

    let problem = Problem::from_input(input).unwrap();
    assert_eq!(problem.demands(), &[0, 1, 1, 1]);

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_from_file_reports_json_errors() {
    let path = std::env::temp_dir().join("depot_router_problem_bad.json");
    std::fs::write(&path, "{ not json").unwrap();

    assert!(matches!(ProblemInput::from_file(&path), Err(SolveError::Json(_))));

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_values_too_large_for_cost_sums() {
    let limit = value_limit(3);
    assert_eq!(limit, i64::MAX / 12);

    let huge = i64::MAX / 2 + 1;
    let matrix = vec![vec![0, huge, huge], vec![huge, 0, huge], vec![huge, huge, 0]];
    assert_eq!(
        invalid(ProblemInput::new(matrix, 1, vec![10])),
        ProblemError::DistanceTooLarge {
            from: 0,
            to: 1,
            value: huge,
            limit
        }
    );

    let small = || ProblemInput::new(vec![vec![0, 1, 1], vec![1, 0, 1], vec![1, 1, 0]], 1, vec![0]);
    assert_eq!(
        invalid(small().with_skip_penalty(i64::MAX)),
        ProblemError::PenaltyTooLarge {
            node: 1,
            value: i64::MAX,
            limit
        }
    );
    assert_eq!(
        invalid(small().with_demands(vec![0, limit + 1, 1])),
        ProblemError::DemandTooLarge {
            node: 1,
            value: limit + 1,
            limit
        }
    );

    // The depot's own penalty entry is ignored
    let depot_penalty = small().with_skip_penalties(vec![i64::MAX, 5, 5]);
    assert!(Problem::from_input(depot_penalty).is_ok());
}
