//! Error types surfaced by the solver.

use thiserror::Error;

/// A violated invariant of the problem model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProblemError {
    #[error("distance matrix must contain at least one node")]
    EmptyMatrix,
    #[error("distance matrix row {row} has {len} entries, expected {expected}")]
    NonSquareMatrix {
        row: usize,
        len: usize,
        expected: usize,
    },
    #[error("distance from {from} to {to} is negative ({value})")]
    NegativeDistance { from: usize, to: usize, value: i64 },
    #[error("distance from {from} to {to} is {value}, above the limit {limit}")]
    DistanceTooLarge {
        from: usize,
        to: usize,
        value: i64,
        limit: i64,
    },
    #[error("matrix entry ({from}, {to}) is not a finite non-negative distance")]
    InvalidDistance { from: usize, to: usize },
    #[error("distance scale must be a finite non-negative number")]
    InvalidScale,
    #[error("distance matrix diagonal at {index} must be 0, found {value}")]
    NonZeroDiagonal { index: usize, value: i64 },
    #[error("depot index {depot} is outside the matrix of size {size}")]
    DepotOutOfRange { depot: usize, size: usize },
    #[error("{vehicles} vehicles exceed the node count {nodes}")]
    TooManyVehicles { vehicles: usize, nodes: usize },
    #[error("demands has {len} entries, expected one per node ({expected})")]
    DemandLength { len: usize, expected: usize },
    #[error("depot demand must be 0, found {value}")]
    DepotDemand { value: i64 },
    #[error("demand of node {node} is negative ({value})")]
    NegativeDemand { node: usize, value: i64 },
    #[error("demand of node {node} is {value}, above the limit {limit}")]
    DemandTooLarge { node: usize, value: i64, limit: i64 },
    #[error("capacities has {len} entries, expected one per vehicle ({expected})")]
    CapacityLength { len: usize, expected: usize },
    #[error("capacity of vehicle {vehicle} is negative ({value})")]
    NegativeCapacity { vehicle: usize, value: i64 },
    #[error("skip_penalties has {len} entries, expected one per node ({expected})")]
    PenaltyLength { len: usize, expected: usize },
    #[error("skip penalty of node {node} is negative ({value})")]
    NegativePenalty { node: usize, value: i64 },
    #[error("skip penalty of node {node} is {value}, above the limit {limit}")]
    PenaltyTooLarge { node: usize, value: i64, limit: i64 },
}

/// Errors returned by the solver and its file boundary.
#[derive(Debug, Error)]
pub enum SolveError {
    /// The request breaks a structural invariant and was rejected before search.
    #[error("invalid problem: {0}")]
    InvalidProblem(#[from] ProblemError),
    /// No assignment can honour the hard constraints, e.g. a fleet of zero vehicles.
    #[error("infeasible problem: {0}")]
    Infeasible(String),
    /// The search finished without producing any assignment.
    #[error("search terminated without producing a solution")]
    NoSolution,
    /// A produced solution breaks a partition or capacity invariant.
    #[error("internal solver error: {0}")]
    Internal(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
