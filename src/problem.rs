//! Problem definition for depot-based capacitated routing.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::{ProblemError, SolveError};
use crate::matrix::DistanceMatrix;

/// Penalty charged for each stop left out of every route unless overridden.
pub const DEFAULT_SKIP_PENALTY: i64 = 100_000;

/// Largest distance, demand or skip penalty accepted for a problem with
/// `node_count` nodes.
///
/// A solution touches at most `2 * node_count` arcs and `node_count`
/// penalties, and no move delta sums more than eight terms, so every cost
/// computed from values below this limit fits in an `i64`.
pub fn value_limit(node_count: usize) -> i64 {
    let terms = i64::try_from(node_count).unwrap_or(i64::MAX).saturating_mul(4).max(8);
    i64::MAX / terms
}

fn default_name() -> String {
    "unnamed".to_string()
}

fn default_skip_penalty() -> i64 {
    DEFAULT_SKIP_PENALTY
}

/// Raw, unvalidated description of a solve request.
///
/// This is the serde-facing shape of an instance file. It only becomes a
/// [`Problem`] through [`Problem::from_input`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemInput {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default)]
    pub distance_matrix: Vec<Vec<i64>>,
    pub num_vehicles: usize,
    #[serde(default)]
    pub depot: usize,
    /// One entry per node. `None` means one unit per stop and zero at the depot.
    #[serde(default)]
    pub demands: Option<Vec<i64>>,
    pub capacities: Vec<i64>,
    #[serde(default = "default_skip_penalty")]
    pub skip_penalty: i64,
    /// Per-node penalties overriding `skip_penalty`.
    #[serde(default)]
    pub skip_penalties: Option<Vec<i64>>,
}

impl ProblemInput {
    /// Create an input with depot 0, unit demands and the default penalty.
    pub fn new(distance_matrix: Vec<Vec<i64>>, num_vehicles: usize, capacities: Vec<i64>) -> Self {
        ProblemInput {
            name: default_name(),
            distance_matrix,
            num_vehicles,
            depot: 0,
            demands: None,
            capacities,
            skip_penalty: DEFAULT_SKIP_PENALTY,
            skip_penalties: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_depot(mut self, depot: usize) -> Self {
        self.depot = depot;
        self
    }

    pub fn with_demands(mut self, demands: Vec<i64>) -> Self {
        self.demands = Some(demands);
        self
    }

    pub fn with_skip_penalty(mut self, penalty: i64) -> Self {
        self.skip_penalty = penalty;
        self
    }

    pub fn with_skip_penalties(mut self, penalties: Vec<i64>) -> Self {
        self.skip_penalties = Some(penalties);
        self
    }

    /// Load an instance from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SolveError> {
        let file = File::open(path)?;
        let input = serde_json::from_reader(BufReader::new(file))?;
        Ok(input)
    }
}

/// A validated, immutable CVRP instance.
#[derive(Debug, Clone)]
pub struct Problem {
    pub name: String,
    distances: DistanceMatrix,
    depot: usize,
    num_vehicles: usize,
    demands: Vec<i64>,
    capacities: Vec<i64>,
    skip_penalties: Vec<i64>,
}

impl Problem {
    /// Create a problem with the depot at node 0, the default skip penalty
    /// and explicit demands.
    pub fn new(
        distance_matrix: Vec<Vec<i64>>,
        num_vehicles: usize,
        demands: Vec<i64>,
        capacities: Vec<i64>,
    ) -> Result<Self, SolveError> {
        Self::from_input(
            ProblemInput::new(distance_matrix, num_vehicles, capacities).with_demands(demands),
        )
    }

    /// Validate an input and build the problem from it.
    pub fn from_input(input: ProblemInput) -> Result<Self, SolveError> {
        let ProblemInput {
            name,
            distance_matrix,
            num_vehicles,
            depot,
            demands,
            capacities,
            skip_penalty,
            skip_penalties,
        } = input;

        let n = distance_matrix.len();
        if n == 0 {
            return Err(ProblemError::EmptyMatrix.into());
        }
        let limit = value_limit(n);
        for (i, row) in distance_matrix.iter().enumerate() {
            if row.len() != n {
                return Err(ProblemError::NonSquareMatrix {
                    row: i,
                    len: row.len(),
                    expected: n,
                }
                .into());
            }
            for (j, &value) in row.iter().enumerate() {
                if value < 0 {
                    return Err(ProblemError::NegativeDistance {
                        from: i,
                        to: j,
                        value,
                    }
                    .into());
                }
                if value > limit {
                    return Err(ProblemError::DistanceTooLarge {
                        from: i,
                        to: j,
                        value,
                        limit,
                    }
                    .into());
                }
            }
            if row[i] != 0 {
                return Err(ProblemError::NonZeroDiagonal {
                    index: i,
                    value: row[i],
                }
                .into());
            }
        }

        if depot >= n {
            return Err(ProblemError::DepotOutOfRange { depot, size: n }.into());
        }

        if num_vehicles == 0 {
            return Err(SolveError::Infeasible(
                "the fleet has no vehicles".to_string(),
            ));
        }
        if num_vehicles > n {
            return Err(ProblemError::TooManyVehicles {
                vehicles: num_vehicles,
                nodes: n,
            }
            .into());
        }

        let demands = demands.unwrap_or_else(|| {
            (0..n).map(|i| if i == depot { 0 } else { 1 }).collect()
        });
        if demands.len() != n {
            return Err(ProblemError::DemandLength {
                len: demands.len(),
                expected: n,
            }
            .into());
        }
        if demands[depot] != 0 {
            return Err(ProblemError::DepotDemand {
                value: demands[depot],
            }
            .into());
        }
        if let Some((node, &value)) = demands.iter().enumerate().find(|&(_, &d)| d < 0) {
            return Err(ProblemError::NegativeDemand { node, value }.into());
        }
        if let Some((node, &value)) = demands.iter().enumerate().find(|&(_, &d)| d > limit) {
            return Err(ProblemError::DemandTooLarge { node, value, limit }.into());
        }

        if capacities.len() != num_vehicles {
            return Err(ProblemError::CapacityLength {
                len: capacities.len(),
                expected: num_vehicles,
            }
            .into());
        }
        if let Some((vehicle, &value)) = capacities.iter().enumerate().find(|&(_, &c)| c < 0) {
            return Err(ProblemError::NegativeCapacity { vehicle, value }.into());
        }

        let mut skip_penalties = skip_penalties.unwrap_or_else(|| vec![skip_penalty; n]);
        if skip_penalties.len() != n {
            return Err(ProblemError::PenaltyLength {
                len: skip_penalties.len(),
                expected: n,
            }
            .into());
        }
        if let Some((node, &value)) = skip_penalties
            .iter()
            .enumerate()
            .find(|&(i, &p)| i != depot && p < 0)
        {
            return Err(ProblemError::NegativePenalty { node, value }.into());
        }
        if let Some((node, &value)) = skip_penalties
            .iter()
            .enumerate()
            .find(|&(i, &p)| i != depot && p > limit)
        {
            return Err(ProblemError::PenaltyTooLarge { node, value, limit }.into());
        }
        skip_penalties[depot] = 0;

        let problem = Problem {
            name,
            distances: DistanceMatrix::from_rows(&distance_matrix),
            depot,
            num_vehicles,
            demands,
            capacities,
            skip_penalties,
        };

        for node in problem.unservable_nodes() {
            log::warn!(
                "node {} has demand {} above every vehicle capacity and can never be served",
                node,
                problem.demand(node)
            );
        }

        Ok(problem)
    }

    /// Cost of travelling between two node indices.
    #[inline]
    pub fn get_distance(&self, from: usize, to: usize) -> i64 {
        self.distances.get(from, to)
    }

    pub fn distance_matrix(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// Number of nodes, depot included.
    pub fn node_count(&self) -> usize {
        self.demands.len()
    }

    /// Number of stops (nodes other than the depot).
    pub fn get_customer_count(&self) -> usize {
        self.node_count() - 1
    }

    /// Stop indices in ascending order, depot excluded.
    pub fn customers(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.node_count()).filter(move |&i| i != self.depot)
    }

    pub fn depot(&self) -> usize {
        self.depot
    }

    pub fn num_vehicles(&self) -> usize {
        self.num_vehicles
    }

    #[inline]
    pub fn demand(&self, node: usize) -> i64 {
        self.demands[node]
    }

    pub fn demands(&self) -> &[i64] {
        &self.demands
    }

    #[inline]
    pub fn capacity(&self, vehicle: usize) -> i64 {
        self.capacities[vehicle]
    }

    pub fn capacities(&self) -> &[i64] {
        &self.capacities
    }

    /// Penalty charged when `node` is left unvisited.
    #[inline]
    pub fn skip_penalty(&self, node: usize) -> i64 {
        self.skip_penalties[node]
    }

    /// Stops whose demand exceeds the capacity of every vehicle.
    pub fn unservable_nodes(&self) -> Vec<usize> {
        let max_capacity = self.capacities.iter().copied().max().unwrap_or(0);
        self.customers()
            .filter(|&node| self.demand(node) > max_capacity)
            .collect()
    }
}
