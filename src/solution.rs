//! Solution representation for the CVRP.

use crate::problem::Problem;
use itertools::Itertools;
use std::collections::BTreeSet;
use std::fmt;

/// The route driven by one vehicle, from the depot back to the depot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// The vehicle owning this route
    pub vehicle: usize,
    /// The sequence of stops (excluding the depot at both ends)
    pub customers: Vec<usize>,
    /// The total demand carried on the route
    pub load: i64,
    /// The total distance of the route
    pub distance: i64,
    /// Has this route been modified since last evaluation
    pub modified: bool,
}

impl Route {
    /// Create an empty route for a vehicle.
    pub fn new(vehicle: usize) -> Self {
        Route {
            vehicle,
            customers: Vec::new(),
            load: 0,
            distance: 0,
            modified: true,
        }
    }

    /// Create a route visiting the given stops in order.
    pub fn with_customers(vehicle: usize, customers: Vec<usize>, problem: &Problem) -> Self {
        let mut route = Route::new(vehicle);
        route.customers = customers;
        route.refresh(problem);
        route
    }

    /// Recompute distance and load if the route was modified.
    pub fn refresh(&mut self, problem: &Problem) {
        if !self.modified {
            return;
        }
        self.distance = route_distance(&self.customers, problem);
        self.load = self.customers.iter().map(|&c| problem.demand(c)).sum();
        self.modified = false;
    }

    /// Check if the route is empty.
    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    /// Capacity left on the owning vehicle.
    pub fn spare_capacity(&self, problem: &Problem) -> i64 {
        problem.capacity(self.vehicle) - self.load
    }

    /// Check if the route exceeds the owning vehicle's capacity.
    pub fn exceeds_capacity(&self, problem: &Problem) -> bool {
        self.load > problem.capacity(self.vehicle)
    }

    /// The full node sequence including the depot at both ends.
    pub fn sequence(&self, depot: usize) -> Vec<usize> {
        let mut nodes = Vec::with_capacity(self.customers.len() + 2);
        nodes.push(depot);
        nodes.extend_from_slice(&self.customers);
        nodes.push(depot);
        nodes
    }
}

/// Distance of the depot-to-depot cycle through `customers`.
pub fn route_distance(customers: &[usize], problem: &Problem) -> i64 {
    if customers.is_empty() {
        return 0;
    }
    let depot = problem.depot();
    std::iter::once(depot)
        .chain(customers.iter().copied())
        .chain(std::iter::once(depot))
        .tuple_windows()
        .map(|(from, to)| problem.get_distance(from, to))
        .sum()
}

/// A complete assignment: one route per vehicle plus the skipped stops.
#[derive(Clone, PartialEq, Eq)]
pub struct Solution {
    /// One route per vehicle, indexed by vehicle
    pub routes: Vec<Route>,
    /// Stops left out of every route
    pub unvisited: BTreeSet<usize>,
    /// The total distance over all routes
    pub distance: i64,
    /// The sum of skip penalties over the unvisited stops
    pub penalty: i64,
    /// The objective: distance plus penalty
    pub cost: i64,
}

impl Solution {
    /// Create a solution where every vehicle stays at the depot and no stop is assigned.
    pub fn new(problem: &Problem) -> Self {
        Solution {
            routes: (0..problem.num_vehicles()).map(Route::new).collect(),
            unvisited: BTreeSet::new(),
            distance: 0,
            penalty: 0,
            cost: 0,
        }
    }

    /// Evaluate the solution, refreshing modified routes and the objective.
    pub fn evaluate(&mut self, problem: &Problem) {
        let mut total_distance = 0;

        for route in &mut self.routes {
            route.refresh(problem);
            total_distance += route.distance;
        }

        self.distance = total_distance;
        self.penalty = self
            .unvisited
            .iter()
            .map(|&node| problem.skip_penalty(node))
            .sum();
        self.cost = self.distance + self.penalty;
    }

    /// Whether every route respects its vehicle's capacity.
    pub fn is_capacity_feasible(&self, problem: &Problem) -> bool {
        self.routes.iter().all(|route| !route.exceeds_capacity(problem))
    }

    /// Locate a stop as `(route index, position)`.
    pub fn find_customer(&self, customer: usize) -> Option<(usize, usize)> {
        self.routes.iter().enumerate().find_map(|(r_idx, route)| {
            route
                .customers
                .iter()
                .position(|&c| c == customer)
                .map(|pos| (r_idx, pos))
        })
    }

    /// Number of stops assigned to some route.
    pub fn routed_count(&self) -> usize {
        self.routes.iter().map(|route| route.customers.len()).sum()
    }

    /// Check the partition and capacity invariants against the problem.
    pub fn verify(&self, problem: &Problem) -> Result<(), String> {
        if self.routes.len() != problem.num_vehicles() {
            return Err(format!(
                "{} routes for {} vehicles",
                self.routes.len(),
                problem.num_vehicles()
            ));
        }

        let mut seen = vec![false; problem.node_count()];
        for (r_idx, route) in self.routes.iter().enumerate() {
            if route.vehicle != r_idx {
                return Err(format!("route {} is owned by vehicle {}", r_idx, route.vehicle));
            }
            for &customer in &route.customers {
                if customer >= problem.node_count() || customer == problem.depot() {
                    return Err(format!("route {} visits invalid node {}", r_idx, customer));
                }
                if seen[customer] {
                    return Err(format!("node {} is visited more than once", customer));
                }
                seen[customer] = true;
            }
            let load: i64 = route.customers.iter().map(|&c| problem.demand(c)).sum();
            if load > problem.capacity(route.vehicle) {
                return Err(format!(
                    "route {} carries {} over capacity {}",
                    r_idx,
                    load,
                    problem.capacity(route.vehicle)
                ));
            }
        }

        for &node in &self.unvisited {
            if node >= problem.node_count() || node == problem.depot() {
                return Err(format!("invalid unvisited node {}", node));
            }
            if seen[node] {
                return Err(format!("node {} is both routed and unvisited", node));
            }
            seen[node] = true;
        }

        match problem.customers().find(|&node| !seen[node]) {
            Some(node) => Err(format!("node {} is neither routed nor unvisited", node)),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Solution:")?;
        writeln!(f, "  Cost: {}", self.cost)?;
        writeln!(f, "  Distance: {}", self.distance)?;
        writeln!(f, "  Penalty: {}", self.penalty)?;
        writeln!(f, "  Unvisited: {:?}", self.unvisited)?;

        for route in &self.routes {
            writeln!(
                f,
                "  Vehicle {}: {:?} (Load: {}, Distance: {})",
                route.vehicle, route.customers, route.load, route.distance
            )?;
        }

        Ok(())
    }
}
