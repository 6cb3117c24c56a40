//! Solver output over the flat location index space.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::matrix::Matrix;
use crate::problem::{Measure, ProblemData, MAX_VALUE};

/// Anything exposing an ordered sequence of visited flat location indices.
pub trait Visits {
    fn visits(&self) -> &[usize];
}

impl Visits for [usize] {
    fn visits(&self) -> &[usize] {
        self
    }
}

impl Visits for Vec<usize> {
    fn visits(&self) -> &[usize] {
        self
    }
}

impl<T: Visits + ?Sized> Visits for &T {
    fn visits(&self) -> &[usize] {
        (**self).visits()
    }
}

/// Represents a route in a solution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    /// Visited locations, excluding the start and end depots
    pub visits: Vec<usize>,
    /// Index of the vehicle type driving this route
    pub vehicle_type: usize,
}

impl Visits for Route {
    fn visits(&self) -> &[usize] {
        &self.visits
    }
}

impl Route {
    /// Create a route for the given vehicle type.
    pub fn new(visits: Vec<usize>, vehicle_type: usize) -> Self {
        Route {
            visits,
            vehicle_type,
        }
    }

    /// Check if the route has no visits.
    pub fn is_empty(&self) -> bool {
        self.visits.is_empty()
    }

    /// Total travel distance from the start depot through all visits to
    /// the end depot, under the vehicle type's profile.
    ///
    /// Returns `None` when some leg has no edge (sentinel cost), the sum
    /// overflows, or the vehicle type is unknown. Time windows and
    /// capacities are not checked.
    pub fn distance(&self, data: &ProblemData) -> Option<Measure> {
        let vehicle_type = data.vehicle_types().get(self.vehicle_type)?;
        self.path_cost(
            data.distance_matrix(vehicle_type.profile),
            vehicle_type.start_depot,
            vehicle_type.end_depot,
        )
    }

    /// Total travel duration, with the same semantics as [`Route::distance`].
    pub fn duration(&self, data: &ProblemData) -> Option<Measure> {
        let vehicle_type = data.vehicle_types().get(self.vehicle_type)?;
        self.path_cost(
            data.duration_matrix(vehicle_type.profile),
            vehicle_type.start_depot,
            vehicle_type.end_depot,
        )
    }

    fn path_cost(&self, matrix: &Matrix, start: usize, end: usize) -> Option<Measure> {
        let stops = std::iter::once(start)
            .chain(self.visits.iter().copied())
            .chain(std::iter::once(end));

        let mut total: Measure = 0;
        let mut prev: Option<usize> = None;

        for stop in stops {
            if stop >= matrix.size() {
                return None;
            }
            if let Some(from) = prev {
                total = checked_leg(total, matrix.get(from, stop))?;
            }
            prev = Some(stop);
        }

        Some(total)
    }
}

/// Add one leg to a running path cost. Sentinel legs are rejected before
/// they are summed, so two sentinels never meet in an addition.
pub fn checked_leg(total: Measure, leg: Measure) -> Option<Measure> {
    if leg >= MAX_VALUE {
        return None;
    }
    total.checked_add(leg).filter(|&sum| sum < MAX_VALUE)
}

/// Represents a complete solution returned by the solver.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    /// The list of routes
    pub routes: Vec<Route>,
}

impl Solution {
    /// Create a solution from its routes.
    pub fn new(routes: Vec<Route>) -> Self {
        Solution { routes }
    }

    /// Get the number of routes.
    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    /// The visit sequences of all routes, in route order.
    pub fn visits(&self) -> Vec<Vec<usize>> {
        self.routes.iter().map(|route| route.visits.clone()).collect()
    }

    /// Sum of route distances, `None` if any route is unreachable.
    pub fn distance(&self, data: &ProblemData) -> Option<Measure> {
        self.routes
            .iter()
            .try_fold(0, |total, route| checked_leg(total, route.distance(data)?))
    }
}

impl fmt::Debug for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Solution:")?;
        writeln!(f, "  Routes: {}", self.routes.len())?;

        for (i, route) in self.routes.iter().enumerate() {
            writeln!(
                f,
                "  Route {}: {:?} (Vehicle type: {})",
                i, route.visits, route.vehicle_type
            )?;
        }

        Ok(())
    }
}
