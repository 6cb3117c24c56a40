//! Problem definition and data structures for matrix-based VRP instances.
//!
//! A [`ProblemData`] is immutable once built. Transformations produce new
//! instances through [`ProblemData::replace`], so several derived instances
//! can share one original as their base.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::matrix::Matrix;

/// Numeric type of distances, durations, loads and time values.
pub type Measure = i64;

/// Sentinel cost meaning "no edge exists".
///
/// Large enough that no real route reaches it, small enough that adding two
/// of them still fits in a [`Measure`].
pub const MAX_VALUE: Measure = 1 << 44;

/// A depot location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Depot {
    pub x: Measure,
    pub y: Measure,
    pub service_duration: Measure,
    pub tw_early: Measure,
    pub tw_late: Measure,
    pub name: String,
}

impl Depot {
    /// Create a depot at the given coordinates with an unbounded time window.
    pub fn new(x: Measure, y: Measure) -> Self {
        Depot {
            x,
            y,
            service_duration: 0,
            tw_early: 0,
            tw_late: MAX_VALUE,
            name: String::new(),
        }
    }

    pub fn with_service_duration(mut self, duration: Measure) -> Self {
        self.service_duration = duration;
        self
    }

    pub fn with_time_window(mut self, early: Measure, late: Measure) -> Self {
        self.tw_early = early;
        self.tw_late = late;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

/// A client location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub x: Measure,
    pub y: Measure,
    pub delivery: Vec<Measure>,
    pub pickup: Vec<Measure>,
    pub service_duration: Measure,
    pub tw_early: Measure,
    pub tw_late: Measure,
    pub release_time: Measure,
    pub prize: Measure,
    pub required: bool,
    pub group: Option<usize>,
    pub name: String,
}

impl Client {
    /// Create a required client at the given coordinates without demand.
    pub fn new(x: Measure, y: Measure) -> Self {
        Client {
            x,
            y,
            delivery: Vec::new(),
            pickup: Vec::new(),
            service_duration: 0,
            tw_early: 0,
            tw_late: MAX_VALUE,
            release_time: 0,
            prize: 0,
            required: true,
            group: None,
            name: String::new(),
        }
    }

    /// Set delivery and pickup amounts; the shorter one is padded with
    /// zeros so both have the same number of load dimensions.
    pub fn with_load(mut self, mut delivery: Vec<Measure>, mut pickup: Vec<Measure>) -> Self {
        let dims = delivery.len().max(pickup.len());
        delivery.resize(dims, 0);
        pickup.resize(dims, 0);
        self.delivery = delivery;
        self.pickup = pickup;
        self
    }

    pub fn with_service_duration(mut self, duration: Measure) -> Self {
        self.service_duration = duration;
        self
    }

    pub fn with_time_window(mut self, early: Measure, late: Measure) -> Self {
        self.tw_early = early;
        self.tw_late = late;
        self
    }

    pub fn with_release_time(mut self, release_time: Measure) -> Self {
        self.release_time = release_time;
        self
    }

    pub fn with_prize(mut self, prize: Measure) -> Self {
        self.prize = prize;
        self
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_group(mut self, group: Option<usize>) -> Self {
        self.group = group;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Number of load dimensions of this client.
    pub fn num_load_dimensions(&self) -> usize {
        self.delivery.len()
    }
}

/// A group of homogeneous vehicles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleType {
    pub num_available: usize,
    pub capacity: Vec<Measure>,
    pub start_depot: usize,
    pub end_depot: usize,
    pub fixed_cost: Measure,
    pub tw_early: Measure,
    pub tw_late: Measure,
    pub max_duration: Measure,
    pub max_distance: Measure,
    pub unit_distance_cost: Measure,
    pub unit_duration_cost: Measure,
    pub profile: usize,
    pub name: String,
}

impl VehicleType {
    /// Create a vehicle type starting and ending at depot 0 on profile 0.
    pub fn new(num_available: usize, capacity: Vec<Measure>) -> Self {
        VehicleType {
            num_available,
            capacity,
            start_depot: 0,
            end_depot: 0,
            fixed_cost: 0,
            tw_early: 0,
            tw_late: MAX_VALUE,
            max_duration: MAX_VALUE,
            max_distance: MAX_VALUE,
            unit_distance_cost: 1,
            unit_duration_cost: 0,
            profile: 0,
            name: String::new(),
        }
    }

    pub fn with_depots(mut self, start: usize, end: usize) -> Self {
        self.start_depot = start;
        self.end_depot = end;
        self
    }

    pub fn with_fixed_cost(mut self, cost: Measure) -> Self {
        self.fixed_cost = cost;
        self
    }

    pub fn with_time_window(mut self, early: Measure, late: Measure) -> Self {
        self.tw_early = early;
        self.tw_late = late;
        self
    }

    pub fn with_profile(mut self, profile: usize) -> Self {
        self.profile = profile;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Return a copy with availability, profile and name overridden. Every
    /// other routing parameter is inherited unchanged.
    pub fn replace(&self, num_available: usize, profile: usize, name: impl Into<String>) -> Self {
        VehicleType {
            num_available,
            profile,
            name: name.into(),
            ..self.clone()
        }
    }
}

/// A depot or a client, addressed by flat location index.
#[derive(Debug, Clone, Copy)]
pub enum Location<'a> {
    Depot(&'a Depot),
    Client(&'a Client),
}

impl Location<'_> {
    pub fn coordinates(&self) -> (Measure, Measure) {
        match self {
            Location::Depot(depot) => (depot.x, depot.y),
            Location::Client(client) => (client.x, client.y),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Location::Depot(depot) => &depot.name,
            Location::Client(client) => &client.name,
        }
    }
}

/// Consistency violations detected when building a [`ProblemData`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProblemError {
    NoDepots,
    NoProfiles,
    ProfileCountMismatch {
        distances: usize,
        durations: usize,
    },
    MatrixDimension {
        profile: usize,
        expected: usize,
        found: usize,
    },
    DepotOutOfRange {
        vehicle_type: usize,
        depot: usize,
    },
    ProfileOutOfRange {
        vehicle_type: usize,
        profile: usize,
    },
    LoadDimensionMismatch {
        expected: usize,
        found: usize,
    },
}

impl fmt::Display for ProblemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProblemError::NoDepots => write!(f, "problem must have at least one depot"),
            ProblemError::NoProfiles => write!(f, "problem must have at least one profile"),
            ProblemError::ProfileCountMismatch {
                distances,
                durations,
            } => write!(
                f,
                "{} distance matrices but {} duration matrices",
                distances, durations
            ),
            ProblemError::MatrixDimension {
                profile,
                expected,
                found,
            } => write!(
                f,
                "matrix of profile {} has size {}, expected {}",
                profile, found, expected
            ),
            ProblemError::DepotOutOfRange {
                vehicle_type,
                depot,
            } => write!(
                f,
                "vehicle type {} references unknown depot {}",
                vehicle_type, depot
            ),
            ProblemError::ProfileOutOfRange {
                vehicle_type,
                profile,
            } => write!(
                f,
                "vehicle type {} references unknown profile {}",
                vehicle_type, profile
            ),
            ProblemError::LoadDimensionMismatch { expected, found } => write!(
                f,
                "inconsistent load dimensions: expected {}, found {}",
                expected, found
            ),
        }
    }
}

impl std::error::Error for ProblemError {}

/// Fields to override in [`ProblemData::replace`]. `None` keeps the
/// source instance's value.
#[derive(Debug, Clone, Default)]
pub struct ProblemDataReplace {
    pub depots: Option<Vec<Depot>>,
    pub clients: Option<Vec<Client>>,
    pub vehicle_types: Option<Vec<VehicleType>>,
    pub distance_matrices: Option<Vec<Matrix>>,
    pub duration_matrices: Option<Vec<Matrix>>,
}

impl ProblemDataReplace {
    pub fn with_clients(mut self, clients: Vec<Client>) -> Self {
        self.clients = Some(clients);
        self
    }

    pub fn with_vehicle_types(mut self, vehicle_types: Vec<VehicleType>) -> Self {
        self.vehicle_types = Some(vehicle_types);
        self
    }

    pub fn with_matrices(mut self, distances: Vec<Matrix>, durations: Vec<Matrix>) -> Self {
        self.distance_matrices = Some(distances);
        self.duration_matrices = Some(durations);
        self
    }
}

/// An immutable VRP instance: depots, clients, fleet and one
/// distance/duration matrix pair per routing profile.
///
/// Locations share a flat index space: depots occupy `0..num_depots()`,
/// clients follow in `num_depots()..num_locations()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProblemData {
    depots: Vec<Depot>,
    clients: Vec<Client>,
    vehicle_types: Vec<VehicleType>,
    distance_matrices: Vec<Matrix>,
    duration_matrices: Vec<Matrix>,
}

impl ProblemData {
    /// Create a new instance, checking its consistency invariants.
    pub fn new(
        depots: Vec<Depot>,
        clients: Vec<Client>,
        vehicle_types: Vec<VehicleType>,
        distance_matrices: Vec<Matrix>,
        duration_matrices: Vec<Matrix>,
    ) -> Result<Self, ProblemError> {
        let data = ProblemData {
            depots,
            clients,
            vehicle_types,
            distance_matrices,
            duration_matrices,
        };
        data.validate()?;
        Ok(data)
    }

    /// Produce a new instance from this one with the given fields replaced.
    pub fn replace(&self, fields: ProblemDataReplace) -> Result<Self, ProblemError> {
        ProblemData::new(
            fields.depots.unwrap_or_else(|| self.depots.clone()),
            fields.clients.unwrap_or_else(|| self.clients.clone()),
            fields
                .vehicle_types
                .unwrap_or_else(|| self.vehicle_types.clone()),
            fields
                .distance_matrices
                .unwrap_or_else(|| self.distance_matrices.clone()),
            fields
                .duration_matrices
                .unwrap_or_else(|| self.duration_matrices.clone()),
        )
    }

    /// Check the invariants every instance must satisfy. Instances that
    /// came through deserialisation should be validated before use.
    pub fn validate(&self) -> Result<(), ProblemError> {
        if self.depots.is_empty() {
            return Err(ProblemError::NoDepots);
        }

        if self.distance_matrices.len() != self.duration_matrices.len() {
            return Err(ProblemError::ProfileCountMismatch {
                distances: self.distance_matrices.len(),
                durations: self.duration_matrices.len(),
            });
        }

        if self.distance_matrices.is_empty() {
            return Err(ProblemError::NoProfiles);
        }

        let expected = self.num_locations();
        let matrices = self.distance_matrices.iter().zip(&self.duration_matrices);
        for (profile, (dist, dur)) in matrices.enumerate() {
            for found in [dist.size(), dur.size()] {
                if found != expected {
                    return Err(ProblemError::MatrixDimension {
                        profile,
                        expected,
                        found,
                    });
                }
            }
        }

        let dims = self.num_load_dimensions();
        for client in &self.clients {
            if client.delivery.len() != dims || client.pickup.len() != dims {
                return Err(ProblemError::LoadDimensionMismatch {
                    expected: dims,
                    found: client.delivery.len().max(client.pickup.len()),
                });
            }
        }

        for (idx, vehicle_type) in self.vehicle_types.iter().enumerate() {
            if vehicle_type.capacity.len() != dims {
                return Err(ProblemError::LoadDimensionMismatch {
                    expected: dims,
                    found: vehicle_type.capacity.len(),
                });
            }

            for depot in [vehicle_type.start_depot, vehicle_type.end_depot] {
                if depot >= self.num_depots() {
                    return Err(ProblemError::DepotOutOfRange {
                        vehicle_type: idx,
                        depot,
                    });
                }
            }

            if vehicle_type.profile >= self.num_profiles() {
                return Err(ProblemError::ProfileOutOfRange {
                    vehicle_type: idx,
                    profile: vehicle_type.profile,
                });
            }
        }

        Ok(())
    }

    pub fn depots(&self) -> &[Depot] {
        &self.depots
    }

    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    pub fn vehicle_types(&self) -> &[VehicleType] {
        &self.vehicle_types
    }

    /// Distance matrix of the given profile.
    ///
    /// # Panics
    ///
    /// Panics if `profile` is not below [`ProblemData::num_profiles`].
    pub fn distance_matrix(&self, profile: usize) -> &Matrix {
        &self.distance_matrices[profile]
    }

    /// Duration matrix of the given profile.
    ///
    /// # Panics
    ///
    /// Panics if `profile` is not below [`ProblemData::num_profiles`].
    pub fn duration_matrix(&self, profile: usize) -> &Matrix {
        &self.duration_matrices[profile]
    }

    pub fn distance_matrices(&self) -> &[Matrix] {
        &self.distance_matrices
    }

    pub fn duration_matrices(&self) -> &[Matrix] {
        &self.duration_matrices
    }

    pub fn num_depots(&self) -> usize {
        self.depots.len()
    }

    pub fn num_clients(&self) -> usize {
        self.clients.len()
    }

    pub fn num_locations(&self) -> usize {
        self.depots.len() + self.clients.len()
    }

    pub fn num_profiles(&self) -> usize {
        self.distance_matrices.len()
    }

    pub fn num_vehicle_types(&self) -> usize {
        self.vehicle_types.len()
    }

    /// Total fleet size over all vehicle types.
    pub fn num_vehicles(&self) -> usize {
        self.vehicle_types.iter().map(|vt| vt.num_available).sum()
    }

    /// Number of load dimensions, taken from the first client or, without
    /// clients, the first vehicle type.
    pub fn num_load_dimensions(&self) -> usize {
        self.clients
            .first()
            .map(Client::num_load_dimensions)
            .or_else(|| self.vehicle_types.first().map(|vt| vt.capacity.len()))
            .unwrap_or(0)
    }

    /// Whether the flat index refers to a depot.
    pub fn is_depot(&self, idx: usize) -> bool {
        idx < self.depots.len()
    }

    /// Look up a location by flat index.
    pub fn location(&self, idx: usize) -> Option<Location<'_>> {
        if idx < self.depots.len() {
            Some(Location::Depot(&self.depots[idx]))
        } else {
            self.clients
                .get(idx - self.depots.len())
                .map(Location::Client)
        }
    }

    /// Euclidean distance matrix over the given depot and client
    /// coordinates, rounded to the nearest integer.
    pub fn euclidean_matrix(depots: &[Depot], clients: &[Client]) -> Matrix {
        let coords: Vec<(Measure, Measure)> = depots
            .iter()
            .map(|d| (d.x, d.y))
            .chain(clients.iter().map(|c| (c.x, c.y)))
            .collect();

        let n = coords.len();
        let mut matrix = Matrix::new(n, 0);

        for i in 0..n {
            for j in 0..n {
                if i != j {
                    let dx = (coords[i].0 - coords[j].0) as f64;
                    let dy = (coords[i].1 - coords[j].1) as f64;
                    matrix.set(i, j, (dx * dx + dy * dy).sqrt().round() as Measure);
                }
            }
        }

        matrix
    }
}
