//! # VRP Breaks
//!
//! Mandatory driver breaks for routing solvers that only understand client
//! visits.
//!
//! The crate appends one synthetic "break" client per vehicle to an
//! immutable, matrix-based problem instance and gives every vehicle its own
//! routing profile in which only its own break node is reachable. After the
//! solver has run, the routes are reconciled: each route gets a break
//! visit and routes consisting of breaks only are dropped.
//!
//! ```
//! use vrp_breaks::config::VehicleBreakConfig;
//! use vrp_breaks::matrix::Matrix;
//! use vrp_breaks::problem::{Client, Depot, ProblemData, VehicleType};
//!
//! let depots = vec![Depot::new(0, 0)];
//! let clients = vec![Client::new(3, 4).with_load(vec![1], vec![0])];
//! let matrix = Matrix::from_rows(vec![vec![0, 5], vec![5, 0]]).unwrap();
//! let fleet = vec![VehicleType::new(2, vec![10])];
//! let data = ProblemData::new(depots, clients, fleet, vec![matrix.clone()], vec![matrix]).unwrap();
//!
//! let (with_breaks, breaks) = vrp_breaks::add_one_break_per_vehicle(
//!     &data,
//!     &VehicleBreakConfig::new(30, (660, 840)),
//! )
//! .unwrap();
//!
//! assert_eq!(breaks, vec![2, 3]);
//! assert_eq!(with_breaks.num_profiles(), 2);
//! ```

pub mod breaks;
pub mod config;
pub mod error;
pub mod matrix;
pub mod problem;
pub mod profiles;
pub mod repair;
pub mod solution;
pub mod utils;

pub use crate::breaks::add_per_vehicle_break_nodes;
pub use crate::error::BreakError;
pub use crate::problem::{ProblemData, MAX_VALUE};
pub use crate::profiles::add_one_break_per_vehicle;
pub use crate::repair::{remove_break_only_routes, repair_one_break_per_route, repair_solution};
