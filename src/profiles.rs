//! One routing profile per vehicle, each admitting exactly one break node.
//!
//! The solver has no notion of "this client may only be served by that
//! vehicle", but it does honour per-profile travel costs. Giving every
//! vehicle its own profile in which all foreign break nodes are unreachable
//! encodes the exclusivity as plain matrix data.

use log::{debug, info, warn};

use crate::breaks::add_per_vehicle_break_nodes;
use crate::config::VehicleBreakConfig;
use crate::error::BreakError;
use crate::matrix::Matrix;
use crate::problem::{ProblemData, ProblemDataReplace, VehicleType, MAX_VALUE};

/// Which locations `vehicle` may visit, given that breaks occupy
/// `old_num_locations..new_num_locations` in vehicle order.
///
/// Depots and the original clients are always reachable; of the breaks,
/// only the vehicle's own one is.
pub fn reachable_mask(
    num_depots: usize,
    old_num_locations: usize,
    new_num_locations: usize,
    vehicle: usize,
) -> Vec<bool> {
    let mut allowed = vec![false; new_num_locations];

    allowed[..num_depots].fill(true);
    allowed[num_depots..old_num_locations].fill(true);

    let own_break = old_num_locations + vehicle;
    if own_break < new_num_locations {
        allowed[own_break] = true;
    }

    allowed
}

/// Build the distance and duration matrices of one vehicle's profile from
/// the shared template. The template is never modified.
pub fn vehicle_profile_matrices(
    base_dist: &Matrix,
    base_dur: &Matrix,
    allowed: &[bool],
) -> (Matrix, Matrix) {
    let size = allowed.len();
    let mut dist = base_dist.clone();
    let mut dur = base_dur.clone();

    // New entries of an undersized template default to unreachable, not
    // free, so unassigned breaks are never silently usable.
    if dist.size() != size {
        warn!(
            "template distance matrix has size {}, re-expanding to {}",
            dist.size(),
            size
        );
        dist = dist.expanded(size, MAX_VALUE);
    }
    if dur.size() != size {
        warn!(
            "template duration matrix has size {}, re-expanding to {}",
            dur.size(),
            size
        );
        dur = dur.expanded(size, MAX_VALUE);
    }

    for (idx, _) in allowed.iter().enumerate().filter(|(_, ok)| !**ok) {
        dist.forbid(idx, MAX_VALUE);
        dur.forbid(idx, MAX_VALUE);
    }

    // A sentinel on the diagonal would make route start/end bookkeeping
    // infeasible.
    dist.fill_diagonal(0);
    dur.fill_diagonal(0);

    (dist, dur)
}

/// One single-vehicle type per vehicle, cloned round-robin from the
/// original types and bound to the profile with the vehicle's index.
pub fn per_vehicle_types(templates: &[VehicleType], num_vehicles: usize) -> Vec<VehicleType> {
    if templates.is_empty() {
        return Vec::new();
    }

    (0..num_vehicles)
        .map(|vehicle| {
            let parent = &templates[vehicle % templates.len()];
            parent.replace(1, vehicle, vehicle.to_string())
        })
        .collect()
}

/// Return a new instance in which every vehicle has its own break node
/// that no other vehicle can visit, along with the break indices in
/// vehicle order.
///
/// Break `v` sits at flat index `old_num_locations + v`. The fleet is
/// rewritten to `num_vehicles` types with one vehicle each, type `v` using
/// profile `v`. All profiles derive from profile 0 of the input; other
/// input profiles are dropped. An empty fleet returns a copy of the input.
pub fn add_one_break_per_vehicle(
    data: &ProblemData,
    config: &VehicleBreakConfig,
) -> Result<(ProblemData, Vec<usize>), BreakError> {
    let num_vehicles = data.num_vehicles();
    if num_vehicles == 0 {
        return Ok((data.clone(), Vec::new()));
    }

    let (with_breaks, break_indices) =
        add_per_vehicle_break_nodes(data, num_vehicles, &config.to_break_config())?;

    let old_num_locations = data.num_locations();
    let new_num_locations = with_breaks.num_locations();
    let num_depots = with_breaks.num_depots();

    let base_dist = with_breaks.distance_matrix(0);
    let base_dur = with_breaks.duration_matrix(0);

    let mut distances = Vec::with_capacity(num_vehicles);
    let mut durations = Vec::with_capacity(num_vehicles);

    for vehicle in 0..num_vehicles {
        let allowed = reachable_mask(num_depots, old_num_locations, new_num_locations, vehicle);
        let (dist, dur) = vehicle_profile_matrices(base_dist, base_dur, &allowed);

        debug!(
            "profile {}: break {} reachable, {} break(s) forbidden",
            vehicle,
            old_num_locations + vehicle,
            num_vehicles - 1
        );

        distances.push(dist);
        durations.push(dur);
    }

    let vehicle_types = per_vehicle_types(data.vehicle_types(), num_vehicles);

    let result = with_breaks.replace(
        ProblemDataReplace::default()
            .with_vehicle_types(vehicle_types)
            .with_matrices(distances, durations),
    )?;

    info!(
        "built {} exclusive break profile(s) over {} locations",
        num_vehicles, new_num_locations
    );

    Ok((result, break_indices))
}
