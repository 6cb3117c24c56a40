//! Appending synthetic break clients to a problem instance.
//!
//! Break nodes are ordinary clients from the solver's point of view: they
//! sit at a reference depot, carry no load and have a lunch-time window.
//! The solver schedules a driver break by visiting one of them.

use log::{debug, info};

use crate::config::BreakConfig;
use crate::error::BreakError;
use crate::matrix::Matrix;
use crate::problem::{Client, ProblemData, ProblemDataReplace};

/// Return a new instance with `num_breaks` break clients appended, along
/// with their flat location indices.
///
/// The new clients occupy the indices directly after the last existing
/// client. Every profile's matrices are grown to the new size: the old
/// matrix fills the top-left block and the break rows and columns are zero
/// (or a copy of location 0's row and column when `zero_travel` is off).
/// Diagonals are always zero.
///
/// `num_breaks == 0` returns a copy of the input and no indices. Whether
/// `num_breaks` is sensible for the fleet is up to the caller.
pub fn add_per_vehicle_break_nodes(
    data: &ProblemData,
    num_breaks: usize,
    config: &BreakConfig,
) -> Result<(ProblemData, Vec<usize>), BreakError> {
    if num_breaks == 0 {
        return Ok((data.clone(), Vec::new()));
    }

    let depot = data
        .depots()
        .get(config.depot_idx)
        .ok_or(BreakError::DepotOutOfRange {
            index: config.depot_idx,
            num_depots: data.num_depots(),
        })?;

    let service = config.service_duration.unwrap_or(depot.service_duration);
    let (tw_early, tw_late) = config.effective_time_window();
    let dims = data.num_load_dimensions();

    let mut clients = data.clients().to_vec();
    clients.extend((0..num_breaks).map(|i| {
        Client::new(depot.x, depot.y)
            .with_load(vec![0; dims], vec![0; dims])
            .with_service_duration(service)
            .with_time_window(tw_early, tw_late)
            .with_release_time(0)
            .with_prize(0)
            .with_required(config.make_required)
            .with_group(None)
            .with_name(format!("break_{}", i))
    }));

    let old_size = data.num_locations();
    let new_size = old_size + num_breaks;

    let grow = |old: &Matrix| {
        let mut matrix = old.expanded(new_size, 0);
        if !config.zero_travel {
            matrix.copy_reference_row_col(0, old_size);
        }
        matrix.fill_diagonal(0);
        matrix
    };

    let distances: Vec<Matrix> = data.distance_matrices().iter().map(grow).collect();
    let durations: Vec<Matrix> = data.duration_matrices().iter().map(grow).collect();

    debug!(
        "grew {} profile(s) from {} to {} locations",
        distances.len(),
        old_size,
        new_size
    );

    let new_data = data.replace(
        ProblemDataReplace::default()
            .with_clients(clients)
            .with_matrices(distances, durations),
    )?;

    let break_indices: Vec<usize> = (old_size..new_size).collect();

    info!(
        "added {} break node(s) at depot {} with time window [{}, {}]",
        num_breaks, config.depot_idx, tw_early, tw_late
    );

    Ok((new_data, break_indices))
}
