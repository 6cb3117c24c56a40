//! Utility functions: formatting, JSON persistence and random instances.

use itertools::Itertools;
use rand::Rng;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;

use crate::matrix::Matrix;
use crate::problem::{Client, Depot, Measure, ProblemData, ProblemError, VehicleType};

/// Format a time of day given in minutes as `HH:MM`.
pub fn format_clock(minutes: Measure) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Format a route as `0 -> 4 -> 1 -> 0`, with depots rendered around the
/// visits.
pub fn format_route(visits: &[usize], start_depot: usize, end_depot: usize) -> String {
    std::iter::once(start_depot)
        .chain(visits.iter().copied())
        .chain(std::iter::once(end_depot))
        .join(" -> ")
}

/// Format routes one per line, marking break visits with a `*`.
pub fn format_routes(routes: &[Vec<usize>], break_indices: &[usize]) -> String {
    routes
        .iter()
        .enumerate()
        .map(|(i, route)| {
            let visits = route
                .iter()
                .map(|v| {
                    if break_indices.contains(v) {
                        format!("{}*", v)
                    } else {
                        v.to_string()
                    }
                })
                .join(" ");
            format!("Route #{}: {}", i + 1, visits)
        })
        .join("\n")
}

/// Save routes to a text file.
pub fn save_routes<P: AsRef<Path>>(
    routes: &[Vec<usize>],
    break_indices: &[usize],
    path: P,
) -> io::Result<()> {
    let mut file = File::create(path)?;

    writeln!(file, "Number of Routes: {}", routes.len())?;
    writeln!(file, "Break Nodes: {}", break_indices.iter().join(", "))?;
    writeln!(file)?;
    writeln!(file, "{}", format_routes(routes, break_indices))?;

    Ok(())
}

/// Read an instance from JSON and validate it.
pub fn read_problem<P: AsRef<Path>>(path: P) -> io::Result<ProblemData> {
    let reader = BufReader::new(File::open(path)?);
    let data: ProblemData = serde_json::from_reader(reader)?;
    data.validate()
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
    Ok(data)
}

/// Write an instance as JSON.
pub fn write_problem<P: AsRef<Path>>(data: &ProblemData, path: P) -> io::Result<()> {
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(writer, data)?;
    Ok(())
}

/// Generate a valid Euclidean instance with one load dimension and one
/// profile whose durations equal its distances.
///
/// Coordinates lie in a 100×100 square, demands in `1..=10`, every vehicle
/// type gets `vehicles_per_type` vehicles and is based at depot
/// `type % num_depots`.
pub fn random_instance<R: Rng>(
    rng: &mut R,
    num_depots: usize,
    num_clients: usize,
    num_vehicle_types: usize,
    vehicles_per_type: usize,
) -> Result<ProblemData, ProblemError> {
    let depots: Vec<Depot> = (0..num_depots)
        .map(|i| {
            Depot::new(rng.gen_range(0..=100), rng.gen_range(0..=100))
                .with_service_duration(rng.gen_range(0..=30))
                .with_name(format!("depot_{}", i))
        })
        .collect();

    let clients: Vec<Client> = (0..num_clients)
        .map(|i| {
            Client::new(rng.gen_range(0..=100), rng.gen_range(0..=100))
                .with_load(vec![rng.gen_range(1..=10)], vec![0])
                .with_service_duration(rng.gen_range(5..=20))
                .with_name(format!("client_{}", i))
        })
        .collect();

    let vehicle_types: Vec<VehicleType> = (0..num_vehicle_types)
        .map(|i| {
            let depot = i % num_depots.max(1);
            VehicleType::new(vehicles_per_type, vec![rng.gen_range(20..=50)])
                .with_depots(depot, depot)
                .with_name(format!("type_{}", i))
        })
        .collect();

    let distances: Matrix = ProblemData::euclidean_matrix(&depots, &clients);
    let durations = distances.clone();

    ProblemData::new(
        depots,
        clients,
        vehicle_types,
        vec![distances],
        vec![durations],
    )
}
