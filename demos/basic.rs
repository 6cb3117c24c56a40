//! Basic example of using the break transformations.
//!
//! Builds per-vehicle break profiles for an instance, splits the clients
//! round-robin over the vehicles in place of a real solver, and reconciles
//! the resulting routes with the break nodes.

use clap::Parser;
use log::info;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;

use vrp_breaks::config::VehicleBreakConfig;
use vrp_breaks::problem::ProblemData;
use vrp_breaks::repair::{
    break_violations, remove_break_only_routes, repair_one_break_per_route,
};
use vrp_breaks::solution::{Route, Solution};
use vrp_breaks::utils::{
    format_clock, format_routes, random_instance, read_problem, write_problem,
};

#[derive(Parser, Debug)]
#[command(about = "Add one exclusive break node per vehicle to a VRP instance")]
struct Args {
    /// JSON instance to load; a random instance is generated when omitted
    #[arg(short, long)]
    instance: Option<PathBuf>,

    /// Where to write the transformed instance as JSON
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Seed for the random instance
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of clients in the random instance
    #[arg(long, default_value_t = 12)]
    clients: usize,

    /// Number of vehicles in the random instance
    #[arg(long, default_value_t = 3)]
    vehicles: usize,

    /// Break service duration in minutes
    #[arg(long, default_value_t = 30)]
    break_service: i64,

    /// Earliest break start in minutes after midnight
    #[arg(long, default_value_t = 660)]
    break_early: i64,

    /// Latest break start in minutes after midnight
    #[arg(long, default_value_t = 840)]
    break_late: i64,

    /// Reference depot for break locations
    #[arg(long, default_value_t = 0)]
    depot: usize,
}

fn load(args: &Args) -> Result<ProblemData, Box<dyn std::error::Error>> {
    match &args.instance {
        Some(path) => {
            info!("Loading problem from: {}", path.display());
            Ok(read_problem(path)?)
        }
        None => {
            info!("Generating random problem with seed {}", args.seed);
            let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
            Ok(random_instance(&mut rng, 1, args.clients, 1, args.vehicles)?)
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let data = load(&args)?;

    println!(
        "Loaded problem with {} depot(s), {} client(s), {} vehicle(s)",
        data.num_depots(),
        data.num_clients(),
        data.num_vehicles()
    );

    let config = VehicleBreakConfig::new(args.break_service, (args.break_early, args.break_late))
        .with_depot(args.depot);
    let (constrained, break_indices) = vrp_breaks::add_one_break_per_vehicle(&data, &config)?;

    println!(
        "Added {} break node(s), window {} - {}",
        break_indices.len(),
        format_clock(args.break_early),
        format_clock(args.break_late)
    );

    // Stand-in for the solver: deal the original clients over the vehicles.
    let num_vehicles = constrained.num_vehicle_types();
    let mut routes: Vec<Route> = (0..num_vehicles).map(|v| Route::new(Vec::new(), v)).collect();
    let first_client = data.num_depots();
    for (i, client) in (first_client..data.num_locations()).enumerate() {
        if let Some(route) = routes.get_mut(i % num_vehicles.max(1)) {
            route.visits.push(client);
        }
    }
    let solution = Solution::new(routes);

    let (with_breaks, all_assigned) =
        repair_one_break_per_route(solution.routes.as_slice(), &break_indices);
    let repaired = Solution::new(
        with_breaks
            .iter()
            .zip(&solution.routes)
            .map(|(visits, route)| Route::new(visits.clone(), route.vehicle_type))
            .collect(),
    );

    println!("All routes received a break: {}", all_assigned);
    println!(
        "Foreign break visits: {}",
        break_violations(&repaired, &break_indices).len()
    );
    match repaired.distance(&constrained) {
        Some(distance) => println!("Total distance: {}", distance),
        None => println!("Total distance: unreachable edge in some route"),
    }

    let (final_routes, removed) = remove_break_only_routes(with_breaks, &break_indices);
    println!("Break-only routes removed: {}", removed);
    println!("{}", format_routes(&final_routes, &break_indices));

    if let Some(path) = &args.output {
        println!("Saving transformed problem to: {}", path.display());
        write_problem(&constrained, path)?;
    }

    Ok(())
}
