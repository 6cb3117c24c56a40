//! Benchmarks for the break transformations.

#[cfg(feature = "bench")]
extern crate criterion;

#[cfg(feature = "bench")]
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use vrp_breaks::config::{BreakConfig, VehicleBreakConfig};
use vrp_breaks::problem::ProblemData;
use vrp_breaks::utils::random_instance;

/// Create a benchmark problem with `size` clients and `size / 10` vehicles.
fn create_benchmark_problem(size: usize) -> ProblemData {
    let mut rng = ChaCha8Rng::seed_from_u64(size as u64);
    random_instance(&mut rng, 1, size, 1, (size / 10).max(1)).unwrap()
}

#[cfg(feature = "bench")]
fn benchmark_break_nodes(c: &mut Criterion) {
    let mut group = c.benchmark_group("break_nodes");

    for size in [100, 200, 400].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let problem = create_benchmark_problem(size);
            let config = BreakConfig::new();
            let num_breaks = problem.num_vehicles();

            b.iter(|| vrp_breaks::add_per_vehicle_break_nodes(&problem, num_breaks, &config));
        });
    }

    group.finish();
}

#[cfg(feature = "bench")]
fn benchmark_vehicle_profiles(c: &mut Criterion) {
    let mut group = c.benchmark_group("vehicle_profiles");

    for size in [100, 200, 400].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            let problem = create_benchmark_problem(size);
            let config = VehicleBreakConfig::new(30, (660, 840));

            b.iter(|| vrp_breaks::add_one_break_per_vehicle(&problem, &config));
        });
    }

    group.finish();
}

#[cfg(feature = "bench")]
criterion_group!(benches, benchmark_break_nodes, benchmark_vehicle_profiles);

#[cfg(feature = "bench")]
criterion_main!(benches);
