//! Unit tests for utility functions.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::fs;
use std::path::PathBuf;

use vrp_breaks::utils::{
    format_clock, format_route, format_routes, random_instance, read_problem, save_routes,
    write_problem,
};

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("vrp_breaks_{}_{}", std::process::id(), name))
}

#[test]
fn test_format_clock() {
    assert_eq!(format_clock(660), "11:00");
    assert_eq!(format_clock(840), "14:00");
    assert_eq!(format_clock(65), "01:05");
}

#[test]
fn test_format_route() {
    assert_eq!(format_route(&[1, 4, 2], 0, 0), "0 -> 1 -> 4 -> 2 -> 0");
    assert_eq!(format_route(&[], 0, 1), "0 -> 1");
}

#[test]
fn test_format_routes_marks_breaks() {
    let routes = vec![vec![1, 4, 2], vec![3, 5]];

    let output = format_routes(&routes, &[4, 5]);

    assert_eq!(output, "Route #1: 1 4* 2\nRoute #2: 3 5*");
}

#[test]
fn test_save_routes() {
    let path = temp_path("routes.txt");
    let routes = vec![vec![1, 4], vec![2, 5]];

    save_routes(&routes, &[4, 5], &path).unwrap();
    let contents = fs::read_to_string(&path).unwrap();
    fs::remove_file(&path).unwrap();

    assert!(contents.starts_with("Number of Routes: 2\n"));
    assert!(contents.contains("Break Nodes: 4, 5"));
    assert!(contents.contains("Route #2: 2 5*"));
}

#[test]
fn test_random_instance_is_valid_and_seeded() {
    let first = random_instance(&mut ChaCha8Rng::seed_from_u64(1), 2, 10, 3, 2).unwrap();
    let second = random_instance(&mut ChaCha8Rng::seed_from_u64(1), 2, 10, 3, 2).unwrap();

    assert_eq!(first, second);
    assert!(first.validate().is_ok());
    assert_eq!(first.num_depots(), 2);
    assert_eq!(first.num_clients(), 10);
    assert_eq!(first.num_vehicles(), 6);
    assert_eq!(first.vehicle_types()[1].start_depot, 1);
    assert_eq!(first.distance_matrix(0), first.duration_matrix(0));
}

#[test]
fn test_problem_file_round_trip() {
    let path = temp_path("problem.json");
    let problem = random_instance(&mut ChaCha8Rng::seed_from_u64(3), 1, 5, 1, 2).unwrap();

    write_problem(&problem, &path).unwrap();
    let loaded = read_problem(&path).unwrap();
    fs::remove_file(&path).unwrap();

    assert_eq!(loaded, problem);
}

#[test]
fn test_read_problem_rejects_inconsistent_data() {
    let path = temp_path("broken.json");
    let problem = random_instance(&mut ChaCha8Rng::seed_from_u64(5), 1, 3, 1, 1).unwrap();

    // Drop one client from the JSON so the matrices no longer fit
    let mut json: serde_json::Value = serde_json::to_value(&problem).unwrap();
    json["clients"].as_array_mut().unwrap().pop();
    fs::write(&path, serde_json::to_string(&json).unwrap()).unwrap();

    let err = read_problem(&path).unwrap_err();
    fs::remove_file(&path).unwrap();

    assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
}

#[test]
fn test_read_problem_rejects_short_matrix_data() {
    let path = temp_path("short_matrix.json");
    let problem = random_instance(&mut ChaCha8Rng::seed_from_u64(9), 1, 1, 1, 1).unwrap();

    // Size still says 2 but only one entry is stored
    let mut json: serde_json::Value = serde_json::to_value(&problem).unwrap();
    json["distance_matrices"][0]["data"] = serde_json::json!([0]);
    fs::write(&path, serde_json::to_string(&json).unwrap()).unwrap();

    let err = read_problem(&path).unwrap_err();
    fs::remove_file(&path).unwrap();

    assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
    assert!(err.to_string().contains("needs 4 entries, found 1"));
}
