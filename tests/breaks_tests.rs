//! Tests for appending break nodes to a problem instance.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use vrp_breaks::breaks::add_per_vehicle_break_nodes;
use vrp_breaks::config::{BreakConfig, DEFAULT_BREAK_TIME_WINDOW};
use vrp_breaks::error::BreakError;
use vrp_breaks::matrix::Matrix;
use vrp_breaks::problem::{Client, Depot, ProblemData, VehicleType};
use vrp_breaks::utils::random_instance;

/// Creates a simple test problem with one depot, three clients and two
/// vehicle types.
fn create_test_problem() -> ProblemData {
    let depots = vec![Depot::new(0, 0).with_service_duration(10).with_name("depot")];

    // Clients at (10, 0), (0, 10) and (10, 10)
    let clients = vec![
        Client::new(10, 0).with_load(vec![1], vec![0]).with_name("a"),
        Client::new(0, 10).with_load(vec![2], vec![0]).with_name("b"),
        Client::new(10, 10).with_load(vec![1], vec![1]).with_name("c"),
    ];

    let vehicle_types = vec![
        VehicleType::new(1, vec![5]).with_name("big"),
        VehicleType::new(1, vec![3]).with_name("small"),
    ];

    let distances = Matrix::from_rows(vec![
        vec![0, 10, 10, 14],
        vec![10, 0, 14, 10],
        vec![10, 14, 0, 10],
        vec![14, 10, 10, 0],
    ])
    .unwrap();

    let durations = Matrix::from_rows(vec![
        vec![0, 20, 20, 28],
        vec![20, 0, 28, 20],
        vec![20, 28, 0, 20],
        vec![28, 20, 20, 0],
    ])
    .unwrap();

    ProblemData::new(depots, clients, vehicle_types, vec![distances], vec![durations]).unwrap()
}

/// The test problem with a second, slower profile.
fn create_two_profile_problem() -> ProblemData {
    let base = create_test_problem();
    let slow = Matrix::from_rows(
        base.duration_matrix(0)
            .to_rows()
            .into_iter()
            .map(|row| row.into_iter().map(|v| v * 3).collect())
            .collect(),
    )
    .unwrap();

    ProblemData::new(
        base.depots().to_vec(),
        base.clients().to_vec(),
        base.vehicle_types().to_vec(),
        vec![base.distance_matrix(0).clone(), base.distance_matrix(0).clone()],
        vec![base.duration_matrix(0).clone(), slow],
    )
    .unwrap()
}

#[test]
fn test_zero_breaks_is_noop() {
    let problem = create_test_problem();

    let (result, breaks) = add_per_vehicle_break_nodes(&problem, 0, &BreakConfig::new()).unwrap();

    assert!(breaks.is_empty());
    assert_eq!(result, problem);
    assert_eq!(result.num_locations(), 4);
}

#[test]
fn test_zero_breaks_skips_depot_check() {
    let problem = create_test_problem();
    let config = BreakConfig::new().with_depot(7);

    let (result, breaks) = add_per_vehicle_break_nodes(&problem, 0, &config).unwrap();

    assert!(breaks.is_empty());
    assert_eq!(result, problem);
}

#[test]
fn test_two_breaks_default_attributes() {
    let problem = create_test_problem();

    let (result, breaks) = add_per_vehicle_break_nodes(&problem, 2, &BreakConfig::new()).unwrap();

    assert_eq!(breaks, vec![4, 5]);
    assert_eq!(result.num_clients(), 5);
    assert_eq!(result.num_locations(), 6);

    for (i, &idx) in breaks.iter().enumerate() {
        let client = &result.clients()[idx - result.num_depots()];
        assert_eq!((client.x, client.y), (0, 0));
        assert_eq!(client.delivery, vec![0]);
        assert_eq!(client.pickup, vec![0]);
        assert_eq!(client.service_duration, 10);
        assert_eq!((client.tw_early, client.tw_late), DEFAULT_BREAK_TIME_WINDOW);
        assert_eq!((client.tw_early, client.tw_late), (660, 840));
        assert_eq!(client.release_time, 0);
        assert_eq!(client.prize, 0);
        assert!(client.required);
        assert_eq!(client.group, None);
        assert_eq!(client.name, format!("break_{}", i));
    }

    // The original clients are kept as they were
    assert_eq!(&result.clients()[..3], problem.clients());
}

#[test]
fn test_two_breaks_matrices() {
    let problem = create_test_problem();

    let (result, _) = add_per_vehicle_break_nodes(&problem, 2, &BreakConfig::new()).unwrap();

    for matrix in [result.distance_matrix(0), result.duration_matrix(0)] {
        assert_eq!(matrix.size(), 6);
        assert!(matrix.has_zero_diagonal());

        for b in 4..6 {
            for other in 0..6 {
                assert_eq!(matrix.get(b, other), 0);
                assert_eq!(matrix.get(other, b), 0);
            }
        }
    }

    for i in 0..4 {
        for j in 0..4 {
            assert_eq!(result.distance_matrix(0).get(i, j), problem.distance_matrix(0).get(i, j));
            assert_eq!(result.duration_matrix(0).get(i, j), problem.duration_matrix(0).get(i, j));
        }
    }
}

#[test]
fn test_overrides() {
    let problem = create_test_problem();
    let config = BreakConfig::new()
        .with_service_duration(45)
        .with_time_window(720, 780)
        .with_required(false);

    let (result, breaks) = add_per_vehicle_break_nodes(&problem, 3, &config).unwrap();

    assert_eq!(breaks, vec![4, 5, 6]);
    for client in &result.clients()[3..] {
        assert_eq!(client.service_duration, 45);
        assert_eq!((client.tw_early, client.tw_late), (720, 780));
        assert!(!client.required);
    }
}

#[test]
fn test_invalid_depot() {
    let problem = create_test_problem();
    let config = BreakConfig::new().with_depot(1);

    let err = add_per_vehicle_break_nodes(&problem, 2, &config).unwrap_err();

    assert_eq!(
        err,
        BreakError::DepotOutOfRange {
            index: 1,
            num_depots: 1
        }
    );
}

#[test]
fn test_without_zero_travel_copies_location_zero() {
    let problem = create_test_problem();
    let config = BreakConfig::new().with_zero_travel(false);

    let (result, _) = add_per_vehicle_break_nodes(&problem, 2, &config).unwrap();
    let dist = result.distance_matrix(0);
    let dur = result.duration_matrix(0);

    for b in 4..6 {
        // Break rows repeat row 0, break columns repeat column 0
        assert_eq!(&dist.row(b)[..4], problem.distance_matrix(0).row(0));
        for other in 0..4 {
            assert_eq!(dist.get(other, b), problem.distance_matrix(0).get(other, 0));
            assert_eq!(dur.get(other, b), problem.duration_matrix(0).get(other, 0));
        }
    }

    // Entries between two breaks are not part of the copy
    assert_eq!(dist.get(4, 5), 0);
    assert_eq!(dist.get(5, 4), 0);
    assert!(dist.has_zero_diagonal());
    assert!(dur.has_zero_diagonal());
}

#[test]
fn test_every_profile_is_grown() {
    let problem = create_two_profile_problem();

    let (result, _) = add_per_vehicle_break_nodes(&problem, 2, &BreakConfig::new()).unwrap();

    assert_eq!(result.num_profiles(), 2);
    for profile in 0..2 {
        assert_eq!(result.distance_matrix(profile).size(), 6);
        assert_eq!(result.duration_matrix(profile).size(), 6);
        assert_eq!(
            result.duration_matrix(profile).get(1, 2),
            problem.duration_matrix(profile).get(1, 2)
        );
    }
    assert_eq!(result.duration_matrix(1).get(1, 2), 84);
}

#[test]
fn test_original_is_untouched() {
    let problem = create_test_problem();
    let snapshot = problem.clone();

    let _ = add_per_vehicle_break_nodes(&problem, 4, &BreakConfig::new()).unwrap();

    assert_eq!(problem, snapshot);
}

#[test]
fn test_random_instances_any_break_count() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);

    for num_breaks in 0..6 {
        let problem = random_instance(&mut rng, 2, 8, 2, 2).unwrap();
        let old_locations = problem.num_locations();

        let (result, breaks) =
            add_per_vehicle_break_nodes(&problem, num_breaks, &BreakConfig::new().with_depot(1))
                .unwrap();

        assert_eq!(breaks.len(), num_breaks);
        assert_eq!(result.num_clients(), problem.num_clients() + num_breaks);
        assert_eq!(breaks, (old_locations..old_locations + num_breaks).collect::<Vec<_>>());

        for profile in 0..result.num_profiles() {
            assert!(result.distance_matrix(profile).has_zero_diagonal());
            assert!(result.duration_matrix(profile).has_zero_diagonal());
        }

        let depot = &problem.depots()[1];
        for client in &result.clients()[problem.num_clients()..] {
            assert_eq!((client.x, client.y), (depot.x, depot.y));
            assert_eq!(client.service_duration, depot.service_duration);
        }
    }
}
