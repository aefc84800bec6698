use approx::assert_abs_diff_eq;
use gridivp::prelude::*;

mod common;
use common::{SHO, failed, init_logging, solved};

#[test]
fn backward_integration_from_right_end() {
    init_logging();
    let x_end = 2.0 * std::f64::consts::PI as Float;
    let grid = SampleGrid::linspace(0.0, x_end, 401).unwrap();
    let start = grid.nearest_index(x_end);
    assert_eq!(start, 400);

    let traj = integrate_system(&SHO, &grid, start, 1.0, 0.0).unwrap();
    let z = traj.y_prime.as_ref().unwrap();
    for (i, (x, y)) in traj.iter().enumerate() {
        assert_abs_diff_eq!(y, x.cos(), epsilon = 1e-5);
        assert_abs_diff_eq!(z[i], -x.sin(), epsilon = 1e-5);
    }
}

#[test]
fn interior_seed_is_exact_through_dispatcher() {
    init_logging();
    let record = solve_ivp_numerically("x*sin(y) + 1", 0.37, 0.8125, XRange::new(-2.0, 2.0, 81), 1, None);
    let report = solved(record);
    let traj = report.trajectory().unwrap();
    // 0.37 is closest to the grid point 0.35
    assert_eq!(traj.start, 47);
    assert_abs_diff_eq!(traj.x[traj.start], 0.35, epsilon = 1e-6);
    assert_eq!(traj.y[traj.start], 0.8125);

    let record = solve_ivp_numerically("-x*y'", 1.0, -3.0, XRange::new(0.0, 2.0, 21), 2, Some(0.5));
    let report = solved(record);
    let traj = report.trajectory().unwrap();
    assert_eq!(traj.start, 10);
    assert_eq!(traj.y[10], -3.0);
    assert_eq!(report.y_prime_values().unwrap()[10], 0.5);
}

#[test]
fn degenerate_ranges_are_domain_errors() {
    init_logging();
    for range in [
        XRange::new(0.0, 1.0, 1),
        XRange::new(0.0, 1.0, 0),
        XRange::new(1.0, 1.0, 10),
        XRange::new(2.0, -2.0, 10),
        XRange::new(-Float::MAX, Float::MAX, 3),
        XRange::new(1.0, 1.0 + 4.0 * Float::EPSILON, 50),
    ] {
        let err = failed(solve_ivp_numerically("-y", 0.0, 1.0, range, 1, None));
        assert!(matches!(err, Error::Domain(_)), "{range:?} gave {err:?}");
    }
}

#[test]
fn blow_up_is_reported_not_truncated() {
    init_logging();
    // y' = y^2, y(0) = 1 has a pole at x = 1.
    let err = failed(solve_ivp_numerically("y^2", 0.0, 1.0, XRange::new(0.0, 3.0, 31), 1, None));
    match err {
        Error::NumericInstability { x, index } => {
            assert!(x > 0.9);
            assert!(index > 9 && index < 31);
        }
        other => panic!("expected instability, got {other:?}"),
    }
}
