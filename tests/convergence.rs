//! Order-of-accuracy checks; tolerances assume double precision.
#![cfg(feature = "f64")]

use approx::assert_abs_diff_eq;
use gridivp::prelude::*;

mod common;
use common::{init_logging, solved};

/// Largest deviation from y0 * exp(-k (x - x0)) over the whole grid.
fn decay_error(points: usize, x0: Float) -> Float {
    let (k, y0) = (2.0, 1.5);
    let record = solve_ivp_numerically("-2*y", x0, y0, XRange::new(0.0, 1.0, points), 1, None);
    let report = solved(record);
    report
        .trajectory()
        .unwrap()
        .iter()
        .map(|(x, y)| (y - y0 * (-k * (x - x0)).exp()).abs())
        .fold(0.0, Float::max)
}

#[test]
fn decay_error_shrinks_like_h_to_the_fourth() {
    init_logging();
    let coarse = decay_error(11, 0.0);
    let fine = decay_error(21, 0.0);
    let ratio = coarse / fine;
    assert!((14.0..18.0).contains(&ratio), "ratio {ratio}");
}

#[test]
fn fourth_order_holds_from_an_interior_start() {
    init_logging();
    // x0 = 0.5 is a grid point of both grids
    let coarse = decay_error(11, 0.5);
    let fine = decay_error(21, 0.5);
    let ratio = coarse / fine;
    assert!((14.0..18.0).contains(&ratio), "ratio {ratio}");
}

#[test]
fn one_step_forward_then_back_returns_to_start() {
    let f = |x: Float, y: Float| x.sin() - 0.5 * y;
    let grid = SampleGrid::linspace(0.0, 0.1, 2).unwrap();
    let forward = integrate_scalar(&f, &grid, 0, 1.0).unwrap();
    let back = integrate_scalar(&f, &grid, 1, forward.y[1]).unwrap();
    assert_abs_diff_eq!(back.y[0], 1.0, epsilon = 1e-6);
}
