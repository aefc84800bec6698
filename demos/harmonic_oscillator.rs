//! Harmonic oscillator y'' + y = 0 integrated outward from x = pi in both directions.

use gridivp::prelude::*;
use std::f64::consts::PI;

fn main() {
    let x0 = PI;
    let options = IvpOptions::builder()
        .x_range(XRange::new(0.0, 2.0 * PI, 41))
        .build();

    // y(pi) = -1, y'(pi) = 0 is the cosine seen from the middle of its period.
    match solve_second_order_ivp("y'' + y = 0", x0, -1.0, 0.0, options) {
        IvpRecord::Solved(report) => {
            let trajectory = report.trajectory().expect("numerical method");
            let slopes = report.y_prime_values().unwrap_or_default();
            println!("start index: {}", trajectory.start);
            for (i, (x, y)) in trajectory.iter().enumerate() {
                println!(
                    "x = {:>8.5}, y = {:>9.6}, y' = {:>9.6}, |y - cos x| = {:.2e}",
                    x,
                    y,
                    slopes[i],
                    (y - x.cos()).abs()
                );
            }
        }
        IvpRecord::Failed(err) => eprintln!("Integration failed: {err}"),
    }
}
