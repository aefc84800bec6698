//! # Example: Exponential Decay
//!
//! Solve the exponential decay equation from text.
//!
//! Equation:
//! dy/dx = -2y
//!
//! Initial condition: y(0) = 5.0
//!

use gridivp::prelude::*;

fn main() {
    let x0 = 0.0;
    let y0 = 5.0;

    match solve_ivp_numerically("y' = -2*y", x0, y0, XRange::new(0.0, 5.0, 51), 1, None) {
        IvpRecord::Solved(report) => {
            for step in &report.steps {
                println!("{step}");
            }
            if let Some(trajectory) = report.trajectory() {
                for (x, y) in trajectory.iter().step_by(5) {
                    println!("x = {:.4}, y = {:.6e}, exact = {:.6e}", x, y, y0 * (-2.0 * x).exp());
                }
            }
        }
        IvpRecord::Failed(e) => eprintln!("Integration failed: {e}"),
    }
}
