//! # Example: Van der Pol oscillator
//!
//! Solve the Van der Pol oscillator written as a single second-order equation
//! and print the result record as JSON.
//!
//! Equation:
//! y'' - mu (1 - y^2) y' + y = 0
//!
//! Initial conditions: y(0) = 2.0, y'(0) = 0.0
//!

use gridivp::prelude::*;

fn main() {
    env_logger::init();

    let mu = 1.0;
    let equation = format!("y'' - {mu}*(1 - y^2)*y' + y = 0");
    let options = IvpOptions::builder()
        .x_range(XRange::new(0.0, 20.0, 2001))
        .build();

    let record = solve_second_order_ivp(&equation, 0.0, 2.0, 0.0, options);
    if let Some(report) = record.report() {
        for step in &report.steps {
            println!("{step}");
        }
    }
    match serde_json::to_string(&record) {
        Ok(json) => println!("{} bytes of JSON", json.len()),
        Err(e) => eprintln!("serialization failed: {e}"),
    }
}
