use std::cell::RefCell;

use gridivp::prelude::*;
use serde_json::Value;

mod common;
use common::{failed, init_logging, solved};

/// Records the conditions it is called with and answers with fixed text.
struct RecordingBackend {
    seen: RefCell<Vec<InitialCondition>>,
}

impl SymbolicSolver for RecordingBackend {
    fn dsolve(&self, equation: &str, conditions: &[InitialCondition]) -> Result<String, String> {
        self.seen.borrow_mut().extend_from_slice(conditions);
        Ok(format!("solution of {equation}"))
    }
}

fn no_closed_form(_equation: &str, _conditions: &[InitialCondition]) -> Result<String, String> {
    Err("no closed form found".into())
}

#[test]
fn numerical_record_serializes_with_trajectory_arrays() {
    init_logging();
    let record = solve_ivp_numerically("y'' = -y", 0.0, 1.0, XRange::new(0.0, 1.0, 5), 2, Some(0.0));
    let value = serde_json::to_value(&record).unwrap();

    assert_eq!(value["solution"], "numerical");
    assert_eq!(value["method"], "numerical");
    for key in ["x_values", "y_values", "y_prime_values"] {
        assert_eq!(value[key].as_array().map(Vec::len), Some(5), "{key}");
    }
    assert!(value["steps"].as_array().is_some_and(|s| !s.is_empty()));
    assert!(value.get("error").is_none());
}

#[test]
fn first_order_record_has_no_derivative_array() {
    init_logging();
    let record = solve_ivp_numerically("-y", 0.0, 1.0, XRange::new(0.0, 1.0, 5), 1, None);
    let value = serde_json::to_value(&record).unwrap();
    assert!(value.get("y_prime_values").is_none());
}

#[test]
fn error_record_is_exclusive() {
    init_logging();
    let record = solve_ivp_numerically("-y", 0.0, 1.0, XRange::new(0.0, 1.0, 5), 3, None);
    let value = serde_json::to_value(&record).unwrap();
    let object = value.as_object().unwrap();
    assert_eq!(object.len(), 1);
    let message = object["error"].as_str().unwrap();
    assert!(message.starts_with("UnsupportedOrderError"), "{message}");
}

#[test]
fn symbolic_method_delegates_to_backend() {
    init_logging();
    let backend = RecordingBackend { seen: RefCell::new(Vec::new()) };
    let options = IvpOptions::builder()
        .method(Method::Symbolic)
        .symbolic(&backend)
        .build();

    let report = solved(solve_second_order_ivp("y'' + y = 0", 0.0, 1.0, 0.0, options));
    assert_eq!(report.method, Method::Symbolic);
    assert_eq!(report.symbolic(), Some("solution of y'' + y = 0"));
    assert!(report.trajectory().is_none());
    assert_eq!(
        *backend.seen.borrow(),
        vec![InitialCondition::value(0.0, 1.0), InitialCondition::slope(0.0, 0.0)]
    );

    let value: Value = serde_json::to_value(IvpRecord::Solved(report)).unwrap();
    assert_eq!(value["solution"], "solution of y'' + y = 0");
    assert_eq!(value["method"], "symbolic");
    assert!(value.get("x_values").is_none());
}

#[test]
fn backend_failure_becomes_symbolic_error() {
    init_logging();
    let options = IvpOptions::builder()
        .method(Method::Symbolic)
        .symbolic(&no_closed_form)
        .build();
    let err = failed(solve_first_order_ivp("y' = y*sin(y)", 0.0, 1.0, options));
    assert_eq!(err, Error::Symbolic("no closed form found".into()));
    assert_eq!(err.kind(), "SymbolicError");
}

#[test]
fn initial_values_can_be_given_as_text() {
    init_logging();
    let x0 = evaluate_constant("pi/2").unwrap();
    let y0 = evaluate_constant("sqrt(2)/2").unwrap();
    let options = IvpOptions::builder()
        .x_range(XRange::new(0.0, x0, 11))
        .build();
    let report = solved(solve_first_order_ivp("0", x0, y0, options));
    let traj = report.trajectory().unwrap();
    assert_eq!(traj.start, 10);
    assert!(traj.y.iter().all(|&y| y == y0));
}
