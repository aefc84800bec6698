#![allow(dead_code)]

use gridivp::prelude::*;

/// Route `log` output through the test harness.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Unwrap a record that is expected to succeed.
pub fn solved(record: IvpRecord) -> IvpReport {
    match record {
        IvpRecord::Solved(report) => report,
        IvpRecord::Failed(err) => panic!("expected a solution, got {}: {err}", err.kind()),
    }
}

/// Unwrap a record that is expected to fail.
pub fn failed(record: IvpRecord) -> Error {
    match record {
        IvpRecord::Failed(err) => err,
        IvpRecord::Solved(report) => panic!("expected an error, got {:?}", report.steps),
    }
}

/// y'' = -y written as a first-order pair.
pub struct SHO;

impl ODESystem for SHO {
    fn ode(&self, _x: Float, y: Float, z: Float) -> (Float, Float) {
        (z, -y)
    }
}
