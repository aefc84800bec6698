//! Bidirectional fixed-step Runge-Kutta solver for first- and second-order
//! initial value problems given as text.
//!
//! The right-hand side is compiled from an expression or an equation, the
//! range is sampled on an evenly spaced grid, and classical RK4 walks outward
//! from the grid point nearest the initial x in both directions.
//!
//! ```
//! use gridivp::prelude::*;
//!
//! let record = solve_ivp_numerically("y'' = -y", 0.0, 1.0, XRange::new(0.0, 3.0, 301), 2, Some(0.0));
//! let report = record.into_result().unwrap();
//! let y = report.y_values().unwrap();
//! assert!((y[300] - (3.0 as Float).cos()).abs() < 1e-6);
//! ```

pub mod core;
pub mod error;
pub mod grid;
pub mod methods;
pub mod prelude;
pub mod solve;
pub mod symbolic;

pub use error::Error;

// Prevent selecting two incompatible float precision features at once.
#[cfg(all(feature = "f32", feature = "f64"))]
compile_error!(
    "features 'f32' and 'f64' cannot both be enabled; pick exactly one Float precision feature"
);

/// Change this to f128, f64, f32 as desired.
#[cfg(feature = "f32")]
pub type Float = f32;
#[cfg(feature = "f64")]
pub type Float = f64;
