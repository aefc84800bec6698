//! Convenient prelude: import the most commonly used traits, types, and functions.
//!
//! Bring this into scope with:
//!
//! ```rust
//! use gridivp::prelude::*;
//! ```
//!
//! Re-exports included:
//! - Core traits and types: `ODE`, `ODESystem`, `Stepper`, `SampleGrid`, `Trajectory`, `Error`.
//! - High-level API: `solve_first_order_ivp`, `solve_second_order_ivp`, `solve_ivp_numerically`,
//!   `IvpOptions`, `Method`, `XRange`, `IvpRecord`, `IvpReport`, `Solution`.
//! - Problem adapter: `Variables`, `first_order`, `second_order`, `evaluate_constant`.
//!

pub use crate::Float;
pub use crate::core::{
    ode::{ODE, ODESystem},
    stepper::Stepper,
};
pub use crate::error::Error;
pub use crate::grid::SampleGrid;
pub use crate::methods::bidirectional::{Trajectory, integrate_scalar, integrate_system};
pub use crate::solve::{
    InitialCondition, IvpOptions, IvpRecord, IvpReport, Method, Solution, SymbolicSolver, XRange,
    solve_first_order_ivp, solve_ivp_numerically, solve_second_order_ivp,
};
pub use crate::symbolic::{Variables, evaluate_constant, first_order, second_order};
