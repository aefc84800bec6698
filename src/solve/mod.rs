//! High-level entry points: method selection, validation and result records.

pub mod backend;
pub mod options;
pub mod solution;
pub mod solve_ivp;

pub use backend::{InitialCondition, SymbolicSolver};
pub use options::{IvpOptions, Method, XRange};
pub use solution::{IvpRecord, IvpReport, Solution};
pub use solve_ivp::{solve_first_order_ivp, solve_ivp_numerically, solve_second_order_ivp};
