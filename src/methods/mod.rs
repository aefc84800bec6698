// Numerical methods

pub mod bidirectional;
pub mod rk;
