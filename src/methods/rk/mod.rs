//! Explicit Runge-Kutta steppers (RK4)

mod rk4;

pub use rk4::{ScalarRK4, SystemRK4, rk4_step, rk4_system_step};
