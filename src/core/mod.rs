//! Core traits used throughout the library.

pub mod ode;
pub mod stepper;
