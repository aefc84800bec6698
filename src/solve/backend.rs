//! Seam to an external computer-algebra system for closed-form solutions.

use serde::{Deserialize, Serialize};

use crate::{Float, symbolic::Variables};

/// `y^(derivative)(x) = value`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InitialCondition {
    /// 0 for y, 1 for y'.
    pub derivative: usize,
    pub x: Float,
    pub value: Float,
}

impl InitialCondition {
    pub fn value(x: Float, value: Float) -> Self {
        Self { derivative: 0, x, value }
    }

    pub fn slope(x: Float, value: Float) -> Self {
        Self { derivative: 1, x, value }
    }

    /// Prime notation, e.g. `y'(0) = 1`.
    pub fn describe(&self, vars: &Variables) -> String {
        format!("{}({}) = {}", vars.derivative(self.derivative), self.x, self.value)
    }
}

/// Closed-form solver for an equation under initial conditions.
///
/// Returns the solution as text, or the backend's error message.
/// Implemented for closures with the same signature.
pub trait SymbolicSolver {
    fn dsolve(&self, equation: &str, conditions: &[InitialCondition]) -> Result<String, String>;
}

impl<F> SymbolicSolver for F
where
    F: Fn(&str, &[InitialCondition]) -> Result<String, String>,
{
    fn dsolve(&self, equation: &str, conditions: &[InitialCondition]) -> Result<String, String> {
        self(equation, conditions)
    }
}
