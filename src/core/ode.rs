//! User-supplied right-hand sides.

use crate::Float;

/// Right-hand side of a scalar first-order equation y' = f(x, y).
///
/// Implemented for any `Fn(Float, Float) -> Float`, so a closure can be
/// handed to the steppers directly.
///
/// # Example
///
/// ```ignore
/// struct Decay { k: f64 }
/// impl ODE for Decay {
///     fn ode(&self, _x: f64, y: f64) -> f64 {
///         -self.k * y
///     }
/// }
/// ```
pub trait ODE {
    fn ode(&self, x: Float, y: Float) -> Float;
}

impl<F> ODE for F
where
    F: Fn(Float, Float) -> Float,
{
    fn ode(&self, x: Float, y: Float) -> Float {
        self(x, y)
    }
}

/// Right-hand side of a coupled pair y' = g_y(x, y, z), z' = g_z(x, y, z).
///
/// A second-order equation y'' = f(x, y, y') becomes such a pair through
/// z = y', i.e. g = (z, f(x, y, z)).
pub trait ODESystem {
    fn ode(&self, x: Float, y: Float, z: Float) -> (Float, Float);
}

impl<G> ODESystem for G
where
    G: Fn(Float, Float, Float) -> (Float, Float),
{
    fn ode(&self, x: Float, y: Float, z: Float) -> (Float, Float) {
        self(x, y, z)
    }
}
