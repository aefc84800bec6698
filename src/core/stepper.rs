//! Single-step integrators driven by the bidirectional integrator.

use crate::Float;

/// One fixed step of an explicit one-step method.
///
/// `h` is signed: a positive step advances toward larger x, a negative step
/// walks back toward smaller x. Implementations must use the same formula in
/// both directions.
pub trait Stepper {
    /// State carried from grid point to grid point.
    type State: Copy;

    /// Advance `state` at abscissa `x` by the signed step `h`.
    fn step(&self, x: Float, state: Self::State, h: Float) -> Self::State;

    /// Whether every component of `state` is finite.
    fn is_finite(state: &Self::State) -> bool;
}
