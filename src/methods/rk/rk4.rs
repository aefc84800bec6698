//! Classic explicit Runge-Kutta 4 (RK4) fixed-step steppers.

use crate::{
    Float,
    core::{
        ode::{ODE, ODESystem},
        stepper::Stepper,
    },
};

/// One classical RK4 step for y' = f(x, y).
///
/// `h` is signed; a negative step integrates from `x` back to `x + h` with
/// the same four-stage formula.
pub fn rk4_step<F>(f: &F, x: Float, y: Float, h: Float) -> Float
where
    F: ODE + ?Sized,
{
    let k1 = f.ode(x, y);
    let k2 = f.ode(x + C2 * h, y + h * A21 * k1);
    let k3 = f.ode(x + C3 * h, y + h * A32 * k2);
    let k4 = f.ode(x + C4 * h, y + h * A43 * k3);

    y + h * (B1 * k1 + B2 * k2 + B3 * k3 + B4 * k4)
}

/// One classical RK4 step for the coupled pair (y, z).
///
/// Each stage is evaluated once from the combined state so that both
/// components advance with the same stage values.
pub fn rk4_system_step<G>(g: &G, x: Float, y: Float, z: Float, h: Float) -> (Float, Float)
where
    G: ODESystem + ?Sized,
{
    let (k1y, k1z) = g.ode(x, y, z);
    let (k2y, k2z) = g.ode(x + C2 * h, y + h * A21 * k1y, z + h * A21 * k1z);
    let (k3y, k3z) = g.ode(x + C3 * h, y + h * A32 * k2y, z + h * A32 * k2z);
    let (k4y, k4z) = g.ode(x + C4 * h, y + h * A43 * k3y, z + h * A43 * k3z);

    (
        y + h * (B1 * k1y + B2 * k2y + B3 * k3y + B4 * k4y),
        z + h * (B1 * k1z + B2 * k2z + B3 * k3z + B4 * k4z),
    )
}

/// RK4 stepper for a scalar first-order equation.
#[derive(Debug, Clone, Copy)]
pub struct ScalarRK4<'a, F: ?Sized> {
    f: &'a F,
}

impl<'a, F: ODE + ?Sized> ScalarRK4<'a, F> {
    pub fn new(f: &'a F) -> Self {
        Self { f }
    }
}

impl<F: ODE + ?Sized> Stepper for ScalarRK4<'_, F> {
    type State = Float;

    fn step(&self, x: Float, y: Float, h: Float) -> Float {
        rk4_step(self.f, x, y, h)
    }

    fn is_finite(y: &Float) -> bool {
        y.is_finite()
    }
}

/// RK4 stepper for a coupled first-order pair, state `(y, z)`.
#[derive(Debug, Clone, Copy)]
pub struct SystemRK4<'a, G: ?Sized> {
    g: &'a G,
}

impl<'a, G: ODESystem + ?Sized> SystemRK4<'a, G> {
    pub fn new(g: &'a G) -> Self {
        Self { g }
    }
}

impl<G: ODESystem + ?Sized> Stepper for SystemRK4<'_, G> {
    type State = (Float, Float);

    fn step(&self, x: Float, (y, z): (Float, Float), h: Float) -> (Float, Float) {
        rk4_system_step(self.g, x, y, z, h)
    }

    fn is_finite((y, z): &(Float, Float)) -> bool {
        y.is_finite() && z.is_finite()
    }
}

// Classical RK4 coefficients
const C2: Float = 0.5;
const C3: Float = 0.5;
const C4: Float = 1.0;
const A21: Float = 0.5;
const A32: Float = 0.5;
const A43: Float = 1.0;
const B1: Float = 1.0 / 6.0;
const B2: Float = 1.0 / 3.0;
const B3: Float = 1.0 / 3.0;
const B4: Float = 1.0 / 6.0;
