//! Bidirectional fixed-step integration from an interior start index.
//!
//! The trajectory is seeded at the start index and propagated outward: one
//! pass walks toward the end of the grid, the other toward its beginning.
//! Each pass is an independent fold over its own sub-range of the immutable
//! grid; the backward result is reversed and joined with the seed and the
//! forward result.

use log::{trace, warn};

use crate::{
    Float,
    core::{
        ode::{ODE, ODESystem},
        stepper::Stepper,
    },
    error::{Error, Result},
    grid::SampleGrid,
    methods::rk::{ScalarRK4, SystemRK4},
};

/// Computed state values index-aligned with a [`SampleGrid`].
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    /// Grid abscissae.
    pub x: Vec<Float>,
    /// Dependent variable y.
    pub y: Vec<Float>,
    /// First derivative y', present for second-order problems only.
    pub y_prime: Option<Vec<Float>>,
    /// Index of the seeded initial condition.
    pub start: usize,
}

impl Trajectory {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Iterate over `(x, y)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Float, Float)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }
}

/// Integrate over the whole grid with `stepper`, seeding `seed` at `start`.
///
/// Returns one state per grid point. Fails with [`Error::Domain`] if
/// `start` is outside the grid and with [`Error::NumericInstability`] as soon
/// as a state stops being finite.
pub fn integrate<S: Stepper>(
    grid: &SampleGrid,
    start: usize,
    seed: S::State,
    stepper: &S,
) -> Result<Vec<S::State>> {
    let n = grid.len();
    if start >= n {
        return Err(Error::Domain(format!(
            "start index {start} outside grid of {n} points"
        )));
    }
    if !S::is_finite(&seed) {
        return Err(Error::NumericInstability { x: grid[start], index: start });
    }

    let forward_hops = (start..n - 1).map(|i| (grid[i], grid[i + 1] - grid[i], i + 1));
    let backward_hops = (1..start + 1).rev().map(|i| (grid[i], -(grid[i] - grid[i - 1]), i - 1));

    trace!("forward pass: {} steps from index {start}", n - 1 - start);
    let forward = fold_pass(grid, stepper, seed, forward_hops)?;
    trace!("backward pass: {start} steps from index {start}");
    let mut backward = fold_pass(grid, stepper, seed, backward_hops)?;

    backward.reverse();
    backward.reserve_exact(1 + forward.len());
    backward.push(seed);
    backward.extend(forward);
    Ok(backward)
}

/// Apply the stepper hop by hop; each hop is `(x_from, signed_h, target_index)`.
fn fold_pass<S, I>(grid: &SampleGrid, stepper: &S, seed: S::State, hops: I) -> Result<Vec<S::State>>
where
    S: Stepper,
    I: ExactSizeIterator<Item = (Float, Float, usize)>,
{
    let mut states = Vec::with_capacity(hops.len());
    let mut state = seed;
    for (x, h, target) in hops {
        state = stepper.step(x, state, h);
        if !S::is_finite(&state) {
            warn!(
                "integration aborted: non-finite value at x = {} (index {target})",
                grid[target]
            );
            return Err(Error::NumericInstability { x: grid[target], index: target });
        }
        states.push(state);
    }
    Ok(states)
}

/// Integrate y' = f(x, y) over `grid` with y(grid[start]) = y0.
pub fn integrate_scalar<F>(f: &F, grid: &SampleGrid, start: usize, y0: Float) -> Result<Trajectory>
where
    F: ODE + ?Sized,
{
    let y = integrate(grid, start, y0, &ScalarRK4::new(f))?;
    Ok(Trajectory {
        x: grid.points().to_vec(),
        y,
        y_prime: None,
        start,
    })
}

/// Integrate the pair (y, z)' = g(x, y, z) over `grid` with
/// (y, z)(grid[start]) = (y0, z0).
pub fn integrate_system<G>(
    g: &G,
    grid: &SampleGrid,
    start: usize,
    y0: Float,
    z0: Float,
) -> Result<Trajectory>
where
    G: ODESystem + ?Sized,
{
    let states = integrate(grid, start, (y0, z0), &SystemRK4::new(g))?;
    let (y, z) = states.into_iter().unzip();
    Ok(Trajectory {
        x: grid.points().to_vec(),
        y,
        y_prime: Some(z),
        start,
    })
}
