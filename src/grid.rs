//! Evenly spaced sample grid of the independent variable.

use std::ops::Index;

use log::debug;

use crate::{
    Float,
    error::{Error, Result},
};

/// Strictly increasing, evenly spaced sample points covering `[x_min, x_max]`.
///
/// The first point is exactly `x_min` and the last exactly `x_max`.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleGrid {
    points: Vec<Float>,
    spacing: Float,
}

impl SampleGrid {
    /// Build `n` evenly spaced points from `x_min` to `x_max` inclusive.
    pub fn linspace(x_min: Float, x_max: Float, n: usize) -> Result<Self> {
        if n < 2 {
            return Err(Error::Domain(format!(
                "at least 2 grid points are required (got {n})"
            )));
        }
        if !x_min.is_finite() || !x_max.is_finite() {
            return Err(Error::Domain(format!(
                "range bounds must be finite (got [{x_min}, {x_max}])"
            )));
        }
        if x_min >= x_max {
            return Err(Error::Domain(format!(
                "x_min must be less than x_max (got [{x_min}, {x_max}])"
            )));
        }

        let width = x_max - x_min;
        if !width.is_finite() {
            return Err(Error::Domain(format!(
                "range width overflows (got [{x_min}, {x_max}])"
            )));
        }

        let last = n - 1;
        let spacing = width / last as Float;
        let points: Vec<Float> = (0..n)
            .map(|i| if i == last { x_max } else { x_min + i as Float * spacing })
            .collect();
        // spacing below the resolution of Float repeats points
        if points.windows(2).any(|w| w[1] <= w[0]) {
            return Err(Error::Domain(format!(
                "{n} points do not fit in [{x_min}, {x_max}] at this precision (h = {spacing})"
            )));
        }

        debug!("built grid of {n} points on [{x_min}, {x_max}], h = {spacing}");
        Ok(Self { points, spacing })
    }

    /// Index of the point closest to `x0`; ties resolve to the lowest index.
    pub fn nearest_index(&self, x0: Float) -> usize {
        let mut best = 0;
        let mut best_dist = (self.points[0] - x0).abs();
        for (i, &x) in self.points.iter().enumerate().skip(1) {
            let dist = (x - x0).abs();
            if dist < best_dist {
                best = i;
                best_dist = dist;
            }
        }
        best
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false: a grid holds at least two points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Float] {
        &self.points
    }

    /// Nominal spacing `(x_max - x_min) / (n - 1)`.
    pub fn spacing(&self) -> Float {
        self.spacing
    }

    pub fn first(&self) -> Float {
        self.points[0]
    }

    pub fn last(&self) -> Float {
        self.points[self.points.len() - 1]
    }

}

impl Index<usize> for SampleGrid {
    type Output = Float;

    fn index(&self, index: usize) -> &Self::Output {
        &self.points[index]
    }
}
