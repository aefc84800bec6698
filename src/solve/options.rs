//! Options and method selection for the solve entry points

use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::{
    Float,
    error::Result,
    grid::SampleGrid,
    symbolic::Variables,
};

use super::backend::SymbolicSolver;

/// Solution method.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    /// Closed form through a [`SymbolicSolver`] backend.
    Symbolic,
    /// Fixed-step classical RK4 on an evenly spaced grid.
    #[default]
    Numerical,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Symbolic => "symbolic",
            Method::Numerical => "numerical",
        }
    }
}

/// Sampling range `(x_min, x_max, num_points)` of the numerical method.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct XRange {
    pub x_min: Float,
    pub x_max: Float,
    pub num_points: usize,
}

impl XRange {
    /// Number of points used when no range is requested.
    pub const DEFAULT_POINTS: usize = 100;
    /// Width of the range used when no range is requested.
    pub const DEFAULT_WIDTH: Float = 10.0;

    pub fn new(x_min: Float, x_max: Float, num_points: usize) -> Self {
        Self { x_min, x_max, num_points }
    }

    /// Default range `(x0, x0 + 10, 100)`.
    pub fn starting_at(x0: Float) -> Self {
        Self::new(x0, x0 + Self::DEFAULT_WIDTH, Self::DEFAULT_POINTS)
    }

    /// Build the sample grid, validating the range.
    pub fn grid(&self) -> Result<SampleGrid> {
        SampleGrid::linspace(self.x_min, self.x_max, self.num_points)
    }
}

impl From<(Float, Float, usize)> for XRange {
    fn from((x_min, x_max, num_points): (Float, Float, usize)) -> Self {
        Self::new(x_min, x_max, num_points)
    }
}

#[derive(Builder)]
/// Options for [`solve_first_order_ivp`](super::solve_first_order_ivp) and
/// [`solve_second_order_ivp`](super::solve_second_order_ivp).
pub struct IvpOptions<'a> {
    /// Method to use. Default: numerical.
    #[builder(default)]
    pub method: Method,
    /// Sampling range. Default: `(x0, x0 + 10, 100)`.
    #[builder(into)]
    pub x_range: Option<XRange>,
    /// Backend for the symbolic method.
    pub symbolic: Option<&'a dyn SymbolicSolver>,
    /// Names of the independent and dependent variables. Default: x and y.
    #[builder(default)]
    pub variables: Variables,
}

impl Default for IvpOptions<'_> {
    fn default() -> Self {
        Self::builder().build()
    }
}
