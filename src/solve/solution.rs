//! Result records returned by the solve entry points.

use serde::{Serialize, Serializer, ser::SerializeMap};

use crate::{
    Float,
    error::{Error, Result},
    methods::bidirectional::Trajectory,
};

use super::options::Method;

/// What was computed.
#[derive(Debug, Clone, PartialEq)]
pub enum Solution {
    /// Sampled trajectory from the numerical method.
    Numerical(Trajectory),
    /// Closed-form solution text from the symbolic backend.
    Symbolic(String),
}

/// A successful solve: the solution, the method used and a step narrative.
#[derive(Debug, Clone, PartialEq)]
pub struct IvpReport {
    pub solution: Solution,
    pub method: Method,
    pub steps: Vec<String>,
}

impl IvpReport {
    pub fn trajectory(&self) -> Option<&Trajectory> {
        match &self.solution {
            Solution::Numerical(trajectory) => Some(trajectory),
            Solution::Symbolic(_) => None,
        }
    }

    pub fn x_values(&self) -> Option<&[Float]> {
        self.trajectory().map(|t| t.x.as_slice())
    }

    pub fn y_values(&self) -> Option<&[Float]> {
        self.trajectory().map(|t| t.y.as_slice())
    }

    /// Present for second-order numerical solutions only.
    pub fn y_prime_values(&self) -> Option<&[Float]> {
        self.trajectory()?.y_prime.as_deref()
    }

    pub fn symbolic(&self) -> Option<&str> {
        match &self.solution {
            Solution::Symbolic(text) => Some(text),
            Solution::Numerical(_) => None,
        }
    }
}

impl Serialize for IvpReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        match &self.solution {
            Solution::Numerical(trajectory) => {
                map.serialize_entry("solution", "numerical")?;
                map.serialize_entry("x_values", &trajectory.x)?;
                map.serialize_entry("y_values", &trajectory.y)?;
                if let Some(y_prime) = &trajectory.y_prime {
                    map.serialize_entry("y_prime_values", y_prime)?;
                }
            }
            Solution::Symbolic(text) => map.serialize_entry("solution", text)?,
        }
        map.serialize_entry("method", &self.method)?;
        map.serialize_entry("steps", &self.steps)?;
        map.end()
    }
}

/// Outcome of a solve call: a report or an error, never both.
#[derive(Debug, Clone, PartialEq)]
pub enum IvpRecord {
    Solved(IvpReport),
    Failed(Error),
}

impl IvpRecord {
    pub fn is_solved(&self) -> bool {
        matches!(self, IvpRecord::Solved(_))
    }

    pub fn report(&self) -> Option<&IvpReport> {
        match self {
            IvpRecord::Solved(report) => Some(report),
            IvpRecord::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&Error> {
        match self {
            IvpRecord::Solved(_) => None,
            IvpRecord::Failed(err) => Some(err),
        }
    }

    pub fn into_result(self) -> Result<IvpReport> {
        match self {
            IvpRecord::Solved(report) => Ok(report),
            IvpRecord::Failed(err) => Err(err),
        }
    }
}

impl From<Result<IvpReport>> for IvpRecord {
    fn from(result: Result<IvpReport>) -> Self {
        match result {
            Ok(report) => IvpRecord::Solved(report),
            Err(err) => IvpRecord::Failed(err),
        }
    }
}

impl Serialize for IvpRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            IvpRecord::Solved(report) => report.serialize(serializer),
            IvpRecord::Failed(err) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("error", &format!("{}: {err}", err.kind()))?;
                map.end()
            }
        }
    }
}
