//! Errors for grid construction, problem adaptation and integration

use crate::Float;

/// Errors raised while validating, adapting or integrating an IVP.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// Invalid or degenerate sampling range.
    #[error("invalid range: {0}")]
    Domain(String),

    /// The right-hand side depends on a symbol that cannot be evaluated numerically.
    #[error("unresolved symbol '{0}' in right-hand side")]
    UnresolvedSymbol(String),

    /// A required initial condition was not supplied.
    #[error("missing initial condition: {0}")]
    MissingInitialCondition(String),

    /// Only first- and second-order equations are supported.
    #[error("order {0} not supported (expected 1 or 2)")]
    UnsupportedOrder(i64),

    /// A trajectory value became NaN or infinite.
    #[error("solution became non-finite at x = {x} (grid index {index})")]
    NumericInstability { x: Float, index: usize },

    /// Malformed expression or equation text.
    #[error("parse error at position {position}: {message}")]
    Parse { position: usize, message: String },

    /// The highest derivative could not be solved for.
    #[error("cannot isolate derivative: {0}")]
    Isolation(String),

    /// The symbolic method was requested but no backend was configured.
    #[error("symbolic method requested but no symbolic backend is configured")]
    SymbolicBackendUnavailable,

    /// The symbolic backend failed.
    #[error("symbolic solve failed: {0}")]
    Symbolic(String),
}

impl Error {
    /// Stable class name of the error, independent of its message.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Domain(_) => "DomainError",
            Error::UnresolvedSymbol(_) => "UnresolvedSymbolError",
            Error::MissingInitialCondition(_) => "MissingInitialConditionError",
            Error::UnsupportedOrder(_) => "UnsupportedOrderError",
            Error::NumericInstability { .. } => "NumericInstabilityError",
            Error::Parse { .. } => "ParseError",
            Error::Isolation(_) => "IsolationError",
            Error::SymbolicBackendUnavailable | Error::Symbolic(_) => "SymbolicError",
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
