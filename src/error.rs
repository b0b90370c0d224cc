use thiserror::Error;

/// Top-level error type for path construction and queries.
#[derive(Debug, Error)]
pub enum PathError {
    #[error(transparent)]
    Construction(#[from] ConstructionError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Minimize(#[from] MinimizeError),
}

/// Errors raised while building a path. Fatal: no path is produced.
#[derive(Debug, Error)]
pub enum ConstructionError {
    #[error("at least 2 waypoints are required, got {count}")]
    TooFewWaypoints { count: usize },

    #[error("waypoint {index} has a non-finite coordinate or heading")]
    NonFiniteWaypoint { index: usize },

    #[error("segment fit matrix is singular")]
    SingularFitMatrix,

    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Recoverable query errors. Callers should treat these as "off path".
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("path parameter {value} is out of range [0, 1]")]
    ParameterOutOfRange { value: f64 },

    #[error("no arc accepted a projection of the query point")]
    NoProjection,
}

/// Errors from the bounded 1D minimizer.
#[derive(Debug, Error)]
pub enum MinimizeError {
    #[error("minimization failed: {0}")]
    Failed(String),

    #[error("minimizer returned no parameter")]
    NoResult,
}

impl PathError {
    /// Returns `true` if this error means the query point or parameter is
    /// off the path rather than a broken path.
    #[must_use]
    pub fn is_domain(&self) -> bool {
        matches!(self, Self::Domain(_))
    }
}

/// Convenience type alias for results using [`PathError`].
pub type Result<T> = std::result::Result<T, PathError>;
