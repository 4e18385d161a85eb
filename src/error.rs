use thiserror::Error;

/// Top-level error type for the Bezier kernel.
#[derive(Debug, Error)]
pub enum KernelError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),
}

/// Errors related to constructing geometry.
///
/// Degenerate inputs to queries (parallel lines, zero-length derivatives,
/// coincident control points) are not errors; they produce empty or fallback
/// results instead.
#[derive(Debug, Error, PartialEq)]
pub enum GeometryError {
    #[error("a bezier curve needs 2, 3 or 4 control points, got {found}")]
    ControlPointCount { found: usize },

    #[error("expected {expected} control points, got {found}")]
    WrongPointCount { expected: usize, found: usize },

    #[error("parameter {parameter} = {value} is out of range [{min}, {max}]")]
    ParameterOutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("degenerate geometry: {0}")]
    Degenerate(String),
}

/// Convenience type alias for results using [`KernelError`].
pub type Result<T> = std::result::Result<T, KernelError>;
