use thiserror::Error;

/// Top-level error type for the Steric geometry kernel.
#[derive(Debug, Error)]
pub enum StericError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Topology(#[from] TopologyError),

    #[error(transparent)]
    Operation(#[from] OperationError),

    #[error(transparent)]
    Matrix(#[from] MatrixError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("cannot compute offset of a zero-length segment")]
    ComputeOffsetZero,

    #[error("degenerate geometry: {0}")]
    Degenerate(String),
}

/// Errors raised by the overlay graph.
#[derive(Debug, Error)]
pub enum TopologyError {
    #[error("not in slice: {0}")]
    NotInSlice(String),

    #[error("invalid topology: {0}")]
    InvalidTopology(String),
}

/// Errors related to geometry operations.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("{operation} does not support {geometry} geometries")]
    TypeMismatch {
        operation: &'static str,
        geometry: &'static str,
    },

    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Errors related to DE-9IM matrices and patterns.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MatrixError {
    #[error("pattern should be of length 9, got {0}")]
    ShouldBeLength9(usize),

    #[error("unknown dimension symbol {0:?}")]
    UnknownDimension(char),
}

/// Convenience type alias for results using [`StericError`].
pub type Result<T> = std::result::Result<T, StericError>;
