use num_complex::Complex64;
use thiserror::Error;

/// An operator or state that does not have the 4x4 shape of a two-qubit system.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Expected a 4x4 matrix, got {rows}x{cols}")]
pub struct DimensionError {
    pub rows: usize,
    pub cols: usize,
}

#[derive(Error, Debug, Clone)]
pub enum GateError {
    #[error("Matrix is not Unitary (max deviation from identity: {deviation:e})")]
    NonUnitary { deviation: f64 },

    #[error("Unitarity tolerance must be finite and positive, got {0}")]
    InvalidTolerance(f64),

    #[error("Target qubit {0} out of range (expected 0 or 1)")]
    InvalidTarget(usize),

    #[error(transparent)]
    Dimension(#[from] DimensionError),
}

#[derive(Error, Debug, Clone)]
pub enum StateError {
    #[error("Trace cannot be normalized: {0}")]
    InvalidTrace(Complex64),

    #[error("Outcome probabilities do not sum to one: {sum}")]
    InvalidProbabilities { sum: f64 },

    #[error("Invalid register configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Dimension(#[from] DimensionError),
}
