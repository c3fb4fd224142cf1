//! Error taxonomy for network simulation and fixed-point analysis.

use thiserror::Error;

/// Errors raised when a precondition on the network or its parameters fails
#[derive(Debug, Error, Clone, PartialEq)]
pub enum NetworkError {
    /// Weight matrix is not square, or has no units
    #[error("weight matrix must be square and non-empty, got {rows}x{cols}")]
    NonSquare { rows: usize, cols: usize },

    /// Vector argument has the wrong number of entries
    #[error("{what} has length {found}, expected {expected}")]
    Shape {
        what: &'static str,
        expected: usize,
        found: usize,
    },

    /// Scalar parameter or grid outside its valid domain
    #[error("invalid parameter `{name}` = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
}

impl NetworkError {
    /// True for dimension mismatches (non-square matrix or wrong vector length)
    pub fn is_shape_error(&self) -> bool {
        matches!(self, Self::NonSquare { .. } | Self::Shape { .. })
    }
}

pub type Result<T> = std::result::Result<T, NetworkError>;
