//! Error types for the transform module

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransformError {
    /// A flat matrix buffer did not hold exactly 16 elements
    #[error("Expected 16 matrix elements, got {0}")]
    WrongLength(usize),

    /// The matrix has no inverse
    #[error("Matrix is singular and cannot be inverted")]
    Singular,
}

pub type Result<T> = std::result::Result<T, TransformError>;
