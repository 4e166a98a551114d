//! Error types for the ellipsoid module

use thiserror::Error;

use crate::coordinates::Cartesian3;

/// Main error type for geodesy functionality
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeodesyError {
    /// An ellipsoid radius was zero, negative or not finite
    #[error("Invalid ellipsoid radius on {axis} axis: {value}")]
    InvalidRadius {
        /// The axis name ("x", "y" or "z")
        axis: &'static str,
        /// The rejected radius
        value: f64,
    },

    /// The surface projection did not settle within the iteration cap
    #[error("Surface projection failed to converge after {iterations} iterations (residual {residual:e})")]
    NoConvergence {
        /// Number of Newton steps taken
        iterations: usize,
        /// Constraint residual of the last step
        residual: f64,
    },

    /// A position handed to the surface projection was NaN or infinite
    #[error("Position {0:?} has a non-finite component")]
    NonFinitePosition(Cartesian3),
}

/// Extension of the Result type for geodesy operations
pub type Result<T> = std::result::Result<T, GeodesyError>;
