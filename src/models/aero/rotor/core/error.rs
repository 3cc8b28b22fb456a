use thiserror::Error;

use crate::support::{constraint::ConstraintError, grid::ShapeError};

use super::airfoil::AirfoilError;

/// Errors that can occur while evaluating a rotor.
///
/// Wake non-convergence is not an error. It is reported through
/// [`WakeDiagnostics`](super::WakeDiagnostics) in the returned performance.
#[derive(Debug, Error)]
pub enum SolveError {
    /// The operating batch has no control points.
    #[error("operating batch is empty")]
    EmptyBatch,

    /// A non-uniform inflow field does not match the solver grid.
    #[error("{component} inflow has the wrong shape")]
    InflowShape {
        /// Name of the inflow component.
        component: &'static str,

        /// Mismatched axis.
        source: ShapeError,
    },

    /// A non-uniform inflow field contains infinite or NaN values.
    #[error("{component} inflow contains non-finite values")]
    NonFiniteInflow {
        /// Name of the inflow component.
        component: &'static str,
    },

    /// An operating-point quantity violates a physical constraint.
    #[error("invalid {quantity} at control point {point}")]
    InvalidOperatingPoint {
        /// Control point index.
        point: usize,

        /// Name of the offending quantity.
        quantity: &'static str,

        /// Violated constraint.
        source: ConstraintError,
    },

    /// An operating-point quantity is infinite or NaN.
    #[error("{quantity} at control point {point} is not finite")]
    NonFiniteInput {
        /// Control point index.
        point: usize,

        /// Name of the offending quantity.
        quantity: &'static str,
    },

    /// A derived field did not match the solver grid.
    #[error("solver grid mismatch")]
    Shape(#[from] ShapeError),

    /// The airfoil lookup failed.
    #[error("airfoil lookup failed")]
    Airfoil(#[from] AirfoilError),
}
