use ninterp::error::{InterpolateError, ValidateError};
use thiserror::Error;

/// Errors that can occur while looking up airfoil coefficients.
#[derive(Debug, Error)]
pub enum AirfoilError {
    /// The requested airfoil index is not provided by the lookup.
    #[error("airfoil {airfoil} is unknown, {available} airfoils are available")]
    UnknownAirfoil {
        /// Requested airfoil index.
        airfoil: usize,

        /// Number of airfoils the lookup provides.
        available: usize,
    },

    /// A polar table failed validation.
    #[error("invalid polar table")]
    Table(#[from] ValidateError),

    /// A polar table could not be interpolated.
    #[error("polar interpolation failed")]
    Interpolation(#[from] InterpolateError),

    /// The lookup was built without any airfoils.
    #[error("airfoil lookup has no airfoils")]
    EmptyTable,
}
