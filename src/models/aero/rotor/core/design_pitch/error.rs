use thiserror::Error;
use twine_solvers::equation::bisection;
use uom::si::f64::Force;

use crate::models::aero::rotor::core::SolveError;

/// Errors that can occur while solving for a design pitch.
#[derive(Debug, Error)]
pub enum DesignPitchError {
    /// A rotor evaluation failed.
    #[error("rotor evaluation failed")]
    Solve(#[from] SolveError),

    /// The bisection solver encountered an error.
    #[error("bisection solver error")]
    Bisection(#[from] bisection::Error),

    /// The solver reached the iteration limit without converging.
    #[error("solver hit iteration limit: residual={residual:?}")]
    MaxIters {
        /// Best thrust residual achieved.
        residual: Force,

        /// Iteration count performed by the solver.
        iters: usize,
    },
}
