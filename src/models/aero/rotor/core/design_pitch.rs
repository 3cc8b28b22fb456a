//! Iterative solver for the pitch command that meets a target thrust.
//!
//! This module varies the collective pitch command of a single operating
//! point by bisection until the rotor produces the requested thrust.

mod config;
mod error;
mod problem;

pub use config::DesignPitchConfig;
pub use error::DesignPitchError;

use twine_solvers::equation::bisection;
use uom::si::{
    f64::{Angle, Force},
    force::newton,
};

use super::{AirfoilLookup, OperatingPoint, Performance, Rotor, operating::ResolvedPoint};

use problem::{DesignPitchModel, DesignPitchProblem};

/// Pitch command found by [`Rotor::design_pitch`] and the performance it gives.
#[derive(Debug, Clone)]
pub struct DesignPitch {
    /// Collective pitch command added to the blade twist.
    pub pitch: Angle,

    /// Rotor performance at that pitch.
    pub performance: Performance,
}

/// Solves for the pitch command that produces `target_thrust` at `point`.
///
/// The design flag of `point` is cleared so that the pitch command applies.
///
/// # Errors
///
/// Returns [`DesignPitchError::Solve`] if `point` is invalid, before any
/// search. Otherwise returns [`DesignPitchError`] if the bracket does not
/// straddle the target or the solver fails to converge.
pub(super) fn design_pitch<A: AirfoilLookup>(
    rotor: &Rotor<A>,
    point: &OperatingPoint,
    target_thrust: Force,
    config: &DesignPitchConfig,
) -> Result<DesignPitch, DesignPitchError> {
    // Freestream and speed checks do not depend on pitch.
    let lower = OperatingPoint {
        pitch_command: config.bracket[0],
        design: false,
        ..*point
    };
    ResolvedPoint::resolve(0, &lower, &rotor.geometry().orientation())?;

    let model = DesignPitchModel::new(rotor, point);
    let problem = DesignPitchProblem::new(target_thrust);

    let solution = bisection::solve(
        &model,
        &problem,
        config.bracket(),
        &config.bisection(),
        |event: &bisection::Event<'_, _, _>| {
            // Numerical failures at a trial pitch are treated as overshooting.
            if event.result().is_err() {
                return Some(bisection::Action::assume_positive());
            }
            None
        },
    )?;

    if solution.status != bisection::Status::Converged {
        return Err(DesignPitchError::MaxIters {
            residual: Force::new::<newton>(solution.residual),
            iters: solution.iters,
        });
    }

    Ok(DesignPitch {
        pitch: solution.snapshot.input,
        performance: solution.snapshot.output,
    })
}
