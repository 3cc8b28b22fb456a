use twine_solvers::equation::bisection;
use uom::si::{
    angle::{degree, radian},
    f64::{Angle, Force},
    force::newton,
};

/// Solver configuration for design-pitch matching.
#[derive(Debug, Clone, Copy)]
pub struct DesignPitchConfig {
    /// Maximum iteration count for the bisection solve.
    pub max_iters: usize,

    /// Absolute tolerance for the pitch command search variable.
    pub pitch_tol: Angle,

    /// Absolute tolerance for the thrust residual (achieved - target).
    pub thrust_tol: Force,

    /// Pitch commands bounding the search.
    ///
    /// The thrust residual must change sign across the bracket.
    pub bracket: [Angle; 2],
}

impl Default for DesignPitchConfig {
    fn default() -> Self {
        Self {
            max_iters: 100,
            pitch_tol: Angle::new::<radian>(1e-9),
            thrust_tol: Force::new::<newton>(1e-6),
            bracket: [Angle::new::<degree>(-10.0), Angle::new::<degree>(30.0)],
        }
    }
}

impl DesignPitchConfig {
    /// Converts this configuration into a bisection solver configuration.
    pub(super) fn bisection(&self) -> bisection::Config {
        bisection::Config {
            max_iters: self.max_iters,
            x_abs_tol: self.pitch_tol.get::<radian>(),
            x_rel_tol: 0.0,
            residual_tol: self.thrust_tol.get::<newton>(),
        }
    }

    /// Search bracket in radians.
    pub(super) fn bracket(&self) -> [f64; 2] {
        self.bracket.map(|pitch| pitch.get::<radian>())
    }
}
