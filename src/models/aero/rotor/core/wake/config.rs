use uom::si::{angle::radian, f64::Angle};

/// Iteration controls for the wake-induced velocity solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WakeConfig {
    /// Maximum number of sweeps over the grid.
    pub max_iters: usize,

    /// Convergence tolerance on the largest wake-angle update of a sweep.
    pub tolerance: Angle,

    /// Fraction of the Newton step applied each sweep, in `(0, 1]`.
    pub relaxation: f64,

    /// Largest wake-angle change allowed in a single sweep.
    pub max_step: Angle,

    /// Wake-angle perturbation used for the finite-difference slope.
    pub derivative_step: Angle,
}

impl Default for WakeConfig {
    fn default() -> Self {
        Self {
            max_iters: 200,
            tolerance: Angle::new::<radian>(1e-8),
            relaxation: 0.5,
            max_step: Angle::new::<radian>(0.1),
            derivative_step: Angle::new::<radian>(1e-6),
        }
    }
}

/// Iteration controls in radians.
#[derive(Debug, Clone, Copy)]
pub(super) struct Controls {
    pub(super) max_iters: usize,
    pub(super) tolerance: f64,
    pub(super) relaxation: f64,
    pub(super) max_step: f64,
    pub(super) derivative_step: f64,
}

impl WakeConfig {
    pub(super) fn controls(&self) -> Controls {
        Controls {
            max_iters: self.max_iters,
            tolerance: self.tolerance.get::<radian>().abs(),
            relaxation: self.relaxation,
            max_step: self.max_step.get::<radian>().abs(),
            derivative_step: self.derivative_step.get::<radian>().abs(),
        }
    }
}
