//! Wake-induced velocity solver.
//!
//! Each blade element carries a wake angle `ψ` that sets its loaded velocity
//! triangle:
//!
//! ```text
//! Wa = ½·Ua + ½·U·sin ψ        va = Wa - Ua
//! Wt = ½·Ut + ½·U·cos ψ        vt = Ut - Wt
//! ```
//!
//! The circulation implied by the helical vortex wake behind the blade must
//! match the circulation bound to the blade section:
//!
//! ```text
//! R(ψ) = vt·(4πr/B)·F·√(1 + (4λw·R/(πBr))²) - ½·W·c·Cl(α, Re, Ma)
//! ```
//!
//! where `F` is the Prandtl tip-loss factor evaluated at the wake inflow ratio
//! `λw`. Every element is independent, so the whole grid is advanced together
//! by damped Newton sweeps until the largest update falls below tolerance.

mod config;

pub use config::WakeConfig;

use std::f64::consts::PI;

use uom::si::{angle::radian, f64::Angle};

use crate::support::grid::Field;

use super::{
    airfoil::{AirfoilError, AirfoilLookup, evaluate_section},
    geometry::BladeGrid,
    inflow::WakeInputs,
    tip_loss,
};

use config::Controls;

/// Total velocity below which an element is treated as unloaded.
const STILL_AIR: f64 = 1e-12;

/// Convergence summary of a wake solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WakeDiagnostics {
    /// True if the final sweep moved every element by less than the tolerance.
    pub converged: bool,

    /// Number of sweeps performed.
    pub iterations: usize,

    /// Largest wake-angle update in the final sweep.
    pub max_update: Angle,
}

/// Progress report passed to the observer after every sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WakeIteration {
    /// One-based sweep number.
    pub iteration: usize,

    /// Largest wake-angle update in this sweep.
    pub max_update: Angle,
}

/// Converged wake state over the solver grid.
#[derive(Debug, Clone)]
pub(crate) struct WakeSolution {
    /// Loaded axial velocity `Wa`.
    pub(crate) axial: Field,

    /// Loaded tangential velocity `Wt`.
    pub(crate) tangential: Field,

    /// Axial induced velocity `va`.
    pub(crate) axial_induced: Field,

    /// Tangential induced velocity `vt`.
    pub(crate) tangential_induced: Field,

    /// Magnitude of each element's update in the final sweep.
    pub(crate) last_update: Field,

    pub(crate) diagnostics: WakeDiagnostics,
}

/// Loaded velocity triangle `(Wa, Wt)` for a wake angle.
fn velocity_triangle(total: f64, axial: f64, tangential: f64, psi: f64) -> (f64, f64) {
    let (sin, cos) = psi.sin_cos();
    (
        0.5 * axial + 0.5 * total * sin,
        0.5 * tangential + 0.5 * total * cos,
    )
}

/// Per-element circulation balance.
struct Balance<'a, A: ?Sized> {
    airfoils: &'a A,
    grid: &'a BladeGrid,
    inputs: &'a WakeInputs,
}

impl<A: AirfoilLookup + ?Sized> Balance<'_, A> {
    fn residual(&self, index: (usize, usize, usize), psi: f64) -> Result<f64, AirfoilError> {
        let (p, i, k) = index;
        let cell = [p, i, k];
        let ut = self.inputs.tangential[cell];
        let (wa, wt) =
            velocity_triangle(self.inputs.total[cell], self.inputs.axial[cell], ut, psi);

        let blades = self.grid.blade_count;
        let tip = self.grid.tip_radius;
        let r = self.grid.radius[i];

        let section = evaluate_section(self.airfoils, &self.inputs.element(self.grid, index, wa, wt))?;
        let f = tip_loss::factor(blades, r, tip, tip_loss::wake_inflow_ratio(r, tip, wa, wt));

        let helix = 4.0 * wa / (PI * blades * wt);
        let wake = (ut - wt) * (4.0 * PI * r / blades) * f * (1.0 + helix * helix).sqrt();
        let bound = 0.5 * section.velocity * self.inputs.chord[cell] * section.lift;

        Ok(wake - bound)
    }

    /// Damped Newton step for one element.
    ///
    /// Returns `None` when the residual is not a number.
    fn step(
        &self,
        index: (usize, usize, usize),
        psi: f64,
        controls: &Controls,
    ) -> Result<Option<f64>, AirfoilError> {
        let residual = self.residual(index, psi)?;
        if residual.is_nan() {
            return Ok(None);
        }
        if residual == 0.0 {
            return Ok(Some(0.0));
        }

        let h = controls.derivative_step;
        let slope = (self.residual(index, psi + h)? - self.residual(index, psi - h)?) / (2.0 * h);

        let step = if slope > 0.0 && slope.is_finite() && residual.is_finite() {
            (controls.relaxation * residual / slope).clamp(-controls.max_step, controls.max_step)
        } else {
            residual.signum() * controls.max_step
        };
        Ok(Some(step))
    }
}

/// Solves for the wake-induced velocities on the grid.
///
/// The initial wake angle of every element is the unloaded inflow angle
/// `atan2(Ua, Ut)`. `observer` is called once per sweep.
///
/// Failing to converge within `max_iters` sweeps is not an error; it is
/// reported through [`WakeDiagnostics`].
///
/// # Errors
///
/// Returns an [`AirfoilError`] if the airfoil lookup fails.
pub(crate) fn solve<A, O>(
    airfoils: &A,
    grid: &BladeGrid,
    inputs: &WakeInputs,
    config: &WakeConfig,
    mut observer: O,
) -> Result<WakeSolution, AirfoilError>
where
    A: AirfoilLookup + ?Sized,
    O: FnMut(&WakeIteration),
{
    let controls = config.controls();
    let balance = Balance {
        airfoils,
        grid,
        inputs,
    };

    let dim = inputs.total.dim();
    let mut psi = Field::from_shape_fn(dim, |(p, i, k)| {
        inputs.axial[[p, i, k]].atan2(inputs.tangential[[p, i, k]])
    });
    let mut last_update = Field::zeros(dim);

    let mut diagnostics = WakeDiagnostics {
        converged: false,
        iterations: 0,
        max_update: Angle::new::<radian>(f64::INFINITY),
    };

    for iteration in 1..=controls.max_iters {
        let mut max_update: f64 = 0.0;

        for ((p, i, k), angle) in psi.indexed_iter_mut() {
            let update = if inputs.total[[p, i, k]] <= STILL_AIR {
                0.0
            } else {
                match balance.step((p, i, k), *angle, &controls)? {
                    Some(step) => {
                        *angle -= step;
                        step.abs()
                    }
                    None => f64::INFINITY,
                }
            };
            last_update[[p, i, k]] = update;
            max_update = max_update.max(update);
        }

        observer(&WakeIteration {
            iteration,
            max_update: Angle::new::<radian>(max_update),
        });

        diagnostics = WakeDiagnostics {
            converged: max_update < controls.tolerance,
            iterations: iteration,
            max_update: Angle::new::<radian>(max_update),
        };
        if diagnostics.converged {
            break;
        }
    }

    let mut axial = Field::zeros(dim);
    let mut tangential = Field::zeros(dim);
    for ((p, i, k), &angle) in psi.indexed_iter() {
        let cell = [p, i, k];
        if inputs.total[cell] <= STILL_AIR {
            continue;
        }
        let (wa, wt) = velocity_triangle(
            inputs.total[cell],
            inputs.axial[cell],
            inputs.tangential[cell],
            angle,
        );
        axial[cell] = wa;
        tangential[cell] = wt;
    }

    let axial_induced = &axial - &inputs.axial;
    let tangential_induced = &inputs.tangential - &tangential;

    Ok(WakeSolution {
        axial,
        tangential,
        axial_induced,
        tangential_induced,
        last_update,
        diagnostics,
    })
}
