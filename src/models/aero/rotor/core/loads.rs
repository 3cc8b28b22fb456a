//! Blade-element loads and their integration over the disc.

use ndarray::Array1;

use crate::support::grid::{Field, ShapeError, azimuth_mean, radial_integral};

use super::{
    airfoil::SectionAerodynamics, geometry::BladeGrid, inflow::WakeInputs,
    operating::ResolvedPoint, wake::WakeSolution,
};

/// Drag-to-lift ratio used where lift vanishes.
pub(crate) const MAX_DRAG_TO_LIFT: f64 = 10.0;

/// Sutherland constant for air, in kelvin.
const SUTHERLAND: f64 = 110.4;

/// Applies the skin-friction compressibility correction to a drag coefficient.
///
/// Uses the reference-temperature method: the wall and reference
/// temperatures rise with Mach number, lowering the effective Reynolds
/// number and density in the boundary layer.
pub(crate) fn compressible_drag(drag: f64, mach: f64, temperature: f64) -> f64 {
    let m2 = mach * mach;
    let wall = 1.0 + 1.78 * m2;
    let reference = 1.0 + 0.035 * m2 + 0.45 * (wall - 1.0);
    let reference_temperature = reference * temperature;
    let reynolds = reference.powf(2.5) * (reference_temperature + SUTHERLAND)
        / (temperature + SUTHERLAND);

    drag * (1.0 / reference) * (1.0 / reynolds).powf(0.2)
}

/// Drag-to-lift ratio `ε = Cd/Cl`, capped in magnitude where lift vanishes.
///
/// The cap keeps the sign of the ratio. Zero or non-finite ratios take the
/// positive cap.
pub(crate) fn drag_to_lift(lift: f64, drag: f64) -> f64 {
    let ratio = drag / lift;
    if !ratio.is_finite() {
        MAX_DRAG_TO_LIFT
    } else {
        ratio.clamp(-MAX_DRAG_TO_LIFT, MAX_DRAG_TO_LIFT)
    }
}

/// Per-blade loads on every element.
#[derive(Debug, Clone)]
pub(crate) struct SectionalLoads {
    /// Compressibility-corrected drag coefficient.
    pub(crate) drag: Field,

    /// Bound circulation `Γ = ½·W·c·Cl`.
    pub(crate) circulation: Field,

    /// Thrust per unit span, N/m.
    pub(crate) thrust: Field,

    /// Torque per unit span, N·m/m.
    pub(crate) torque: Field,

    /// In-plane force per unit span, N/m. Zero unless azimuth resolved.
    pub(crate) inplane: Field,
}

impl SectionalLoads {
    /// Forms the sectional loads of a converged wake.
    pub(crate) fn new(
        grid: &BladeGrid,
        points: &[ResolvedPoint],
        inputs: &WakeInputs,
        aero: &SectionAerodynamics,
        wake: &WakeSolution,
        azimuth: &Field,
    ) -> Result<Self, ShapeError> {
        let shape = grid.shape(points.len());
        let density: Vec<f64> = points.iter().map(|p| p.density).collect();
        let temperature: Vec<f64> = points.iter().map(|p| p.temperature).collect();
        let density = shape.per_point(&density)?;
        let temperature = shape.per_point(&temperature)?;

        let mut loads = Self {
            drag: shape.zeros(),
            circulation: shape.zeros(),
            thrust: shape.zeros(),
            torque: shape.zeros(),
            inplane: shape.zeros(),
        };

        for ((p, i, k), &lift) in aero.lift.indexed_iter() {
            let cell = [p, i, k];
            let drag = compressible_drag(aero.drag[cell], aero.mach[cell], temperature[cell]);
            let epsilon = drag_to_lift(lift, drag);
            let circulation = 0.5 * aero.velocity[cell] * inputs.chord[cell] * lift;

            let rho_gamma = density[cell] * circulation;
            let (wa, wt) = (wake.axial[cell], wake.tangential[cell]);
            let in_plane = rho_gamma * (wa + epsilon * wt);

            loads.drag[cell] = drag;
            loads.circulation[cell] = circulation;
            loads.thrust[cell] = rho_gamma * (wt - epsilon * wa);
            loads.torque[cell] = in_plane * grid.radius[i];
            if grid.azimuth_resolved {
                loads.inplane[cell] = in_plane * azimuth[cell].sin();
            }
        }

        Ok(loads)
    }
}

/// Rotor totals per control point, before the operating policy.
#[derive(Debug, Clone)]
pub(crate) struct Totals {
    pub(crate) thrust: Array1<f64>,
    pub(crate) torque: Array1<f64>,
    pub(crate) power: Array1<f64>,
    pub(crate) inplane: Array1<f64>,
}

/// Integrates sectional loads over the disc and multiplies by blade count.
///
/// Each field is averaged over azimuth and summed over the radial weights.
pub(crate) fn integrate(grid: &BladeGrid, points: &[ResolvedPoint], loads: &SectionalLoads) -> Totals {
    let total = |field: &Field| {
        radial_integral(&azimuth_mean(field), grid.weights.view()) * grid.blade_count
    };

    let torque = total(&loads.torque);
    let speed: Array1<f64> = points.iter().map(ResolvedPoint::speed).collect();

    Totals {
        thrust: total(&loads.thrust),
        power: &speed * &torque,
        torque,
        inplane: total(&loads.inplane),
    }
}
