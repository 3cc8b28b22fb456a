//! Results types for rotor evaluation.

use std::f64::consts::{PI, TAU};

use ndarray::{Array1, Array2, Axis};
use uom::si::{
    f64::{Force, Power, Pressure, Torque},
    force::newton,
    power::watt,
    pressure::pascal,
    torque::newton_meter,
};

use crate::support::grid::{Field, GridShape, ShapeError, azimuth_mean};

use super::{
    airfoil::SectionAerodynamics,
    geometry::{BladeGrid, azimuth_stations},
    inflow::AssembledInflow,
    loads::{SectionalLoads, Totals},
    operating::ResolvedPoint,
    policy::{self, Outputs},
    tip_loss::TipLossCorrection,
    wake::{WakeDiagnostics, WakeSolution},
};

/// Rotor performance over a batch of control points.
///
/// Scalar results are reported per control point after the operating policy
/// is applied. Distributions hold the aerodynamic solution before throttle
/// and zeroing rules, so they stay meaningful for downstream consumers such
/// as noise analysis.
#[derive(Debug, Clone)]
pub struct Performance {
    /// Integrated results, one per control point.
    pub points: Vec<PointPerformance>,

    /// Azimuth-averaged distributions along the blade.
    pub radial: RadialDistributions,

    /// Per-element distributions over the full disc.
    pub disc: DiscDistributions,

    /// Convergence summary of the wake solve.
    pub wake: WakeDiagnostics,
}

/// Integrated rotor performance at one control point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointPerformance {
    /// Thrust along the rotor axis, signed by the rotational direction.
    pub thrust: Force,

    /// Thrust vector in body axes.
    pub thrust_vector: [Force; 3],

    /// Shaft torque.
    pub torque: Torque,

    /// Shaft power.
    pub power: Power,

    /// In-plane (H) force. Zero unless the disc is resolved in azimuth.
    pub inplane_force: Force,

    /// Thrust coefficient `T/(ρn²D⁴)`.
    pub thrust_coefficient: f64,

    /// Torque coefficient `Q/(ρn²D⁵)`.
    pub torque_coefficient: f64,

    /// Power coefficient `P/(ρn³D⁵)`.
    pub power_coefficient: f64,

    /// Ratio of ideal momentum-theory power to shaft power.
    pub figure_of_merit: f64,

    /// Ratio of useful propulsive power `V·T` to shaft power.
    pub propulsive_efficiency: f64,

    /// Thrust per unit disc area.
    pub disc_loading: Pressure,

    /// Thrust per unit shaft power, in N/W.
    pub power_loading: f64,

    /// Advance ratio `V/(nD)`.
    pub advance_ratio: f64,

    /// Helical tip Mach number.
    pub tip_mach: f64,

    /// Mean converged inflow ratio over the disc.
    pub mean_inflow_ratio: f64,

    /// True if every element of this point met the wake tolerance.
    pub converged: bool,
}

/// Azimuth-averaged distributions of shape `(points, radial)`.
///
/// Thrust and torque are rotor totals per unit span (all blades).
#[derive(Debug, Clone)]
pub struct RadialDistributions {
    /// Station radii in meters.
    pub radius: Array1<f64>,
    pub thrust: Array2<f64>,
    pub torque: Array2<f64>,
    pub circulation: Array2<f64>,
    pub lift_coefficient: Array2<f64>,
    pub drag_coefficient: Array2<f64>,
    /// Angle of attack in radians.
    pub alpha: Array2<f64>,
    pub axial_induced: Array2<f64>,
    pub tangential_induced: Array2<f64>,
    pub tip_loss: Array2<f64>,
    pub inflow_ratio: Array2<f64>,
}

/// Per-blade distributions of shape `(points, radial, azimuthal)`.
///
/// When the solve was not resolved in azimuth, each field is repeated over
/// the geometry's azimuthal stations. Velocities are in m/s and angles in
/// radians.
#[derive(Debug, Clone)]
pub struct DiscDistributions {
    /// Azimuth of each station in radians, before sweep offsets.
    pub azimuth: Array1<f64>,

    /// Unloaded axial velocity.
    pub axial_velocity: Field,

    /// Unloaded tangential velocity.
    pub tangential_velocity: Field,

    /// Unloaded radial velocity.
    pub radial_velocity: Field,

    pub axial_induced: Field,
    pub tangential_induced: Field,
    pub alpha: Field,
    pub lift_coefficient: Field,
    pub drag_coefficient: Field,
    pub mach: Field,
    pub reynolds: Field,
    pub circulation: Field,

    /// Thrust per unit span of one blade.
    pub thrust: Field,

    /// Torque per unit span of one blade.
    pub torque: Field,

    pub tip_loss: Field,
    pub inflow_ratio: Field,
}

/// Solved fields on the solver grid.
pub(crate) struct SolvedDisc<'a> {
    /// Azimuthal station count of the geometry.
    pub(crate) azimuthal_stations: usize,
    pub(crate) grid: &'a BladeGrid,
    pub(crate) points: &'a [ResolvedPoint],
    pub(crate) inflow: &'a AssembledInflow,
    pub(crate) wake: &'a WakeSolution,
    pub(crate) aero: &'a SectionAerodynamics,
    pub(crate) tip_loss: &'a TipLossCorrection,
    pub(crate) loads: &'a SectionalLoads,
}

/// Builds the performance record of a solved disc.
///
/// `tolerance` is the wake convergence tolerance in radians.
pub(crate) fn pack(
    disc: &SolvedDisc<'_>,
    totals: &Totals,
    tolerance: f64,
) -> Result<Performance, ShapeError> {
    let points = disc
        .points
        .iter()
        .enumerate()
        .map(|(p, point)| point_performance(disc, totals, p, point, tolerance))
        .collect();

    Ok(Performance {
        points,
        radial: radial_distributions(disc),
        disc: disc_distributions(disc)?,
        wake: disc.wake.diagnostics,
    })
}

fn point_performance(
    disc: &SolvedDisc<'_>,
    totals: &Totals,
    p: usize,
    point: &ResolvedPoint,
    tolerance: f64,
) -> PointPerformance {
    let tip = disc.grid.tip_radius;
    let diameter = 2.0 * tip;
    let area = PI * tip * tip;

    let out = policy::apply(
        point.omega,
        point.throttle,
        Outputs::from_totals(
            totals.thrust[p],
            totals.torque[p],
            totals.power[p],
            totals.inplane[p],
            point.density,
            point.speed(),
            diameter,
        ),
    );
    let (thrust, power) = (out.thrust, out.power);

    let axial_speed = point.velocity[0];
    let freestream_speed = point.velocity.norm();
    let n = point.speed() / TAU;

    let (figure_of_merit, propulsive_efficiency) = if power > 0.0 {
        let ideal = thrust.abs() * (thrust.abs() / (2.0 * point.density * area)).sqrt();
        (ideal / power, axial_speed * thrust / power)
    } else {
        (0.0, 0.0)
    };
    let power_loading = if power == 0.0 { 0.0 } else { thrust / power };
    let advance_ratio = if n > 0.0 {
        axial_speed / (n * diameter)
    } else {
        0.0
    };
    let tip_mach = (point.speed() * tip).hypot(freestream_speed) / point.speed_of_sound;

    let converged = disc.wake.diagnostics.iterations > 0
        && disc
            .wake
            .last_update
            .index_axis(Axis(0), p)
            .iter()
            .all(|&update| update < tolerance);
    let mean_inflow_ratio = disc
        .tip_loss
        .inflow_ratio
        .index_axis(Axis(0), p)
        .mean()
        .unwrap_or(0.0);

    let axis = point.rotor_to_body.axis(0);

    PointPerformance {
        thrust: Force::new::<newton>(thrust),
        thrust_vector: [axis.x, axis.y, axis.z].map(|a| Force::new::<newton>(thrust * a)),
        torque: Torque::new::<newton_meter>(out.torque),
        power: Power::new::<watt>(power),
        inplane_force: Force::new::<newton>(out.inplane),
        thrust_coefficient: out.thrust_coefficient,
        torque_coefficient: out.torque_coefficient,
        power_coefficient: out.power_coefficient,
        figure_of_merit,
        propulsive_efficiency,
        disc_loading: Pressure::new::<pascal>(thrust / area),
        power_loading,
        advance_ratio,
        tip_mach,
        mean_inflow_ratio,
        converged,
    }
}

fn radial_distributions(disc: &SolvedDisc<'_>) -> RadialDistributions {
    let blades = disc.grid.blade_count;
    RadialDistributions {
        radius: disc.grid.radius.clone(),
        thrust: azimuth_mean(&disc.loads.thrust) * blades,
        torque: azimuth_mean(&disc.loads.torque) * blades,
        circulation: azimuth_mean(&disc.loads.circulation),
        lift_coefficient: azimuth_mean(&disc.aero.lift),
        drag_coefficient: azimuth_mean(&disc.loads.drag),
        alpha: azimuth_mean(&disc.aero.alpha),
        axial_induced: azimuth_mean(&disc.wake.axial_induced),
        tangential_induced: azimuth_mean(&disc.wake.tangential_induced),
        tip_loss: azimuth_mean(&disc.tip_loss.factor),
        inflow_ratio: azimuth_mean(&disc.tip_loss.inflow_ratio),
    }
}

fn disc_distributions(disc: &SolvedDisc<'_>) -> Result<DiscDistributions, ShapeError> {
    let stations = disc.azimuthal_stations;
    let spread = |field: &Field| GridShape::spread_azimuth(field.clone(), stations);

    Ok(DiscDistributions {
        azimuth: azimuth_stations(stations),
        axial_velocity: spread(&disc.inflow.wake.axial)?,
        tangential_velocity: spread(&disc.inflow.wake.tangential)?,
        radial_velocity: spread(&disc.inflow.radial)?,
        axial_induced: spread(&disc.wake.axial_induced)?,
        tangential_induced: spread(&disc.wake.tangential_induced)?,
        alpha: spread(&disc.aero.alpha)?,
        lift_coefficient: spread(&disc.aero.lift)?,
        drag_coefficient: spread(&disc.loads.drag)?,
        mach: spread(&disc.aero.mach)?,
        reynolds: spread(&disc.aero.reynolds)?,
        circulation: spread(&disc.loads.circulation)?,
        thrust: spread(&disc.loads.thrust)?,
        torque: spread(&disc.loads.torque)?,
        tip_loss: spread(&disc.tip_loss.factor)?,
        inflow_ratio: spread(&disc.tip_loss.inflow_ratio)?,
    })
}
