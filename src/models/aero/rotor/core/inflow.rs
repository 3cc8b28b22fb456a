//! Assembly of the unloaded velocity field seen by each blade element.
//!
//! The raw field superposes the axial freestream, the in-plane freestream
//! components seen at each azimuth when the rotor operates at incidence, any
//! externally supplied non-uniform inflow, and the blade's own rotation.

use ndarray::Zip;

use crate::support::grid::Field;

use super::{
    SolveError,
    airfoil::ElementFlow,
    geometry::BladeGrid,
    operating::{NonUniformInflow, ResolvedPoint},
};

/// Velocity and blade fields on the solver grid, passed to the wake solver.
///
/// All velocities are in m/s and angles in radians.
#[derive(Debug, Clone)]
pub(crate) struct WakeInputs {
    /// Total unloaded velocity `U = √(Ua² + Ut²)`.
    pub(crate) total: Field,

    /// Unloaded axial velocity `Ua`, positive through the disc.
    pub(crate) axial: Field,

    /// Unloaded tangential velocity `Ut`, positive against the blade motion.
    pub(crate) tangential: Field,

    /// Blade pitch angle: twist plus pitch command.
    pub(crate) beta: Field,

    pub(crate) chord: Field,
    pub(crate) radius: Field,
    pub(crate) speed_of_sound: Field,
    pub(crate) kinematic_viscosity: Field,
}

impl WakeInputs {
    /// Flow at one element for a trial velocity triangle `(wa, wt)`.
    pub(crate) fn element(
        &self,
        grid: &BladeGrid,
        (p, i, k): (usize, usize, usize),
        wa: f64,
        wt: f64,
    ) -> ElementFlow {
        let index = [p, i, k];
        ElementFlow {
            airfoil: grid.airfoil[i],
            beta: self.beta[index],
            chord: self.chord[index],
            thickness_to_chord: grid.thickness_to_chord[i],
            axial: wa,
            tangential: wt,
            speed_of_sound: self.speed_of_sound[index],
            kinematic_viscosity: self.kinematic_viscosity[index],
        }
    }
}

/// Raw inflow over the solver grid.
#[derive(Debug, Clone)]
pub(crate) struct AssembledInflow {
    pub(crate) wake: WakeInputs,

    /// Raw radial velocity, positive outward.
    pub(crate) radial: Field,

    /// Azimuth of each element including its sweep offset.
    pub(crate) azimuth: Field,
}

/// Builds the raw velocity field for a batch of resolved operating points.
///
/// `rotation_sign` is `+1` for clockwise and `-1` for counterclockwise
/// rotation. In-plane freestream components are only resolved when the grid
/// is azimuth resolved.
pub(crate) fn assemble(
    grid: &BladeGrid,
    points: &[ResolvedPoint],
    rotation_sign: f64,
    inflow: Option<&NonUniformInflow>,
) -> Result<AssembledInflow, SolveError> {
    let shape = grid.shape(points.len());
    let per_point = |f: fn(&ResolvedPoint) -> f64| {
        let values: Vec<f64> = points.iter().map(f).collect();
        shape.per_point(&values)
    };

    let azimuth = shape.per_station_azimuth(&grid.effective_azimuth())?;
    let radius = shape.per_station(&grid.radius)?;
    let speed = per_point(ResolvedPoint::speed)?;

    let mut axial = per_point(|p| p.velocity[0])?;
    let (mut in_plane, mut radial) = if grid.azimuth_resolved {
        let lateral = per_point(|p| p.velocity[1])?;
        let vertical = per_point(|p| p.velocity[2])?;
        (
            Zip::from(&vertical)
                .and(&lateral)
                .and(&azimuth)
                .map_collect(|&vz, &vy, &psi| rotation_sign * (vz * psi.cos() + vy * psi.sin())),
            Zip::from(&vertical)
                .and(&lateral)
                .and(&azimuth)
                .map_collect(|&vz, &vy, &psi| vz * psi.sin() + vy * psi.cos()),
        )
    } else {
        (shape.zeros(), shape.zeros())
    };

    if let Some(inflow) = inflow {
        inflow.check(&shape)?;
        axial += &inflow.axial;
        in_plane += &inflow.tangential;
        radial += &inflow.radial;
    }

    let tangential = &speed * &radius - &in_plane;
    let total = Zip::from(&axial)
        .and(&tangential)
        .map_collect(|&ua, &ut| ua.hypot(ut));
    let beta = shape.per_station(&grid.twist)? + &per_point(|p| p.pitch)?;

    Ok(AssembledInflow {
        wake: WakeInputs {
            total,
            axial,
            tangential,
            beta,
            chord: shape.per_station(&grid.chord)?,
            radius,
            speed_of_sound: per_point(|p| p.speed_of_sound)?,
            kinematic_viscosity: per_point(|p| p.kinematic_viscosity)?,
        },
        radial,
        azimuth,
    })
}
