//! Airfoil lift and drag coefficients.
//!
//! The rotor is generic over an [`AirfoilLookup`] chosen when it is built.
//! Two lookups are provided:
//!
//! - [`PolarTable`]: tabulated polars over angle of attack and Reynolds number.
//! - [`CurveFitAirfoil`]: an analytic thin-airfoil fit with compressibility
//!   and Reynolds corrections, useful when no polar data is available.

mod curve_fit;
mod error;
mod polar_table;

pub use curve_fit::{CurveFitAirfoil, CurveFitSection};
pub use error::AirfoilError;
pub use polar_table::{AirfoilPolar, PolarTable};

use uom::si::{angle::radian, f64::Angle};

use crate::support::grid::Field;

/// Source of section lift and drag coefficients.
///
/// Implementations must be pure: the same airfoil and state always give the
/// same coefficients.
pub trait AirfoilLookup {
    /// Number of airfoils available. Valid indices are `0..airfoil_count()`.
    fn airfoil_count(&self) -> usize;

    /// Returns the coefficients of `airfoil` at the given section state.
    ///
    /// # Errors
    ///
    /// Returns an [`AirfoilError`] if the airfoil index is unknown or the
    /// underlying data cannot be evaluated.
    fn coefficients(
        &self,
        airfoil: usize,
        state: &SectionState,
    ) -> Result<AirfoilCoefficients, AirfoilError>;
}

impl<A: AirfoilLookup + ?Sized> AirfoilLookup for &A {
    fn airfoil_count(&self) -> usize {
        (**self).airfoil_count()
    }

    fn coefficients(
        &self,
        airfoil: usize,
        state: &SectionState,
    ) -> Result<AirfoilCoefficients, AirfoilError> {
        (**self).coefficients(airfoil, state)
    }
}

/// Local flow state seen by a blade section.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionState {
    /// Effective angle of attack.
    pub alpha: Angle,

    /// Chord Reynolds number.
    pub reynolds: f64,

    /// Local Mach number.
    pub mach: f64,

    /// Section thickness-to-chord ratio.
    pub thickness_to_chord: f64,
}

/// Section lift and drag coefficients.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AirfoilCoefficients {
    /// Lift coefficient.
    pub lift: f64,

    /// Drag coefficient.
    pub drag: f64,
}

/// Geometry and velocity triangle of one blade element, in base SI units.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ElementFlow {
    pub(crate) airfoil: usize,
    pub(crate) beta: f64,
    pub(crate) chord: f64,
    pub(crate) thickness_to_chord: f64,
    pub(crate) axial: f64,
    pub(crate) tangential: f64,
    pub(crate) speed_of_sound: f64,
    pub(crate) kinematic_viscosity: f64,
}

/// Aerodynamic state of one blade element.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Section {
    pub(crate) alpha: f64,
    pub(crate) velocity: f64,
    pub(crate) reynolds: f64,
    pub(crate) mach: f64,
    pub(crate) lift: f64,
    pub(crate) drag: f64,
}

/// Evaluates a single blade element.
pub(crate) fn evaluate_section<A: AirfoilLookup + ?Sized>(
    airfoils: &A,
    flow: &ElementFlow,
) -> Result<Section, AirfoilError> {
    let velocity = flow.axial.hypot(flow.tangential);
    let alpha = flow.beta - flow.axial.atan2(flow.tangential);
    let reynolds = velocity * flow.chord / flow.kinematic_viscosity;
    let mach = velocity / flow.speed_of_sound;

    let coefficients = airfoils.coefficients(
        flow.airfoil,
        &SectionState {
            alpha: Angle::new::<radian>(alpha),
            reynolds,
            mach,
            thickness_to_chord: flow.thickness_to_chord,
        },
    )?;

    Ok(Section {
        alpha,
        velocity,
        reynolds,
        mach,
        lift: coefficients.lift,
        drag: coefficients.drag,
    })
}

/// Sectional aerodynamics over the solver grid.
#[derive(Debug, Clone)]
pub(crate) struct SectionAerodynamics {
    pub(crate) lift: Field,
    pub(crate) drag: Field,
    pub(crate) alpha: Field,
    pub(crate) mach: Field,
    pub(crate) velocity: Field,
    pub(crate) reynolds: Field,
}

/// Evaluates every element of the grid.
///
/// `element` returns the flow at a `(point, radial, azimuthal)` index.
pub(crate) fn section_aerodynamics<A, F>(
    airfoils: &A,
    dim: (usize, usize, usize),
    element: F,
) -> Result<SectionAerodynamics, AirfoilError>
where
    A: AirfoilLookup + ?Sized,
    F: Fn((usize, usize, usize)) -> ElementFlow,
{
    let mut out = SectionAerodynamics {
        lift: Field::zeros(dim),
        drag: Field::zeros(dim),
        alpha: Field::zeros(dim),
        mach: Field::zeros(dim),
        velocity: Field::zeros(dim),
        reynolds: Field::zeros(dim),
    };

    let (points, radial, azimuthal) = dim;
    for p in 0..points {
        for i in 0..radial {
            for k in 0..azimuthal {
                let index = [p, i, k];
                let section = evaluate_section(airfoils, &element((p, i, k)))?;
                out.lift[index] = section.lift;
                out.drag[index] = section.drag;
                out.alpha[index] = section.alpha;
                out.mach[index] = section.mach;
                out.velocity[index] = section.velocity;
                out.reynolds[index] = section.reynolds;
            }
        }
    }

    Ok(out)
}
