use ndarray::{Array1, Array2};
use ninterp::{
    interpolator::Extrapolate,
    prelude::{Interp2DOwned, Interpolator},
    strategy::Linear,
};
use uom::si::{angle::radian, f64::Angle};

use super::{AirfoilCoefficients, AirfoilError, AirfoilLookup, SectionState};

/// Mach number at which the Prandtl–Glauert factor stops growing.
const GLAUERT_MACH_LIMIT: f64 = 0.95;

/// Scales an incompressible lift coefficient by `1/√(1 − Ma²)` below Mach 1.
fn prandtl_glauert(lift: f64, mach: f64) -> f64 {
    if mach < 1.0 {
        let mach = mach.min(GLAUERT_MACH_LIMIT);
        lift / (1.0 - mach * mach).sqrt()
    } else {
        lift
    }
}

/// Tabulated lift and drag polars of one airfoil.
///
/// Coefficients are interpolated bilinearly over angle of attack and
/// Reynolds number. Queries outside the table are clamped to its edges.
pub struct AirfoilPolar {
    lift: Interp2DOwned<f64, Linear>,
    drag: Interp2DOwned<f64, Linear>,
}

impl AirfoilPolar {
    /// Creates a polar from tabulated coefficients.
    ///
    /// `lift` and `drag` have shape `(alpha.len(), reynolds.len())`. Both
    /// axes must be strictly increasing with at least two entries.
    ///
    /// # Errors
    ///
    /// Returns [`AirfoilError::Table`] if the grid and data do not form a
    /// valid table.
    pub fn new(
        alpha: &[Angle],
        reynolds: &[f64],
        lift: Array2<f64>,
        drag: Array2<f64>,
    ) -> Result<Self, AirfoilError> {
        let alpha: Array1<f64> = alpha.iter().map(|a| a.get::<radian>()).collect();
        let reynolds = Array1::from(reynolds.to_vec());

        Ok(Self {
            lift: Interp2DOwned::new(
                alpha.clone(),
                reynolds.clone(),
                lift,
                Linear,
                Extrapolate::Clamp,
            )?,
            drag: Interp2DOwned::new(alpha, reynolds, drag, Linear, Extrapolate::Clamp)?,
        })
    }

    /// Interpolates the polar at an angle of attack and Reynolds number.
    ///
    /// # Errors
    ///
    /// Returns [`AirfoilError::Interpolation`] if the query cannot be
    /// evaluated, for example when it is not a number.
    pub fn coefficients(
        &self,
        alpha: Angle,
        reynolds: f64,
    ) -> Result<AirfoilCoefficients, AirfoilError> {
        let point = [alpha.get::<radian>(), reynolds];
        Ok(AirfoilCoefficients {
            lift: self.lift.interpolate(&point)?,
            drag: self.drag.interpolate(&point)?,
        })
    }
}

/// A set of tabulated airfoil polars indexed by blade station assignment.
///
/// Tables hold incompressible data. Lift is corrected for Mach number with
/// the Prandtl–Glauert rule; drag is used as tabulated.
pub struct PolarTable {
    polars: Vec<AirfoilPolar>,
}

impl PolarTable {
    /// Creates a lookup from one polar per airfoil.
    ///
    /// # Errors
    ///
    /// Returns [`AirfoilError::EmptyTable`] if `polars` is empty.
    pub fn new(polars: Vec<AirfoilPolar>) -> Result<Self, AirfoilError> {
        if polars.is_empty() {
            return Err(AirfoilError::EmptyTable);
        }
        Ok(Self { polars })
    }
}

impl AirfoilLookup for PolarTable {
    fn airfoil_count(&self) -> usize {
        self.polars.len()
    }

    fn coefficients(
        &self,
        airfoil: usize,
        state: &SectionState,
    ) -> Result<AirfoilCoefficients, AirfoilError> {
        let polar = self
            .polars
            .get(airfoil)
            .ok_or(AirfoilError::UnknownAirfoil {
                airfoil,
                available: self.polars.len(),
            })?;
        let coefficients = polar.coefficients(state.alpha, state.reynolds)?;
        Ok(AirfoilCoefficients {
            lift: prandtl_glauert(coefficients.lift, state.mach),
            ..coefficients
        })
    }
}
