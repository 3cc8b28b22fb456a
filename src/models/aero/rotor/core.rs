//! Blade-element rotor performance with a vortex-wake inflow model.
//!
//! A rotor is divided into radial blade elements and, when the disc is
//! resolved in azimuth, into azimuthal stations. For a batch of operating
//! points the solve proceeds as:
//!
//! 1. Resolve each operating point into the rotor thrust frame.
//! 2. Assemble the unloaded velocity field over the disc.
//! 3. Solve for the wake-induced velocities that balance the circulation
//!    bound to each blade section against its helical vortex wake.
//! 4. Evaluate section aerodynamics, tip loss, and sectional loads.
//! 5. Integrate loads over the disc and apply the operating policy.
//!
//! Wake non-convergence degrades accuracy but is never an error. It is
//! reported per control point and in [`WakeDiagnostics`].

mod airfoil;
mod design_pitch;
mod error;
mod frames;
mod geometry;
mod inflow;
mod loads;
mod operating;
mod policy;
mod results;
mod tip_loss;
mod wake;

#[cfg(test)]
mod test_support;

pub use airfoil::{
    AirfoilCoefficients, AirfoilError, AirfoilLookup, AirfoilPolar, CurveFitAirfoil,
    CurveFitSection, PolarTable, SectionState,
};
pub use design_pitch::{DesignPitch, DesignPitchConfig, DesignPitchError};
pub use error::SolveError;
pub use frames::{Orientation, Rotation};
pub use geometry::{BladeGeometry, BladeStation, GeometryError, RotationDirection, RotorGeometry};
pub use operating::{Freestream, NonUniformInflow, OperatingBatch, OperatingPoint, RotorInput};
pub use results::{DiscDistributions, Performance, PointPerformance, RadialDistributions};
pub use wake::{WakeConfig, WakeDiagnostics, WakeIteration};

use uom::si::{angle::radian, f64::Force};

use airfoil::section_aerodynamics;
use geometry::BladeGrid;
use loads::SectionalLoads;
use operating::ResolvedPoint;
use results::SolvedDisc;
use tip_loss::TipLossCorrection;

/// Analysis options for a rotor.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RotorConfig {
    /// Resolves the disc in azimuth.
    ///
    /// Needed for in-plane freestream components and the in-plane force.
    /// Supplying a non-uniform inflow enables it regardless.
    pub use_2d_analysis: bool,

    /// Wake solver controls.
    pub wake: WakeConfig,
}

/// A rotor ready for evaluation.
///
/// Combines validated geometry with an airfoil lookup chosen at construction.
#[derive(Debug, Clone)]
pub struct Rotor<A> {
    geometry: RotorGeometry,
    airfoils: A,
    config: RotorConfig,
}

impl<A: AirfoilLookup> Rotor<A> {
    /// Creates a rotor.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::UnknownAirfoil`] if a station refers to an
    /// airfoil index the lookup does not provide.
    pub fn new(
        geometry: RotorGeometry,
        airfoils: A,
        config: RotorConfig,
    ) -> Result<Self, GeometryError> {
        let available = airfoils.airfoil_count();
        if let Some((index, station)) = geometry
            .stations()
            .iter()
            .enumerate()
            .find(|(_, station)| station.airfoil >= available)
        {
            return Err(GeometryError::UnknownAirfoil {
                index,
                airfoil: station.airfoil,
                available,
            });
        }

        Ok(Self {
            geometry,
            airfoils,
            config,
        })
    }

    /// Rotor geometry.
    #[must_use]
    pub fn geometry(&self) -> &RotorGeometry {
        &self.geometry
    }

    /// Airfoil lookup.
    #[must_use]
    pub fn airfoils(&self) -> &A {
        &self.airfoils
    }

    /// Analysis options.
    #[must_use]
    pub fn config(&self) -> &RotorConfig {
        &self.config
    }

    /// Evaluates the rotor over a batch of operating points.
    ///
    /// # Errors
    ///
    /// Returns a [`SolveError`] if an operating point or the inflow is
    /// invalid, or if the airfoil lookup fails.
    pub fn evaluate(&self, input: &RotorInput) -> Result<Performance, SolveError> {
        self.evaluate_observed(input, |_| {})
    }

    /// Evaluates the rotor, reporting every wake sweep to `observer`.
    ///
    /// # Errors
    ///
    /// Returns a [`SolveError`] if an operating point or the inflow is
    /// invalid, or if the airfoil lookup fails.
    pub fn evaluate_observed<O>(
        &self,
        input: &RotorInput,
        observer: O,
    ) -> Result<Performance, SolveError>
    where
        O: FnMut(&WakeIteration),
    {
        let orientation = self.geometry.orientation();
        let points = input
            .batch
            .points()
            .iter()
            .enumerate()
            .map(|(index, point)| ResolvedPoint::resolve(index, point, &orientation))
            .collect::<Result<Vec<_>, _>>()?;

        let azimuth_resolved = self.config.use_2d_analysis || input.inflow.is_some();
        let grid = BladeGrid::new(&self.geometry, azimuth_resolved);

        let inflow = inflow::assemble(
            &grid,
            &points,
            self.geometry.rotation().sign(),
            input.inflow.as_ref(),
        )?;
        let wake = wake::solve(
            &self.airfoils,
            &grid,
            &inflow.wake,
            &self.config.wake,
            observer,
        )?;

        let aero = section_aerodynamics(&self.airfoils, inflow.wake.total.dim(), |(p, i, k)| {
            let cell = [p, i, k];
            inflow
                .wake
                .element(&grid, (p, i, k), wake.axial[cell], wake.tangential[cell])
        })?;
        let tip_loss = TipLossCorrection::new(
            &grid,
            &inflow.wake.radius,
            (&inflow.wake.axial, &inflow.wake.tangential),
            (&wake.axial, &wake.tangential),
        );
        let loads = SectionalLoads::new(&grid, &points, &inflow.wake, &aero, &wake, &inflow.azimuth)?;
        let totals = loads::integrate(&grid, &points, &loads);

        let disc = SolvedDisc {
            azimuthal_stations: self.geometry.azimuthal_stations(),
            grid: &grid,
            points: &points,
            inflow: &inflow,
            wake: &wake,
            aero: &aero,
            tip_loss: &tip_loss,
            loads: &loads,
        };
        let tolerance = self.config.wake.tolerance.get::<radian>().abs();

        Ok(results::pack(&disc, &totals, tolerance)?)
    }

    /// Finds the pitch command that produces `target_thrust` at `point`.
    ///
    /// # Errors
    ///
    /// Returns a [`DesignPitchError`] if an evaluation fails, the pitch
    /// bracket does not straddle the target, or the solver does not converge.
    pub fn design_pitch(
        &self,
        point: &OperatingPoint,
        target_thrust: Force,
        config: &DesignPitchConfig,
    ) -> Result<DesignPitch, DesignPitchError> {
        design_pitch::design_pitch(self, point, target_thrust, config)
    }
}
