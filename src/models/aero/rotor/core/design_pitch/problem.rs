//! Problem formulation for design-pitch matching.

use std::convert::Infallible;

use twine_core::{EquationProblem, Model};
use uom::si::{
    angle::radian,
    f64::{Angle, Force},
    force::newton,
};

use crate::models::aero::rotor::core::{
    AirfoilLookup, OperatingBatch, OperatingPoint, Performance, Rotor, RotorInput, SolveError,
};

/// Model adapter for design-pitch solving.
///
/// Evaluates a single operating point with the pitch command as the sole
/// input variable.
pub(super) struct DesignPitchModel<'a, A> {
    rotor: &'a Rotor<A>,
    point: OperatingPoint,
}

impl<'a, A> DesignPitchModel<'a, A> {
    pub(super) fn new(rotor: &'a Rotor<A>, point: &OperatingPoint) -> Self {
        Self {
            rotor,
            point: OperatingPoint {
                design: false,
                ..*point
            },
        }
    }
}

impl<A: AirfoilLookup> Model for DesignPitchModel<'_, A> {
    type Input = Angle;
    type Output = Performance;
    type Error = SolveError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        let point = OperatingPoint {
            pitch_command: *input,
            ..self.point
        };
        self.rotor
            .evaluate(&RotorInput::from(OperatingBatch::single(point)))
    }
}

/// Equation problem definition for design-pitch matching.
///
/// Computes the residual as `achieved_thrust - target_thrust`.
pub(super) struct DesignPitchProblem {
    target_thrust: Force,
}

impl DesignPitchProblem {
    pub(super) fn new(target_thrust: Force) -> Self {
        Self { target_thrust }
    }
}

impl EquationProblem<1> for DesignPitchProblem {
    type Input = Angle;
    type Output = Performance;
    type Error = Infallible;

    fn input(&self, x: &[f64; 1]) -> Result<Self::Input, Self::Error> {
        Ok(Angle::new::<radian>(x[0]))
    }

    fn residuals(
        &self,
        _input: &Self::Input,
        output: &Self::Output,
    ) -> Result<[f64; 1], Self::Error> {
        let thrust = output
            .points
            .first()
            .map_or(0.0, |point| point.thrust.get::<newton>());
        Ok([thrust - self.target_thrust.get::<newton>()])
    }
}
