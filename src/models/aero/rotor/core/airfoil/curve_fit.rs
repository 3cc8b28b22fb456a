use std::f64::consts::{FRAC_PI_2, TAU};

use uom::{
    ConstZero,
    si::{angle::radian, f64::Angle},
};

use super::{AirfoilCoefficients, AirfoilError, AirfoilLookup, SectionState};

/// Analytic lift and drag fit for a single airfoil.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveFitSection {
    /// Angle of attack at zero lift.
    pub zero_lift_angle: Angle,

    /// Magnitude of the lift coefficient limit.
    pub max_lift: f64,
}

impl Default for CurveFitSection {
    fn default() -> Self {
        Self {
            zero_lift_angle: Angle::ZERO,
            max_lift: 1.5,
        }
    }
}

impl CurveFitSection {
    /// Evaluates the fit.
    ///
    /// Lift follows the thin-airfoil slope `2π` up to `±max_lift`, scaled by
    /// the Kármán–Tsien rule below Mach 1. Profile drag is a quartic in lift
    /// scaled to the local Reynolds number. Beyond 90° from zero lift the
    /// section is treated as a flat plate broadside to the flow.
    #[must_use]
    pub fn coefficients(&self, state: &SectionState) -> AirfoilCoefficients {
        let alpha = (state.alpha - self.zero_lift_angle).get::<radian>();
        if alpha.abs() >= FRAC_PI_2 {
            return AirfoilCoefficients {
                lift: 0.0,
                drag: 2.0,
            };
        }

        let mut lift = (TAU * alpha).clamp(-self.max_lift, self.max_lift);

        let mach = state.mach;
        if mach < 1.0 {
            let beta = (1.0 - mach * mach).sqrt();
            lift /= beta + mach * mach / (1.0 + beta) * lift.abs() / 2.0;
        }

        let profile = 0.108 * lift.powi(4) - 0.2612 * lift.powi(3) + 0.181 * lift.powi(2)
            - 0.0139 * lift
            + 0.0278;
        let drag = profile * (50_000.0 / state.reynolds.max(1.0)).powf(0.2);

        AirfoilCoefficients { lift, drag }
    }
}

/// Curve-fit airfoils indexed by blade station assignment.
///
/// The default lookup holds a single symmetric section.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveFitAirfoil {
    sections: Vec<CurveFitSection>,
}

impl Default for CurveFitAirfoil {
    fn default() -> Self {
        Self {
            sections: vec![CurveFitSection::default()],
        }
    }
}

impl CurveFitAirfoil {
    /// Creates a lookup from one fit per airfoil.
    ///
    /// # Errors
    ///
    /// Returns [`AirfoilError::EmptyTable`] if `sections` is empty.
    pub fn new(sections: Vec<CurveFitSection>) -> Result<Self, AirfoilError> {
        if sections.is_empty() {
            return Err(AirfoilError::EmptyTable);
        }
        Ok(Self { sections })
    }

    /// Fits for each airfoil.
    #[must_use]
    pub fn sections(&self) -> &[CurveFitSection] {
        &self.sections
    }
}

impl AirfoilLookup for CurveFitAirfoil {
    fn airfoil_count(&self) -> usize {
        self.sections.len()
    }

    fn coefficients(
        &self,
        airfoil: usize,
        state: &SectionState,
    ) -> Result<AirfoilCoefficients, AirfoilError> {
        self.sections
            .get(airfoil)
            .map(|section| section.coefficients(state))
            .ok_or(AirfoilError::UnknownAirfoil {
                airfoil,
                available: self.sections.len(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::angle::degree;

    fn state(alpha_deg: f64, mach: f64) -> SectionState {
        SectionState {
            alpha: Angle::new::<degree>(alpha_deg),
            reynolds: 50_000.0,
            mach,
            thickness_to_chord: 0.12,
        }
    }

    #[test]
    fn incompressible_lift_slope() {
        let fit = CurveFitSection::default();
        let c = fit.coefficients(&state(5.0, 0.0));

        assert_relative_eq!(c.lift, TAU * 5.0_f64.to_radians(), epsilon = 1e-12);
        assert!(c.drag > 0.0);
    }

    #[test]
    fn zero_lift_drag_at_reference_reynolds() {
        let c = CurveFitSection::default().coefficients(&state(0.0, 0.0));

        assert_relative_eq!(c.lift, 0.0);
        assert_relative_eq!(c.drag, 0.0278, epsilon = 1e-12);
    }

    #[test]
    fn lift_is_limited() {
        let c = CurveFitSection::default().coefficients(&state(30.0, 0.0));
        assert_relative_eq!(c.lift, 1.5);

        let c = CurveFitSection::default().coefficients(&state(-30.0, 0.0));
        assert_relative_eq!(c.lift, -1.5);
    }

    #[test]
    fn stalled_beyond_right_angle() {
        let c = CurveFitSection::default().coefficients(&state(120.0, 0.3));
        assert_eq!(
            c,
            AirfoilCoefficients {
                lift: 0.0,
                drag: 2.0
            }
        );
    }

    #[test]
    fn compressibility_raises_lift() {
        let fit = CurveFitSection::default();
        let low = fit.coefficients(&state(4.0, 0.0));
        let high = fit.coefficients(&state(4.0, 0.6));
        assert!(high.lift > low.lift);
    }

    #[test]
    fn higher_reynolds_lowers_drag() {
        let fit = CurveFitSection::default();
        let low = fit.coefficients(&state(2.0, 0.0));
        let high = fit.coefficients(&SectionState {
            reynolds: 1.0e6,
            ..state(2.0, 0.0)
        });
        assert!(high.drag < low.drag);
    }

    #[test]
    fn zero_lift_angle_shifts_curve() {
        let cambered = CurveFitSection {
            zero_lift_angle: Angle::new::<degree>(-2.0),
            ..CurveFitSection::default()
        };
        let c = cambered.coefficients(&state(0.0, 0.0));
        assert_relative_eq!(c.lift, TAU * 2.0_f64.to_radians(), epsilon = 1e-12);
    }

    #[test]
    fn rejects_empty_lookup() {
        assert!(matches!(
            CurveFitAirfoil::new(Vec::new()),
            Err(AirfoilError::EmptyTable)
        ));
    }
}
