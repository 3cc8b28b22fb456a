//! Sign, zeroing, and throttle rules applied to integrated rotor outputs.
//!
//! Rules are applied in order:
//!
//! 1. Thrust takes the sign of the rotational speed.
//! 2. Zero rotational speed zeroes every force, moment, power, and coefficient.
//! 3. A throttle at or below zero zeroes every force, moment, and power.
//! 4. A throttle above one scales thrust, in-plane force, and power linearly.
//! 5. Thrust, torque, and power coefficients are clamped at zero.

use std::f64::consts::TAU;

/// Rotor outputs at one control point, in base SI units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Outputs {
    pub(crate) thrust: f64,
    pub(crate) torque: f64,
    pub(crate) power: f64,
    pub(crate) inplane: f64,
    pub(crate) thrust_coefficient: f64,
    pub(crate) torque_coefficient: f64,
    pub(crate) power_coefficient: f64,
}

impl Outputs {
    /// Forms outputs and their coefficients from aerodynamic totals.
    ///
    /// With `n = |ω|/2π` and `D` the diameter:
    /// `Ct = T/(ρn²D⁴)`, `Cq = Q/(ρn²D⁵)`, `Cp = P/(ρn³D⁵)`.
    /// Coefficients are zero when the rotor is not turning.
    pub(crate) fn from_totals(
        thrust: f64,
        torque: f64,
        power: f64,
        inplane: f64,
        density: f64,
        speed: f64,
        diameter: f64,
    ) -> Self {
        let n = speed.abs() / TAU;
        let (thrust_coefficient, torque_coefficient, power_coefficient) = if n > 0.0 {
            let d4 = diameter.powi(4);
            let d5 = d4 * diameter;
            (
                thrust / (density * n * n * d4),
                torque / (density * n * n * d5),
                power / (density * n * n * n * d5),
            )
        } else {
            (0.0, 0.0, 0.0)
        };

        Self {
            thrust,
            torque,
            power,
            inplane,
            thrust_coefficient,
            torque_coefficient,
            power_coefficient,
        }
    }
}

/// Applies the operating policy for signed speed `omega` and `throttle`.
pub(crate) fn apply(omega: f64, throttle: f64, raw: Outputs) -> Outputs {
    let mut out = raw;

    if omega < 0.0 {
        out.thrust = -out.thrust;
    }

    if omega == 0.0 {
        out = Outputs {
            thrust: 0.0,
            torque: 0.0,
            power: 0.0,
            inplane: 0.0,
            thrust_coefficient: 0.0,
            torque_coefficient: 0.0,
            power_coefficient: 0.0,
        };
    }

    if throttle <= 0.0 {
        out.thrust = 0.0;
        out.torque = 0.0;
        out.power = 0.0;
        out.inplane = 0.0;
    } else if throttle > 1.0 {
        out.thrust *= throttle;
        out.inplane *= throttle;
        out.power *= throttle;
    }

    out.thrust_coefficient = out.thrust_coefficient.max(0.0);
    out.torque_coefficient = out.torque_coefficient.max(0.0);
    out.power_coefficient = out.power_coefficient.max(0.0);

    out
}
