//! Prandtl tip-loss correction and the converged inflow ratio.

use std::f64::consts::PI;

use ndarray::Zip;

use crate::support::grid::Field;

use super::geometry::BladeGrid;

/// Smallest wake inflow ratio magnitude used in the tip-loss exponent.
const MIN_INFLOW_RATIO: f64 = 1e-12;

/// Wake inflow ratio `λw = r·Wa / (R·Wt)` of a velocity triangle.
pub(crate) fn wake_inflow_ratio(radius: f64, tip_radius: f64, wa: f64, wt: f64) -> f64 {
    radius * wa / (tip_radius * wt)
}

/// Prandtl tip-loss factor.
///
/// `F = (2/π)·acos(exp(-f))` with `f = (B/2)·(1 - r/R)/|λw|` clipped at zero.
/// The factor lies in `(0, 1]` inboard of the tip, tends to 1 away from it,
/// and vanishes at the tip.
pub(crate) fn factor(blade_count: f64, radius: f64, tip_radius: f64, inflow_ratio: f64) -> f64 {
    let lambda = inflow_ratio.abs().max(MIN_INFLOW_RATIO);
    let f = (0.5 * blade_count * (1.0 - radius / tip_radius) / lambda).max(0.0);
    (2.0 * (-f).exp().acos() / PI).min(1.0)
}

/// Converged inflow ratio `λ = r·(va + Ua) / (R·(Ut - vt))`.
///
/// Returns zero when the tangential velocity vanishes.
pub(crate) fn inflow_ratio(
    radius: f64,
    tip_radius: f64,
    axial: f64,
    tangential: f64,
    axial_induced: f64,
    tangential_induced: f64,
) -> f64 {
    let denominator = tip_radius * (tangential - tangential_induced);
    if denominator == 0.0 {
        return 0.0;
    }
    radius * (axial_induced + axial) / denominator
}

/// Tip-loss factor and inflow ratio over the solver grid.
#[derive(Debug, Clone)]
pub(crate) struct TipLossCorrection {
    pub(crate) factor: Field,
    pub(crate) inflow_ratio: Field,
}

impl TipLossCorrection {
    /// Evaluates the correction for a converged velocity triangle.
    ///
    /// `wa` and `wt` are the loaded axial and tangential velocities, `ua` and
    /// `ut` the unloaded ones.
    pub(crate) fn new(
        grid: &BladeGrid,
        radius: &Field,
        (ua, ut): (&Field, &Field),
        (wa, wt): (&Field, &Field),
    ) -> Self {
        let tip = grid.tip_radius;
        let blades = grid.blade_count;

        let factor = Zip::from(radius)
            .and(wa)
            .and(wt)
            .map_collect(|&r, &wa, &wt| {
                factor(blades, r, tip, wake_inflow_ratio(r, tip, wa, wt))
            });

        let inflow_ratio = Zip::from(radius)
            .and(ua)
            .and(ut)
            .and(wa)
            .and(wt)
            .map_collect(|&r, &ua, &ut, &wa, &wt| {
                inflow_ratio(r, tip, ua, ut, wa - ua, ut - wt)
            });

        Self {
            factor,
            inflow_ratio,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn factor_is_bounded_and_vanishes_at_tip() {
        let tip = 1.0;
        for lambda in [0.01, 0.05, 0.2, 1.0] {
            for i in 0..100 {
                let r = 0.1 + 0.009 * f64::from(i);
                let f = factor(2.0, r, tip, lambda);
                assert!(f > 0.0 && f <= 1.0, "F({r}, {lambda}) = {f}");
            }
            assert_eq!(factor(2.0, tip, tip, lambda), 0.0);
        }
    }

    #[test]
    fn factor_grows_away_from_tip() {
        let near = factor(3.0, 0.98, 1.0, 0.05);
        let mid = factor(3.0, 0.7, 1.0, 0.05);

        assert!(near < mid);
        assert_relative_eq!(mid, 1.0, epsilon = 1e-3);
    }

    #[test]
    fn factor_beyond_tip_is_zero() {
        assert_eq!(factor(2.0, 1.05, 1.0, 0.1), 0.0);
    }

    #[test]
    fn vanishing_inflow_gives_no_loss_inboard() {
        assert_relative_eq!(factor(2.0, 0.5, 1.0, 0.0), 1.0);
        assert_relative_eq!(factor(2.0, 0.5, 1.0, f64::NAN), 1.0);
    }

    #[test]
    fn inflow_ratio_of_velocity_triangle() {
        // λ = r·(va + Ua) / (R·(Ut - vt)) = 0.5·(2 + 10) / (1·(100 - 4))
        assert_relative_eq!(inflow_ratio(0.5, 1.0, 10.0, 100.0, 2.0, 4.0), 6.0 / 96.0);
        assert_eq!(inflow_ratio(0.5, 1.0, 0.0, 0.0, 0.0, 0.0), 0.0);
    }

    #[test]
    fn wake_ratio_matches_loaded_triangle() {
        assert_relative_eq!(wake_inflow_ratio(0.5, 1.0, 12.0, 96.0), 0.0625);
    }
}
