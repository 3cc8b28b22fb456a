//! Radial and azimuthal discretization of the rotor disc.

use std::f64::consts::TAU;

use ndarray::{Array1, Array2};
use uom::si::{angle::radian, length::meter, ratio::ratio};

use crate::support::grid::GridShape;

use super::RotorGeometry;

/// Blade-element grid in base SI units.
///
/// Radial arrays have one entry per station. The azimuth array has
/// `azimuthal_stations` entries when the disc is resolved in azimuth and a
/// single zero entry otherwise.
#[derive(Debug, Clone)]
pub(crate) struct BladeGrid {
    pub(crate) azimuth_resolved: bool,
    pub(crate) blade_count: f64,
    pub(crate) tip_radius: f64,
    pub(crate) radius: Array1<f64>,
    pub(crate) weights: Array1<f64>,
    pub(crate) chord: Array1<f64>,
    pub(crate) twist: Array1<f64>,
    pub(crate) thickness_to_chord: Array1<f64>,
    pub(crate) airfoil: Vec<usize>,
    pub(crate) sweep_offset: Array1<f64>,
    pub(crate) azimuth: Array1<f64>,
}

impl BladeGrid {
    /// Discretizes a validated geometry.
    pub(crate) fn new(geometry: &RotorGeometry, azimuth_resolved: bool) -> Self {
        let stations = geometry.stations();
        let radius: Array1<f64> = stations.iter().map(|s| s.radius.get::<meter>()).collect();
        let sweep: Array1<f64> = stations.iter().map(|s| s.sweep.get::<meter>()).collect();

        let sweep_offset = ndarray::Zip::from(&sweep)
            .and(&radius)
            .map_collect(|&sweep, &r| if r > 0.0 { (sweep / r).atan() } else { 0.0 });

        let azimuth = if azimuth_resolved {
            azimuth_stations(geometry.azimuthal_stations())
        } else {
            Array1::zeros(1)
        };

        #[allow(clippy::cast_precision_loss)]
        let blade_count = geometry.blade_count() as f64;

        Self {
            azimuth_resolved,
            blade_count,
            tip_radius: geometry.tip_radius().get::<meter>(),
            weights: radial_weights(
                &radius,
                geometry.hub_radius().get::<meter>(),
                geometry.tip_radius().get::<meter>(),
            ),
            radius,
            chord: stations.iter().map(|s| s.chord.get::<meter>()).collect(),
            twist: stations.iter().map(|s| s.twist.get::<radian>()).collect(),
            thickness_to_chord: stations
                .iter()
                .map(|s| s.thickness_to_chord.get::<ratio>())
                .collect(),
            airfoil: stations.iter().map(|s| s.airfoil).collect(),
            sweep_offset,
            azimuth,
        }
    }

    /// Number of radial stations.
    pub(crate) fn radial_stations(&self) -> usize {
        self.radius.len()
    }

    /// Number of azimuthal stations in the solver grid.
    pub(crate) fn azimuthal_stations(&self) -> usize {
        self.azimuth.len()
    }

    /// Grid shape for `points` control points.
    pub(crate) fn shape(&self, points: usize) -> GridShape {
        GridShape::new(points, self.radial_stations(), self.azimuthal_stations())
    }

    /// Azimuth of every element including its sweep offset, shape `(radial, azimuthal)`.
    pub(crate) fn effective_azimuth(&self) -> Array2<f64> {
        Array2::from_shape_fn(
            (self.radial_stations(), self.azimuthal_stations()),
            |(i, k)| self.azimuth[k] + self.sweep_offset[i],
        )
    }
}

/// Evenly spaced azimuth stations over one revolution, starting at zero.
pub(crate) fn azimuth_stations(count: usize) -> Array1<f64> {
    #[allow(clippy::cast_precision_loss)]
    Array1::from_shape_fn(count, |k| TAU * k as f64 / count as f64)
}

/// Radial integration widths for each station.
///
/// Each station owns the span between the midpoints to its neighbours. The
/// first and last cells extend to the hub and tip, so the widths always sum
/// to `tip - hub`.
fn radial_weights(radius: &Array1<f64>, hub: f64, tip: f64) -> Array1<f64> {
    let n = radius.len();
    Array1::from_shape_fn(n, |i| {
        let lower = if i == 0 {
            hub
        } else {
            0.5 * (radius[i - 1] + radius[i])
        };
        let upper = if i + 1 == n {
            tip
        } else {
            0.5 * (radius[i] + radius[i + 1])
        };
        upper - lower
    })
}
