//! Rotor blade geometry.

mod error;
mod grid;

pub use error::GeometryError;
pub(crate) use grid::{BladeGrid, azimuth_stations};

use std::f64::consts::PI;

use crate::support::constraint::{NonNegative, StrictlyPositive};
use uom::si::{
    angle::radian,
    f64::{Angle, Area, Length, Ratio},
    length::meter,
    ratio::ratio,
};

use super::frames::Orientation;

/// Direction of blade rotation, viewed from behind the rotor looking along thrust.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RotationDirection {
    /// Clockwise rotation.
    #[default]
    Clockwise,

    /// Counterclockwise rotation.
    Counterclockwise,
}

impl RotationDirection {
    /// Returns `+1` for clockwise and `-1` for counterclockwise rotation.
    #[must_use]
    pub fn sign(self) -> f64 {
        match self {
            Self::Clockwise => 1.0,
            Self::Counterclockwise => -1.0,
        }
    }
}

/// A single radial blade station.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BladeStation {
    /// Dimensional radius of the station.
    pub radius: Length,

    /// Local chord.
    pub chord: Length,

    /// Local twist, measured from the rotor plane.
    pub twist: Angle,

    /// In-plane sweep offset of the section from the pitch axis.
    pub sweep: Length,

    /// Section thickness-to-chord ratio.
    pub thickness_to_chord: Ratio,

    /// Index of the section's airfoil in the airfoil lookup.
    pub airfoil: usize,
}

/// Unvalidated rotor geometry description.
///
/// Pass it to [`RotorGeometry::new`] to check its invariants.
#[derive(Debug, Clone, PartialEq)]
pub struct BladeGeometry {
    /// Number of blades.
    pub blade_count: usize,

    /// Tip radius.
    pub tip_radius: Length,

    /// Hub radius.
    pub hub_radius: Length,

    /// Radial stations ordered from root to tip.
    pub stations: Vec<BladeStation>,

    /// Number of azimuthal stations used when the disc is resolved in azimuth.
    pub azimuthal_stations: usize,

    /// Mounting orientation of the thrust axis.
    pub orientation: Orientation,

    /// Direction of blade rotation.
    pub rotation: RotationDirection,
}

/// Validated, immutable rotor geometry.
///
/// Guarantees at least one blade, a positive tip radius, a hub radius in
/// `[0, tip)`, at least two radial stations strictly increasing inside
/// `[hub, tip]` with positive chords, and at least one azimuthal station.
#[derive(Debug, Clone, PartialEq)]
pub struct RotorGeometry {
    blade_count: usize,
    tip_radius: Length,
    hub_radius: Length,
    stations: Vec<BladeStation>,
    azimuthal_stations: usize,
    orientation: Orientation,
    rotation: RotationDirection,
}

impl RotorGeometry {
    /// Validates a blade geometry description.
    ///
    /// # Errors
    ///
    /// Returns a [`GeometryError`] describing the first violated invariant.
    pub fn new(input: BladeGeometry) -> Result<Self, GeometryError> {
        let blade_count = StrictlyPositive::new(input.blade_count)
            .map_err(|_| GeometryError::NoBlades)?
            .into_inner();
        let tip_radius = StrictlyPositive::new(input.tip_radius)
            .map_err(|source| GeometryError::TipRadius { source })?
            .into_inner();
        let hub_radius = NonNegative::new(input.hub_radius)
            .map_err(|source| GeometryError::HubRadius { source })?
            .into_inner();

        if hub_radius >= tip_radius {
            return Err(GeometryError::HubOutsideTip {
                hub: hub_radius,
                tip: tip_radius,
            });
        }

        if input.stations.len() < 2 {
            return Err(GeometryError::TooFewStations {
                count: input.stations.len(),
            });
        }

        if input.azimuthal_stations == 0 {
            return Err(GeometryError::NoAzimuthalStations);
        }

        let mut previous: Option<Length> = None;
        for (index, station) in input.stations.iter().enumerate() {
            check_station(index, station, hub_radius, tip_radius)?;
            if previous.is_some_and(|r| station.radius <= r) {
                return Err(GeometryError::NonMonotonicRadius { index });
            }
            previous = Some(station.radius);
        }

        Ok(Self {
            blade_count,
            tip_radius,
            hub_radius,
            stations: input.stations,
            azimuthal_stations: input.azimuthal_stations,
            orientation: input.orientation,
            rotation: input.rotation,
        })
    }

    /// Number of blades.
    #[must_use]
    pub fn blade_count(&self) -> usize {
        self.blade_count
    }

    /// Tip radius.
    #[must_use]
    pub fn tip_radius(&self) -> Length {
        self.tip_radius
    }

    /// Hub radius.
    #[must_use]
    pub fn hub_radius(&self) -> Length {
        self.hub_radius
    }

    /// Rotor diameter.
    #[must_use]
    pub fn diameter(&self) -> Length {
        2.0 * self.tip_radius
    }

    /// Disc area `π R²`.
    #[must_use]
    pub fn disc_area(&self) -> Area {
        PI * self.tip_radius * self.tip_radius
    }

    /// Radial stations ordered from root to tip.
    #[must_use]
    pub fn stations(&self) -> &[BladeStation] {
        &self.stations
    }

    /// Number of azimuthal stations.
    #[must_use]
    pub fn azimuthal_stations(&self) -> usize {
        self.azimuthal_stations
    }

    /// Mounting orientation of the thrust axis.
    #[must_use]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Direction of blade rotation.
    #[must_use]
    pub fn rotation(&self) -> RotationDirection {
        self.rotation
    }
}

fn check_station(
    index: usize,
    station: &BladeStation,
    hub: Length,
    tip: Length,
) -> Result<(), GeometryError> {
    let radius = station.radius.get::<meter>();
    if !radius.is_finite() || station.radius < hub || station.radius > tip {
        return Err(GeometryError::StationOutsideBlade {
            index,
            radius: station.radius,
        });
    }

    StrictlyPositive::new(station.chord)
        .map_err(|source| GeometryError::Chord { index, source })?;

    let finite = [
        ("twist", station.twist.get::<radian>()),
        ("sweep", station.sweep.get::<meter>()),
        ("thickness-to-chord", station.thickness_to_chord.get::<ratio>()),
    ];
    if let Some(&(quantity, _)) = finite.iter().find(|(_, v)| !v.is_finite()) {
        return Err(GeometryError::NonFinite { index, quantity });
    }

    Ok(())
}
