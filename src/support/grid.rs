//! Shape-checked fields over a blade-element grid.
//!
//! A rotor solve works on three nested axes: control point, radial station,
//! and azimuthal station. Every per-element quantity is a [`Field`] of shape
//! `(points, radial, azimuthal)`. [`GridShape`] builds fields from lower
//! dimensional data with explicit broadcasting rules so that no caller has to
//! repeat or tile arrays by hand:
//!
//! - [`GridShape::per_point`] repeats one value per control point over the disc.
//! - [`GridShape::per_station`] repeats one value per radial station over
//!   points and azimuth.
//! - [`GridShape::per_station_azimuth`] repeats a `(radial, azimuthal)` table
//!   over control points.
//!
//! # Example
//!
//! ```
//! use ndarray::array;
//! use twine_rotor::support::grid::GridShape;
//!
//! let shape = GridShape::new(2, 3, 4);
//! let radius = shape.per_station(&array![0.2, 0.6, 1.0]).unwrap();
//!
//! assert_eq!(radius.dim(), (2, 3, 4));
//! assert_eq!(radius[[1, 2, 3]], 1.0);
//! ```

use ndarray::{Array1, Array2, Array3, ArrayView1, Axis};
use thiserror::Error;

/// A per-element quantity over `(points, radial, azimuthal)`.
pub type Field = Array3<f64>;

/// Dimensions of a blade-element grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridShape {
    /// Number of control points.
    pub points: usize,

    /// Number of radial stations.
    pub radial: usize,

    /// Number of azimuthal stations.
    pub azimuthal: usize,
}

/// Error returned when an array does not match the expected grid dimension.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected {axis} length {expected}, found {found}")]
pub struct ShapeError {
    /// Axis name that did not match.
    pub axis: &'static str,

    /// Expected length along that axis.
    pub expected: usize,

    /// Length that was provided.
    pub found: usize,
}

impl GridShape {
    /// Creates a grid shape.
    #[must_use]
    pub fn new(points: usize, radial: usize, azimuthal: usize) -> Self {
        Self {
            points,
            radial,
            azimuthal,
        }
    }

    /// Returns the shape as an `ndarray` dimension tuple.
    #[must_use]
    pub fn dim(&self) -> (usize, usize, usize) {
        (self.points, self.radial, self.azimuthal)
    }

    /// Returns a field of zeros.
    #[must_use]
    pub fn zeros(&self) -> Field {
        Field::zeros(self.dim())
    }

    /// Returns a field filled with `value`.
    #[must_use]
    pub fn filled(&self, value: f64) -> Field {
        Field::from_elem(self.dim(), value)
    }

    /// Repeats one value per control point across the disc.
    ///
    /// # Errors
    ///
    /// Returns a [`ShapeError`] if `values` is not one entry per control point.
    pub fn per_point(&self, values: &[f64]) -> Result<Field, ShapeError> {
        Self::expect("points", self.points, values.len())?;
        Ok(Field::from_shape_fn(self.dim(), |(p, _, _)| values[p]))
    }

    /// Repeats one value per radial station across points and azimuth.
    ///
    /// # Errors
    ///
    /// Returns a [`ShapeError`] if `values` is not one entry per radial station.
    pub fn per_station(&self, values: &Array1<f64>) -> Result<Field, ShapeError> {
        Self::expect("radial", self.radial, values.len())?;
        Ok(Field::from_shape_fn(self.dim(), |(_, i, _)| values[i]))
    }

    /// Repeats a `(radial, azimuthal)` table across control points.
    ///
    /// # Errors
    ///
    /// Returns a [`ShapeError`] if `values` does not match the disc dimensions.
    pub fn per_station_azimuth(&self, values: &Array2<f64>) -> Result<Field, ShapeError> {
        let (radial, azimuthal) = values.dim();
        Self::expect("radial", self.radial, radial)?;
        Self::expect("azimuthal", self.azimuthal, azimuthal)?;
        Ok(Field::from_shape_fn(self.dim(), |(_, i, k)| values[[i, k]]))
    }

    /// Checks that `field` matches this shape.
    ///
    /// # Errors
    ///
    /// Returns a [`ShapeError`] naming the first mismatched axis.
    pub fn check(&self, field: &Field) -> Result<(), ShapeError> {
        let (points, radial, azimuthal) = field.dim();
        Self::expect("points", self.points, points)?;
        Self::expect("radial", self.radial, radial)?;
        Self::expect("azimuthal", self.azimuthal, azimuthal)
    }

    /// Broadcasts a field with a single azimuthal station over `azimuthal` stations.
    ///
    /// Fields that already have `azimuthal` stations are returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns a [`ShapeError`] if the field has neither one nor `azimuthal` stations.
    pub fn spread_azimuth(field: Field, azimuthal: usize) -> Result<Field, ShapeError> {
        let (points, radial, found) = field.dim();
        if found == azimuthal {
            return Ok(field);
        }
        if found != 1 {
            return Err(ShapeError {
                axis: "azimuthal",
                expected: azimuthal,
                found,
            });
        }
        Ok(Field::from_shape_fn((points, radial, azimuthal), |(p, i, _)| {
            field[[p, i, 0]]
        }))
    }

    fn expect(axis: &'static str, expected: usize, found: usize) -> Result<(), ShapeError> {
        if expected == found {
            Ok(())
        } else {
            Err(ShapeError {
                axis,
                expected,
                found,
            })
        }
    }
}

/// Averages a field over azimuth, giving a `(points, radial)` table.
#[must_use]
pub fn azimuth_mean(field: &Field) -> Array2<f64> {
    field
        .mean_axis(Axis(2))
        .unwrap_or_else(|| Array2::zeros((field.dim().0, field.dim().1)))
}

/// Weighted sum over the radial axis of a `(points, radial)` table.
#[must_use]
pub fn radial_integral(table: &Array2<f64>, weights: ArrayView1<'_, f64>) -> Array1<f64> {
    table.dot(&weights)
}
