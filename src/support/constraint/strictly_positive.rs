use std::cmp::Ordering;

use num_traits::Zero;

use super::{Constrained, Constraint, ConstraintError};

/// Marker type enforcing that a value is greater than zero.
///
/// Radii, chords, densities and viscosities all use this constraint.
///
/// # Examples
///
/// ```
/// use twine_rotor::support::constraint::StrictlyPositive;
///
/// assert!(StrictlyPositive::new(1.225).is_ok());
/// assert!(StrictlyPositive::new(0.0).is_err());
/// assert!(StrictlyPositive::new(f64::NAN).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct StrictlyPositive;

impl StrictlyPositive {
    /// Constructs a [`Constrained<T, StrictlyPositive>`] if the value is strictly positive.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is zero, negative, or not a number (`NaN`).
    pub fn new<T: PartialOrd + Zero>(
        value: T,
    ) -> Result<Constrained<T, StrictlyPositive>, ConstraintError> {
        Constrained::<T, StrictlyPositive>::new(value)
    }
}

impl<T: PartialOrd + Zero> Constraint<T> for StrictlyPositive {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match value.partial_cmp(&T::zero()) {
            Some(Ordering::Greater) => Ok(()),
            Some(Ordering::Equal) => Err(ConstraintError::Zero),
            Some(Ordering::Less) => Err(ConstraintError::Negative),
            None => Err(ConstraintError::NotANumber),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use uom::si::{
        f64::{Length, MassDensity},
        length::meter,
        mass_density::kilogram_per_cubic_meter,
    };

    #[test]
    fn blade_counts() {
        assert_eq!(StrictlyPositive::new(3_usize).unwrap().into_inner(), 3);
        assert_eq!(
            StrictlyPositive::new(0_usize).unwrap_err(),
            ConstraintError::Zero
        );
    }

    #[test]
    fn radii() {
        assert!(StrictlyPositive::new(Length::new::<meter>(0.5)).is_ok());
        assert_eq!(
            StrictlyPositive::new(Length::new::<meter>(-0.5)).unwrap_err(),
            ConstraintError::Negative
        );
    }

    #[test]
    fn densities() {
        let rho = MassDensity::new::<kilogram_per_cubic_meter>(1.225);
        assert!(StrictlyPositive::new(rho).is_ok());

        let nan = MassDensity::new::<kilogram_per_cubic_meter>(f64::NAN);
        assert_eq!(
            StrictlyPositive::new(nan).unwrap_err(),
            ConstraintError::NotANumber
        );
    }
}
