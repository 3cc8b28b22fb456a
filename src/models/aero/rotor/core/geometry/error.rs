use thiserror::Error;
use uom::si::f64::Length;

use crate::support::constraint::ConstraintError;

/// Errors that can occur while validating rotor geometry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// The rotor has no blades.
    #[error("rotor must have at least one blade")]
    NoBlades,

    /// The tip radius is not strictly positive.
    #[error("invalid tip radius")]
    TipRadius {
        /// Violated constraint.
        source: ConstraintError,
    },

    /// The hub radius is negative or not a number.
    #[error("invalid hub radius")]
    HubRadius {
        /// Violated constraint.
        source: ConstraintError,
    },

    /// The hub radius is not smaller than the tip radius.
    #[error("hub radius {hub:?} must be smaller than tip radius {tip:?}")]
    HubOutsideTip {
        /// Hub radius provided.
        hub: Length,

        /// Tip radius provided.
        tip: Length,
    },

    /// Fewer than two radial stations were provided.
    #[error("at least 2 radial stations are required, found {count}")]
    TooFewStations {
        /// Number of stations provided.
        count: usize,
    },

    /// The azimuthal station count is zero.
    #[error("at least 1 azimuthal station is required")]
    NoAzimuthalStations,

    /// A station radius is not strictly greater than its predecessor.
    #[error("radial station {index} is not beyond the previous station")]
    NonMonotonicRadius {
        /// Station index.
        index: usize,
    },

    /// A station lies outside `[hub, tip]`.
    #[error("radial station {index} at {radius:?} lies outside the blade")]
    StationOutsideBlade {
        /// Station index.
        index: usize,

        /// Radius provided.
        radius: Length,
    },

    /// A station chord is not strictly positive.
    #[error("invalid chord at radial station {index}")]
    Chord {
        /// Station index.
        index: usize,

        /// Violated constraint.
        source: ConstraintError,
    },

    /// A station value is infinite or NaN.
    #[error("{quantity} at radial station {index} is not finite")]
    NonFinite {
        /// Station index.
        index: usize,

        /// Name of the offending quantity.
        quantity: &'static str,
    },

    /// A station refers to an airfoil the lookup does not provide.
    #[error("radial station {index} uses airfoil {airfoil}, but only {available} are available")]
    UnknownAirfoil {
        /// Station index.
        index: usize,

        /// Requested airfoil index.
        airfoil: usize,

        /// Number of airfoils the lookup provides.
        available: usize,
    },
}
