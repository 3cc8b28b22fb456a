//! Operating state of a rotor across a batch of control points.

use nalgebra::Vector3;
use ndarray::Array3;
use uom::si::{
    angle::radian,
    angular_velocity::radian_per_second,
    dynamic_viscosity::pascal_second,
    f64::{
        Angle, AngularVelocity, DynamicViscosity, MassDensity, Ratio, ThermodynamicTemperature,
        Velocity,
    },
    mass_density::kilogram_per_cubic_meter,
    ratio::ratio,
    thermodynamic_temperature::kelvin,
    velocity::meter_per_second,
};

use crate::support::{
    constraint::StrictlyPositive,
    grid::GridShape,
};

use super::{
    SolveError,
    frames::{Orientation, Rotation, thrust_frame_velocity},
};

/// Atmospheric state and vehicle motion at a control point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Freestream {
    /// Air density.
    pub density: MassDensity,

    /// Dynamic viscosity of the air.
    pub viscosity: DynamicViscosity,

    /// Local speed of sound.
    pub speed_of_sound: Velocity,

    /// Static temperature.
    pub temperature: ThermodynamicTemperature,

    /// Vehicle velocity in inertial axes.
    pub velocity: [Velocity; 3],

    /// Attitude of the vehicle body relative to the inertial frame.
    pub body_to_inertial: Rotation,
}

/// Commanded rotor state at a single control point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OperatingPoint {
    /// Rotational speed. Negative values reverse the thrust direction.
    pub angular_speed: AngularVelocity,

    /// Collective blade-pitch command added to the blade twist.
    pub pitch_command: Angle,

    /// Thrust-vector tilt added to the mounting pitch angle.
    pub thrust_vector_angle: Angle,

    /// Throttle setting. Values `<= 0` zero the output and values `> 1`
    /// scale thrust and power linearly.
    pub throttle: Ratio,

    /// Marks a design point, evaluated with the blade as built.
    ///
    /// The pitch command is ignored when set.
    pub design: bool,

    /// Freestream conditions.
    pub freestream: Freestream,
}

/// A non-empty batch of control points evaluated together.
#[derive(Debug, Clone, PartialEq)]
pub struct OperatingBatch {
    points: Vec<OperatingPoint>,
}

impl OperatingBatch {
    /// Creates a batch from a list of operating points.
    ///
    /// # Errors
    ///
    /// Returns [`SolveError::EmptyBatch`] if `points` is empty.
    pub fn new(points: Vec<OperatingPoint>) -> Result<Self, SolveError> {
        if points.is_empty() {
            return Err(SolveError::EmptyBatch);
        }
        Ok(Self { points })
    }

    /// Creates a batch holding a single operating point.
    #[must_use]
    pub fn single(point: OperatingPoint) -> Self {
        Self {
            points: vec![point],
        }
    }

    /// Operating points in evaluation order.
    #[must_use]
    pub fn points(&self) -> &[OperatingPoint] {
        &self.points
    }

    /// Number of control points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false; batches hold at least one point.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Externally supplied perturbation velocities over the disc.
///
/// Each field has shape `(points, radial, azimuthal)` in m/s, using the full
/// azimuthal station count of the geometry. Supplying these forces the
/// azimuth-resolved analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct NonUniformInflow {
    /// Axial perturbation, positive through the disc.
    pub axial: Array3<f64>,

    /// Tangential perturbation, positive against the blade motion.
    pub tangential: Array3<f64>,

    /// Radial perturbation, positive outward.
    pub radial: Array3<f64>,
}

impl NonUniformInflow {
    /// Checks every component against the solver grid.
    pub(crate) fn check(&self, shape: &GridShape) -> Result<(), SolveError> {
        for (component, field) in [
            ("axial", &self.axial),
            ("tangential", &self.tangential),
            ("radial", &self.radial),
        ] {
            shape
                .check(field)
                .map_err(|source| SolveError::InflowShape { component, source })?;
            if field.iter().any(|v| !v.is_finite()) {
                return Err(SolveError::NonFiniteInflow { component });
            }
        }
        Ok(())
    }
}

/// Input to a rotor evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct RotorInput {
    /// Control points to evaluate.
    pub batch: OperatingBatch,

    /// Optional non-uniform inflow over the disc.
    pub inflow: Option<NonUniformInflow>,
}

impl From<OperatingBatch> for RotorInput {
    fn from(batch: OperatingBatch) -> Self {
        Self {
            batch,
            inflow: None,
        }
    }
}

/// An operating point checked and reduced to base SI values.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ResolvedPoint {
    /// Signed rotational speed in rad/s.
    pub(crate) omega: f64,
    pub(crate) pitch: f64,
    pub(crate) throttle: f64,
    pub(crate) density: f64,
    pub(crate) kinematic_viscosity: f64,
    pub(crate) speed_of_sound: f64,
    pub(crate) temperature: f64,
    /// Vehicle velocity in the rotor thrust frame.
    pub(crate) velocity: Vector3<f64>,
    pub(crate) rotor_to_body: Rotation,
}

impl ResolvedPoint {
    /// Validates an operating point and expresses it in the thrust frame.
    pub(crate) fn resolve(
        index: usize,
        point: &OperatingPoint,
        orientation: &Orientation,
    ) -> Result<Self, SolveError> {
        let freestream = &point.freestream;

        let positive = |quantity: &'static str, value: f64| {
            StrictlyPositive::new(value)
                .map(|_| value)
                .map_err(|source| SolveError::InvalidOperatingPoint {
                    point: index,
                    quantity,
                    source,
                })
        };
        let density = positive(
            "density",
            freestream.density.get::<kilogram_per_cubic_meter>(),
        )?;
        let viscosity = positive("viscosity", freestream.viscosity.get::<pascal_second>())?;
        let speed_of_sound = positive(
            "speed of sound",
            freestream.speed_of_sound.get::<meter_per_second>(),
        )?;
        let temperature = positive("temperature", freestream.temperature.get::<kelvin>())?;

        let omega = point.angular_speed.get::<radian_per_second>();
        let pitch = if point.design {
            0.0
        } else {
            point.pitch_command.get::<radian>()
        };
        let throttle = point.throttle.get::<ratio>();
        let inertial = Vector3::from(freestream.velocity.map(|v| v.get::<meter_per_second>()));

        let finite = [
            ("density", density),
            ("viscosity", viscosity),
            ("speed of sound", speed_of_sound),
            ("temperature", temperature),
            ("angular speed", omega),
            ("pitch command", pitch),
            ("thrust vector angle", point.thrust_vector_angle.get::<radian>()),
            ("throttle", throttle),
        ];
        if let Some(&(quantity, _)) = finite.iter().find(|(_, v)| !v.is_finite()) {
            return Err(SolveError::NonFiniteInput {
                point: index,
                quantity,
            });
        }
        if inertial.iter().any(|v| !v.is_finite()) {
            return Err(SolveError::NonFiniteInput {
                point: index,
                quantity: "velocity",
            });
        }
        if !freestream.body_to_inertial.is_finite() {
            return Err(SolveError::NonFiniteInput {
                point: index,
                quantity: "body attitude",
            });
        }

        let rotor_to_body = orientation.rotor_to_body(point.thrust_vector_angle);
        let velocity =
            thrust_frame_velocity(&inertial, &freestream.body_to_inertial, &rotor_to_body);

        Ok(Self {
            omega,
            pitch,
            throttle,
            density,
            kinematic_viscosity: viscosity / density,
            speed_of_sound,
            temperature,
            velocity,
            rotor_to_body,
        })
    }

    /// Rotational speed magnitude in rad/s.
    pub(crate) fn speed(&self) -> f64 {
        self.omega.abs()
    }
}
