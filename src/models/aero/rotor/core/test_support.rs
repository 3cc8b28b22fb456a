use nalgebra::Vector3;
use uom::{
    ConstZero,
    si::{
        angle::degree,
        angular_velocity::radian_per_second,
        dynamic_viscosity::pascal_second,
        f64::{
            Angle, AngularVelocity, DynamicViscosity, Length, MassDensity, Ratio,
            ThermodynamicTemperature, Velocity,
        },
        length::meter,
        mass_density::kilogram_per_cubic_meter,
        ratio::ratio,
        thermodynamic_temperature::kelvin,
        velocity::meter_per_second,
    },
};

use super::{
    BladeGeometry, BladeStation, Freestream, OperatingPoint, Orientation, Rotation,
    RotationDirection, RotorGeometry, operating::ResolvedPoint,
};

pub(super) const DENSITY: f64 = 1.225;
pub(super) const VISCOSITY: f64 = 1.789_4e-5;
pub(super) const SPEED_OF_SOUND: f64 = 340.3;
pub(super) const TEMPERATURE: f64 = 288.15;

/// Two-blade, 1 m rotor with ten evenly spaced stations and linear twist.
pub(super) fn hover_blade(azimuthal_stations: usize) -> BladeGeometry {
    let stations = (0..10)
        .map(|i| {
            let r = 0.1 + 0.09 * (f64::from(i) + 0.5);
            BladeStation {
                radius: Length::new::<meter>(r),
                chord: Length::new::<meter>(0.1),
                twist: Angle::new::<degree>(14.0 - 4.0 * r),
                sweep: Length::ZERO,
                thickness_to_chord: Ratio::new::<ratio>(0.12),
                airfoil: 0,
            }
        })
        .collect();

    BladeGeometry {
        blade_count: 2,
        tip_radius: Length::new::<meter>(1.0),
        hub_radius: Length::new::<meter>(0.1),
        stations,
        azimuthal_stations,
        orientation: Orientation::default(),
        rotation: RotationDirection::Clockwise,
    }
}

pub(super) fn hover_geometry(azimuthal_stations: usize) -> RotorGeometry {
    RotorGeometry::new(hover_blade(azimuthal_stations)).expect("hover blade is valid")
}

/// Sea-level point with `velocity` already in the thrust frame.
pub(super) fn resolved(omega: f64, velocity: [f64; 3]) -> ResolvedPoint {
    ResolvedPoint {
        omega,
        pitch: 0.0,
        throttle: 1.0,
        density: DENSITY,
        kinematic_viscosity: VISCOSITY / DENSITY,
        speed_of_sound: SPEED_OF_SOUND,
        temperature: TEMPERATURE,
        velocity: Vector3::from(velocity),
        rotor_to_body: Rotation::identity(),
    }
}

/// Standard sea-level air with an inertial velocity in m/s.
pub(super) fn sea_level(velocity: [f64; 3]) -> Freestream {
    Freestream {
        density: MassDensity::new::<kilogram_per_cubic_meter>(DENSITY),
        viscosity: DynamicViscosity::new::<pascal_second>(VISCOSITY),
        speed_of_sound: Velocity::new::<meter_per_second>(SPEED_OF_SOUND),
        temperature: ThermodynamicTemperature::new::<kelvin>(TEMPERATURE),
        velocity: velocity.map(Velocity::new::<meter_per_second>),
        body_to_inertial: Rotation::identity(),
    }
}

/// Full-throttle hover at `omega` rad/s in still sea-level air.
pub(super) fn hover_point(omega: f64) -> OperatingPoint {
    OperatingPoint {
        angular_speed: AngularVelocity::new::<radian_per_second>(omega),
        pitch_command: Angle::ZERO,
        thrust_vector_angle: Angle::ZERO,
        throttle: Ratio::new::<ratio>(1.0),
        design: false,
        freestream: sea_level([0.0; 3]),
    }
}
