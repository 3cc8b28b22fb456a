//! Rotor and propeller performance model.
//!
//! [`Rotor`] implements [`twine_core::Model`] with [`RotorInput`] as input and
//! [`Performance`] as output. The computational core is in the internal
//! `core` module; this module re-exports its public types.
//!
//! # Example
//!
//! ```
//! use twine_core::Model;
//! use twine_rotor::models::aero::rotor::{
//!     BladeGeometry, BladeStation, CurveFitAirfoil, Freestream, OperatingBatch,
//!     OperatingPoint, Orientation, Rotation, RotationDirection, Rotor, RotorConfig,
//!     RotorGeometry, RotorInput,
//! };
//! use uom::si::{
//!     angle::degree,
//!     angular_velocity::radian_per_second,
//!     dynamic_viscosity::pascal_second,
//!     f64::{
//!         Angle, AngularVelocity, DynamicViscosity, Length, MassDensity, Ratio,
//!         ThermodynamicTemperature, Velocity,
//!     },
//!     force::newton,
//!     length::meter,
//!     mass_density::kilogram_per_cubic_meter,
//!     ratio::ratio,
//!     thermodynamic_temperature::kelvin,
//!     velocity::meter_per_second,
//! };
//!
//! let stations = (0..8)
//!     .map(|i| {
//!         let r = 0.2 + 0.1 * f64::from(i);
//!         BladeStation {
//!             radius: Length::new::<meter>(r),
//!             chord: Length::new::<meter>(0.08),
//!             twist: Angle::new::<degree>(15.0 - 6.0 * r),
//!             sweep: Length::new::<meter>(0.0),
//!             thickness_to_chord: Ratio::new::<ratio>(0.12),
//!             airfoil: 0,
//!         }
//!     })
//!     .collect();
//!
//! let geometry = RotorGeometry::new(BladeGeometry {
//!     blade_count: 3,
//!     tip_radius: Length::new::<meter>(1.0),
//!     hub_radius: Length::new::<meter>(0.15),
//!     stations,
//!     azimuthal_stations: 1,
//!     orientation: Orientation::default(),
//!     rotation: RotationDirection::Clockwise,
//! })?;
//!
//! let rotor = Rotor::new(geometry, CurveFitAirfoil::default(), RotorConfig::default())?;
//!
//! let point = OperatingPoint {
//!     angular_speed: AngularVelocity::new::<radian_per_second>(150.0),
//!     pitch_command: Angle::new::<degree>(0.0),
//!     thrust_vector_angle: Angle::new::<degree>(0.0),
//!     throttle: Ratio::new::<ratio>(1.0),
//!     design: false,
//!     freestream: Freestream {
//!         density: MassDensity::new::<kilogram_per_cubic_meter>(1.225),
//!         viscosity: DynamicViscosity::new::<pascal_second>(1.789e-5),
//!         speed_of_sound: Velocity::new::<meter_per_second>(340.3),
//!         temperature: ThermodynamicTemperature::new::<kelvin>(288.15),
//!         velocity: [Velocity::new::<meter_per_second>(0.0); 3],
//!         body_to_inertial: Rotation::identity(),
//!     },
//! };
//!
//! let performance = rotor.call(&RotorInput::from(OperatingBatch::single(point)))?;
//! assert!(performance.points[0].thrust.get::<newton>() > 0.0);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod core;

pub use self::core::{
    AirfoilCoefficients, AirfoilError, AirfoilLookup, AirfoilPolar, BladeGeometry, BladeStation,
    CurveFitAirfoil, CurveFitSection, DesignPitch, DesignPitchConfig, DesignPitchError,
    DiscDistributions, Freestream, GeometryError, NonUniformInflow, OperatingBatch,
    OperatingPoint, Orientation, Performance, PointPerformance, PolarTable, RadialDistributions,
    Rotation, RotationDirection, Rotor, RotorConfig, RotorGeometry, RotorInput, SectionState,
    SolveError, WakeConfig, WakeDiagnostics, WakeIteration,
};

use twine_core::Model;

impl<A: AirfoilLookup> Model for Rotor<A> {
    type Input = RotorInput;
    type Output = Performance;
    type Error = SolveError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        self.evaluate(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use ndarray::{Array2, Array3};
    use uom::{
        ConstZero,
        si::{
            angle::{degree, radian},
            angular_velocity::radian_per_second,
            dynamic_viscosity::pascal_second,
            f64::{
                Angle, AngularVelocity, DynamicViscosity, Length, MassDensity, Ratio,
                ThermodynamicTemperature, Velocity,
            },
            force::newton,
            length::meter,
            mass_density::kilogram_per_cubic_meter,
            power::watt,
            ratio::ratio,
            thermodynamic_temperature::kelvin,
            torque::newton_meter,
            velocity::meter_per_second,
        },
    };

    /// Two-blade, 1 m rotor set near 6° angle of attack in hover at 200 rad/s.
    fn hover_geometry(azimuthal_stations: usize, rotation: RotationDirection) -> RotorGeometry {
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

        RotorGeometry::new(BladeGeometry {
            blade_count: 2,
            tip_radius: Length::new::<meter>(1.0),
            hub_radius: Length::new::<meter>(0.1),
            stations,
            azimuthal_stations,
            orientation: Orientation::default(),
            rotation,
        })
        .unwrap()
    }

    fn config(use_2d_analysis: bool) -> RotorConfig {
        RotorConfig {
            use_2d_analysis,
            ..RotorConfig::default()
        }
    }

    fn hover_rotor(azimuthal_stations: usize, use_2d_analysis: bool) -> Rotor<CurveFitAirfoil> {
        Rotor::new(
            hover_geometry(azimuthal_stations, RotationDirection::Clockwise),
            CurveFitAirfoil::default(),
            config(use_2d_analysis),
        )
        .unwrap()
    }

    /// Thin-airfoil lift `2πα` with constant drag, tabulated from -20° to 20°.
    fn thin_airfoil_table() -> PolarTable {
        let alpha: Vec<Angle> = (-20..=20)
            .map(|deg| Angle::new::<degree>(f64::from(deg)))
            .collect();
        let reynolds = [1.0e4, 1.0e7];
        let lift = Array2::from_shape_fn((alpha.len(), reynolds.len()), |(i, _)| {
            std::f64::consts::TAU * alpha[i].get::<radian>()
        });
        let drag = Array2::from_elem((alpha.len(), reynolds.len()), 0.01);

        PolarTable::new(vec![AirfoilPolar::new(&alpha, &reynolds, lift, drag).unwrap()]).unwrap()
    }

    fn point(omega: f64, throttle: f64, velocity: [f64; 3]) -> OperatingPoint {
        OperatingPoint {
            angular_speed: AngularVelocity::new::<radian_per_second>(omega),
            pitch_command: Angle::ZERO,
            thrust_vector_angle: Angle::ZERO,
            throttle: Ratio::new::<ratio>(throttle),
            design: false,
            freestream: Freestream {
                density: MassDensity::new::<kilogram_per_cubic_meter>(1.225),
                viscosity: DynamicViscosity::new::<pascal_second>(1.789_4e-5),
                speed_of_sound: Velocity::new::<meter_per_second>(340.3),
                temperature: ThermodynamicTemperature::new::<kelvin>(288.15),
                velocity: velocity.map(Velocity::new::<meter_per_second>),
                body_to_inertial: Rotation::identity(),
            },
        }
    }

    fn call<A: AirfoilLookup>(rotor: &Rotor<A>, points: Vec<OperatingPoint>) -> Performance {
        let batch = OperatingBatch::new(points).unwrap();
        rotor.call(&RotorInput::from(batch)).unwrap()
    }

    #[test]
    fn hover() {
        let performance = call(&hover_rotor(1, false), vec![point(200.0, 1.0, [0.0; 3])]);
        let hover = &performance.points[0];

        assert!(hover.thrust.get::<newton>() > 0.0);
        assert!(hover.thrust_coefficient > 0.0 && hover.thrust_coefficient < 0.2);
        assert!(hover.figure_of_merit > 0.0 && hover.figure_of_merit < 1.0);
        assert!(hover.converged);
        assert_eq!(hover.propulsive_efficiency, 0.0);
        assert_eq!(hover.advance_ratio, 0.0);

        // A tractor rotor thrusts along body x.
        assert_relative_eq!(
            hover.thrust_vector[0].get::<newton>(),
            hover.thrust.get::<newton>()
        );
        assert_eq!(hover.thrust_vector[2].get::<newton>(), 0.0);

        let alpha = performance.radial.alpha[[0, 5]].to_degrees();
        assert!(alpha > 1.0 && alpha < 12.0, "mid-span alpha {alpha}°");
    }

    #[test]
    fn zero_throttle() {
        let performance = call(&hover_rotor(1, false), vec![point(200.0, 0.0, [0.0; 3])]);
        let idle = &performance.points[0];

        assert_eq!(idle.thrust.get::<newton>(), 0.0);
        assert_eq!(idle.power.get::<watt>(), 0.0);
        assert_eq!(idle.torque.get::<newton_meter>(), 0.0);
        assert_eq!(idle.figure_of_merit, 0.0);

        // The aerodynamic solution is still reported.
        assert!(performance.radial.thrust.iter().any(|&t| t > 0.0));
    }

    #[test]
    fn edgewise_flow_is_asymmetric() {
        let performance = call(&hover_rotor(8, true), vec![point(200.0, 1.0, [0.0, 20.0, 0.0])]);
        let disc = &performance.disc;

        // Advancing and retreating sides see different blade speeds.
        let advancing = disc.tangential_velocity[[0, 5, 6]];
        let retreating = disc.tangential_velocity[[0, 5, 2]];
        assert_relative_eq!(advancing - retreating, 40.0, epsilon = 1e-9);
        assert!((disc.thrust[[0, 5, 6]] - disc.thrust[[0, 5, 2]]).abs() > 1e-3);
        assert!(performance.points[0].inplane_force.get::<newton>().abs() > 0.0);
    }

    #[test]
    fn reversed_rotation() {
        let rotor = hover_rotor(1, false);
        let forward = call(&rotor, vec![point(200.0, 1.0, [0.0; 3])]);
        let reverse = call(&rotor, vec![point(-200.0, 1.0, [0.0; 3])]);
        let (forward, reverse) = (&forward.points[0], &reverse.points[0]);

        assert!(reverse.thrust.get::<newton>() < 0.0);
        assert_relative_eq!(
            reverse.thrust.get::<newton>(),
            -forward.thrust.get::<newton>(),
            max_relative = 1e-12
        );
        assert_relative_eq!(
            reverse.power.get::<watt>(),
            forward.power.get::<watt>(),
            max_relative = 1e-12
        );
    }

    #[test]
    fn zero_rotation_produces_nothing() {
        let performance = call(
            &hover_rotor(1, false),
            vec![point(0.0, 1.0, [0.0; 3]), point(0.0, 2.0, [15.0, 0.0, 0.0])],
        );

        for stopped in &performance.points {
            assert_eq!(stopped.thrust.get::<newton>(), 0.0);
            assert_eq!(stopped.power.get::<watt>(), 0.0);
            assert_eq!(stopped.thrust_coefficient, 0.0);
            assert_eq!(stopped.power_coefficient, 0.0);
        }
    }

    #[test]
    fn over_throttle_scales_thrust_and_power() {
        let performance = call(
            &hover_rotor(1, false),
            vec![point(200.0, 1.0, [0.0; 3]), point(200.0, 1.5, [0.0; 3])],
        );
        let (base, boosted) = (&performance.points[0], &performance.points[1]);

        assert_relative_eq!(
            boosted.thrust.get::<newton>(),
            1.5 * base.thrust.get::<newton>(),
            max_relative = 1e-12
        );
        assert_relative_eq!(
            boosted.power.get::<watt>(),
            1.5 * base.power.get::<watt>(),
            max_relative = 1e-12
        );
    }

    #[test]
    fn axial_flight_is_efficient() {
        let performance = call(&hover_rotor(1, false), vec![point(200.0, 1.0, [10.0, 0.0, 0.0])]);
        let cruise = &performance.points[0];

        assert!(cruise.thrust.get::<newton>() > 0.0);
        assert!(cruise.propulsive_efficiency > 0.0 && cruise.propulsive_efficiency < 1.0);
        assert_relative_eq!(cruise.advance_ratio, 10.0 / (200.0 / std::f64::consts::TAU * 2.0));
        assert!(cruise.mean_inflow_ratio > 0.0);
    }

    #[test]
    fn tabulated_polars_drive_the_solve() {
        let rotor = Rotor::new(
            hover_geometry(1, RotationDirection::Clockwise),
            thin_airfoil_table(),
            RotorConfig::default(),
        )
        .unwrap();
        let performance = call(&rotor, vec![point(200.0, 1.0, [0.0; 3])]);
        let hover = &performance.points[0];

        assert!(hover.converged);
        assert!(hover.thrust.get::<newton>() > 0.0);
        assert!(hover.power.get::<watt>() > 0.0);
        assert!(hover.figure_of_merit > 0.0 && hover.figure_of_merit < 1.0);

        // Lift follows the table slope, lifted slightly by compressibility.
        let incompressible = std::f64::consts::TAU * performance.radial.alpha[[0, 5]];
        let lift = performance.radial.lift_coefficient[[0, 5]];
        assert!(lift > incompressible && lift < 1.1 * incompressible);
    }

    #[test]
    fn uniform_inflow_matches_axial_freestream() {
        let axial_flight = call(
            &hover_rotor(8, true),
            vec![point(200.0, 1.0, [5.0, 0.0, 0.0])],
        );

        // No 2-D analysis requested: the inflow field forces it.
        let rotor = hover_rotor(8, false);
        let input = RotorInput {
            batch: OperatingBatch::single(point(200.0, 1.0, [0.0; 3])),
            inflow: Some(NonUniformInflow {
                axial: Array3::from_elem((1, 10, 8), 5.0),
                tangential: Array3::zeros((1, 10, 8)),
                radial: Array3::zeros((1, 10, 8)),
            }),
        };
        let perturbed = rotor.call(&input).unwrap();

        assert_relative_eq!(
            perturbed.points[0].thrust.get::<newton>(),
            axial_flight.points[0].thrust.get::<newton>(),
            max_relative = 1e-9
        );
        assert_relative_eq!(
            perturbed.points[0].power.get::<watt>(),
            axial_flight.points[0].power.get::<watt>(),
            max_relative = 1e-9
        );
        assert_relative_eq!(perturbed.disc.axial_velocity[[0, 3, 5]], 5.0);
    }

    #[test]
    fn inflow_field_resolves_edgewise_flow() {
        let rotor = hover_rotor(8, false);
        let zeros = Array3::zeros((1, 10, 8));
        let input = RotorInput {
            batch: OperatingBatch::single(point(200.0, 1.0, [0.0, 20.0, 0.0])),
            inflow: Some(NonUniformInflow {
                axial: zeros.clone(),
                tangential: zeros.clone(),
                radial: zeros,
            }),
        };
        let performance = rotor.call(&input).unwrap();

        let disc = &performance.disc;
        assert_relative_eq!(
            disc.tangential_velocity[[0, 5, 6]] - disc.tangential_velocity[[0, 5, 2]],
            40.0,
            epsilon = 1e-9
        );
        assert!(performance.points[0].inplane_force.get::<newton>().abs() > 0.0);
    }

    #[test]
    fn rejects_inflow_that_does_not_match_the_batch() {
        let rotor = hover_rotor(8, false);
        let input = RotorInput {
            batch: OperatingBatch::new(vec![point(200.0, 1.0, [0.0; 3]); 2]).unwrap(),
            inflow: Some(NonUniformInflow {
                axial: Array3::zeros((1, 10, 8)),
                tangential: Array3::zeros((1, 10, 8)),
                radial: Array3::zeros((1, 10, 8)),
            }),
        };

        assert!(matches!(
            rotor.call(&input),
            Err(SolveError::InflowShape {
                component: "axial",
                ..
            })
        ));
    }

    #[test]
    fn counterclockwise_rotor_mirrors_edgewise_flow() {
        let edgewise = || vec![point(200.0, 1.0, [0.0, 20.0, 0.0])];
        let clockwise = call(&hover_rotor(8, true), edgewise());
        let counterclockwise = Rotor::new(
            hover_geometry(8, RotationDirection::Counterclockwise),
            CurveFitAirfoil::default(),
            config(true),
        )
        .unwrap();
        let counterclockwise = call(&counterclockwise, edgewise());

        // The advancing side moves to the opposite half of the disc.
        let (cw, ccw) = (&clockwise.disc, &counterclockwise.disc);
        assert_relative_eq!(
            ccw.tangential_velocity[[0, 5, 2]] - ccw.tangential_velocity[[0, 5, 6]],
            40.0,
            epsilon = 1e-9
        );
        assert_relative_eq!(ccw.thrust[[0, 5, 2]], cw.thrust[[0, 5, 6]], max_relative = 1e-6);
        assert_relative_eq!(ccw.thrust[[0, 5, 6]], cw.thrust[[0, 5, 2]], max_relative = 1e-6);

        assert!(counterclockwise.points[0].thrust.get::<newton>() > 0.0);
        assert_relative_eq!(
            counterclockwise.points[0].thrust.get::<newton>(),
            clockwise.points[0].thrust.get::<newton>(),
            max_relative = 1e-6
        );
    }
}
