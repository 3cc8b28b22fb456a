//! Reference-frame transforms between inertial, body, and rotor thrust axes.
//!
//! The rotor thrust frame has its first axis along the thrust direction.
//! Expressed in that frame, the vehicle velocity gives the axial inflow
//! through the disc (component 0, positive in forward flight) and the two
//! in-plane components seen by a rotor operating at incidence.

use nalgebra::{Matrix3, Rotation3, Vector3};
use uom::{
    ConstZero,
    si::{angle::radian, f64::Angle},
};

/// A rotation mapping vectors from a source frame to a target frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation(Rotation3<f64>);

impl Rotation {
    /// The identity rotation.
    #[must_use]
    pub fn identity() -> Self {
        Self(Rotation3::identity())
    }

    /// Wraps a rotation matrix.
    ///
    /// The matrix is taken as given; orthonormality is the caller's contract.
    #[must_use]
    pub fn from_matrix(matrix: Matrix3<f64>) -> Self {
        Self(Rotation3::from_matrix_unchecked(matrix))
    }

    /// Builds a rotation from 3-2-1 (yaw, pitch, roll) Euler angles.
    ///
    /// The result maps vectors from the rotated frame into the reference
    /// frame: `R = Rz(yaw) · Ry(pitch) · Rx(roll)`.
    #[must_use]
    pub fn from_euler(roll: Angle, pitch: Angle, yaw: Angle) -> Self {
        Self(Rotation3::from_euler_angles(
            roll.get::<radian>(),
            pitch.get::<radian>(),
            yaw.get::<radian>(),
        ))
    }

    /// Returns the rotation matrix.
    #[must_use]
    pub fn matrix(&self) -> &Matrix3<f64> {
        self.0.matrix()
    }

    /// Returns the inverse rotation.
    #[must_use]
    pub fn transpose(&self) -> Self {
        Self(self.0.transpose())
    }

    /// Returns `self · other`, applying `other` first.
    #[must_use]
    pub fn compose(&self, other: &Self) -> Self {
        Self(self.0 * other.0)
    }

    /// Rotates a vector.
    #[must_use]
    pub fn apply(&self, v: &Vector3<f64>) -> Vector3<f64> {
        self.0 * v
    }

    /// Returns column `index`, the image of the source frame's unit axis.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not 0, 1, or 2.
    #[must_use]
    pub fn axis(&self, index: usize) -> Vector3<f64> {
        self.0.matrix().column(index).into_owned()
    }

    /// True if every matrix entry is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.0.matrix().iter().all(|v| v.is_finite())
    }
}

impl From<Rotation3<f64>> for Rotation {
    fn from(rotation: Rotation3<f64>) -> Self {
        Self(rotation)
    }
}

/// Mounting orientation of the rotor thrust axis relative to the body axes.
///
/// All zero angles align the thrust axis with the body x axis (a tractor
/// propeller). A pitch of +90° points the thrust axis up (a lift rotor).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orientation {
    /// Rotation about the body x axis.
    pub roll: Angle,

    /// Rotation about the body y axis.
    pub pitch: Angle,

    /// Rotation about the body z axis.
    pub yaw: Angle,
}

impl Default for Orientation {
    fn default() -> Self {
        Self {
            roll: Angle::ZERO,
            pitch: Angle::ZERO,
            yaw: Angle::ZERO,
        }
    }
}

impl Orientation {
    /// Rotation from the thrust frame to the body frame for a commanded tilt.
    ///
    /// The thrust-vector tilt adds to the mounting pitch angle.
    #[must_use]
    pub fn rotor_to_body(&self, tilt: Angle) -> Rotation {
        Rotation::from_euler(self.roll, self.pitch + tilt, self.yaw)
    }
}

/// Expresses an inertial velocity in the rotor thrust frame.
///
/// Applies the inverse body-to-inertial rotation followed by the inverse
/// rotor-to-body rotation.
pub(crate) fn thrust_frame_velocity(
    inertial_velocity: &Vector3<f64>,
    body_to_inertial: &Rotation,
    rotor_to_body: &Rotation,
) -> Vector3<f64> {
    let body_velocity = body_to_inertial.transpose().apply(inertial_velocity);
    rotor_to_body.transpose().apply(&body_velocity)
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::angle::degree;

    fn assert_vec_eq(actual: Vector3<f64>, expected: [f64; 3]) {
        assert_relative_eq!(actual, Vector3::from(expected), epsilon = 1e-12);
    }

    fn thrust_frame(
        inertial: [f64; 3],
        body_to_inertial: &Rotation,
        rotor_to_body: &Rotation,
    ) -> Vector3<f64> {
        thrust_frame_velocity(&Vector3::from(inertial), body_to_inertial, rotor_to_body)
    }

    #[test]
    fn tractor_propeller_sees_forward_speed_as_axial_inflow() {
        let rotor_to_body = Orientation::default().rotor_to_body(Angle::ZERO);
        let v = thrust_frame([30.0, 0.0, 0.0], &Rotation::identity(), &rotor_to_body);
        assert_vec_eq(v, [30.0, 0.0, 0.0]);
    }

    #[test]
    fn lift_rotor_sees_forward_speed_edgewise() {
        let orientation = Orientation {
            pitch: Angle::new::<degree>(90.0),
            ..Orientation::default()
        };
        let rotor_to_body = orientation.rotor_to_body(Angle::ZERO);

        // Thrust axis points up (negative body z).
        assert_vec_eq(rotor_to_body.axis(0), [0.0, 0.0, -1.0]);

        let cruise = thrust_frame([20.0, 0.0, 0.0], &Rotation::identity(), &rotor_to_body);
        assert_vec_eq(cruise, [0.0, 0.0, 20.0]);

        // Climbing (negative z in a z-down frame) is axial inflow.
        let climb = thrust_frame([0.0, 0.0, -5.0], &Rotation::identity(), &rotor_to_body);
        assert_vec_eq(climb, [5.0, 0.0, 0.0]);
    }

    #[test]
    fn tilt_adds_to_mounting_pitch() {
        let tilted = Orientation::default().rotor_to_body(Angle::new::<degree>(90.0));
        let mounted = Orientation {
            pitch: Angle::new::<degree>(90.0),
            ..Orientation::default()
        }
        .rotor_to_body(Angle::ZERO);

        assert_relative_eq!(tilted.matrix(), mounted.matrix(), epsilon = 1e-15);
    }

    #[test]
    fn body_attitude_is_removed_first() {
        // Vehicle yawed 90° and moving along inertial y: that is body forward.
        let body_to_inertial = Rotation::from_euler(
            Angle::ZERO,
            Angle::ZERO,
            Angle::new::<degree>(90.0),
        );
        let rotor_to_body = Orientation::default().rotor_to_body(Angle::ZERO);

        let v = thrust_frame([0.0, 10.0, 0.0], &body_to_inertial, &rotor_to_body);
        assert_vec_eq(v, [10.0, 0.0, 0.0]);
    }

    #[test]
    fn euler_angles_follow_yaw_pitch_roll_order() {
        let (roll, pitch, yaw) = (0.3_f64, -0.2_f64, 0.7_f64);
        let r = Rotation::from_euler(
            Angle::new::<radian>(roll),
            Angle::new::<radian>(pitch),
            Angle::new::<radian>(yaw),
        );
        let expected = Rotation3::from_axis_angle(&Vector3::z_axis(), yaw)
            * Rotation3::from_axis_angle(&Vector3::y_axis(), pitch)
            * Rotation3::from_axis_angle(&Vector3::x_axis(), roll);

        assert_relative_eq!(r.matrix(), expected.matrix(), epsilon = 1e-12);
    }

    #[test]
    fn compose_and_transpose_are_inverses() {
        let r = Rotation::from_euler(
            Angle::new::<degree>(10.0),
            Angle::new::<degree>(-25.0),
            Angle::new::<degree>(40.0),
        );
        let identity = r.compose(&r.transpose());

        assert_relative_eq!(identity.matrix(), &Matrix3::identity(), epsilon = 1e-12);
        assert!(r.is_finite());
        assert!(!Rotation::from_matrix(Matrix3::from_element(f64::NAN)).is_finite());
    }
}
