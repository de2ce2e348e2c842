use glam::{Mat3, Vec3};

pub use glam::Quat;

use super::{point::Point, vec::Vec3AsNonZero};

/// Orientation of something placed at `eye` and facing `target`.
///
/// The resulting rotation maps the local frame (-Z forward, +Y up) onto the
/// world frame, `up` being the world up direction.
pub struct LookAt {
    pub eye: Point,
    pub target: Point,
    pub up: Vec3,
}

impl From<LookAt> for Quat {
    fn from(this: LookAt) -> Self {
        let Some(forward) = (this.target - this.eye).into_non_zero(1e-6) else {
            return Quat::IDENTITY;
        };
        let forward = forward.normalize();

        // Looking straight along `up`: any horizontal axis will do
        let right = match forward.cross(this.up).into_non_zero(1e-4) {
            Some(right) => right.normalize(),
            None => {
                let other = if forward.x.abs() < 0.9 { Vec3::X } else { Vec3::Y };
                forward.cross(other).normalize()
            }
        };
        let up = right.cross(forward);

        Quat::from_mat3(&Mat3::from_cols(right, up, -forward)).normalize()
    }
}

#[cfg(test)]
mod tests {
    use glam::{Quat, Vec3};

    use crate::math::point::Point;

    use super::LookAt;

    #[test]
    fn forward_points_at_target() {
        let eye = Point::new(3.0, -4.0, 5.0);
        let rotation: Quat = LookAt {
            eye,
            target: Point::ORIGIN,
            up: Vec3::Z,
        }
        .into();

        let forward = rotation.mul_vec3(Vec3::NEG_Z);
        let expected = (Point::ORIGIN - eye).normalize();
        assert!(forward.distance(expected) < 1e-5);

        // No roll: the camera right axis stays horizontal
        assert!(rotation.mul_vec3(Vec3::X).z.abs() < 1e-5);
    }

    #[test]
    fn straight_down() {
        let rotation: Quat = LookAt {
            eye: Point::new(0.0, 0.0, 6.0),
            target: Point::ORIGIN,
            up: Vec3::Z,
        }
        .into();
        assert!(rotation.mul_vec3(Vec3::NEG_Z).distance(Vec3::NEG_Z) < 1e-5);
        assert!(rotation.is_normalized());
    }
}
