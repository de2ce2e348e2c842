use rand::{distributions::Uniform, prelude::Distribution, Rng};
use serde::{Deserialize, Deserializer, Serialize};

use crate::{
    math::{
        distributions::{ShellConfig, ShellOverride},
        interval::Interval,
        point::Point,
        quaternion::{LookAt, Quat},
        vec::Vec3,
    },
    ray::Ray,
};

/// Pinhole camera parameters, expressed the way modelling tools do.
///
/// The sensor width is matched to the larger image dimension.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraIntrinsics {
    /// In millimeters
    pub focal_length: f32,
    /// In millimeters
    pub sensor_width: f32,
    /// In pixels
    pub width: u32,
    /// In pixels
    pub height: u32,
}

impl Default for CameraIntrinsics {
    fn default() -> Self {
        Self {
            focal_length: 36.0,
            sensor_width: 36.0,
            width: 480,
            height: 320,
        }
    }
}

impl CameraIntrinsics {
    /// Field of view along the larger image dimension, in radians
    pub fn fov(&self) -> f32 {
        2.0 * f32::atan(self.sensor_width / 2.0 / self.focal_length)
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }

    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0 && self.focal_length > 0.0 && self.sensor_width > 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Fields missing from a configuration file keep the camera defaults
    #[serde(deserialize_with = "camera_shell")]
    pub shell: ShellConfig,
    pub intrinsics: CameraIntrinsics,
}

const CAMERA_SHELL: ShellConfig = ShellConfig {
    radius: Interval::point(6.0),
    elevation_deg: Interval::new(30.0, 90.0),
};

fn camera_shell<'de, D: Deserializer<'de>>(deserializer: D) -> Result<ShellConfig, D::Error> {
    Ok(ShellOverride::deserialize(deserializer)?.over(CAMERA_SHELL))
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            shell: CAMERA_SHELL,
            intrinsics: CameraIntrinsics::default(),
        }
    }
}

/// Where the camera is and where it looks. The local frame looks along -Z with +Y up.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Point,
    pub rotation: Quat,
}

impl CameraPose {
    pub fn looking_at_origin(position: Point) -> Self {
        Self {
            position,
            rotation: LookAt {
                eye: position,
                target: Point::ORIGIN,
                up: Vec3::Z,
            }
            .into(),
        }
    }

    pub fn sample<R: Rng + ?Sized>(config: &ShellConfig, rng: &mut R) -> Self {
        Self::looking_at_origin(config.shell().sample(rng))
    }

    pub fn forward(&self) -> Vec3 {
        self.rotation.mul_vec3(Vec3::NEG_Z)
    }
}

/// The camera as seen by the renderer
#[derive(Debug, Clone)]
pub struct Camera {
    pub width: u32,
    pub height: u32,
    /// Half extent of the image plane at distance 1, horizontally
    half_width: f32,
    /// Half extent of the image plane at distance 1, vertically
    half_height: f32,
    pub pose: CameraPose,
}

impl Camera {
    pub fn new(intrinsics: &CameraIntrinsics, pose: CameraPose) -> Self {
        let half_fov = f32::tan(intrinsics.fov() / 2.0);
        let aspect_ratio = intrinsics.aspect_ratio();
        let (half_width, half_height) = if aspect_ratio >= 1.0 {
            (half_fov, half_fov / aspect_ratio)
        } else {
            (half_fov * aspect_ratio, half_fov)
        };

        Self {
            width: intrinsics.width,
            height: intrinsics.height,
            half_width,
            half_height,
            pose,
        }
    }

    /// Generate a ray outgoing from the given [ViewportCoord]
    pub fn ray(&self, coords: ViewportCoord) -> Ray {
        let local = Vec3::new(coords.vx * self.half_width, coords.vy * self.half_height, -1.0);
        Ray::new(self.pose.position, self.pose.rotation.mul_vec3(local))
    }
}

/// Represent a coordinate in the pixel space.
///
/// $\left(0, 0\right)$ is the top left corner of the image.
#[derive(Debug, Clone, Copy)]
pub struct PixelCoord {
    pub x: f32,
    pub y: f32,
}

impl PixelCoord {
    /// Sample a point uniformly in the pixel $\left[x, x+1\right[ \times \left[y, y+1\right[$
    pub fn sample_around<R: Rng + ?Sized>(rng: &mut R, x: u32, y: u32) -> PixelCoord {
        let uniform = Uniform::new(0., 1.);
        PixelCoord {
            x: x as f32 + uniform.sample(rng),
            y: y as f32 + uniform.sample(rng),
        }
    }
}

/// Represent a coordinate in the viewport space.
///
/// The viewport is mapped to the range $\left[-1, 1\right]$ for both `vx` and `vy`,
/// $\left(-1, 1\right)$ is the top left corner.
#[derive(Debug, Clone, Copy)]
pub struct ViewportCoord {
    pub vx: f32,
    pub vy: f32,
}

impl ViewportCoord {
    pub fn from_pixel_coord(camera: &Camera, coord: PixelCoord) -> Self {
        Self {
            vx: 2. * (coord.x / camera.width as f32) - 1.,
            vy: 1. - 2. * (coord.y / camera.height as f32),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_fov() {
        let intrinsics = CameraIntrinsics::default();
        // 36mm lens on a 36mm sensor
        assert!((intrinsics.fov() - 2.0 * 0.5_f32.atan()).abs() < 1e-6);
        assert!(intrinsics.is_valid());
        assert!(!CameraIntrinsics {
            width: 0,
            ..intrinsics
        }
        .is_valid());
    }

    #[test]
    fn sampled_pose_faces_origin() {
        let config = CameraConfig::default();
        let mut rng = crate::seed_rng(21);
        for _ in 0..100 {
            let pose = CameraPose::sample(&config.shell, &mut rng);
            assert!((pose.position.vec().length() - 6.0).abs() < 1e-4);
            let elevation = pose.position.elevation().to_degrees();
            assert!((30.0 - 1e-3..=90.0 + 1e-3).contains(&elevation));

            let to_origin = (Point::ORIGIN - pose.position).normalize();
            assert!(pose.forward().distance(to_origin) < 1e-4);
        }
    }

    #[test]
    fn center_ray_hits_origin() {
        let pose = CameraPose::looking_at_origin(Point::new(4.0, 0.0, 3.0));
        let camera = Camera::new(&CameraIntrinsics::default(), pose);
        let coords = ViewportCoord::from_pixel_coord(&camera, PixelCoord { x: 240.0, y: 160.0 });
        let ray = camera.ray(coords);
        // Distance from the origin to the ray line
        let to_origin = Point::ORIGIN - ray.origin;
        assert!(to_origin.cross(ray.direction).length() < 1e-4);

        // Top of the image looks higher than the bottom
        let top = camera.ray(ViewportCoord { vx: 0.0, vy: 1.0 });
        let bottom = camera.ray(ViewportCoord { vx: 0.0, vy: -1.0 });
        assert!(top.direction.z > bottom.direction.z);
    }
}
