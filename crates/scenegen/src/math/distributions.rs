use std::ops::Deref;

use rand::{distributions::Uniform, prelude::Distribution, Rng};
use serde::{Deserialize, Serialize};

use super::{interval::Interval, point::Point, vec::Vec3};

/// Samples are expected to be in [0;1(^N
pub struct Samples<const N: usize>(pub [f32; N]);

impl<const N: usize> Deref for Samples<N> {
    type Target = [f32; N];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

pub trait Samplable<T, const N: usize> {
    fn sample_with(&self, samples: Samples<N>) -> T;
}

/// Positions in a spherical shell around the origin, restricted in elevation.
///
/// Radius and elevation are drawn uniformly in their bounds, azimuth uniformly
/// in $\left[0, 2\pi\right[$:
///
/// $x = r \cos(az) \cos(el)$, $y = r \sin(az) \cos(el)$, $z = r \sin(el)$
///
/// Note that this is not uniform over the shell volume, points gather near
/// the zenith and the inner radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphericalShell {
    pub radius: Interval,
    /// In radians, from the ground plane
    pub elevation: Interval,
}

impl Distribution<Point> for SphericalShell {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Point {
        let radius = self.radius.sample(rng);
        let azimuth = Uniform::new(0.0, std::f32::consts::TAU).sample(rng);
        let elevation = self.elevation.sample(rng);

        let (s_az, c_az) = f32::sin_cos(azimuth);
        let (s_el, c_el) = f32::sin_cos(elevation);
        Point::new(radius * c_az * c_el, radius * s_az * c_el, radius * s_el)
    }
}

/// [SphericalShell] as written in configuration files: elevations in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    pub radius: Interval,
    pub elevation_deg: Interval,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            radius: Interval::point(6.0),
            elevation_deg: Interval::new(0.0, 90.0),
        }
    }
}

/// A [ShellConfig] with some fields left out, completed by [ShellOverride::over].
///
/// Used where the default shell depends on what is placed on it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ShellOverride {
    pub radius: Option<Interval>,
    pub elevation_deg: Option<Interval>,
}

impl ShellOverride {
    pub fn over(self, base: ShellConfig) -> ShellConfig {
        ShellConfig {
            radius: self.radius.unwrap_or(base.radius),
            elevation_deg: self.elevation_deg.unwrap_or(base.elevation_deg),
        }
    }
}

impl ShellConfig {
    pub fn shell(&self) -> SphericalShell {
        SphericalShell {
            radius: self.radius,
            elevation: self.elevation_deg.to_radians(),
        }
    }

    pub fn is_valid(&self) -> bool {
        // The origin has no elevation
        self.radius.is_valid()
            && self.radius.min > 0.0
            && self.elevation_deg.is_valid()
            && self.elevation_deg.min >= -90.0
            && self.elevation_deg.max <= 90.0
    }
}

#[derive(Default)]
pub struct UniformUnitBall3;

/// Constant time, but maybe still slower than rejection due to powf, cos, sin ?
impl Samplable<Vec3, 3> for UniformUnitBall3 {
    fn sample_with(&self, samples: Samples<3>) -> Vec3 {
        let phi = std::f32::consts::TAU * samples[0];
        let (sp, cp) = f32::sin_cos(phi);
        let cos_theta = 1.0 - 2.0 * samples[1];
        let sin_theta = f32::sqrt(f32::max(0.0, 1.0 - cos_theta * cos_theta));
        let r = samples[2].powf(1. / 3.);
        Vec3::new(r * cp * sin_theta, r * sp * sin_theta, r * cos_theta)
    }
}

impl Distribution<Vec3> for UniformUnitBall3 {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec3 {
        let uniform = Uniform::new(0., 1.);
        self.sample_with(Samples([
            uniform.sample(rng),
            uniform.sample(rng),
            uniform.sample(rng),
        ]))
    }
}

pub struct UniformUnitBall2;
impl Samplable<[f32; 2], 2> for UniformUnitBall2 {
    fn sample_with(&self, samples: Samples<2>) -> [f32; 2] {
        let phi = std::f32::consts::TAU * samples[0];
        let r = samples[1].sqrt();
        let (s, c) = f32::sin_cos(phi);
        [r * c, r * s]
    }
}

impl Distribution<[f32; 2]> for UniformUnitBall2 {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> [f32; 2] {
        let uniform = Uniform::new(0., 1.);
        self.sample_with(Samples([uniform.sample(rng), uniform.sample(rng)]))
    }
}

/// Cosine weighted directions around +Z (Malley's method)
pub struct CosineHemisphere3;
impl Samplable<Vec3, 2> for CosineHemisphere3 {
    fn sample_with(&self, samples: Samples<2>) -> Vec3 {
        let [x, y] = UniformUnitBall2.sample_with(samples);
        let z = f32::sqrt(f32::max(0.0, 1.0 - x * x - y * y));
        Vec3 { x, y, z }
    }
}

impl Distribution<Vec3> for CosineHemisphere3 {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec3 {
        let uniform = Uniform::new(0., 1.);
        self.sample_with(Samples([uniform.sample(rng), uniform.sample(rng)]))
    }
}
