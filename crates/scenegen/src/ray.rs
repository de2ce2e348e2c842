use std::ops::RangeInclusive;

use crate::math::{point::Point, vec::Vec3};

/// A half line, only hits with `t` in `bounds` count
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    pub origin: Point,
    /// Unit length
    pub direction: Vec3,
    pub bounds: (f32, f32),
}

impl Ray {
    pub fn new(origin: Point, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
            bounds: (0.0, f32::INFINITY),
        }
    }

    /// Ray from a surface point toward a light `distance` away.
    ///
    /// Both ends are shortened by `epsilon` so that neither the surface nor the
    /// light itself occlude it.
    pub fn shadow(from: Point, direction: Vec3, distance: f32, epsilon: f32) -> Self {
        Self {
            bounds: (epsilon, distance - epsilon),
            ..Self::new(from, direction)
        }
    }

    pub fn range(&self) -> RangeInclusive<f32> {
        self.bounds.0..=self.bounds.1
    }

    /// Same ray, but hits closer than `epsilon` are ignored
    pub fn offset(self, epsilon: f32) -> Self {
        Self {
            bounds: (f32::max(self.bounds.0, epsilon), self.bounds.1),
            ..self
        }
    }

    /// Same ray, but hits farther than `t` are ignored
    pub fn clipped(self, t: f32) -> Self {
        Self {
            bounds: (self.bounds.0, f32::min(self.bounds.1, t)),
            ..self
        }
    }

    pub fn at(&self, t: f32) -> Point {
        self.origin + t * self.direction
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use crate::math::point::Point;

    use super::Ray;

    #[test]
    fn points_along_the_ray() {
        let ray = Ray::new(Point::new(1., 0., 0.), Vec3::new(-1., 1., 0.));
        assert!((ray.direction.length() - 1.0).abs() < 1e-6);
        assert!(ray.at(0.0).vec().distance(ray.origin.vec()) < 1e-6);
        assert!(ray.at(2.0f32.sqrt()).vec().distance(Vec3::Y) < 1e-5);
    }

    #[test]
    fn bounds() {
        let ray = Ray::new(Point::ORIGIN, Vec3::X).offset(0.1).clipped(4.0);
        assert!(ray.range().contains(&3.9));
        assert!(!ray.range().contains(&4.1));
        assert!(!ray.range().contains(&0.05));

        // Offsetting never widens the range
        assert_eq!(ray.offset(0.01).bounds, (0.1, 4.0));
    }

    #[test]
    fn shadow_ray_stops_before_the_light() {
        let ray = Ray::shadow(Point::ORIGIN, Vec3::Z * 2.0, 5.0, 1e-3);
        assert_eq!(ray.direction, Vec3::Z);
        assert!(!ray.range().contains(&0.0));
        assert!(!ray.range().contains(&5.0));
        assert!(ray.range().contains(&4.99));
    }
}
