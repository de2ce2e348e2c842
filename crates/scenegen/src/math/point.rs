use std::ops::{Add, Sub};

use glam::{Vec2, Vec3};

/// A position in world space. Z is up and the ground plane is z = 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point(pub Vec3);

impl Point {
    pub const ORIGIN: Point = Point(Vec3::ZERO);

    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self(Vec3::new(x, y, z))
    }

    pub fn vec(self) -> Vec3 {
        self.0
    }

    /// Projection on the ground plane
    pub fn xy(self) -> Vec2 {
        self.0.truncate()
    }

    /// Distance between the ground projections of two points
    pub fn planar_distance(self, other: Point) -> f32 {
        self.xy().distance(other.xy())
    }

    /// Angle between the ground plane and the segment from the origin to `self`.
    ///
    /// Returns 0 for the origin.
    pub fn elevation(self) -> f32 {
        let r = self.0.length();
        if r == 0.0 {
            return 0.0;
        }
        f32::asin((self.0.z / r).clamp(-1.0, 1.0))
    }
}

impl Add<Vec3> for Point {
    type Output = Self;

    fn add(self, rhs: Vec3) -> Self::Output {
        Point(self.vec() + rhs)
    }
}

impl Sub<Vec3> for Point {
    type Output = Self;

    fn sub(self, rhs: Vec3) -> Self::Output {
        Point(self.vec() - rhs)
    }
}

/// We can sub two points but not add them
impl Sub for Point {
    type Output = Vec3;

    fn sub(self, rhs: Self) -> Self::Output {
        self.vec() - rhs.vec()
    }
}

#[cfg(test)]
mod tests {
    use super::Point;

    #[test]
    fn planar_distance_ignores_height() {
        let a = Point::new(0.0, 0.0, 5.0);
        let b = Point::new(3.0, 4.0, -2.0);
        assert!((a.planar_distance(b) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn elevation() {
        assert!((Point::new(0.0, 0.0, 2.0).elevation() - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
        assert!(Point::new(1.0, 1.0, 0.0).elevation().abs() < 1e-6);
        assert_eq!(Point::ORIGIN.elevation(), 0.0);
    }
}
