use std::ops::Range;

use glam::{Quat, Vec3};

use crate::ray::Ray;

use super::point::Point;

/// Axis Aligned Bounding Box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

impl Bounds {
    pub const EMPTY: Bounds = Bounds {
        min: Point(Vec3::splat(f32::INFINITY)),
        max: Point(Vec3::splat(f32::NEG_INFINITY)),
    };

    pub fn from_points<I: IntoIterator<Item = Point>>(points: I) -> Self {
        points.into_iter().fold(Self::EMPTY, Self::including)
    }

    pub fn including(self, p: Point) -> Self {
        Self {
            min: Point(self.min.vec().min(p.vec())),
            max: Point(self.max.vec().max(p.vec())),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.min.vec().cmpgt(self.max.vec()).any()
    }

    pub fn extent(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn height(&self) -> f32 {
        self.extent().z
    }

    pub fn center(&self) -> Point {
        Point(0.5 * (self.min.vec() + self.max.vec()))
    }

    pub fn corners(&self) -> [Point; 8] {
        let (a, b) = (self.min.vec(), self.max.vec());
        [
            Point::new(a.x, a.y, a.z),
            Point::new(b.x, a.y, a.z),
            Point::new(a.x, b.y, a.z),
            Point::new(b.x, b.y, a.z),
            Point::new(a.x, a.y, b.z),
            Point::new(b.x, a.y, b.z),
            Point::new(a.x, b.y, b.z),
            Point::new(b.x, b.y, b.z),
        ]
    }

    /// Bounding box of the 8 corners after scaling, rotating then translating them
    pub fn transformed(&self, scale: Vec3, rotation: Quat, translation: Vec3) -> Self {
        Self::from_points(
            self.corners()
                .map(|p| Point(rotation.mul_vec3(scale * p.vec()) + translation)),
        )
    }

    /// Returns the parametric range in which `ray` is inside the box, if any (slab method)
    pub fn ray_intersect(&self, ray: &Ray) -> Option<Range<f32>> {
        let inv_dir = ray.direction.recip();
        let t0 = (self.min - ray.origin) * inv_dir;
        let t1 = (self.max - ray.origin) * inv_dir;

        let t_min = Vec3::min(t0, t1).max_element().max(ray.bounds.0);
        let t_max = Vec3::max(t0, t1).min_element().min(ray.bounds.1);

        (t_min <= t_max).then_some(t_min..t_max)
    }
}

#[cfg(test)]
mod tests {
    use glam::{Quat, Vec3};

    use crate::{math::point::Point, ray::Ray};

    use super::Bounds;

    fn unit_cube() -> Bounds {
        Bounds::from_points([Point::new(-1.0, -1.0, -1.0), Point::new(1.0, 1.0, 1.0)])
    }

    #[test]
    fn from_points() {
        let b = unit_cube();
        assert_eq!(b.extent(), Vec3::splat(2.0));
        assert_eq!(b.center(), Point::ORIGIN);
        assert!(!b.is_empty());
        assert!(Bounds::EMPTY.is_empty());
    }

    #[test]
    fn scaled_height() {
        let b = unit_cube().transformed(Vec3::splat(1.5), Quat::IDENTITY, Vec3::ZERO);
        assert!((b.height() - 3.0).abs() < 1e-6);
    }

    #[test]
    fn rotation_about_z_keeps_height() {
        let rot = Quat::from_rotation_z(0.7);
        let b = unit_cube().transformed(Vec3::splat(0.5), rot, Vec3::new(1.0, 2.0, 0.5));
        assert!((b.height() - 1.0).abs() < 1e-5);
        assert!(b.extent().x > 1.0);
    }

    #[test]
    fn ray_hits_box() {
        let ray = Ray::new(Point::new(-5.0, 0.0, 0.0), Vec3::X);
        let range = unit_cube().ray_intersect(&ray).unwrap();
        assert!((range.start - 4.0).abs() < 1e-5);
        assert!((range.end - 6.0).abs() < 1e-5);

        let miss = Ray::new(Point::new(-5.0, 3.0, 0.0), Vec3::X);
        assert!(unit_cube().ray_intersect(&miss).is_none());
    }
}
