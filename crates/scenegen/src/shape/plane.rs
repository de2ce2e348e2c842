use glam::Vec3;

use crate::{
    material::MaterialId,
    math::{bounds::Bounds, point::Point, vec::FloatAsExt},
    ray::Ray,
};

use super::{
    bare_from_full, local_info, FullIntersectionResult, IntersectionResult,
    MinIntersectionResult, RayIntersection, Shape,
};

/// The ground: the z = 0 plane, cut to a square of side `size` around the origin
pub struct Plane {
    pub size: f32,
    pub material: MaterialId,
}

impl Shape for Plane {
    fn intersection_full(&self, ray: Ray) -> FullIntersectionResult {
        let Some(dz) = ray.direction.z.into_non_zero(1e-8) else {
            return IntersectionResult::NoIntersection;
        };
        let t = -ray.origin.0.z / dz;

        if !ray.range().contains(&t) {
            return IntersectionResult::NoIntersection;
        }
        let pos = ray.at(t);
        let half_size = self.size / 2.0;
        if pos.0.x.abs() > half_size || pos.0.y.abs() > half_size {
            return IntersectionResult::NoIntersection;
        }

        IntersectionResult::Intersection(RayIntersection {
            t,
            local_info: local_info::Full {
                pos,
                normal: Vec3::Z,
                material: self.material,
            },
        })
    }

    fn intersect_bare(&self, ray: Ray) -> MinIntersectionResult {
        bare_from_full(self.intersection_full(ray))
    }

    fn bounding_box(&self) -> Bounds {
        let half_size = self.size / 2.0;
        Bounds {
            min: Point::new(-half_size, -half_size, 0.0),
            max: Point::new(half_size, half_size, 0.0),
        }
    }
}
