use glam::{Quat, Vec3};

use crate::{
    material::MaterialId,
    math::{bounds::Bounds, point::Point},
    ray::Ray,
};

use super::{
    bare_from_full, local_info, FullIntersectionResult, IntersectionResult,
    MinIntersectionResult, RayIntersection, Shape,
};

/// A box, rotated around the vertical axis
pub struct Cuboid {
    pub center: Point,
    pub half_extent: Vec3,
    pub rotation_z: f32,
    pub material: MaterialId,
}

impl Cuboid {
    fn local_box(&self) -> Bounds {
        Bounds {
            min: Point(-self.half_extent),
            max: Point(self.half_extent),
        }
    }
}

impl Shape for Cuboid {
    fn intersection_full(&self, ray: Ray) -> FullIntersectionResult {
        // Work in the box frame, where the box is axis aligned and centered
        let to_local = Quat::from_rotation_z(-self.rotation_z);
        let local_ray = Ray {
            origin: Point(to_local.mul_vec3(ray.origin - self.center)),
            direction: to_local.mul_vec3(ray.direction),
            bounds: ray.bounds,
        };

        let Some(range) = self.local_box().ray_intersect(&local_ray) else {
            return IntersectionResult::NoIntersection;
        };
        // Entering the box, or leaving it if the ray starts inside
        let t = if range.start > ray.bounds.0 {
            range.start
        } else if range.end < ray.bounds.1 {
            range.end
        } else {
            return IntersectionResult::NoIntersection;
        };

        let local_pos = local_ray.at(t).vec() / self.half_extent;
        let axis = local_pos.abs().max_element();
        let local_normal = Vec3::select(
            local_pos.abs().cmpge(Vec3::splat(axis)),
            local_pos.signum(),
            Vec3::ZERO,
        )
        .normalize_or_zero();

        IntersectionResult::Intersection(RayIntersection {
            t,
            local_info: local_info::Full {
                pos: ray.at(t),
                normal: Quat::from_rotation_z(self.rotation_z).mul_vec3(local_normal),
                material: self.material,
            },
        })
    }

    fn intersect_bare(&self, ray: Ray) -> MinIntersectionResult {
        bare_from_full(self.intersection_full(ray))
    }

    fn bounding_box(&self) -> Bounds {
        self.local_box().transformed(
            Vec3::ONE,
            Quat::from_rotation_z(self.rotation_z),
            self.center.vec(),
        )
    }
}
