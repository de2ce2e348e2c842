use glam::Vec3;

use crate::{
    material::MaterialId,
    math::{bounds::Bounds, point::Point},
    ray::Ray,
};

use super::{
    local_info, FullIntersectionResult, IntersectionResult, MinIntersectionResult,
    RayIntersection, Shape,
};

/// A simple sphere shape. Normals are pointing outwards.
pub struct Sphere {
    pub center: Point,
    pub radius: f32,
    pub material: MaterialId,
}

impl Shape for Sphere {
    fn intersection_full(&self, ray: Ray) -> FullIntersectionResult {
        let IntersectionResult::Intersection(RayIntersection {
            t,
            local_info: local_info::Minimum { pos },
        }) = self.intersect_bare(ray)
        else {
            return IntersectionResult::NoIntersection;
        };

        IntersectionResult::Intersection(RayIntersection {
            t,
            local_info: local_info::Full {
                pos,
                normal: (pos - self.center).normalize(),
                material: self.material,
            },
        })
    }

    fn intersect_bare(&self, ray: Ray) -> MinIntersectionResult {
        let a = ray.direction.length_squared();
        let b_half = (ray.origin - self.center).dot(ray.direction);
        let c = (ray.origin - self.center).length_squared() - self.radius * self.radius;

        let discriminant_quarter = b_half * b_half - a * c;
        if discriminant_quarter < 0.0 {
            return IntersectionResult::NoIntersection;
        }

        // Either the first hit is in range or maybe the second one
        let sqrt_d = f32::sqrt(discriminant_quarter);
        let range = ray.range();
        let t = [(-b_half - sqrt_d) / a, (-b_half + sqrt_d) / a]
            .into_iter()
            .find(|t| range.contains(t));

        match t {
            Some(t) => IntersectionResult::Intersection(RayIntersection {
                t,
                local_info: local_info::Minimum { pos: ray.at(t) },
            }),
            None => IntersectionResult::NoIntersection,
        }
    }

    fn bounding_box(&self) -> Bounds {
        Bounds {
            min: self.center - Vec3::splat(self.radius),
            max: self.center + Vec3::splat(self.radius),
        }
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use crate::{
        material::MaterialId,
        math::point::Point,
        ray::Ray,
        shape::{IntersectionResult, Shape},
    };

    use super::Sphere;

    #[test]
    fn hit_from_outside_and_inside() {
        let sphere = Sphere {
            center: Point::new(0.0, 0.0, 1.0),
            radius: 1.0,
            material: MaterialId(0),
        };

        let ray = Ray::new(Point::new(0.0, -5.0, 1.0), Vec3::Y);
        let IntersectionResult::Intersection(hit) = sphere.intersection_full(ray) else {
            panic!("missed");
        };
        assert!((hit.t - 4.0).abs() < 1e-5);
        assert!(hit.local_info.normal.distance(Vec3::NEG_Y) < 1e-5);

        let inside = Ray::new(Point::new(0.0, 0.0, 1.0), Vec3::X);
        assert_eq!(sphere.intersection_full(inside).t(), Some(1.0));

        let miss = Ray::new(Point::new(0.0, -5.0, 3.0), Vec3::Y);
        assert!(!sphere.intersect_bare(miss).is_intersection());
    }
}
