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

/// A closed cylinder with a vertical axis.
///
/// Rotating it around z changes nothing, so it carries no rotation.
pub struct Cylinder {
    pub center: Point,
    pub radius: f32,
    pub half_height: f32,
    pub material: MaterialId,
}

impl Cylinder {
    /// Candidate hits on the side: (t, normal)
    fn side_hits(&self, ray: &Ray) -> [Option<(f32, Vec3)>; 2] {
        let o = ray.origin - self.center;
        let d = ray.direction;

        let a = d.x * d.x + d.y * d.y;
        let Some(a) = a.into_non_zero(1e-12) else {
            return [None, None];
        };
        let b_half = o.x * d.x + o.y * d.y;
        let c = o.x * o.x + o.y * o.y - self.radius * self.radius;
        let discriminant_quarter = b_half * b_half - a * c;
        if discriminant_quarter < 0.0 {
            return [None, None];
        }

        let sqrt_d = discriminant_quarter.sqrt();
        [(-b_half - sqrt_d) / a, (-b_half + sqrt_d) / a].map(|t| {
            let p = o + t * d;
            (p.z.abs() <= self.half_height)
                .then(|| (t, Vec3::new(p.x, p.y, 0.0).normalize_or_zero()))
        })
    }

    /// Candidate hits on the caps: (t, normal)
    fn cap_hits(&self, ray: &Ray) -> [Option<(f32, Vec3)>; 2] {
        let o = ray.origin - self.center;
        let d = ray.direction;
        let Some(dz) = d.z.into_non_zero(1e-12) else {
            return [None, None];
        };

        [-1.0_f32, 1.0].map(|side| {
            let t = (side * self.half_height - o.z) / dz;
            let p = o + t * d;
            (p.x * p.x + p.y * p.y <= self.radius * self.radius).then(|| (t, side * Vec3::Z))
        })
    }
}

impl Shape for Cylinder {
    fn intersection_full(&self, ray: Ray) -> FullIntersectionResult {
        let range = ray.range();
        let closest = self
            .side_hits(&ray)
            .into_iter()
            .chain(self.cap_hits(&ray))
            .flatten()
            .filter(|(t, _)| range.contains(t))
            .min_by(|(t1, _), (t2, _)| t1.total_cmp(t2));

        match closest {
            Some((t, normal)) => IntersectionResult::Intersection(RayIntersection {
                t,
                local_info: local_info::Full {
                    pos: ray.at(t),
                    normal,
                    material: self.material,
                },
            }),
            None => IntersectionResult::NoIntersection,
        }
    }

    fn intersect_bare(&self, ray: Ray) -> MinIntersectionResult {
        bare_from_full(self.intersection_full(ray))
    }

    fn bounding_box(&self) -> Bounds {
        let half = Vec3::new(self.radius, self.radius, self.half_height);
        Bounds {
            min: self.center - half,
            max: self.center + half,
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

    use super::Cylinder;

    fn cylinder() -> Cylinder {
        Cylinder {
            center: Point::new(0.0, 0.0, 1.0),
            radius: 1.0,
            half_height: 1.0,
            material: MaterialId(0),
        }
    }

    #[test]
    fn side_and_caps() {
        let cylinder = cylinder();

        let side = Ray::new(Point::new(-5.0, 0.0, 1.5), Vec3::X);
        let IntersectionResult::Intersection(hit) = cylinder.intersection_full(side) else {
            panic!("missed the side");
        };
        assert!((hit.t - 4.0).abs() < 1e-5);
        assert!(hit.local_info.normal.distance(Vec3::NEG_X) < 1e-5);

        let top = Ray::new(Point::new(0.5, 0.0, 5.0), Vec3::NEG_Z);
        let IntersectionResult::Intersection(hit) = cylinder.intersection_full(top) else {
            panic!("missed the cap");
        };
        assert!((hit.t - 3.0).abs() < 1e-5);
        assert_eq!(hit.local_info.normal, Vec3::Z);

        let over = Ray::new(Point::new(-5.0, 0.0, 2.5), Vec3::X);
        assert!(!cylinder.intersect_bare(over).is_intersection());

        let beside = Ray::new(Point::new(1.5, 0.0, 5.0), Vec3::NEG_Z);
        assert!(!cylinder.intersect_bare(beside).is_intersection());
    }
}
