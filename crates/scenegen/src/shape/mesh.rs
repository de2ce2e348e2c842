use glam::Vec3;

use crate::{
    material::MaterialId,
    math::{bounds::Bounds, point::Point, vec::FloatAsExt},
    ray::Ray,
};

use super::{
    local_info, FullIntersectionResult, IntersectionResult, MinIntersectionResult,
    RayIntersection, Shape,
};

/// A private type that stores the result of the Möller-Trumbore algorithm
struct MollerTrumbore {
    t: f32,
    normal: Vec3,
}

impl MollerTrumbore {
    fn intersect(vertices: &[Point; 3], ray: &Ray) -> Option<Self> {
        let e1 = vertices[1] - vertices[0];
        let e2 = vertices[2] - vertices[0];
        let p = ray.direction.cross(e2);
        let det = e1.dot(p).into_non_zero(1e-10)?;
        let inv_det = 1.0 / det;

        let s = ray.origin - vertices[0];
        let u = s.dot(p) * inv_det;
        if !(0.0..=1.0).contains(&u) {
            return None;
        }
        let q = s.cross(e1);
        let v = ray.direction.dot(q) * inv_det;
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = e2.dot(q) * inv_det;
        ray.range().contains(&t).then(|| Self {
            t,
            normal: e1.cross(e2).normalize_or_zero(),
        })
    }
}

/// A loaded asset in world space: flat shaded triangles behind a bounding box test
pub struct TriangleMesh {
    pub triangles: Vec<[Point; 3]>,
    pub bounds: Bounds,
    pub material: MaterialId,
}

impl TriangleMesh {
    pub fn new(vertices: &[Point], indices: &[[u32; 3]], material: MaterialId) -> Self {
        let triangles: Vec<[Point; 3]> = indices
            .iter()
            .filter_map(|&[a, b, c]| {
                Some([
                    *vertices.get(a as usize)?,
                    *vertices.get(b as usize)?,
                    *vertices.get(c as usize)?,
                ])
            })
            .collect();
        let bounds = Bounds::from_points(triangles.iter().flatten().copied());

        Self {
            triangles,
            bounds,
            material,
        }
    }

    fn closest(&self, ray: &Ray) -> Option<MollerTrumbore> {
        let range = self.bounds.ray_intersect(ray)?;
        // Slightly enlarged, flat meshes make the box test tight
        let ray = Ray {
            bounds: (ray.bounds.0, f32::min(ray.bounds.1, range.end + 1e-3)),
            ..*ray
        };

        self.triangles
            .iter()
            .filter_map(|triangle| MollerTrumbore::intersect(triangle, &ray))
            .min_by(|a, b| a.t.total_cmp(&b.t))
    }
}

impl Shape for TriangleMesh {
    fn intersection_full(&self, ray: Ray) -> FullIntersectionResult {
        match self.closest(&ray) {
            Some(MollerTrumbore { t, normal }) => IntersectionResult::Intersection(RayIntersection {
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
        if self.bounds.ray_intersect(&ray).is_none() {
            return IntersectionResult::NoIntersection;
        }
        match self
            .triangles
            .iter()
            .find_map(|triangle| MollerTrumbore::intersect(triangle, &ray))
        {
            Some(MollerTrumbore { t, .. }) => IntersectionResult::Intersection(RayIntersection {
                t,
                local_info: local_info::Minimum { pos: ray.at(t) },
            }),
            None => IntersectionResult::NoIntersection,
        }
    }

    fn bounding_box(&self) -> Bounds {
        self.bounds
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

    use super::TriangleMesh;

    fn quad() -> TriangleMesh {
        // Unit square at z = 1, facing up
        let vertices = [
            Point::new(0.0, 0.0, 1.0),
            Point::new(1.0, 0.0, 1.0),
            Point::new(1.0, 1.0, 1.0),
            Point::new(0.0, 1.0, 1.0),
        ];
        TriangleMesh::new(&vertices, &[[0, 1, 2], [0, 2, 3], [0, 1, 7]], MaterialId(3))
    }

    #[test]
    fn out_of_range_indices_are_skipped() {
        assert_eq!(quad().triangles.len(), 2);
    }

    #[test]
    fn hits_both_triangles() {
        let mesh = quad();
        for (x, y) in [(0.8, 0.2), (0.2, 0.8)] {
            let ray = Ray::new(Point::new(x, y, 3.0), Vec3::NEG_Z);
            let IntersectionResult::Intersection(hit) = mesh.intersection_full(ray) else {
                panic!("missed at {x} {y}");
            };
            assert!((hit.t - 2.0).abs() < 1e-5);
            assert!(hit.local_info.normal.distance(Vec3::Z) < 1e-5);
            assert_eq!(hit.local_info.material, MaterialId(3));
        }

        let miss = Ray::new(Point::new(1.5, 0.5, 3.0), Vec3::NEG_Z);
        assert!(!mesh.intersect_bare(miss).is_intersection());
    }
}
