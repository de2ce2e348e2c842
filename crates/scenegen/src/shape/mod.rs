//! What the path tracer can hit:
//! - the ground plane
//! - spheres, boxes and cylinders standing for the fallback primitives
//! - triangle meshes for loaded assets
//!
//! Every placed object is turned into one of these in world space.

pub mod cuboid;
pub mod cylinder;
pub mod mesh;
pub mod plane;
pub mod sphere;

pub use cuboid::Cuboid;
pub use cylinder::Cylinder;
pub use mesh::TriangleMesh;
pub use plane::Plane;
pub use sphere::Sphere;

use crate::{math::bounds::Bounds, ray::Ray};

/// An abstracted shape to be rendered by raytracing.
///
/// To render a shape we only need to know whether a ray intersect it and if so,
/// some information about the shape at the intersection point
pub trait Shape: Sync + Send {
    /// Check whether `ray` intersect the shape defined by `self` if so, gives all the information
    /// needed
    fn intersection_full(&self, ray: Ray) -> FullIntersectionResult;

    /// Check whether `ray` intersect the shape, with the minimal amount of information.
    /// It is used to cast shadow rays
    fn intersect_bare(&self, ray: Ray) -> MinIntersectionResult;

    fn bounding_box(&self) -> Bounds;
}

pub mod local_info {
    use crate::{material::MaterialId, math::point::Point};
    use glam::Vec3;

    /// Everything the integrator needs at a hit point
    #[derive(Debug)]
    pub struct Full {
        pub pos: Point,
        /// Outward, normalized
        pub normal: Vec3,
        pub material: MaterialId,
    }

    /// Contains only the pure geometrical information needed to locate the point.
    #[derive(Debug)]
    pub struct Minimum {
        pub pos: Point,
    }
}

/// Holds local informations and the time of a collision between a ray and a shape.
#[derive(Debug)]
pub struct RayIntersection<LocalInfo> {
    pub t: f32,
    pub local_info: LocalInfo,
}

/// A `Result`-like type that takes care of intersections data.
#[derive(Debug)]
pub enum IntersectionResult<LocalInfo> {
    Intersection(RayIntersection<LocalInfo>),
    NoIntersection,
}

impl<T> IntersectionResult<T> {
    pub fn is_intersection(&self) -> bool {
        matches!(self, Self::Intersection(_))
    }

    pub fn t(&self) -> Option<f32> {
        match self {
            Self::Intersection(RayIntersection { t, .. }) => Some(*t),
            Self::NoIntersection => None,
        }
    }

    pub fn min(self, other: Self) -> Self {
        let Self::Intersection(RayIntersection { t: t1, .. }) = self else {
            return other;
        };
        let Self::Intersection(RayIntersection { t: t2, .. }) = other else {
            return self;
        };

        if t1 < t2 {
            self
        } else {
            other
        }
    }
}

pub type MinIntersectionResult = IntersectionResult<local_info::Minimum>;
pub type FullIntersectionResult = IntersectionResult<local_info::Full>;

/// Shapes are tested one after the other, the ray being clipped at each hit
#[derive(Default)]
pub struct ShapeList(pub Vec<Box<dyn Shape>>);

impl ShapeList {
    pub fn push<S: Shape + 'static>(&mut self, shape: S) {
        self.0.push(Box::new(shape));
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Shape for ShapeList {
    fn intersection_full(&self, mut ray: Ray) -> FullIntersectionResult {
        let mut res = IntersectionResult::NoIntersection;

        for shape in self.0.iter() {
            if let IntersectionResult::Intersection(record) = shape.intersection_full(ray) {
                ray = ray.clipped(record.t);
                res = IntersectionResult::Intersection(record);
            }
        }
        res
    }

    fn intersect_bare(&self, ray: Ray) -> MinIntersectionResult {
        self.0
            .iter()
            .map(|shape| shape.intersect_bare(ray))
            .find(IntersectionResult::is_intersection)
            .unwrap_or(IntersectionResult::NoIntersection)
    }

    fn bounding_box(&self) -> Bounds {
        self.0
            .iter()
            .map(|shape| shape.bounding_box())
            .fold(Bounds::EMPTY, |a, b| a.including(b.min).including(b.max))
    }
}

/// Shared by shapes that only know how to compute the full information
fn bare_from_full(result: FullIntersectionResult) -> MinIntersectionResult {
    match result {
        IntersectionResult::Intersection(RayIntersection { t, local_info }) => {
            IntersectionResult::Intersection(RayIntersection {
                t,
                local_info: local_info::Minimum { pos: local_info.pos },
            })
        }
        IntersectionResult::NoIntersection => IntersectionResult::NoIntersection,
    }
}
