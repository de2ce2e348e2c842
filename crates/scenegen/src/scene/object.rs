use std::sync::Arc;

use glam::{Quat, Vec2};
use rand::{seq::SliceRandom, Rng};

use crate::{
    assets::Mesh,
    material::MaterialSpec,
    math::{bounds::Bounds, point::Point, vec::Vec3},
};

/// What an object is made of: a loaded mesh or one of the fallback primitives.
///
/// Primitives follow the usual modelling tool defaults: they fit in the
/// $\left[-1, 1\right]^3$ box (cube of side 2, sphere of radius 1, cylinder of
/// radius 1 and depth 2 along z).
#[derive(Debug, Clone)]
pub enum ShapeKind {
    Asset(Arc<Mesh>),
    Cube,
    Sphere,
    Cylinder,
}

impl ShapeKind {
    pub const PRIMITIVES: [ShapeKind; 3] =
        [ShapeKind::Cube, ShapeKind::Sphere, ShapeKind::Cylinder];

    pub fn name(&self) -> &str {
        match self {
            ShapeKind::Asset(mesh) => &mesh.name,
            ShapeKind::Cube => "cube",
            ShapeKind::Sphere => "sphere",
            ShapeKind::Cylinder => "cylinder",
        }
    }

    pub fn is_primitive(&self) -> bool {
        !matches!(self, ShapeKind::Asset(_))
    }

    /// Bounding box before any scale or rotation
    pub fn local_bounds(&self) -> Bounds {
        match self {
            ShapeKind::Asset(mesh) => mesh.bounds,
            ShapeKind::Cube | ShapeKind::Sphere | ShapeKind::Cylinder => Bounds {
                min: Point(Vec3::NEG_ONE),
                max: Point(Vec3::ONE),
            },
        }
    }
}

/// Discrete object size, drawn uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SizeClass {
    Small = 1,
    Medium = 2,
    Large = 3,
}

impl SizeClass {
    pub const ALL: [SizeClass; 3] = [SizeClass::Small, SizeClass::Medium, SizeClass::Large];

    /// Scale factor of each class, applied on all three axes
    pub const DEFAULT_SCALES: [f32; 3] = [0.5, 1.0, 1.5];

    /// 1, 2 or 3
    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(usize::from(index).checked_sub(1)?).copied()
    }

    /// Pick the entry of a per class table
    pub fn pick<T: Copy>(self, table: &[T; 3]) -> T {
        table[self as usize - 1]
    }

    pub fn scale(self) -> f32 {
        self.pick(&Self::DEFAULT_SCALES)
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        *Self::ALL.choose(rng).unwrap_or(&SizeClass::Medium)
    }
}

/// An object standing on the ground plane.
///
/// The object is placed so that the center of its scaled and rotated bounding
/// box is at `position`, with `position.z == height / 2`: its lowest point
/// touches z = 0 whatever its scale.
#[derive(Debug, Clone)]
pub struct PlacedObject {
    pub shape: ShapeKind,
    pub size: SizeClass,
    /// Uniform scale factor
    pub scale: f32,
    pub position: Point,
    /// Vertical extent of the scaled bounding box
    pub height: f32,
    /// Rotation around the vertical axis, in radians, in [0, 2π[
    pub rotation_z: f32,
    pub material: Option<MaterialSpec>,
}

impl PlacedObject {
    pub fn new(shape: ShapeKind, size: SizeClass, scale: f32, xy: Vec2, rotation_z: f32) -> Self {
        let bounds = shape
            .local_bounds()
            .transformed(Vec3::splat(scale), Quat::from_rotation_z(rotation_z), Vec3::ZERO);
        let height = bounds.height();

        Self {
            shape,
            size,
            scale,
            position: Point::new(xy.x, xy.y, height / 2.0),
            height,
            rotation_z,
            material: None,
        }
    }

    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_z(self.rotation_z)
    }

    /// Map a point of the shape local frame into the world
    pub fn transform_point(&self, local: Vec3) -> Point {
        let center = self.shape.local_bounds().center().vec();
        self.position + self.rotation().mul_vec3(self.scale * (local - center))
    }

    pub fn world_bounds(&self) -> Bounds {
        let local = self.shape.local_bounds();
        local.transformed(
            Vec3::splat(self.scale),
            self.rotation(),
            self.position.vec() - self.rotation().mul_vec3(self.scale * local.center().vec()),
        )
    }

    pub fn planar_distance(&self, other: &PlacedObject) -> f32 {
        self.position.planar_distance(other.position)
    }
}
