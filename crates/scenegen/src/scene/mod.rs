//! The composed scene: what is handed to the renderer.

mod object;

pub use object::{PlacedObject, ShapeKind, SizeClass};

use serde::{Deserialize, Serialize};
use slotmap::{new_key_type, SlotMap};

use crate::{
    camera::{CameraIntrinsics, CameraPose},
    color::Rgb,
    light::Light,
    material::MaterialSpec,
};

new_key_type! {
    /// Slot of an object in the scene arena
    pub struct ObjectKey;
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroundConfig {
    /// Side of the square ground plane, centered on the origin
    pub size: f32,
    pub color: Rgb,
    pub roughness: f32,
}

impl Default for GroundConfig {
    fn default() -> Self {
        Self {
            size: 10000.0,
            color: Rgb::gray(0.73),
            roughness: 1.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GroundPlane {
    pub size: f32,
    pub material: MaterialSpec,
}

impl GroundPlane {
    pub fn new(config: &GroundConfig) -> Self {
        Self {
            size: config.size,
            material: MaterialSpec::ground(config),
        }
    }
}

/// One scene, rebuilt from scratch for every render.
///
/// Objects live in an arena: placement candidates get a slot, and the slot is
/// either kept or freed once the candidate is tested.
#[derive(Debug, Default)]
pub struct Scene {
    pub ground: Option<GroundPlane>,
    pub objects: SlotMap<ObjectKey, PlacedObject>,
    pub intrinsics: Option<CameraIntrinsics>,
    pub camera: Option<CameraPose>,
    pub lights: Vec<Light>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove everything, calling it twice is harmless
    pub fn clear(&mut self) {
        self.ground = None;
        self.objects.clear();
        self.intrinsics = None;
        self.camera = None;
        self.lights.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.ground.is_none()
            && self.objects.is_empty()
            && self.intrinsics.is_none()
            && self.camera.is_none()
            && self.lights.is_empty()
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use crate::{
        camera::{CameraIntrinsics, CameraPose},
        math::point::Point,
    };

    use super::*;

    #[test]
    fn clear_is_idempotent() {
        let mut scene = Scene::new();
        scene.ground = Some(GroundPlane::new(&GroundConfig::default()));
        scene.objects.insert(PlacedObject::new(
            ShapeKind::Sphere,
            SizeClass::Small,
            0.5,
            Vec2::ZERO,
            0.0,
        ));
        scene.intrinsics = Some(CameraIntrinsics::default());
        scene.camera = Some(CameraPose::looking_at_origin(Point::new(0.0, -6.0, 3.0)));
        assert!(!scene.is_empty());

        scene.clear();
        assert!(scene.is_empty());
        scene.clear();
        assert!(scene.is_empty());
    }

    #[test]
    fn ground_material_is_fixed() {
        let ground = GroundPlane::new(&GroundConfig::default());
        assert_eq!(ground.material.base_color, [0.73, 0.73, 0.73, 1.0]);
        assert_eq!(ground.material.roughness, 1.0);
        assert_eq!(ground.material.metallic, 0.0);
    }
}
