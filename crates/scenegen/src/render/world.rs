use crate::{
    camera::Camera,
    color::Rgb,
    light::Light,
    material::{Material, MaterialClass, MaterialId, MaterialSpec, Principled},
    scene::{PlacedObject, Scene, ShapeKind},
    shape::{Cuboid, Cylinder, Plane, Shape, ShapeList, Sphere, TriangleMesh},
    warn_once, Error, Result,
};

use super::RenderOptions;

/// The scene as the path tracer sees it: world space shapes and their materials
pub struct World {
    pub objects: ShapeList,
    pub materials: Vec<Box<dyn Material>>,
    pub lights: Vec<Light>,
    pub camera: Camera,
    pub background: Rgb,
}

impl World {
    pub fn from_scene(scene: &Scene, options: &RenderOptions) -> Result<Self> {
        let intrinsics = scene
            .intrinsics
            .ok_or_else(|| Error::RenderingBackend("camera intrinsics are not set".to_owned()))?;
        let pose = scene
            .camera
            .ok_or_else(|| Error::RenderingBackend("scene has no camera".to_owned()))?;
        if !intrinsics.is_valid() {
            return Err(Error::RenderingBackend(format!(
                "invalid camera intrinsics {intrinsics:?}"
            )));
        }

        let mut world = World {
            objects: ShapeList::default(),
            materials: Vec::new(),
            lights: scene.lights.clone(),
            camera: Camera::new(&intrinsics, pose),
            background: options.background(),
        };

        if let Some(ground) = &scene.ground {
            let material = world.insert_material(&ground.material);
            world.objects.push(Plane {
                size: ground.size,
                material,
            });
        }

        for object in scene.objects.values() {
            let material = match &object.material {
                Some(spec) => world.insert_material(spec),
                None => {
                    warn_once!("Rendering an object without material, it will be plain gray");
                    world.insert_material(&MaterialSpec::of_class(MaterialClass::Rubber, [0.5; 3]))
                }
            };
            world.objects.0.push(shape_of(object, material));
        }

        Ok(world)
    }

    fn insert_material(&mut self, spec: &MaterialSpec) -> MaterialId {
        self.materials.push(Box::new(Principled::from(spec)));
        MaterialId(self.materials.len() - 1)
    }
}

fn shape_of(object: &PlacedObject, material: MaterialId) -> Box<dyn Shape> {
    let center = object.position;
    let scale = object.scale;
    match &object.shape {
        ShapeKind::Cube => Box::new(Cuboid {
            center,
            half_extent: glam::Vec3::splat(scale),
            rotation_z: object.rotation_z,
            material,
        }),
        ShapeKind::Sphere => Box::new(Sphere {
            center,
            radius: scale,
            material,
        }),
        ShapeKind::Cylinder => Box::new(Cylinder {
            center,
            radius: scale,
            half_height: scale,
            material,
        }),
        ShapeKind::Asset(mesh) => {
            let vertices: Vec<_> = mesh
                .vertices
                .iter()
                .map(|&v| object.transform_point(v))
                .collect();
            Box::new(TriangleMesh::new(&vertices, &mesh.indices, material))
        }
    }
}
