use rand::{prelude::Distribution, Rng as _};

use crate::{
    color::Rgb,
    math::{
        distributions::UniformUnitBall3,
        vec::{ReflectVecExt, Vec3AsNonZero, Vec3SameDirExt},
    },
    ray::Ray,
    shape::local_info,
    Rng,
};

use super::MaterialSpec;

pub trait Material: Sync + Send {
    fn scatter(&self, ray: Ray, record: &local_info::Full, rng: &mut Rng) -> Scattered;

    /// Reflectance of the diffuse part, used to gather direct light
    fn diffuse(&self) -> Option<Rgb> {
        None
    }
}

/// Which bounce budget a scattered ray draws from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lobe {
    Diffuse,
    Glossy,
}

pub struct Scattered {
    pub albedo: Rgb,
    pub ray_out: Option<Ray>,
    pub lobe: Lobe,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaterialId(pub usize);

/// Two lobes material: a fuzzy mirror and a diffuse base.
///
/// Metals are all mirror, tinted by their base color. Dielectrics keep a small
/// mirror share, vanishing as they get rough.
#[derive(Debug, Clone, Copy)]
pub struct Principled {
    pub base_color: Rgb,
    pub metallic: f32,
    pub roughness: f32,
}

impl Principled {
    const DIELECTRIC_SPECULAR: f32 = 0.08;

    /// Probability of a glossy bounce
    pub fn glossy_weight(&self) -> f32 {
        let metallic = self.metallic.clamp(0.0, 1.0);
        let smoothness = 1.0 - self.roughness.clamp(0.0, 1.0);
        metallic + (1.0 - metallic) * Self::DIELECTRIC_SPECULAR * smoothness
    }

    fn glossy_albedo(&self) -> Rgb {
        Rgb::WHITE.lerp(self.base_color, self.metallic.clamp(0.0, 1.0))
    }
}

impl From<&MaterialSpec> for Principled {
    fn from(spec: &MaterialSpec) -> Self {
        let [r, g, b, _] = spec.base_color;
        Self {
            base_color: Rgb([r, g, b]),
            metallic: spec.metallic,
            roughness: spec.roughness,
        }
    }
}

impl Material for Principled {
    fn scatter(&self, ray: Ray, record: &local_info::Full, rng: &mut Rng) -> Scattered {
        let facing_normal = -record.normal.same_direction(ray.direction);

        if rng.gen::<f32>() < self.glossy_weight() {
            let reflected = ray.direction.reflect(facing_normal);
            let fuzziness = self.roughness * UniformUnitBall3.sample(rng);
            let direction = (reflected + fuzziness)
                .into_non_zero(0.01)
                .unwrap_or(reflected);

            // Fuzz may push the ray under the surface: absorbed
            let ray_out =
                (direction.dot(facing_normal) > 0.0).then(|| Ray::new(record.pos, direction));
            Scattered {
                albedo: self.glossy_albedo(),
                ray_out,
                lobe: Lobe::Glossy,
            }
        } else {
            let bounce_noise = UniformUnitBall3.sample(rng);
            let direction = (facing_normal + bounce_noise)
                .into_non_zero(0.01)
                .unwrap_or(facing_normal);

            Scattered {
                albedo: self.base_color,
                ray_out: Some(Ray::new(record.pos, direction)),
                lobe: Lobe::Diffuse,
            }
        }
    }

    fn diffuse(&self) -> Option<Rgb> {
        let weight = 1.0 - self.glossy_weight();
        (weight > 0.0).then(|| weight * self.base_color)
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use crate::{
        material::{MaterialClass, MaterialSpec},
        math::point::Point,
        ray::Ray,
        shape::local_info,
    };

    use super::*;

    fn hit() -> local_info::Full {
        local_info::Full {
            pos: Point::ORIGIN,
            normal: Vec3::Z,
            material: MaterialId(0),
        }
    }

    #[test]
    fn mirror_metal() {
        let metal = Principled {
            roughness: 0.0,
            ..Principled::from(&MaterialSpec::of_class(MaterialClass::Metallic, [0.5, 0.5, 0.5]))
        };
        assert_eq!(metal.glossy_weight(), 1.0);
        assert!(metal.diffuse().is_none());

        let mut rng = crate::seed_rng(51);
        let ray = Ray::new(Point::new(-1.0, 0.0, 1.0), Vec3::new(1.0, 0.0, -1.0));
        let scattered = metal.scatter(ray, &hit(), &mut rng);
        assert_eq!(scattered.lobe, Lobe::Glossy);
        let out = scattered.ray_out.unwrap();
        assert!(out.direction.distance(Vec3::new(1.0, 0.0, 1.0).normalize()) < 1e-5);
    }

    #[test]
    fn rubber_is_mostly_diffuse() {
        let spec = MaterialSpec::of_class(MaterialClass::Rubber, [0.2, 0.4, 0.6]);
        let rubber = Principled::from(&spec);
        let diffuse = rubber.diffuse().unwrap();
        assert!(diffuse.0[2] > 0.59 && diffuse.0[2] <= 0.6);

        let mut rng = crate::seed_rng(52);
        let ray = Ray::new(Point::new(0.0, 0.0, 1.0), Vec3::NEG_Z);
        let mut diffuse_bounces = 0;
        for _ in 0..500 {
            let scattered = rubber.scatter(ray, &hit(), &mut rng);
            if scattered.lobe == Lobe::Diffuse {
                diffuse_bounces += 1;
                assert!(scattered.ray_out.unwrap().direction.z >= 0.0);
            }
        }
        assert!(diffuse_bounces > 480);
    }
}
