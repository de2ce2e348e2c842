use std::f32::consts::{FRAC_1_PI, PI};

use rand::prelude::Distribution;

use crate::{
    color::Rgb,
    light::{Light, LightKind},
    material::Lobe,
    math::{distributions::UniformUnitBall3, point::Point, vec::Vec3},
    ray::Ray,
    shape::{local_info, IntersectionResult, Shape},
};

use super::Ctx;

/// Full cone angle of spot lights
const SPOT_SIZE: f32 = 45.0 * PI / 180.0;
/// Fraction of the cone over which spot lights fade out
const SPOT_BLEND: f32 = 0.15;
/// Offset of secondary rays, to avoid hitting the surface they leave
const RAY_EPSILON: f32 = 1e-4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BounceBudget {
    pub diffuse: u32,
    pub glossy: u32,
}

impl BounceBudget {
    /// Remaining budget after one more bounce of `lobe`, `None` if spent
    pub fn spend(self, lobe: Lobe) -> Option<Self> {
        match lobe {
            Lobe::Diffuse => self.diffuse.checked_sub(1).map(|diffuse| Self { diffuse, ..self }),
            Lobe::Glossy => self.glossy.checked_sub(1).map(|glossy| Self { glossy, ..self }),
        }
    }
}

pub struct RayResult {
    pub color: Rgb,
    /// Distance to the first hit, infinite for the sky
    pub z: f32,
}

pub trait Integrator: Send + Sync {
    fn ray_cast(&self, ctx: &mut Ctx, ray: Ray, budget: BounceBudget) -> RayResult;

    fn sky_ray(&self, ctx: &mut Ctx, _ray: Ray) -> RayResult {
        RayResult {
            color: ctx.world.background,
            z: f32::INFINITY,
        }
    }
}

/// Unidirectional path tracing, gathering light from the scene lights at each diffuse hit
#[derive(Debug, Default, Clone, Copy)]
pub struct PathIntegrator;

impl Integrator for PathIntegrator {
    fn ray_cast(&self, ctx: &mut Ctx, ray: Ray, budget: BounceBudget) -> RayResult {
        let ray = ray.offset(RAY_EPSILON);

        let hit = ctx.world.objects.intersection_full(ray);
        let IntersectionResult::Intersection(record) = hit else {
            return self.sky_ray(ctx, ray);
        };
        let world = ctx.world;
        let material = &world.materials[record.local_info.material.0];

        let direct = match material.diffuse() {
            Some(diffuse) => diffuse * gather_lights(ctx, &record.local_info),
            None => Rgb::BLACK,
        };

        let scattered = material.scatter(ray, &record.local_info, &mut ctx.rng);
        let indirect = match (scattered.ray_out, budget.spend(scattered.lobe)) {
            (Some(ray_out), Some(budget)) => {
                scattered.albedo * self.ray_cast(ctx, ray_out, budget).color
            }
            _ => Rgb::BLACK,
        };

        RayResult {
            color: direct + indirect,
            z: record.t,
        }
    }
}

/// Irradiance from all the lights at a point, divided by π: multiply by a
/// diffuse reflectance to get the reflected radiance
fn gather_lights(ctx: &mut Ctx, hit: &local_info::Full) -> Rgb {
    let world = ctx.world;
    let mut total = 0.0;
    for light in world.lights.iter() {
        let Some((direction, distance, irradiance)) = incoming(light, hit.pos, ctx) else {
            continue;
        };
        let cos = hit.normal.dot(direction);
        if cos <= 0.0 {
            continue;
        }

        let shadow_ray = Ray::shadow(hit.pos, direction, distance, RAY_EPSILON);
        if world.objects.intersect_bare(shadow_ray).is_intersection() {
            continue;
        }
        total += irradiance * cos;
    }
    Rgb::gray(total * FRAC_1_PI)
}

/// Direction toward the light, distance to it and irradiance it gives at `pos`
fn incoming(light: &Light, pos: Point, ctx: &mut Ctx) -> Option<(Vec3, f32, f32)> {
    if light.kind == LightKind::Sun {
        // The sun is far away in the direction of its position
        return Some((light.position.vec().try_normalize()?, f32::INFINITY, light.energy));
    }

    // Soft shadows: emit from anywhere in the light radius
    let emitter = match light.radius {
        Some(radius) if radius > 0.0 => {
            light.position + radius * UniformUnitBall3.sample(&mut ctx.rng)
        }
        _ => light.position,
    };
    let to_light = emitter - pos;
    let distance = to_light.length();
    let direction = to_light.try_normalize()?;

    let mut intensity = light.energy / (4.0 * PI);
    if light.kind == LightKind::Spot {
        // Spots aim at the scene origin
        let axis = (Point::ORIGIN - light.position).try_normalize()?;
        intensity *= spot_falloff(axis.dot(-direction));
    }

    Some((direction, distance, intensity / (distance * distance)))
}

fn spot_falloff(cos_angle: f32) -> f32 {
    let half_angle = SPOT_SIZE / 2.0;
    let angle = cos_angle.clamp(-1.0, 1.0).acos();
    let t = ((half_angle - angle) / (SPOT_BLEND * half_angle)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}
