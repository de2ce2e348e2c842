use rayon::prelude::*;

use crate::{
    camera::{PixelCoord, ViewportCoord},
    color::Rgb,
    counter,
    output::PixelBuffer,
    scene::Scene,
    PixelSeed, Result,
};

use super::{
    integrator::{BounceBudget, Integrator, PathIntegrator},
    Ctx, RenderBackend, RenderOptions, RenderOutput, World, COLORS, DEPTH,
};

/// Depth at which the depth channel reaches mid gray
const DEPTH_SCALE: f32 = 10.0;

struct PixelResult {
    color: Rgb,
    z: f32,
}

/// CPU path tracer, rendering rows in parallel.
///
/// Buffers are stored bottom row first.
#[derive(Debug, Default, Clone, Copy)]
pub struct PathTracer {
    integrator: PathIntegrator,
}

impl PathTracer {
    fn render_pixel(
        &self,
        world: &World,
        options: &RenderOptions,
        seed: u64,
        x: u32,
        y: u32,
    ) -> PixelResult {
        let mut ctx = Ctx {
            rng: PixelSeed {
                render_seed: seed,
                x,
                y,
            }
            .into_rng(),
            world,
        };
        let budget = BounceBudget {
            diffuse: options.diffuse_bounces,
            glossy: options.glossy_bounces,
        };

        let sample_count = options.sample_count.max(1);
        let mut color = Rgb::BLACK;
        let mut z = 0.0;
        let mut z_hits = 0;
        for _ in 0..sample_count {
            let coords = ViewportCoord::from_pixel_coord(
                &world.camera,
                PixelCoord::sample_around(&mut ctx.rng, x, y),
            );
            let ray = world.camera.ray(coords);
            let result = self.integrator.ray_cast(&mut ctx, ray, budget);
            counter!("Samples");

            color = color + result.color;
            if result.z.is_finite() {
                z += result.z;
                z_hits += 1;
            }
        }

        PixelResult {
            color: (1.0 / sample_count as f32) * color,
            z: if z_hits > 0 { z / z_hits as f32 } else { f32::INFINITY },
        }
    }
}

/// Near is dark, far is bright, the sky is white
fn depth_to_gray(z: f32) -> [u8; 3] {
    let level = if z.is_finite() {
        1.0 - f32::exp(-z.max(0.0) * std::f32::consts::LN_2 / DEPTH_SCALE)
    } else {
        1.0
    };
    [(255.0 * level + 0.5) as u8; 3]
}

impl RenderBackend for PathTracer {
    fn render(
        &mut self,
        scene: &Scene,
        options: &RenderOptions,
        seed: u64,
    ) -> Result<RenderOutput> {
        let world = World::from_scene(scene, options)?;
        let (width, height) = (world.camera.width, world.camera.height);
        log::debug!(
            "Rendering {width}x{height}, {} objects, {} lights, {} spp",
            world.objects.len(),
            world.lights.len(),
            options.sample_count
        );

        let rows: Vec<Vec<PixelResult>> = (0..height)
            .into_par_iter()
            .map(|y| {
                (0..width)
                    .map(|x| self.render_pixel(&world, options, seed, x, y))
                    .collect()
            })
            .collect();

        let mut colors = PixelBuffer::new(width, height);
        let mut depth = PixelBuffer::new(width, height);
        for (y, row) in (0..height).zip(rows) {
            let stored_y = height - 1 - y;
            for (x, pixel) in (0..width).zip(row) {
                colors.put(x, stored_y, pixel.color.to_srgb_bytes());
                depth.put(x, stored_y, depth_to_gray(pixel.z));
            }
        }

        let mut output = RenderOutput::default();
        output.insert(COLORS, vec![colors]);
        output.insert(DEPTH, vec![depth]);
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        camera::{CameraIntrinsics, CameraPose},
        color::Rgb,
        math::point::Point,
        render::{RenderBackend, RenderOptions, COLORS, DEPTH},
        scene::{GroundConfig, GroundPlane, Scene},
        Error,
    };

    use super::{depth_to_gray, PathTracer};

    fn options() -> RenderOptions {
        RenderOptions {
            sample_count: 2,
            glossy_bounces: 1,
            diffuse_bounces: 1,
            ..Default::default()
        }
    }

    /// Almost horizontal view: sky on the upper half, ground on the lower one
    fn horizon_scene() -> Scene {
        let mut scene = Scene::new();
        scene.ground = Some(GroundPlane::new(&GroundConfig::default()));
        scene.intrinsics = Some(CameraIntrinsics {
            width: 12,
            height: 8,
            ..Default::default()
        });
        scene.camera = Some(CameraPose::looking_at_origin(Point::new(0.0, -6.0, 0.5)));
        scene
    }

    #[test]
    fn rows_are_stored_bottom_up() {
        let output = PathTracer::default()
            .render(&horizon_scene(), &options(), 7)
            .unwrap();
        let colors = output.first_frame(COLORS).unwrap();
        assert_eq!((colors.width(), colors.height()), (12, 8));

        let sky = Rgb::gray(0.73).to_srgb_bytes();
        // Last stored row is the top of the image
        assert_eq!(colors.get(6, 7), Some(sky));
        // First stored row is the ground, lit by a darker bounce
        let ground = colors.get(6, 0).unwrap();
        assert!(ground[0] < sky[0], "{ground:?} vs {sky:?}");

        let depth = output.first_frame(DEPTH).unwrap();
        assert_eq!(depth.get(6, 7), Some([255; 3]));
        assert!(depth.get(6, 0).unwrap()[0] < 255);
    }

    #[test]
    fn same_seed_same_image() {
        let scene = horizon_scene();
        let a = PathTracer::default().render(&scene, &options(), 3).unwrap();
        let b = PathTracer::default().render(&scene, &options(), 3).unwrap();
        assert_eq!(a.first_frame(COLORS).unwrap(), b.first_frame(COLORS).unwrap());
    }

    #[test]
    fn empty_scene_fails() {
        let result = PathTracer::default().render(&Scene::new(), &options(), 0);
        assert!(matches!(result, Err(Error::RenderingBackend(_))));
    }

    #[test]
    fn depth_levels() {
        assert_eq!(depth_to_gray(0.0), [0; 3]);
        assert_eq!(depth_to_gray(f32::INFINITY), [255; 3]);
        // Mid gray at the depth scale
        assert!((127..=128).contains(&depth_to_gray(10.0)[0]));
    }
}
