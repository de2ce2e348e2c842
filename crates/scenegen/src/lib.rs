//! Procedural composition of synthetic scenes for dataset generation.
//!
//! A scene is a ground plane, a random number of non-overlapping objects,
//! one camera looking at the origin and a few lights, all drawn from a
//! reproducible distribution. The composed scene is handed to a
//! [render::RenderBackend] and the resulting image to an [output::ImageWriter].

pub mod assets;
pub mod camera;
pub mod color;
pub mod composer;
pub mod config;
pub mod error;
pub mod light;
pub mod material;
pub mod math;
pub mod output;
pub mod placement;
pub mod ray;
pub mod render;
pub mod scene;
pub mod selector;
pub mod shape;
pub mod utils;

pub use error::{Error, Result};
pub use rand_xoshiro::Xoshiro256StarStar as Rng;

/// Build the generator used for a whole dataset.
///
/// It is seeded once and its stream keeps going from one scene to the next.
pub fn seed_rng(seed: u64) -> Rng {
    <Rng as rand::SeedableRng>::seed_from_u64(seed)
}

/// Identifies the random stream of one pixel of one render.
#[derive(Debug, Copy, Clone, Hash)]
pub struct PixelSeed {
    pub render_seed: u64,
    pub x: u32,
    pub y: u32,
}

impl PixelSeed {
    pub fn into_rng(self) -> Rng {
        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        std::hash::Hash::hash(&self, &mut hasher);
        seed_rng(std::hash::Hasher::finish(&hasher))
    }
}
