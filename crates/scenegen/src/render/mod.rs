//! The rendering collaborator: turns a composed [Scene] into pixel buffers.

pub mod integrator;
pub mod pathtracer;
pub mod world;

pub use pathtracer::PathTracer;
pub use world::World;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{
    color::Rgb,
    output::{OutputFormat, PixelBuffer},
    scene::Scene,
    Error, Result, Rng,
};

/// Channel holding the rendered image
pub const COLORS: &str = "colors";
/// Channel holding the distance to the first hit, as gray levels
pub const DEPTH: &str = "depth";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Samples per pixel
    pub sample_count: u32,
    pub glossy_bounces: u32,
    pub diffuse_bounces: u32,
    pub background_color: Rgb,
    pub background_strength: f32,
    pub output_format: OutputFormat,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            sample_count: 1024,
            glossy_bounces: 8,
            diffuse_bounces: 8,
            background_color: Rgb::gray(0.73),
            background_strength: 1.0,
            output_format: OutputFormat::Png,
        }
    }
}

impl RenderOptions {
    pub fn background(&self) -> Rgb {
        self.background_strength * self.background_color
    }
}

/// Buffers keyed by channel name, each one a list of frames
#[derive(Debug, Default)]
pub struct RenderOutput {
    pub buffers: HashMap<String, Vec<PixelBuffer>>,
}

impl RenderOutput {
    pub fn insert(&mut self, channel: &str, frames: Vec<PixelBuffer>) {
        self.buffers.insert(channel.to_owned(), frames);
    }

    /// Only the first frame of a channel is ever used
    pub fn first_frame(&self, channel: &str) -> Result<&PixelBuffer> {
        self.buffers
            .get(channel)
            .and_then(|frames| frames.first())
            .ok_or_else(|| Error::MissingChannel(channel.to_owned()))
    }
}

pub trait RenderBackend {
    /// Render `scene`. The output must only depend on the scene, the options and the seed.
    fn render(&mut self, scene: &Scene, options: &RenderOptions, seed: u64) -> Result<RenderOutput>;
}

/// Per pixel rendering state
pub struct Ctx<'a> {
    pub rng: Rng,
    pub world: &'a World,
}
