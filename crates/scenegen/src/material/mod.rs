//! Material assignment: what each placed object and the ground are made of.

mod library;
mod principled;

pub use library::MaterialLibrary;
pub use principled::{Lobe, Material, MaterialId, Principled, Scattered};

use std::path::PathBuf;

use derive_more::Display;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{scene::GroundConfig, Result};

/// The two looks an object can have
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
pub enum MaterialClass {
    Metallic,
    Rubber,
}

impl MaterialClass {
    pub const ALL: [MaterialClass; 2] = [MaterialClass::Metallic, MaterialClass::Rubber];

    /// Fair coin
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        if rng.gen_bool(0.5) {
            MaterialClass::Metallic
        } else {
            MaterialClass::Rubber
        }
    }

    pub fn metallic(self) -> f32 {
        match self {
            MaterialClass::Metallic => 1.0,
            MaterialClass::Rubber => 0.0,
        }
    }

    pub fn roughness(self) -> f32 {
        match self {
            MaterialClass::Metallic => 0.1,
            MaterialClass::Rubber => 0.9,
        }
    }

    /// Name of the material, and stem of the library file defining it
    pub fn name(self) -> &'static str {
        match self {
            MaterialClass::Metallic => "Metallic",
            MaterialClass::Rubber => "Rubber",
        }
    }
}

/// Principled-style surface description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialSpec {
    pub name: String,
    /// `None` for materials outside of the two object classes, e.g. the ground
    pub class: Option<MaterialClass>,
    pub metallic: f32,
    pub roughness: f32,
    /// RGBA, linear
    pub base_color: [f32; 4],
}

impl MaterialSpec {
    pub fn of_class(class: MaterialClass, rgb: [f32; 3]) -> Self {
        let [r, g, b] = rgb;
        Self {
            name: class.name().to_owned(),
            class: Some(class),
            metallic: class.metallic(),
            roughness: class.roughness(),
            base_color: [r, g, b, 1.0],
        }
    }

    /// The fixed matte material of the ground plane
    pub fn ground(config: &GroundConfig) -> Self {
        let [r, g, b] = config.color.0;
        Self {
            name: "Ground".to_owned(),
            class: None,
            metallic: 0.0,
            roughness: config.roughness,
            base_color: [r, g, b, 1.0],
        }
    }

    /// Metallic or rubber with equal odds, random base color in [0, 1]³
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let class = MaterialClass::random(rng);
        Self::of_class(class, [rng.gen(), rng.gen(), rng.gen()])
    }
}

/// Where object materials come from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MaterialSource {
    /// Drawn from the built-in policy, never fails
    #[default]
    Generated,
    /// Looked up by name in `Metallic.mtl` / `Rubber.mtl` under `dir`
    Library { dir: PathBuf },
}

/// Gives a material to each accepted object
#[derive(Debug)]
pub enum MaterialAssigner {
    Generated,
    Library(MaterialLibrary),
}

impl MaterialAssigner {
    pub fn new(source: &MaterialSource) -> Self {
        match source {
            MaterialSource::Generated => MaterialAssigner::Generated,
            MaterialSource::Library { dir } => MaterialAssigner::Library(MaterialLibrary::new(dir)),
        }
    }

    pub fn assign<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<MaterialSpec> {
        match self {
            MaterialAssigner::Generated => Ok(MaterialSpec::random(rng)),
            MaterialAssigner::Library(library) => library.pick(MaterialClass::random(rng)),
        }
    }
}
