use core::fmt::Display;
use std::path::Path;

use clap::ValueEnum;
use scenegen::{light::LightKind, material::MaterialSource};

#[derive(Debug, Default, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum AvailableLight {
    #[default]
    Point,
    Sun,
    Area,
    Spot,
}

impl From<AvailableLight> for LightKind {
    fn from(val: AvailableLight) -> Self {
        match val {
            AvailableLight::Point => LightKind::Point,
            AvailableLight::Sun => LightKind::Sun,
            AvailableLight::Area => LightKind::Area,
            AvailableLight::Spot => LightKind::Spot,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum AvailableMaterialSource {
    /// Random metallic or rubber materials
    #[default]
    Generated,
    /// Named materials from Metallic.mtl and Rubber.mtl
    Library,
}

impl AvailableMaterialSource {
    pub fn into_source(self, materials_dir: &Path) -> MaterialSource {
        match self {
            AvailableMaterialSource::Generated => MaterialSource::Generated,
            AvailableMaterialSource::Library => MaterialSource::Library {
                dir: materials_dir.to_owned(),
            },
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl std::str::FromStr for Dimensions {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((a, b)) = s.split_once('x') else {
            return Err(anyhow::anyhow!("Incorrect format, expected `width`x`height`"));
        };
        let width: u32 = a.trim().parse()?;
        let height: u32 = b.trim().parse()?;
        if width == 0 || height == 0 {
            return Err(anyhow::anyhow!("Dimensions must be positive, got {s}"));
        }

        Ok(Dimensions { width, height })
    }
}

impl Display for Dimensions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{}x{}", self.width, self.height))
    }
}
