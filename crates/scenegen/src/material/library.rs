use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use crate::{Error, Result};

use super::{MaterialClass, MaterialSpec};

/// Materials read from `Metallic.mtl` and `Rubber.mtl`.
///
/// Each file is parsed the first time its class is drawn, then kept.
#[derive(Debug)]
pub struct MaterialLibrary {
    dir: PathBuf,
    loaded: HashMap<MaterialClass, Vec<tobj::Material>>,
}

impl MaterialLibrary {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_owned(),
            loaded: HashMap::new(),
        }
    }

    pub fn file_of(&self, class: MaterialClass) -> PathBuf {
        self.dir.join(format!("{}.mtl", class.name()))
    }

    /// Find the material named after `class` in the file of `class`
    pub fn pick(&mut self, class: MaterialClass) -> Result<MaterialSpec> {
        let file = self.file_of(class);
        if !self.loaded.contains_key(&class) {
            let (materials, _) = tobj::load_mtl(&file).map_err(|err| Error::AssetLoad {
                path: file.clone(),
                reason: err.to_string(),
            })?;
            log::debug!("Loaded {} materials from {}", materials.len(), file.display());
            self.loaded.insert(class, materials);
        }

        self.loaded
            .get(&class)
            .and_then(|materials| materials.iter().find(|m| m.name == class.name()))
            .map(|material| spec_from_mtl(class, material))
            .ok_or_else(|| Error::MissingExpectedMaterial {
                file,
                name: class.name().to_owned(),
            })
    }
}

fn spec_from_mtl(class: MaterialClass, material: &tobj::Material) -> MaterialSpec {
    let param = |key: &str| {
        material
            .unknown_param
            .get(key)
            .and_then(|value| value.trim().parse::<f32>().ok())
    };
    let [r, g, b] = material.diffuse;
    // Files without a `d` statement leave dissolve at 0
    let alpha = if material.dissolve > 0.0 { material.dissolve } else { 1.0 };

    MaterialSpec {
        name: material.name.clone(),
        class: Some(class),
        metallic: param("Pm").unwrap_or_else(|| class.metallic()),
        roughness: param("Pr").unwrap_or_else(|| class.roughness()),
        base_color: [r, g, b, alpha],
    }
}
