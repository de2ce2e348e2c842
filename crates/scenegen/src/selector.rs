use rand::{seq::SliceRandom, Rng};

use crate::{
    assets::AssetCatalog,
    counter,
    scene::{ShapeKind, SizeClass},
    warn_once,
};

/// What to place next, and how big
#[derive(Debug, Clone)]
pub struct Selection {
    pub shape: ShapeKind,
    pub size: SizeClass,
    pub scale: f32,
}

/// Picks object identities: a loaded asset when there is any, else a primitive
#[derive(Debug, Clone, Copy)]
pub struct ObjectSelector {
    /// Scale of each size class
    pub scales: [f32; 3],
}

impl Default for ObjectSelector {
    fn default() -> Self {
        Self {
            scales: SizeClass::DEFAULT_SCALES,
        }
    }
}

impl ObjectSelector {
    pub fn new(scales: [f32; 3]) -> Self {
        Self { scales }
    }

    pub fn select<R: Rng + ?Sized>(&self, catalog: &AssetCatalog, rng: &mut R) -> Selection {
        let shape = match catalog.choose(rng) {
            Some(mesh) => ShapeKind::Asset(mesh),
            None => {
                warn_once!("No asset in the catalog, placing primitives instead");
                counter!("Primitive fallbacks");
                ShapeKind::PRIMITIVES
                    .choose(rng)
                    .cloned()
                    .unwrap_or(ShapeKind::Cube)
            }
        };
        let size = SizeClass::random(rng);
        log::trace!("Selected {} of size {}", shape.name(), size.index());

        Selection {
            shape,
            size,
            scale: size.pick(&self.scales),
        }
    }
}
