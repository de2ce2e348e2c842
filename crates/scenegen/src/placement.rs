//! Rejection sampling of non overlapping objects on the ground.
//!
//! Each slot gets up to `max_tries_per_object` candidates. A candidate lives
//! in the scene arena while it is tested: accepted, it stays there, rejected,
//! its slot is freed at once. A slot whose tries are all rejected is left
//! empty.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::{distributions::Uniform, prelude::Distribution, Rng};
use serde::{Deserialize, Serialize};
use slotmap::SlotMap;

use crate::{
    assets::AssetCatalog,
    counter,
    material::MaterialSpec,
    scene::{ObjectKey, PlacedObject, SizeClass},
    selector::ObjectSelector,
    Error, Result,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    /// Minimum free gap between the separation disks of two objects
    pub min_distance: f32,
    /// The target object count is drawn in [1, max_objects]
    pub max_objects: usize,
    pub max_tries_per_object: u32,
    /// Positions are drawn in [-half_extent, half_extent]²
    pub half_extent: f32,
    /// Scale of each size class
    pub size_scales: [f32; 3],
    /// Radius of the separation disk of each size class
    pub separation_radii: [f32; 3],
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            min_distance: 0.1,
            max_objects: 10,
            max_tries_per_object: 10,
            half_extent: 3.0,
            size_scales: SizeClass::DEFAULT_SCALES,
            separation_radii: [1.0, 2.0, 3.0],
        }
    }
}

impl PlacementConfig {
    pub fn validate(&self) -> Result<()> {
        let positive = |v: &f32| v.is_finite() && *v > 0.0;
        if !(self.min_distance.is_finite() && self.min_distance >= 0.0) {
            return Err(Error::Config(format!(
                "min_distance must be >= 0, got {}",
                self.min_distance
            )));
        }
        if self.max_objects == 0 {
            return Err(Error::Config("max_objects must be at least 1".to_owned()));
        }
        if self.max_tries_per_object == 0 {
            return Err(Error::Config("max_tries_per_object must be at least 1".to_owned()));
        }
        if !positive(&self.half_extent) {
            return Err(Error::Config(format!("half_extent must be > 0, got {}", self.half_extent)));
        }
        if !self.size_scales.iter().all(positive) {
            return Err(Error::Config(format!("invalid size scales {:?}", self.size_scales)));
        }
        if !self.separation_radii.iter().all(|r| r.is_finite() && *r >= 0.0) {
            return Err(Error::Config(format!(
                "invalid separation radii {:?}",
                self.separation_radii
            )));
        }
        Ok(())
    }

    /// Draw how many objects a scene aims for
    pub fn draw_target<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        rng.gen_range(1..=self.max_objects.max(1))
    }

    /// Whether two objects are far enough apart
    pub fn separated(&self, a: &PlacedObject, b: &PlacedObject) -> bool {
        let radii = &self.separation_radii;
        a.planar_distance(b) - a.size.pick(radii) - b.size.pick(radii) >= self.min_distance
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PlacementReport {
    pub target: usize,
    pub accepted: usize,
    pub rejected_candidates: u32,
    pub exhausted_slots: usize,
}

/// An object under test, occupying a slot of the arena.
///
/// Dropping it frees the slot unless it was promoted.
struct Candidate<'a> {
    objects: &'a mut SlotMap<ObjectKey, PlacedObject>,
    key: Option<ObjectKey>,
}

impl<'a> Candidate<'a> {
    fn insert(objects: &'a mut SlotMap<ObjectKey, PlacedObject>, object: PlacedObject) -> Self {
        let key = objects.insert(object);
        Self {
            objects,
            key: Some(key),
        }
    }

    /// True if the candidate is too close to any object already in the arena
    fn conflicts(&self, config: &PlacementConfig) -> bool {
        let Some(candidate) = self.key.and_then(|key| self.objects.get(key)) else {
            return false;
        };
        self.objects
            .iter()
            .filter(|(key, _)| Some(*key) != self.key)
            .any(|(_, other)| !config.separated(candidate, other))
    }

    fn set_material(&mut self, material: MaterialSpec) {
        if let Some(object) = self.key.and_then(|key| self.objects.get_mut(key)) {
            object.material = Some(material);
        }
    }

    /// Keep the object in the arena
    fn promote(mut self) -> Option<ObjectKey> {
        self.key.take()
    }
}

impl Drop for Candidate<'_> {
    fn drop(&mut self) {
        if let Some(key) = self.key.take() {
            self.objects.remove(key);
        }
    }
}

pub struct PlacementEngine<'a> {
    config: &'a PlacementConfig,
    selector: ObjectSelector,
}

impl<'a> PlacementEngine<'a> {
    pub fn new(config: &'a PlacementConfig) -> Self {
        Self {
            config,
            selector: ObjectSelector::new(config.size_scales),
        }
    }

    /// Fill up to `target` slots of `objects`.
    ///
    /// `assign` gives its material to each accepted object; its failure aborts
    /// the placement, the candidate being released.
    pub fn place<R, F>(
        &self,
        objects: &mut SlotMap<ObjectKey, PlacedObject>,
        catalog: &AssetCatalog,
        target: usize,
        rng: &mut R,
        mut assign: F,
    ) -> Result<PlacementReport>
    where
        R: Rng + ?Sized,
        F: FnMut(&mut R) -> Result<MaterialSpec>,
    {
        let position = Uniform::new_inclusive(-self.config.half_extent, self.config.half_extent);
        let mut report = PlacementReport {
            target,
            ..Default::default()
        };

        for slot in 0..target {
            let mut accepted = false;
            for _ in 0..self.config.max_tries_per_object {
                let selection = self.selector.select(catalog, rng);
                let xy = Vec2::new(position.sample(rng), position.sample(rng));
                let rotation_z = rng.gen_range(0.0..TAU);

                let object = PlacedObject::new(
                    selection.shape,
                    selection.size,
                    selection.scale,
                    xy,
                    rotation_z,
                );
                let mut candidate = Candidate::insert(objects, object);
                if candidate.conflicts(self.config) {
                    counter!("Placement rejections");
                    report.rejected_candidates += 1;
                    continue;
                }

                candidate.set_material(assign(rng)?);
                candidate.promote();
                accepted = true;
                break;
            }

            if accepted {
                report.accepted += 1;
            } else {
                counter!("Exhausted placement slots");
                log::trace!("Slot {slot} exhausted its tries");
                report.exhausted_slots += 1;
            }
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;
    use slotmap::SlotMap;

    use crate::{
        assets::{tests::tetrahedron, AssetCatalog},
        material::MaterialSpec,
        scene::{ObjectKey, PlacedObject, ShapeKind, SizeClass},
        Error,
    };

    use super::*;

    fn check_invariants(config: &PlacementConfig, objects: &SlotMap<ObjectKey, PlacedObject>) {
        let placed: Vec<_> = objects.values().collect();
        for (i, a) in placed.iter().enumerate() {
            assert!(a.material.is_some());
            assert_eq!(a.position.0.z, a.height / 2.0);
            assert!(a.position.0.x.abs() <= config.half_extent);
            assert!(a.position.0.y.abs() <= config.half_extent);
            assert!((0.0..std::f32::consts::TAU).contains(&a.rotation_z));
            for b in &placed[i + 1..] {
                assert!(config.separated(a, b), "{a:?} too close to {b:?}");
            }
        }
    }

    #[test]
    fn separation_rule() {
        let config = PlacementConfig::default();
        let object = |x: f32, size: SizeClass| {
            PlacedObject::new(ShapeKind::Cube, size, size.scale(), Vec2::new(x, 0.0), 0.0)
        };
        let small = object(0.0, SizeClass::Small);
        // Radii 1 and 2 plus the 0.1 gap
        assert!(config.separated(&small, &object(3.2, SizeClass::Medium)));
        assert!(!config.separated(&small, &object(3.05, SizeClass::Medium)));
        assert!(!config.separated(&object(0.0, SizeClass::Large), &small));
    }

    #[test]
    fn invariants_hold_across_seeds() {
        let config = PlacementConfig::default();
        let engine = PlacementEngine::new(&config);
        let catalog = AssetCatalog::from_meshes(vec![tetrahedron("tetra")]);

        for seed in 0..50 {
            let mut rng = crate::seed_rng(seed);
            let mut objects = SlotMap::with_key();
            let target = config.draw_target(&mut rng);
            assert!((1..=config.max_objects).contains(&target));

            let report = engine
                .place(&mut objects, &catalog, target, &mut rng, |rng| {
                    Ok(MaterialSpec::random(rng))
                })
                .unwrap();
            assert!(report.accepted <= report.target);
            assert_eq!(report.accepted + report.exhausted_slots, target);
            // Rejected candidates never linger in the arena
            assert_eq!(objects.len(), report.accepted);
            check_invariants(&config, &objects);
        }
    }

    #[test]
    fn single_primitive_with_empty_catalog() {
        let config = PlacementConfig {
            max_objects: 1,
            ..Default::default()
        };
        let engine = PlacementEngine::new(&config);
        let mut rng = crate::seed_rng(81);
        let mut objects = SlotMap::with_key();

        let target = config.draw_target(&mut rng);
        assert_eq!(target, 1);
        let report = engine
            .place(&mut objects, &AssetCatalog::empty(), target, &mut rng, |rng| {
                Ok(MaterialSpec::random(rng))
            })
            .unwrap();
        assert_eq!(report.accepted, 1);
        assert_eq!(report.rejected_candidates, 0);
        assert!(objects.values().all(|o| o.shape.is_primitive()));
    }

    #[test]
    fn two_large_objects() {
        // Every object separates like a size 3 one
        let config = PlacementConfig {
            size_scales: [1.5; 3],
            separation_radii: [3.0; 3],
            ..Default::default()
        };
        let engine = PlacementEngine::new(&config);

        for seed in 0..20 {
            let mut rng = crate::seed_rng(100 + seed);
            let mut objects = SlotMap::with_key();
            let report = engine
                .place(&mut objects, &AssetCatalog::empty(), 2, &mut rng, |rng| {
                    Ok(MaterialSpec::random(rng))
                })
                .unwrap();
            assert!((1..=2).contains(&report.accepted), "{report:?}");
            assert_eq!(objects.len(), report.accepted);
            check_invariants(&config, &objects);
        }
    }

    #[test]
    fn failing_material_releases_the_candidate() {
        let config = PlacementConfig::default();
        let engine = PlacementEngine::new(&config);
        let mut rng = crate::seed_rng(82);
        let mut objects = SlotMap::with_key();

        let result = engine.place(&mut objects, &AssetCatalog::empty(), 3, &mut rng, |_| {
            Err(Error::MissingExpectedMaterial {
                file: "Rubber.mtl".into(),
                name: "Rubber".to_owned(),
            })
        });
        assert!(matches!(result, Err(Error::MissingExpectedMaterial { .. })));
        assert!(objects.is_empty());
    }

    #[test]
    fn validation() {
        assert!(PlacementConfig::default().validate().is_ok());
        for bad in [
            PlacementConfig {
                max_objects: 0,
                ..Default::default()
            },
            PlacementConfig {
                max_tries_per_object: 0,
                ..Default::default()
            },
            PlacementConfig {
                min_distance: -1.0,
                ..Default::default()
            },
            PlacementConfig {
                half_extent: 0.0,
                ..Default::default()
            },
        ] {
            assert!(matches!(bad.validate(), Err(Error::Config(_))));
        }
    }
}
