//! Scene assembly: one call builds a whole scene, renders it and writes the image.

use std::{path::Path, sync::Arc};

use rand::Rng;

use crate::{
    assets::AssetCatalog,
    camera::CameraPose,
    config::SceneConfig,
    light::sample_light,
    material::MaterialAssigner,
    output::{flip_vertical, swap_red_blue, ImageWriter},
    placement::PlacementEngine,
    render::{RenderBackend, COLORS},
    scene::{GroundPlane, Scene},
    utils::timer::timed_scope_log,
    Result,
};

/// What happened while composing one scene
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CompositionReport {
    /// How many objects the scene aimed for
    pub target_objects: usize,
    pub placed_objects: usize,
    pub rejected_candidates: u32,
    pub exhausted_slots: usize,
    pub lights: usize,
}

pub struct SceneComposer {
    config: SceneConfig,
    catalog: Arc<AssetCatalog>,
    materials: MaterialAssigner,
    scene: Scene,
}

impl SceneComposer {
    pub fn new(config: SceneConfig, catalog: Arc<AssetCatalog>) -> Result<Self> {
        config.validate()?;
        if catalog.is_empty() {
            log::info!("Asset catalog is empty, scenes will be made of primitives");
        }
        Ok(Self {
            materials: MaterialAssigner::new(&config.material_source),
            config,
            catalog,
            scene: Scene::new(),
        })
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    /// The last composed scene
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Replace the current scene by a freshly drawn one
    pub fn compose<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<CompositionReport> {
        self.scene.clear();

        self.scene.intrinsics = Some(self.config.camera.intrinsics);
        self.scene.camera = Some(CameraPose::sample(&self.config.camera.shell, rng));
        self.scene.ground = Some(GroundPlane::new(&self.config.ground));

        let target = self.config.placement.draw_target(rng);
        let engine = PlacementEngine::new(&self.config.placement);
        let materials = &mut self.materials;
        let placement = engine.place(
            &mut self.scene.objects,
            &self.catalog,
            target,
            rng,
            |rng| materials.assign(rng),
        )?;
        log::info!(
            "Placed {} objects out of {} ({} candidates rejected)",
            placement.accepted,
            placement.target,
            placement.rejected_candidates
        );

        let kind = self.config.light_kind;
        let params = self.config.lights.get(kind);
        self.scene.lights = (0..self.config.light_count)
            .map(|_| sample_light(kind, params, rng))
            .collect();
        log::debug!("Added {} {kind} lights", self.scene.lights.len());

        Ok(CompositionReport {
            target_objects: placement.target,
            placed_objects: placement.accepted,
            rejected_candidates: placement.rejected_candidates,
            exhausted_slots: placement.exhausted_slots,
            lights: self.scene.lights.len(),
        })
    }

    /// Compose a scene, render it and write the image at `path`.
    ///
    /// Nothing is written if the rendering fails.
    pub fn render_scene<R, B, W>(
        &mut self,
        backend: &mut B,
        writer: &W,
        path: &Path,
        rng: &mut R,
    ) -> Result<CompositionReport>
    where
        R: Rng + ?Sized,
        B: RenderBackend + ?Sized,
        W: ImageWriter + ?Sized,
    {
        let report = self.compose(rng)?;

        let render_seed: u64 = rng.gen();
        let output = timed_scope_log("Render", || {
            backend.render(&self.scene, &self.config.render, render_seed)
        })
        .res?;

        let mut image = output.first_frame(COLORS)?.clone();
        flip_vertical(&mut image);
        swap_red_blue(&mut image);
        writer.write(&image, self.config.render.output_format, path)?;

        Ok(report)
    }
}
