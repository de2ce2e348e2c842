use std::path::{Path, PathBuf};

use scenegen::{
    composer::SceneComposer,
    output::{ImageWriter, OutputFormat},
    render::RenderBackend,
    Rng,
};

use crate::progress::PercentBar;

/// Where the images of one dataset go: `<root>/<type>/<version>/images/`
#[derive(Debug, Clone)]
pub struct DatasetLayout {
    images_dir: PathBuf,
    format: OutputFormat,
}

impl DatasetLayout {
    pub fn new(root: &Path, dataset_type: &str, version: &str, format: OutputFormat) -> Self {
        Self {
            images_dir: root.join(dataset_type).join(version).join("images"),
            format,
        }
    }

    pub fn images_dir(&self) -> &Path {
        &self.images_dir
    }

    pub fn image_path(&self, index: usize) -> PathBuf {
        self.images_dir
            .join(format!("image_{index}.{}", self.format.extension()))
    }
}

/// Totals over a whole run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DatasetSummary {
    pub images: usize,
    pub target_objects: usize,
    pub placed_objects: usize,
}

/// Compose, render and write `count` images, one after the other.
///
/// The first failing scene stops the run.
pub fn generate<B, W>(
    composer: &mut SceneComposer,
    backend: &mut B,
    writer: &W,
    layout: &DatasetLayout,
    count: usize,
    rng: &mut Rng,
    show_progress: bool,
) -> scenegen::Result<DatasetSummary>
where
    B: RenderBackend + ?Sized,
    W: ImageWriter + ?Sized,
{
    log::info!(
        "generating {count} images into {}",
        layout.images_dir().display()
    );

    let mut summary = DatasetSummary::default();
    for i in 0..count {
        let path = layout.image_path(i);
        let report = composer.render_scene(backend, writer, &path, rng)?;
        log::info!(
            "image {i}: {} objects wanted, {} placed, {} lights",
            report.target_objects,
            report.placed_objects,
            report.lights
        );
        if report.exhausted_slots > 0 {
            log::debug!(
                "image {i}: {} slots exhausted after {} rejections",
                report.exhausted_slots,
                report.rejected_candidates
            );
        }

        summary.images += 1;
        summary.target_objects += report.target_objects;
        summary.placed_objects += report.placed_objects;

        if show_progress {
            print!("\r{}", PercentBar::new(i + 1, count));
        }
    }
    if show_progress {
        println!();
    }

    Ok(summary)
}
