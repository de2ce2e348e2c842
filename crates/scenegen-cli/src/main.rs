mod dataset;
mod progress;
mod utils;

use std::{path::PathBuf, sync::Arc};

use anyhow::Context;
use clap::Parser;
use dataset::DatasetLayout;
use scenegen::{
    assets::AssetCatalog, composer::SceneComposer, config::SceneConfig, output::FileImageWriter,
    render::PathTracer,
};
use utils::{AvailableLight, AvailableMaterialSource, Dimensions};

#[derive(Parser, Debug)]
pub struct Args {
    #[arg(short, long, default_value_t = 10)]
    /// Number of images to generate
    num_images: usize,

    #[arg(short, long)]
    /// JSON scene configuration. Missing fields keep their default value
    config: Option<PathBuf>,

    #[arg(long, default_value_t)]
    /// Seed to use for all the random stuff.
    /// Given a seed and a configuration, the whole dataset is deterministic.
    seed: u64,

    #[arg(long, value_enum)]
    light_type: Option<AvailableLight>,

    #[arg(long)]
    light_count: Option<usize>,

    #[arg(short, long)]
    /// Image dimension in format `width`x`height`
    dimensions: Option<Dimensions>,

    #[arg(long)]
    /// Samples per pixel
    spp: Option<u32>,

    #[arg(long)]
    max_objects: Option<usize>,

    #[arg(long, default_value = "data/shapes")]
    /// Directory of .obj assets. Primitives are used when it is empty or missing
    objects_dir: PathBuf,

    #[arg(long, default_value = "data/materials")]
    /// Directory holding Metallic.mtl and Rubber.mtl
    materials_dir: PathBuf,

    #[arg(long, value_enum)]
    material_source: Option<AvailableMaterialSource>,

    #[arg(short, long, default_value = "output")]
    output: PathBuf,

    #[arg(long, default_value = "multi")]
    dataset_type: String,

    #[arg(long, default_value = "1.0")]
    dataset_version: String,

    #[arg(long)]
    /// Do not print the progress bar
    quiet: bool,
}

impl Args {
    fn scene_config(&self) -> anyhow::Result<SceneConfig> {
        let mut config = match &self.config {
            Some(path) => SceneConfig::from_json_file(path)
                .with_context(|| format!("loading configuration {}", path.display()))?,
            None => SceneConfig::default(),
        };
        self.apply_overrides(&mut config);
        config.validate()?;
        Ok(config)
    }

    fn apply_overrides(&self, config: &mut SceneConfig) {
        if let Some(light) = self.light_type {
            config.light_kind = light.into();
        }
        if let Some(count) = self.light_count {
            config.light_count = count;
        }
        if let Some(Dimensions { width, height }) = self.dimensions {
            config.camera.intrinsics.width = width;
            config.camera.intrinsics.height = height;
        }
        if let Some(spp) = self.spp {
            config.render.sample_count = spp;
        }
        if let Some(max_objects) = self.max_objects {
            config.placement.max_objects = max_objects;
        }
        if let Some(source) = self.material_source {
            config.material_source = source.into_source(&self.materials_dir);
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = args.scene_config()?;
    log::debug!("{config:?}");

    log::info!("loading assets from {}", args.objects_dir.display());
    let catalog = AssetCatalog::from_dir(&args.objects_dir)?;
    log::info!("{} assets loaded", catalog.len());

    let layout = DatasetLayout::new(
        &args.output,
        &args.dataset_type,
        &args.dataset_version,
        config.render.output_format,
    );
    let mut composer = SceneComposer::new(config, Arc::new(catalog))?;
    let mut rng = scenegen::seed_rng(args.seed);

    let summary = dataset::generate(
        &mut composer,
        &mut PathTracer::default(),
        &FileImageWriter,
        &layout,
        args.num_images,
        &mut rng,
        !args.quiet,
    )?;
    log::info!(
        "{} images written, {} of {} requested objects placed",
        summary.images,
        summary.placed_objects,
        summary.target_objects
    );

    scenegen::utils::counter::report_counters();
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use scenegen::{light::LightKind, material::MaterialSource};

    use super::Args;

    #[test]
    fn defaults_keep_the_configuration() {
        let args = Args::parse_from(["scenegen"]);
        assert_eq!(args.num_images, 10);
        assert_eq!(args.dataset_type, "multi");
        assert_eq!(args.scene_config().unwrap(), scenegen::config::SceneConfig::default());
    }

    #[test]
    fn flags_override_the_configuration() {
        let args = Args::parse_from([
            "scenegen",
            "--light-type",
            "spot",
            "--light-count",
            "1",
            "-d",
            "64x32",
            "--spp",
            "4",
            "--max-objects",
            "3",
            "--material-source",
            "library",
            "--materials-dir",
            "mtl",
        ]);
        let config = args.scene_config().unwrap();
        assert_eq!(config.light_kind, LightKind::Spot);
        assert_eq!(config.light_count, 1);
        assert_eq!(config.camera.intrinsics.width, 64);
        assert_eq!(config.camera.intrinsics.height, 32);
        assert_eq!(config.render.sample_count, 4);
        assert_eq!(config.placement.max_objects, 3);
        assert_eq!(
            config.material_source,
            MaterialSource::Library { dir: "mtl".into() }
        );
    }

    #[test]
    fn invalid_override_is_rejected() {
        let args = Args::parse_from(["scenegen", "--spp", "0"]);
        assert!(args.scene_config().is_err());
    }
}
