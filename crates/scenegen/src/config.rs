use std::{fs::File, io::BufReader, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    camera::CameraConfig,
    light::{LightKind, LightTable},
    material::MaterialSource,
    placement::PlacementConfig,
    render::RenderOptions,
    scene::GroundConfig,
    Error, Result,
};

/// Every knob of scene composition and rendering.
///
/// Missing fields of a configuration file keep their default value. Angles are
/// in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub placement: PlacementConfig,
    pub camera: CameraConfig,
    /// All the lights of a scene are of this kind
    pub light_kind: LightKind,
    pub light_count: usize,
    pub lights: LightTable,
    pub ground: GroundConfig,
    pub render: RenderOptions,
    pub material_source: MaterialSource,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            placement: PlacementConfig::default(),
            camera: CameraConfig::default(),
            light_kind: LightKind::Point,
            light_count: 3,
            lights: LightTable::default(),
            ground: GroundConfig::default(),
            render: RenderOptions::default(),
            material_source: MaterialSource::Generated,
        }
    }
}

impl SceneConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let config: Self = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;
        log::debug!("Loaded configuration from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.placement.validate()?;

        if !self.camera.shell.is_valid() {
            return Err(Error::Config(format!("invalid camera shell {:?}", self.camera.shell)));
        }
        if !self.camera.intrinsics.is_valid() {
            return Err(Error::Config(format!(
                "invalid camera intrinsics {:?}",
                self.camera.intrinsics
            )));
        }
        for (kind, params) in self.lights.iter() {
            if !params.is_valid() {
                return Err(Error::Config(format!("invalid {kind} light parameters {params:?}")));
            }
        }
        if self.render.sample_count == 0 {
            return Err(Error::Config("sample_count must be at least 1".to_owned()));
        }
        let strength = self.render.background_strength;
        if !(strength.is_finite() && strength >= 0.0) {
            return Err(Error::Config(format!("invalid background strength {strength}")));
        }
        if !(self.ground.size.is_finite() && self.ground.size > 0.0) {
            return Err(Error::Config(format!("invalid ground size {}", self.ground.size)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        light::{Energy, LightKind},
        material::MaterialSource,
        math::interval::Interval,
        output::OutputFormat,
        Error,
    };

    use super::SceneConfig;

    #[test]
    fn defaults() {
        let config = SceneConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.placement.min_distance, 0.1);
        assert_eq!(config.placement.max_objects, 10);
        assert_eq!(config.placement.max_tries_per_object, 10);
        assert_eq!(config.camera.shell.radius, Interval::point(6.0));
        assert_eq!(config.camera.shell.elevation_deg, Interval::new(30.0, 90.0));
        assert_eq!(config.camera.intrinsics.focal_length, 36.0);
        assert_eq!(config.light_kind, LightKind::Point);
        assert_eq!(config.light_count, 3);
        assert_eq!(config.render.sample_count, 1024);
        assert_eq!(config.render.output_format, OutputFormat::Png);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = SceneConfig::from_json_str(
            r#"{
                "light_kind": "sun",
                "light_count": 1,
                "placement": { "max_objects": 4 },
                "camera": {
                    "shell": {
                        "radius": { "min": 5, "max": 8 },
                        "elevation_deg": { "min": 20, "max": 60 }
                    }
                },
                "material_source": { "library": { "dir": "data/materials" } }
            }"#,
        )
        .unwrap();
        assert_eq!(config.light_kind, LightKind::Sun);
        assert_eq!(config.light_count, 1);
        assert_eq!(config.placement.max_objects, 4);
        assert_eq!(config.placement.min_distance, 0.1);
        assert_eq!(config.camera.shell.radius, Interval::new(5.0, 8.0));
        assert_eq!(config.camera.intrinsics.width, 480);
        assert_eq!(
            config.material_source,
            MaterialSource::Library {
                dir: "data/materials".into()
            }
        );
    }

    #[test]
    fn single_knob_overrides() {
        let config = SceneConfig::from_json_str(r#"{ "lights": { "point": { "energy": 20 } } }"#)
            .unwrap();
        let defaults = SceneConfig::default();
        assert_eq!(config.lights.point.energy, Energy::Fixed(20.0));
        assert_eq!(config.lights.point.shell, defaults.lights.point.shell);
        assert_eq!(config.lights.point.radius, Some(5.0));
        assert_eq!(config.lights.sun, defaults.lights.sun);

        let config = SceneConfig::from_json_str(
            r#"{ "camera": { "shell": { "elevation_deg": { "min": 40, "max": 70 } } } }"#,
        )
        .unwrap();
        assert_eq!(config.camera.shell.elevation_deg, Interval::new(40.0, 70.0));
        assert_eq!(config.camera.shell.radius, Interval::point(6.0));
        assert_eq!(config.camera.intrinsics, defaults.camera.intrinsics);
    }

    #[test]
    fn invalid_configurations() {
        for json in [
            r#"{ "placement": { "max_tries_per_object": 0 } }"#,
            r#"{ "camera": { "shell": { "radius": { "min": 8, "max": 5 } } } }"#,
            r#"{ "camera": { "intrinsics": { "width": 0 } } }"#,
            r#"{ "render": { "sample_count": 0 } }"#,
            r#"{ "camera": { "shell": { "radius": { "min": 0, "max": 6 } } } }"#,
            r#"{ "light_kind": "laser" }"#,
        ] {
            assert!(
                matches!(SceneConfig::from_json_str(json), Err(Error::Config(_))),
                "{json} was accepted"
            );
        }
    }

    #[test]
    fn file_round_trip() {
        let path = std::env::temp_dir()
            .join(format!("scenegen-config-{}.json", std::process::id()));
        let mut config = SceneConfig::default();
        config.light_count = 5;
        std::fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();
        assert_eq!(SceneConfig::from_json_file(&path).unwrap(), config);
    }
}
