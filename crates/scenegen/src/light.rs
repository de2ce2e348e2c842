//! Scene lights, all drawn by one sampler parameterized by the light kind.

use derive_more::Display;
use rand::{prelude::Distribution, Rng};
use serde::{Deserialize, Serialize};

use crate::math::{
    distributions::{ShellConfig, ShellOverride},
    interval::Interval,
    point::Point,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LightKind {
    #[display("point")]
    Point,
    #[display("sun")]
    Sun,
    #[display("area")]
    Area,
    #[display("spot")]
    Spot,
}

impl LightKind {
    pub const ALL: [LightKind; 4] = [
        LightKind::Point,
        LightKind::Sun,
        LightKind::Area,
        LightKind::Spot,
    ];

    /// Only point and area lights have an emitting radius
    pub fn has_radius(self) -> bool {
        matches!(self, LightKind::Point | LightKind::Area)
    }
}

/// A light power, either constant or drawn uniformly for every light
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Energy {
    Fixed(f32),
    Uniform(Interval),
}

impl Energy {
    pub fn is_valid(&self) -> bool {
        match self {
            Energy::Fixed(e) => e.is_finite() && *e >= 0.0,
            Energy::Uniform(interval) => interval.is_valid() && interval.min >= 0.0,
        }
    }
}

impl Distribution<f32> for Energy {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        match self {
            Energy::Fixed(e) => *e,
            Energy::Uniform(interval) => interval.sample(rng),
        }
    }
}

/// How one kind of light is drawn
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LightParams {
    pub shell: ShellConfig,
    pub energy: Energy,
    /// Size of the emitter, ignored for kinds without radius
    pub radius: Option<f32>,
}

/// [LightParams] as found in a configuration file, any field may be missing
#[derive(Debug, Default, Clone, Copy, Deserialize)]
#[serde(default)]
struct LightParamsOverride {
    shell: ShellOverride,
    energy: Option<Energy>,
    radius: Option<f32>,
}

impl LightParamsOverride {
    fn over(self, base: LightParams) -> LightParams {
        LightParams {
            shell: self.shell.over(base.shell),
            energy: self.energy.unwrap_or(base.energy),
            radius: self.radius.or(base.radius),
        }
    }
}

impl LightParams {
    fn new(elevation_deg: Interval, energy: Energy, radius: Option<f32>) -> Self {
        Self {
            shell: ShellConfig {
                radius: Interval::point(6.0),
                elevation_deg,
            },
            energy,
            radius,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.shell.is_valid()
            && self.energy.is_valid()
            && self.radius.map_or(true, |r| r.is_finite() && r >= 0.0)
    }
}

/// Parameters of every light kind.
///
/// In configuration files each kind only lists what differs from its own defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "LightTableOverride")]
pub struct LightTable {
    pub point: LightParams,
    pub sun: LightParams,
    pub area: LightParams,
    pub spot: LightParams,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LightTableOverride {
    point: LightParamsOverride,
    sun: LightParamsOverride,
    area: LightParamsOverride,
    spot: LightParamsOverride,
}

impl From<LightTableOverride> for LightTable {
    fn from(table: LightTableOverride) -> Self {
        let defaults = LightTable::default();
        Self {
            point: table.point.over(defaults.point),
            sun: table.sun.over(defaults.sun),
            area: table.area.over(defaults.area),
            spot: table.spot.over(defaults.spot),
        }
    }
}

impl Default for LightTable {
    fn default() -> Self {
        Self {
            point: LightParams::new(
                Interval::new(15.0, 90.0),
                Energy::Fixed(10.0),
                Some(5.0),
            ),
            sun: LightParams::new(
                Interval::new(45.0, 90.0),
                Energy::Uniform(Interval::new(100.0, 500.0)),
                None,
            ),
            area: LightParams::new(
                Interval::new(15.0, 90.0),
                Energy::Fixed(50.0),
                Some(5.0),
            ),
            spot: LightParams::new(Interval::new(45.0, 90.0), Energy::Fixed(100.0), None),
        }
    }
}

impl LightTable {
    pub fn get(&self, kind: LightKind) -> &LightParams {
        match kind {
            LightKind::Point => &self.point,
            LightKind::Sun => &self.sun,
            LightKind::Area => &self.area,
            LightKind::Spot => &self.spot,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (LightKind, &LightParams)> {
        LightKind::ALL.into_iter().map(|kind| (kind, self.get(kind)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub kind: LightKind,
    pub position: Point,
    /// Watts for point, area and spot lights, W/m² for the sun
    pub energy: f32,
    pub radius: Option<f32>,
}

/// Draw one light of the given kind
pub fn sample_light<R: Rng + ?Sized>(
    kind: LightKind,
    params: &LightParams,
    rng: &mut R,
) -> Light {
    let position = params.shell.shell().sample(rng);
    let energy = params.energy.sample(rng);
    Light {
        kind,
        position,
        energy,
        radius: params.radius.filter(|_| kind.has_radius()),
    }
}
