use rand::{
    distributions::{Distribution, Uniform},
    Rng,
};
use serde::{Deserialize, Serialize};

/// A closed range `[min, max]` of floats.
///
/// `min == max` is allowed and samples to that single value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub const fn point(value: f32) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }

    pub fn contains(&self, value: f32) -> bool {
        (self.min..=self.max).contains(&value)
    }

    pub fn to_radians(self) -> Self {
        Self {
            min: self.min.to_radians(),
            max: self.max.to_radians(),
        }
    }
}

impl Distribution<f32> for Interval {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        Uniform::new_inclusive(self.min, self.max).sample(rng)
    }
}
