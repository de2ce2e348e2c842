use std::ops::{Add, Mul};

use serde::{Deserialize, Serialize};

/// A linear RGB color
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rgb(pub [f32; 3]);

impl Rgb {
    pub const BLACK: Rgb = Rgb([0.0, 0.0, 0.0]);
    pub const WHITE: Rgb = Rgb([1.0, 1.0, 1.0]);

    pub const fn gray(c: f32) -> Self {
        Self([c, c, c])
    }

    pub fn max_element(self) -> f32 {
        self.0.into_iter().fold(f32::NEG_INFINITY, f32::max)
    }

    pub fn lerp(self, other: Self, t: f32) -> Self {
        (1.0 - t) * self + t * other
    }

    /// Encode as 8 bits sRGB, values outside of [0, 1] are clamped
    pub fn to_srgb_bytes(self) -> [u8; 3] {
        self.0
            .map(|c| (linear_to_srgb(c.clamp(0.0, 1.0)) * 255. + 0.5) as u8)
    }
}

pub fn linear_to_srgb(linear: f32) -> f32 {
    if linear <= 0.0031308 {
        12.92 * linear
    } else {
        1.055 * linear.powf(1.0 / 2.4) - 0.055
    }
}

impl Add for Rgb {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self([
            self.0[0] + rhs.0[0],
            self.0[1] + rhs.0[1],
            self.0[2] + rhs.0[2],
        ])
    }
}

impl Mul for Rgb {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self([
            self.0[0] * rhs.0[0],
            self.0[1] * rhs.0[1],
            self.0[2] * rhs.0[2],
        ])
    }
}

impl Mul<Rgb> for f32 {
    type Output = Rgb;

    fn mul(self, rhs: Rgb) -> Self::Output {
        Rgb(rhs.0.map(|c| self * c))
    }
}
