//! Post-processing of the rendered image and hand-off to the image writer.

mod file_output;

pub use file_output::FileImageWriter;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::Result;

/// Order of the three channels of each pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelOrder {
    Rgb,
    Bgr,
}

/// An 8 bits, 3 channels image, stored row after row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    order: ChannelOrder,
    data: Vec<u8>,
}

impl PixelBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            order: ChannelOrder::Rgb,
            data: vec![0; 3 * width as usize * height as usize],
        }
    }

    /// `None` if `data` is not `width * height * 3` long
    pub fn from_raw(width: u32, height: u32, order: ChannelOrder, data: Vec<u8>) -> Option<Self> {
        (data.len() == 3 * width as usize * height as usize).then_some(Self {
            width,
            height,
            order,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn order(&self) -> ChannelOrder {
        self.order
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        3 * (y as usize * self.width as usize + x as usize)
    }

    pub fn get(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = self.offset(x, y);
        Some([self.data[i], self.data[i + 1], self.data[i + 2]])
    }

    pub fn put(&mut self, x: u32, y: u32, pixel: [u8; 3]) {
        if x < self.width && y < self.height {
            let i = self.offset(x, y);
            self.data[i..i + 3].copy_from_slice(&pixel);
        }
    }

    pub fn row(&self, y: u32) -> &[u8] {
        let start = self.offset(0, y);
        &self.data[start..start + 3 * self.width as usize]
    }
}

/// Reverse the order of the rows
pub fn flip_vertical(buffer: &mut PixelBuffer) {
    let stride = 3 * buffer.width as usize;
    let height = buffer.height as usize;
    for top in 0..height / 2 {
        let bottom = height - 1 - top;
        let (head, tail) = buffer.data.split_at_mut(bottom * stride);
        head[top * stride..(top + 1) * stride].swap_with_slice(&mut tail[..stride]);
    }
}

/// Exchange the first and the last channel of every pixel: RGB <-> BGR
pub fn swap_red_blue(buffer: &mut PixelBuffer) {
    for pixel in buffer.data.chunks_exact_mut(3) {
        pixel.swap(0, 2);
    }
    buffer.order = match buffer.order {
        ChannelOrder::Rgb => ChannelOrder::Bgr,
        ChannelOrder::Bgr => ChannelOrder::Rgb,
    };
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Png,
    Jpeg,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpg",
        }
    }
}

/// Turns a post-processed buffer into a file
pub trait ImageWriter {
    fn write(&self, image: &PixelBuffer, format: OutputFormat, path: &Path) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32) -> PixelBuffer {
        let data = (0..width * height * 3).map(|i| (i % 251) as u8).collect();
        PixelBuffer::from_raw(width, height, ChannelOrder::Rgb, data).unwrap()
    }

    #[test]
    fn raw_size_is_checked() {
        assert!(PixelBuffer::from_raw(2, 2, ChannelOrder::Rgb, vec![0; 11]).is_none());
        assert!(PixelBuffer::from_raw(2, 2, ChannelOrder::Rgb, vec![0; 12]).is_some());
    }

    #[test]
    fn flip_reverses_rows() {
        for height in [1, 4, 5] {
            let original = gradient(3, height);
            let mut flipped = original.clone();
            flip_vertical(&mut flipped);
            for y in 0..height {
                assert_eq!(flipped.row(y), original.row(height - 1 - y));
            }
        }
    }

    #[test]
    fn swap_exchanges_red_and_blue() {
        let mut buffer = PixelBuffer::new(2, 1);
        buffer.put(1, 0, [10, 20, 30]);
        swap_red_blue(&mut buffer);
        assert_eq!(buffer.get(1, 0), Some([30, 20, 10]));
        assert_eq!(buffer.order(), ChannelOrder::Bgr);
        assert_eq!(buffer.get(2, 0), None);
    }

    #[test]
    fn post_processing_round_trip() {
        let original = gradient(7, 5);
        let mut buffer = original.clone();
        flip_vertical(&mut buffer);
        swap_red_blue(&mut buffer);
        assert_ne!(buffer, original);

        swap_red_blue(&mut buffer);
        flip_vertical(&mut buffer);
        assert_eq!(buffer, original);
    }
}
