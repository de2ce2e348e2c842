use std::path::Path;

use image::{ImageBuffer, ImageFormat, Rgb};

use crate::{Error, Result};

use super::{swap_red_blue, ChannelOrder, ImageWriter, OutputFormat, PixelBuffer};

/// Writes images on disk, creating the parent directories as needed
#[derive(Debug, Default, Clone, Copy)]
pub struct FileImageWriter;

impl ImageWriter for FileImageWriter {
    fn write(&self, image: &PixelBuffer, format: OutputFormat, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        // The image crate only knows RGB
        let rgb = match image.order() {
            ChannelOrder::Rgb => image.clone(),
            ChannelOrder::Bgr => {
                let mut rgb = image.clone();
                swap_red_blue(&mut rgb);
                rgb
            }
        };
        let (width, height) = (rgb.width(), rgb.height());
        let buffer: ImageBuffer<Rgb<u8>, Vec<u8>> =
            ImageBuffer::from_raw(width, height, rgb.into_raw()).ok_or_else(|| {
                Error::Config(format!("pixel buffer does not match {width}x{height}"))
            })?;

        let image_format = match format {
            OutputFormat::Png => ImageFormat::Png,
            OutputFormat::Jpeg => ImageFormat::Jpeg,
        };
        buffer
            .save_with_format(path, image_format)
            .map_err(|source| Error::ImageWrite {
                path: path.to_owned(),
                source,
            })?;
        log::debug!("Wrote {}", path.display());
        Ok(())
    }
}
