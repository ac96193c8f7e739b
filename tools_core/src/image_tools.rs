//! Image conversion, compression and cropping on in-memory buffers.

use std::io::Cursor;

use image::{DynamicImage, ImageOutputFormat};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImageToolError {
    #[error("could not process image: {0}")]
    Image(#[from] image::ImageError),

    #[error("quality must be between 1 and 100, got {0}")]
    BadQuality(u8),

    #[error("crop rectangle {x},{y} {width}x{height} falls outside the {image_width}x{image_height} image")]
    CropOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        image_width: u32,
        image_height: u32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Png,
    Jpeg,
}

impl OutputFormat {
    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Png => "image/png",
            OutputFormat::Jpeg => "image/jpeg",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpg",
        }
    }
}

/// Re-encode an image (any decodable format) in the requested output format.
pub fn convert(data: &[u8], format: OutputFormat) -> Result<Vec<u8>, ImageToolError> {
    let img = image::load_from_memory(data)?;
    encode(&img, format, None)
}

/// Re-encode as JPEG at the given quality. The size win comes from the
/// lossy quality setting, mirroring canvas-style compression.
pub fn compress(data: &[u8], quality: u8) -> Result<Vec<u8>, ImageToolError> {
    if !(1..=100).contains(&quality) {
        return Err(ImageToolError::BadQuality(quality));
    }
    let img = image::load_from_memory(data)?;
    encode(&img, OutputFormat::Jpeg, Some(quality))
}

/// Cut a rectangle out of the image and return it as PNG.
pub fn crop(
    data: &[u8],
    x: u32,
    y: u32,
    width: u32,
    height: u32,
) -> Result<Vec<u8>, ImageToolError> {
    let img = image::load_from_memory(data)?;

    let fits = width > 0
        && height > 0
        && x.checked_add(width).is_some_and(|right| right <= img.width())
        && y.checked_add(height).is_some_and(|bottom| bottom <= img.height());
    if !fits {
        return Err(ImageToolError::CropOutOfBounds {
            x,
            y,
            width,
            height,
            image_width: img.width(),
            image_height: img.height(),
        });
    }

    let cut = img.crop_imm(x, y, width, height);
    encode(&cut, OutputFormat::Png, None)
}

fn encode(
    img: &DynamicImage,
    format: OutputFormat,
    jpeg_quality: Option<u8>,
) -> Result<Vec<u8>, ImageToolError> {
    let mut out = Cursor::new(Vec::new());
    match format {
        OutputFormat::Png => img.write_to(&mut out, ImageOutputFormat::Png)?,
        OutputFormat::Jpeg => {
            // JPEG carries no alpha channel; flatten first.
            let flat = DynamicImage::ImageRgb8(img.to_rgb8());
            flat.write_to(&mut out, ImageOutputFormat::Jpeg(jpeg_quality.unwrap_or(90)))?;
        }
    }
    Ok(out.into_inner())
}
