use image::ImageEncoder as _;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use serde::{Deserialize, Serialize};

use crate::foundation::core::BYTES_PER_PIXEL;
use crate::foundation::error::{CanvasError, CanvasResult};
use crate::render::buffer::PixelBuffer;

/// zlib effort for exported PNGs. Every level is lossless.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PngCompression {
    Fast,
    #[default]
    Default,
    Best,
}

/// Per-scanline PNG prediction filter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PngFilter {
    None,
    Sub,
    Up,
    Avg,
    Paeth,
    #[default]
    Adaptive,
}

/// Export settings applied by [`crate::Surface::to_png`] and [`crate::Surface::to_data_url`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOpts {
    /// Compression effort.
    pub compression: PngCompression,
    /// Scanline filter.
    pub filter: PngFilter,
}

impl From<PngCompression> for CompressionType {
    fn from(c: PngCompression) -> Self {
        match c {
            PngCompression::Fast => CompressionType::Fast,
            PngCompression::Default => CompressionType::Default,
            PngCompression::Best => CompressionType::Best,
        }
    }
}

impl From<PngFilter> for FilterType {
    fn from(f: PngFilter) -> Self {
        match f {
            PngFilter::None => FilterType::NoFilter,
            PngFilter::Sub => FilterType::Sub,
            PngFilter::Up => FilterType::Up,
            PngFilter::Avg => FilterType::Avg,
            PngFilter::Paeth => FilterType::Paeth,
            PngFilter::Adaptive => FilterType::Adaptive,
        }
    }
}

/// Encode straight RGBA8 bytes as a PNG stream.
pub fn encode_png(rgba: &[u8], width: u32, height: u32, opts: ExportOpts) -> CanvasResult<Vec<u8>> {
    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(BYTES_PER_PIXEL))
        .ok_or_else(|| CanvasError::invalid_argument("png dimensions overflow"))?;
    if rgba.len() != expected {
        return Err(CanvasError::invalid_argument(format!(
            "png encode expects {expected} bytes for {width}x{height}, got {}",
            rgba.len()
        )));
    }

    let mut out = Vec::new();
    PngEncoder::new_with_quality(&mut out, opts.compression.into(), opts.filter.into())
        .write_image(rgba, width, height, image::ExtendedColorType::Rgba8)
        .map_err(|e| CanvasError::codec(format!("encode png: {e}")))?;
    Ok(out)
}

/// Decode a PNG stream into a straight RGBA8 [`PixelBuffer`].
pub fn decode_png(bytes: &[u8]) -> CanvasResult<PixelBuffer> {
    let dyn_img = image::load_from_memory_with_format(bytes, image::ImageFormat::Png)
        .map_err(|e| CanvasError::codec(format!("decode png: {e}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(PixelBuffer::from_raw(rgba.into_raw(), width, height))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/png.rs"]
mod tests;
