use crate::foundation::core::{BYTES_PER_PIXEL, Rgba8};

/// Straight-alpha RGBA8 pixel storage, row-major, top-to-bottom.
///
/// This is both the backing store of a [`crate::Surface`] and the detached snapshot type handed
/// out by `get_image_data` and image decoding (the browser's `ImageData`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Allocate a fully transparent black buffer.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; byte_len(width, height)],
        }
    }

    /// Wrap existing RGBA8 bytes without copying.
    ///
    /// The length is not required to match `width * height * 4`. Pixels whose bytes are missing
    /// read as transparent black and ignore writes.
    pub fn from_raw(data: Vec<u8>, width: u32, height: u32) -> Self {
        let expected = byte_len(width, height);
        if data.len() != expected {
            tracing::debug!(
                len = data.len(),
                expected,
                width,
                height,
                "pixel buffer wraps bytes of unexpected length"
            );
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA8 bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable raw RGBA8 bytes.
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consume the buffer and return its bytes.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Always `"srgb"`.
    pub fn color_space(&self) -> &'static str {
        "srgb"
    }

    /// Return `true` when the byte length matches the dimensions.
    pub fn is_consistent(&self) -> bool {
        self.data.len() == byte_len(self.width, self.height)
    }

    /// Read one pixel; `None` outside the buffer.
    pub fn pixel(&self, x: i64, y: i64) -> Option<Rgba8> {
        let idx = self.offset(x, y)?;
        Rgba8::from_slice(self.data.get(idx..idx + BYTES_PER_PIXEL)?)
    }

    /// Borrow one pixel's four bytes mutably; `None` outside the buffer.
    pub fn pixel_mut(&mut self, x: i64, y: i64) -> Option<&mut [u8]> {
        let idx = self.offset(x, y)?;
        self.data.get_mut(idx..idx + BYTES_PER_PIXEL)
    }

    fn offset(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return None;
        }
        let idx = (y as usize)
            .checked_mul(self.width as usize)?
            .checked_add(x as usize)?
            .checked_mul(BYTES_PER_PIXEL)?;
        Some(idx)
    }
}

fn byte_len(width: u32, height: u32) -> usize {
    (width as usize)
        .saturating_mul(height as usize)
        .saturating_mul(BYTES_PER_PIXEL)
}

#[cfg(test)]
#[path = "../../tests/unit/render/buffer.rs"]
mod tests;
