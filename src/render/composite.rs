//! Rectangle fill and region copy over straight-alpha [`PixelBuffer`]s.
//!
//! Both routines share one per-pixel rule, [`over`]: source-over compositing computed in floating
//! point on the normalized `[0, 1]` scale and stored back as rounded, clamped bytes.

use crate::foundation::core::{PixelRect, Rgba8};
use crate::foundation::error::{CanvasError, CanvasResult};
use crate::render::buffer::PixelBuffer;

/// How copied pixels land on the destination.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CopyMode {
    /// Composite the source over the destination with [`over`].
    #[default]
    SourceOver,
    /// Write source bytes verbatim. Used for `get_image_data` reads into a fresh buffer.
    Replace,
}

/// Source and destination rectangles for [`copy_region`].
///
/// Source and destination extents must match: there is no resampling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CopyRegion {
    /// Source origin x.
    pub sx: i64,
    /// Source origin y.
    pub sy: i64,
    /// Source width.
    pub sw: i64,
    /// Source height.
    pub sh: i64,
    /// Destination origin x.
    pub dx: i64,
    /// Destination origin y.
    pub dy: i64,
    /// Destination width; must equal `sw`.
    pub dw: i64,
    /// Destination height; must equal `sh`.
    pub dh: i64,
}

impl CopyRegion {
    /// A `w x h` copy from `(sx, sy)` to `(dx, dy)`.
    pub fn unscaled(sx: i64, sy: i64, w: i64, h: i64, dx: i64, dy: i64) -> Self {
        Self {
            sx,
            sy,
            sw: w,
            sh: h,
            dx,
            dy,
            dw: w,
            dh: h,
        }
    }
}

/// Composite `src` over `dst` (straight alpha in, straight alpha out).
///
/// An opaque source or a fully transparent backdrop is a plain replace. A fully transparent source
/// leaves the backdrop untouched.
pub fn over(dst: Rgba8, src: Rgba8) -> Rgba8 {
    if src.a == 255 || dst.a == 0 {
        return src;
    }
    if src.a == 0 {
        return dst;
    }

    let a_s = f64::from(src.a) / 255.0;
    let a_b = f64::from(dst.a) / 255.0;
    let channel = |s: u8, b: u8| {
        to_u8((f64::from(s) / 255.0 * a_s + f64::from(b) / 255.0 * a_b * (1.0 - a_s)) * 255.0)
    };

    Rgba8 {
        r: channel(src.r, dst.r),
        g: channel(src.g, dst.g),
        b: channel(src.b, dst.b),
        a: to_u8((a_s + a_b * (1.0 - a_s)) * 255.0),
    }
}

/// Apply [`over`] to one 4-byte pixel in place.
pub fn over_in_place(px: &mut [u8], src: Rgba8) {
    let Some(dst) = Rgba8::from_slice(px) else {
        return;
    };
    px[..4].copy_from_slice(&over(dst, src).to_array());
}

/// Fill `rect` with `color`, composited over the existing pixels.
///
/// Negative extents are flipped; pixels outside the buffer are skipped.
pub fn fill_rect(buf: &mut PixelBuffer, rect: PixelRect, color: Rgba8) {
    let b = rect.normalized().clip_to(buf.width(), buf.height());
    if b.is_empty() {
        return;
    }
    for y in b.top..b.bottom {
        for x in b.left..b.right {
            if let Some(px) = buf.pixel_mut(x, y) {
                over_in_place(px, color);
            }
        }
    }
}

/// Copy a rectangle of `src` onto `dst`.
///
/// Source pixels outside `src` read as transparent black; destination pixels outside `dst` are
/// skipped. Fails with [`CanvasError::InvalidArgument`] when the source and destination extents
/// differ.
pub fn copy_region(
    src: &PixelBuffer,
    dst: &mut PixelBuffer,
    region: CopyRegion,
    mode: CopyMode,
) -> CanvasResult<()> {
    let CopyRegion {
        sx,
        sy,
        sw,
        sh,
        dx,
        dy,
        dw,
        dh,
    } = region;
    if sw != dw || sh != dh {
        return Err(CanvasError::invalid_argument(format!(
            "image resize not supported: source {sw}x{sh}, destination {dw}x{dh}"
        )));
    }

    // Only offsets that land inside `dst` can write anything.
    let cols = (-dx).max(0)..sw.min(i64::from(dst.width()) - dx);
    let rows = (-dy).max(0)..sh.min(i64::from(dst.height()) - dy);

    for row in rows {
        for col in cols.clone() {
            let s = src
                .pixel(sx + col, sy + row)
                .unwrap_or(Rgba8::TRANSPARENT);
            let Some(px) = dst.pixel_mut(dx + col, dy + row) else {
                continue;
            };
            match mode {
                CopyMode::SourceOver => over_in_place(px, s),
                CopyMode::Replace => px.copy_from_slice(&s.to_array()),
            }
        }
    }
    Ok(())
}

fn to_u8(v: f64) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
