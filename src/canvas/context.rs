use std::convert::Infallible;

use crate::assets::color::{format_color, parse_color};
use crate::canvas::style::StyleStack;
use crate::canvas::unsupported::unsupported_members;
use crate::foundation::core::{PixelRect, Rgba8};
use crate::foundation::error::{CanvasError, CanvasResult};
use crate::render::buffer::PixelBuffer;
use crate::render::composite::{self, CopyMode, CopyRegion};

/// Anything `draw_image` can read pixels from.
pub trait ImageSource {
    /// Decoded pixels, or `None` when nothing has been loaded.
    fn image_pixels(&self) -> Option<&PixelBuffer>;
}

impl ImageSource for PixelBuffer {
    fn image_pixels(&self) -> Option<&PixelBuffer> {
        Some(self)
    }
}

/// The three `drawImage` call shapes, resolved into one canonical copy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawImageArgs {
    /// `drawImage(image, dx, dy)`: whole image, unscaled.
    At { dx: i32, dy: i32 },
    /// `drawImage(image, dx, dy, dw, dh)`: accepted, but drawn at the image's own size.
    Sized { dx: i32, dy: i32, dw: i32, dh: i32 },
    /// `drawImage(image, sx, sy, sw, sh, dx, dy, dw, dh)`: requires `sw == dw` and `sh == dh`.
    Sub {
        sx: i32,
        sy: i32,
        sw: i32,
        sh: i32,
        dx: i32,
        dy: i32,
        dw: i32,
        dh: i32,
    },
}

impl DrawImageArgs {
    /// Resolve positional numeric arguments (everything after the image) by arity.
    pub fn from_slice(args: &[i32]) -> CanvasResult<Self> {
        match *args {
            [dx, dy] => Ok(Self::At { dx, dy }),
            [dx, dy, dw, dh] => Ok(Self::Sized { dx, dy, dw, dh }),
            [sx, sy, sw, sh, dx, dy, dw, dh] => Ok(Self::Sub {
                sx,
                sy,
                sw,
                sh,
                dx,
                dy,
                dw,
                dh,
            }),
            _ => Err(CanvasError::invalid_argument(format!(
                "drawImage takes 2, 4 or 8 numeric arguments, got {}",
                args.len()
            ))),
        }
    }
}

/// Value assigned to `fillStyle`. Only colors are implemented.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaintStyle<'a> {
    /// CSS color text.
    Color(&'a str),
    /// A `CanvasGradient` object.
    Gradient,
    /// A `CanvasPattern` object.
    Pattern,
}

impl<'a> From<&'a str> for PaintStyle<'a> {
    fn from(s: &'a str) -> Self {
        Self::Color(s)
    }
}

/// The `2d` rendering context of a [`crate::Surface`].
///
/// Borrowed from the surface with [`crate::Surface::get_context`]; the style stack lives in the
/// surface, so every borrow sees the same state.
#[derive(Debug)]
pub struct DrawingContext<'a> {
    styles: &'a mut StyleStack,
    target: &'a mut PixelBuffer,
}

impl<'a> DrawingContext<'a> {
    /// Members backed by a real implementation.
    pub const SUPPORTED: &'static [&'static str] = &[
        "save",
        "restore",
        "fillStyle",
        "globalAlpha",
        "globalCompositeOperation",
        "fillRect",
        "clearRect",
        "drawImage",
        "createImageData",
        "getImageData",
        "putImageData",
    ];

    pub(crate) fn new(styles: &'a mut StyleStack, target: &'a mut PixelBuffer) -> Self {
        Self { styles, target }
    }

    /// Return `true` when `member` (browser spelling) is implemented.
    pub fn supports(member: &str) -> bool {
        Self::SUPPORTED.contains(&member)
    }

    /// Width of the bound surface.
    pub fn width(&self) -> u32 {
        self.target.width()
    }

    /// Height of the bound surface.
    pub fn height(&self) -> u32 {
        self.target.height()
    }

    /// Push a copy of the current style state.
    pub fn save(&mut self) {
        self.styles.save();
    }

    /// Pop the style state; the bottom entry is kept.
    pub fn restore(&mut self) {
        self.styles.restore();
    }

    /// Number of style states on the stack, at least 1.
    pub fn style_depth(&self) -> usize {
        self.styles.depth()
    }

    /// Current fill color, serialized.
    pub fn fill_style(&self) -> String {
        format_color(self.styles.top().fill_color)
    }

    /// Current fill color.
    pub fn fill_color(&self) -> Rgba8 {
        self.styles.top().fill_color
    }

    /// Set the fill color from CSS color text.
    pub fn set_fill_style<'s>(&mut self, style: impl Into<PaintStyle<'s>>) -> CanvasResult<()> {
        match style.into() {
            PaintStyle::Color(s) => {
                self.styles.top_mut().fill_color = parse_color(s)?;
                Ok(())
            }
            PaintStyle::Gradient => Err(CanvasError::unsupported("fillStyle = CanvasGradient")),
            PaintStyle::Pattern => Err(CanvasError::unsupported("fillStyle = CanvasPattern")),
        }
    }

    /// Always 1.
    pub fn global_alpha(&self) -> f64 {
        1.0
    }

    /// Always `"source-over"`.
    pub fn global_composite_operation(&self) -> &'static str {
        "source-over"
    }

    /// Composite the fill color over `(x, y, w, h)`. Negative extents are flipped.
    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32) {
        let color = self.styles.top().fill_color;
        composite::fill_rect(self.target, PixelRect::new(x, y, w, h), color);
    }

    /// `fill_rect` with transparent black, through the same compositing rule.
    pub fn clear_rect(&mut self, x: i32, y: i32, w: i32, h: i32) {
        composite::fill_rect(self.target, PixelRect::new(x, y, w, h), Rgba8::TRANSPARENT);
    }

    /// Transparent `width x height` snapshot.
    pub fn create_image_data(&self, width: u32, height: u32) -> PixelBuffer {
        PixelBuffer::new(width, height)
    }

    /// Transparent snapshot with the dimensions of `like`.
    pub fn create_image_data_like(&self, like: &PixelBuffer) -> PixelBuffer {
        PixelBuffer::new(like.width(), like.height())
    }

    /// Copy `(sx, sy, sw, sh)` out of the surface.
    ///
    /// The rectangle is normalized like `fill_rect`. Pixels outside the surface come back as
    /// transparent black; the rest are copied byte-for-byte.
    pub fn get_image_data(&self, sx: i32, sy: i32, sw: i32, sh: i32) -> CanvasResult<PixelBuffer> {
        let b = PixelRect::new(sx, sy, sw, sh).normalized();
        let (w, h) = (b.width(), b.height());
        let too_big = (w as u64)
            .checked_mul(h as u64)
            .and_then(|v| v.checked_mul(4))
            .is_none_or(|bytes| bytes > isize::MAX as u64);
        if too_big {
            return Err(CanvasError::invalid_argument(format!(
                "getImageData region {w}x{h} is too large"
            )));
        }

        let mut out = PixelBuffer::new(w as u32, h as u32);
        composite::copy_region(
            self.target,
            &mut out,
            CopyRegion::unscaled(b.left, b.top, w, h, 0, 0),
            CopyMode::Replace,
        )?;
        Ok(out)
    }

    /// Composite all of `image` with its top-left corner at `(dx, dy)`.
    pub fn put_image_data(&mut self, image: &PixelBuffer, dx: i32, dy: i32) -> CanvasResult<()> {
        let whole = PixelRect::new(0, 0, clamp_i32(image.width()), clamp_i32(image.height()));
        self.put_image_data_dirty(image, dx, dy, whole)
    }

    /// Composite the `dirty` sub-rectangle of `image` at `(dx + dirty.x, dy + dirty.y)`.
    ///
    /// A dirty rectangle with a negative extent copies nothing; otherwise it is clamped to the
    /// image. Pixels go through the same source-over rule as `draw_image`, so transparent
    /// snapshot pixels leave the surface untouched.
    pub fn put_image_data_dirty(
        &mut self,
        image: &PixelBuffer,
        dx: i32,
        dy: i32,
        dirty: PixelRect,
    ) -> CanvasResult<()> {
        if dirty.w < 0 || dirty.h < 0 {
            return Ok(());
        }
        let d = dirty.normalized().clip_to(image.width(), image.height());
        if d.is_empty() {
            return Ok(());
        }
        composite::copy_region(
            image,
            self.target,
            CopyRegion::unscaled(
                d.left,
                d.top,
                d.width(),
                d.height(),
                i64::from(dx) + d.left,
                i64::from(dy) + d.top,
            ),
            CopyMode::SourceOver,
        )
    }

    /// Composite `image` onto the surface.
    ///
    /// Fails with [`CanvasError::InvalidArgument`] when the image has no pixels yet, or when a
    /// source sub-rectangle would need scaling.
    pub fn draw_image(&mut self, image: &dyn ImageSource, args: DrawImageArgs) -> CanvasResult<()> {
        let src = image
            .image_pixels()
            .ok_or_else(|| CanvasError::invalid_argument("image has no decoded pixel data"))?;
        let (w, h) = (i64::from(src.width()), i64::from(src.height()));

        let region = match args {
            DrawImageArgs::At { dx, dy } => {
                CopyRegion::unscaled(0, 0, w, h, i64::from(dx), i64::from(dy))
            }
            DrawImageArgs::Sized { dx, dy, dw, dh } => {
                if (i64::from(dw), i64::from(dh)) != (w, h) {
                    tracing::debug!(dw, dh, w, h, "drawImage destination size ignored");
                }
                CopyRegion::unscaled(0, 0, w, h, i64::from(dx), i64::from(dy))
            }
            DrawImageArgs::Sub {
                sx,
                sy,
                sw,
                sh,
                dx,
                dy,
                dw,
                dh,
            } => CopyRegion {
                sx: i64::from(sx),
                sy: i64::from(sy),
                sw: i64::from(sw),
                sh: i64::from(sh),
                dx: i64::from(dx),
                dy: i64::from(dy),
                dw: i64::from(dw),
                dh: i64::from(dh),
            },
        };
        composite::copy_region(src, self.target, region, CopyMode::SourceOver)
    }

    unsupported_members! {
        "strokeStyle" => fn set_stroke_style(&str) -> ();
        "lineWidth" => fn set_line_width(f64) -> ();
        "lineCap" => fn set_line_cap(&str) -> ();
        "lineJoin" => fn set_line_join(&str) -> ();
        "miterLimit" => fn set_miter_limit(f64) -> ();
        "lineDashOffset" => fn set_line_dash_offset(f64) -> ();
        "setLineDash" => fn set_line_dash(&[f64]) -> ();
        "getLineDash" => fn get_line_dash() -> Infallible;
        "shadowBlur" => fn set_shadow_blur(f64) -> ();
        "shadowColor" => fn set_shadow_color(&str) -> ();
        "shadowOffsetX" => fn set_shadow_offset_x(f64) -> ();
        "shadowOffsetY" => fn set_shadow_offset_y(f64) -> ();
        "filter" => fn set_filter(&str) -> ();
        "imageSmoothingEnabled" => fn set_image_smoothing_enabled(bool) -> ();
        "imageSmoothingQuality" => fn set_image_smoothing_quality(&str) -> ();
        "font" => fn set_font(&str) -> ();
        "fontKerning" => fn set_font_kerning(&str) -> ();
        "textAlign" => fn set_text_align(&str) -> ();
        "textBaseline" => fn set_text_baseline(&str) -> ();
        "direction" => fn set_direction(&str) -> ();
        "beginPath" => fn begin_path() -> ();
        "closePath" => fn close_path() -> ();
        "moveTo" => fn move_to(f64, f64) -> ();
        "lineTo" => fn line_to(f64, f64) -> ();
        "bezierCurveTo" => fn bezier_curve_to(f64, f64, f64, f64, f64, f64) -> ();
        "quadraticCurveTo" => fn quadratic_curve_to(f64, f64, f64, f64) -> ();
        "arc" => fn arc(f64, f64, f64, f64, f64, bool) -> ();
        "arcTo" => fn arc_to(f64, f64, f64, f64, f64) -> ();
        "ellipse" => fn ellipse(f64, f64, f64, f64, f64, f64, f64, bool) -> ();
        "rect" => fn rect(f64, f64, f64, f64) -> ();
        "roundRect" => fn round_rect(f64, f64, f64, f64, f64) -> ();
        "fill" => fn fill() -> ();
        "stroke" => fn stroke() -> ();
        "clip" => fn clip() -> ();
        "isPointInPath" => fn is_point_in_path(f64, f64) -> Infallible;
        "isPointInStroke" => fn is_point_in_stroke(f64, f64) -> Infallible;
        "strokeRect" => fn stroke_rect(f64, f64, f64, f64) -> ();
        "fillText" => fn fill_text(&str, f64, f64) -> ();
        "strokeText" => fn stroke_text(&str, f64, f64) -> ();
        "measureText" => fn measure_text(&str) -> Infallible;
        "getTransform" => fn get_transform() -> Infallible;
        "resetTransform" => fn reset_transform() -> ();
        "rotate" => fn rotate(f64) -> ();
        "scale" => fn scale(f64, f64) -> ();
        "translate" => fn translate(f64, f64) -> ();
        "transform" => fn transform(f64, f64, f64, f64, f64, f64) -> ();
        "setTransform" => fn set_transform(f64, f64, f64, f64, f64, f64) -> ();
        "createLinearGradient" => fn create_linear_gradient(f64, f64, f64, f64) -> Infallible;
        "createRadialGradient" => fn create_radial_gradient(f64, f64, f64, f64, f64, f64) -> Infallible;
        "createConicGradient" => fn create_conic_gradient(f64, f64, f64) -> Infallible;
        "createPattern" => fn create_pattern(&dyn ImageSource, &str) -> Infallible;
        "getContextAttributes" => fn get_context_attributes() -> Infallible;
        "drawFocusIfNeeded" => fn draw_focus_if_needed() -> ();
        "createImageData(settings)" => fn create_image_data_with_settings(u32, u32, &str) -> Infallible;
    }
}

fn clamp_i32(v: u32) -> i32 {
    i32::try_from(v).unwrap_or(i32::MAX)
}

#[cfg(test)]
#[path = "../../tests/unit/canvas/context.rs"]
mod tests;
