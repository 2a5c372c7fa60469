//! canvas-lite emulates a browser `<canvas>` with a `2d` context outside a browser.
//!
//! - A [`Surface`] owns a straight-alpha RGBA8 [`PixelBuffer`].
//! - [`Surface::get_context`] hands out the [`DrawingContext`]: `fill_rect`, `clear_rect`,
//!   `draw_image`, `get_image_data`, `put_image_data`, `save` / `restore` and `fill_style`.
//! - [`Surface::to_data_url`] and [`Image::set_src`] move snapshots in and out as
//!   `data:image/png;base64,...` URIs.
//!
//! Everything else in the browser API (paths, text, transforms, gradients, ...) exists as a stub
//! that returns [`CanvasError::Unsupported`].
#![forbid(unsafe_code)]

mod assets;
mod canvas;
mod foundation;

/// Pixel storage and the compositing routines behind the context.
pub mod render;
pub mod script;

pub use crate::assets::color::{format_color, parse_color};
pub use crate::assets::data_uri::{
    EMPTY_DATA_URI, PNG_DATA_URI_PREFIX, decode_png_data_uri, png_data_uri,
};
pub use crate::assets::png::{ExportOpts, PngCompression, PngFilter, decode_png, encode_png};
pub use crate::canvas::context::{DrawImageArgs, DrawingContext, ImageSource, PaintStyle};
pub use crate::canvas::image::{EventKind, Image, ImageEvent, ListenerId};
pub use crate::canvas::style::DrawingStyleState;
pub use crate::canvas::surface::{DEFAULT_HEIGHT, DEFAULT_WIDTH, Surface};
pub use crate::foundation::core::{BYTES_PER_PIXEL, Bounds, PixelRect, Rgba8};
pub use crate::foundation::error::{CanvasError, CanvasResult};
pub use crate::render::buffer::PixelBuffer;
pub use crate::script::{DrawOp, Script};
