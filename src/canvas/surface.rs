use std::convert::Infallible;

use crate::assets::data_uri::{EMPTY_DATA_URI, png_data_uri};
use crate::assets::png::{ExportOpts, encode_png};
use crate::canvas::context::{DrawingContext, ImageSource};
use crate::canvas::style::StyleStack;
use crate::canvas::unsupported::unsupported_members;
use crate::foundation::error::{CanvasError, CanvasResult};
use crate::render::buffer::PixelBuffer;

/// Width used when none (or an invalid one) is given.
pub const DEFAULT_WIDTH: u32 = 300;
/// Height used when none (or an invalid one) is given.
pub const DEFAULT_HEIGHT: u32 = 150;

/// An in-memory canvas element: one owned RGBA8 backing buffer plus the state of its single
/// `2d` context.
#[derive(Debug)]
pub struct Surface {
    width: u32,
    height: u32,
    buffer: PixelBuffer,
    context: Option<StyleStack>,
    id: Option<String>,
    export: ExportOpts,
}

impl Default for Surface {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

impl Surface {
    /// Members backed by a real implementation.
    pub const SUPPORTED: &'static [&'static str] = &[
        "width",
        "height",
        "id",
        "tagName",
        "innerHTML",
        "outerHTML",
        "getContext",
        "toDataURL",
    ];

    /// Transparent surface of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_opts(width, height, ExportOpts::default())
    }

    /// Transparent surface with explicit export settings.
    pub fn with_opts(width: u32, height: u32, export: ExportOpts) -> Self {
        Self {
            width,
            height,
            buffer: PixelBuffer::new(width, height),
            context: None,
            id: None,
            export,
        }
    }

    /// Return `true` when `member` (browser spelling) is implemented.
    pub fn supports(member: &str) -> bool {
        Self::SUPPORTED.contains(&member)
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Assign the width. Non-finite or negative values fall back to [`DEFAULT_WIDTH`]; others
    /// are floored.
    ///
    /// Every assignment, even of the current value, discards the contents.
    #[tracing::instrument(skip(self))]
    pub fn set_width(&mut self, value: f64) {
        self.width = coerce_dimension(value, DEFAULT_WIDTH);
        self.reset_buffer();
    }

    /// Assign the height. Non-finite or negative values fall back to [`DEFAULT_HEIGHT`]; others
    /// are floored.
    ///
    /// Every assignment, even of the current value, discards the contents.
    #[tracing::instrument(skip(self))]
    pub fn set_height(&mut self, value: f64) {
        self.height = coerce_dimension(value, DEFAULT_HEIGHT);
        self.reset_buffer();
    }

    fn reset_buffer(&mut self) {
        self.buffer = PixelBuffer::new(self.width, self.height);
        tracing::debug!(
            width = self.width,
            height = self.height,
            "backing buffer reallocated"
        );
    }

    /// Element id, empty when unset.
    pub fn id(&self) -> &str {
        self.id.as_deref().unwrap_or("")
    }

    /// Set the element id.
    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = Some(id.into());
    }

    /// Always `"CANVAS"`.
    pub fn tag_name(&self) -> &'static str {
        "CANVAS"
    }

    /// Always empty.
    pub fn inner_html(&self) -> &'static str {
        ""
    }

    /// Always `"<canvas></canvas>"`.
    pub fn outer_html(&self) -> &'static str {
        "<canvas></canvas>"
    }

    /// Export settings used by [`Surface::to_png`] and [`Surface::to_data_url`].
    pub fn export_opts(&self) -> ExportOpts {
        self.export
    }

    /// Replace the export settings.
    pub fn set_export_opts(&mut self, export: ExportOpts) {
        self.export = export;
    }

    /// Read-only view of the backing buffer.
    pub fn pixels(&self) -> &PixelBuffer {
        &self.buffer
    }

    /// Return `true` once `get_context("2d")` has been called.
    pub fn has_context(&self) -> bool {
        self.context.is_some()
    }

    /// The surface's `2d` context. Any other id is unsupported.
    ///
    /// The context state is created on first request and shared by every later one.
    pub fn get_context(&mut self, context_id: &str) -> CanvasResult<DrawingContext<'_>> {
        if context_id != "2d" {
            return Err(CanvasError::unsupported(format!(
                "getContext(\"{context_id}\")"
            )));
        }
        let styles = self.context.get_or_insert_with(StyleStack::new);
        Ok(DrawingContext::new(styles, &mut self.buffer))
    }

    /// Encode the backing buffer as PNG.
    #[tracing::instrument(skip(self), fields(width = self.width, height = self.height))]
    pub fn to_png(&self) -> CanvasResult<Vec<u8>> {
        encode_png(self.buffer.data(), self.width, self.height, self.export)
    }

    /// `data:image/png;base64,...` snapshot of the surface.
    ///
    /// `mime` may be `None` or `"image/png"`. A zero-area surface yields `"data:,"` without
    /// encoding.
    pub fn to_data_url(&self, mime: Option<&str>) -> CanvasResult<String> {
        if let Some(mime) = mime
            && mime != "image/png"
        {
            return Err(CanvasError::unsupported(format!("toDataURL(\"{mime}\")")));
        }
        if self.width == 0 || self.height == 0 {
            return Ok(EMPTY_DATA_URI.to_owned());
        }
        Ok(png_data_uri(&self.to_png()?))
    }

    unsupported_members! {
        "toBlob" => fn to_blob() -> ();
        "transferControlToOffscreen" => fn transfer_control_to_offscreen() -> Infallible;
        "captureStream" => fn capture_stream(f64) -> Infallible;
        "addEventListener" => fn add_event_listener(&str) -> ();
        "removeEventListener" => fn remove_event_listener(&str) -> ();
        "click" => fn click() -> ();
        "focus" => fn focus() -> ();
        "getBoundingClientRect" => fn get_bounding_client_rect() -> Infallible;
        "getAttribute" => fn get_attribute(&str) -> Infallible;
        "setAttribute" => fn set_attribute(&str, &str) -> ();
        "hasAttribute" => fn has_attribute(&str) -> Infallible;
        "removeAttribute" => fn remove_attribute(&str) -> ();
        "requestFullscreen" => fn request_fullscreen() -> ();
        "ownerDocument" => fn owner_document() -> Infallible;
        "appendChild" => fn append_child() -> ();
        "cloneNode" => fn clone_node(bool) -> Infallible;
    }
}

impl ImageSource for Surface {
    fn image_pixels(&self) -> Option<&PixelBuffer> {
        Some(&self.buffer)
    }
}

fn coerce_dimension(value: f64, default: u32) -> u32 {
    if !value.is_finite() || value < 0.0 {
        return default;
    }
    value.floor() as u32
}

#[cfg(test)]
#[path = "../../tests/unit/canvas/surface.rs"]
mod tests;
