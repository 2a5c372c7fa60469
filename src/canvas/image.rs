use std::fmt;
use std::str::FromStr;

use crate::assets::data_uri::{decode_base64, png_payload};
use crate::assets::png::decode_png;
use crate::canvas::context::ImageSource;
use crate::foundation::error::{CanvasError, CanvasResult};
use crate::render::buffer::PixelBuffer;

/// Notifications an [`Image`] raises after `src` is assigned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Pixels decoded and installed.
    Load,
    /// Decoding failed; previous pixels (if any) are kept.
    Error,
}

impl FromStr for EventKind {
    type Err = CanvasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "load" => Ok(Self::Load),
            "error" => Ok(Self::Error),
            other => Err(CanvasError::unsupported(format!("image event \"{other}\""))),
        }
    }
}

/// Payload handed to listeners.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageEvent {
    pub kind: EventKind,
    /// Image width at dispatch time.
    pub width: u32,
    /// Image height at dispatch time.
    pub height: u32,
}

/// Handle returned by [`Image::add_event_listener`], used to remove the listener again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Handler = Box<dyn FnMut(&ImageEvent)>;

enum LoadSlot {
    /// Position of the `onload` handler, fixed by its first assignment.
    Primary,
    Listener(ListenerId, Handler),
}

/// An image element that loads PNG data URIs.
///
/// Assigning [`Image::set_src`] decodes synchronously, then notifies listeners in registration
/// order before returning. The `onload` slot keeps the queue position of its first assignment.
#[derive(Default)]
pub struct Image {
    src: Option<String>,
    data: Option<PixelBuffer>,
    onload: Option<Handler>,
    load_slots: Vec<LoadSlot>,
    error_listeners: Vec<(ListenerId, Handler)>,
    next_listener: u64,
}

impl fmt::Debug for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Image")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("load_slots", &self.load_slots.len())
            .field("error_listeners", &self.error_listeners.len())
            .finish_non_exhaustive()
    }
}

impl Image {
    /// Empty image with no pixels.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sized construction is not supported; dimensions come from the decoded data.
    pub fn with_size(_width: u32, _height: u32) -> CanvasResult<Self> {
        Err(CanvasError::unsupported("new Image(width, height)"))
    }

    /// Last assigned source, empty when unset.
    pub fn src(&self) -> &str {
        self.src.as_deref().unwrap_or("")
    }

    /// Load a `data:image/png;base64,` URI.
    ///
    /// Any other (or empty) value fails with [`CanvasError::Unsupported`]. A payload that does not
    /// decode is not an error for the caller: it is reported to the `error` listeners instead.
    #[tracing::instrument(skip_all, fields(len = value.len()))]
    pub fn set_src(&mut self, value: &str) -> CanvasResult<()> {
        if value.is_empty() {
            return Err(CanvasError::unsupported("Image.src = \"\""));
        }
        let payload = png_payload(value).ok_or_else(|| {
            CanvasError::unsupported("Image.src only accepts data:image/png;base64 URIs")
        })?;
        self.src = Some(value.to_owned());

        match decode_base64(payload).and_then(|png| decode_png(&png)) {
            Ok(pixels) => {
                tracing::debug!(
                    width = pixels.width(),
                    height = pixels.height(),
                    "image decoded"
                );
                self.data = Some(pixels);
                self.dispatch(EventKind::Load);
            }
            Err(err) => {
                tracing::warn!(%err, "image decode failed");
                self.dispatch(EventKind::Error);
            }
        }
        Ok(())
    }

    /// Decoded pixels, if a load has succeeded.
    pub fn data(&self) -> Option<&PixelBuffer> {
        self.data.as_ref()
    }

    /// Width of the decoded pixels, 0 before a load.
    pub fn width(&self) -> u32 {
        self.data.as_ref().map_or(0, PixelBuffer::width)
    }

    /// Height of the decoded pixels, 0 before a load.
    pub fn height(&self) -> u32 {
        self.data.as_ref().map_or(0, PixelBuffer::height)
    }

    pub fn natural_width(&self) -> u32 {
        self.width()
    }

    pub fn natural_height(&self) -> u32 {
        self.height()
    }

    /// Loading is synchronous, so this is always `true`.
    pub fn complete(&self) -> bool {
        true
    }

    /// Return `true` when an `onload` handler is set.
    pub fn has_onload(&self) -> bool {
        self.onload.is_some()
    }

    /// Set the `onload` handler.
    pub fn set_onload(&mut self, handler: impl FnMut(&ImageEvent) + 'static) {
        self.onload = Some(Box::new(handler));
        self.reserve_primary_slot();
    }

    /// Unset the `onload` handler. Its queue position stays reserved.
    pub fn clear_onload(&mut self) {
        self.onload = None;
        self.reserve_primary_slot();
    }

    fn reserve_primary_slot(&mut self) {
        if !self
            .load_slots
            .iter()
            .any(|slot| matches!(slot, LoadSlot::Primary))
        {
            self.load_slots.push(LoadSlot::Primary);
        }
    }

    /// Append a listener for `kind`.
    pub fn add_event_listener(
        &mut self,
        kind: EventKind,
        handler: impl FnMut(&ImageEvent) + 'static,
    ) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        match kind {
            EventKind::Load => self
                .load_slots
                .push(LoadSlot::Listener(id, Box::new(handler))),
            EventKind::Error => self.error_listeners.push((id, Box::new(handler))),
        }
        id
    }

    /// Remove a listener. Returns `false` when `id` was not registered for `kind`.
    pub fn remove_event_listener(&mut self, kind: EventKind, id: ListenerId) -> bool {
        match kind {
            EventKind::Load => {
                let before = self.load_slots.len();
                self.load_slots
                    .retain(|slot| !matches!(slot, LoadSlot::Listener(l, _) if *l == id));
                self.load_slots.len() != before
            }
            EventKind::Error => {
                let before = self.error_listeners.len();
                self.error_listeners.retain(|(l, _)| *l != id);
                self.error_listeners.len() != before
            }
        }
    }

    fn dispatch(&mut self, kind: EventKind) {
        let event = ImageEvent {
            kind,
            width: self.width(),
            height: self.height(),
        };
        match kind {
            EventKind::Load => {
                for slot in self.load_slots.iter_mut() {
                    match slot {
                        LoadSlot::Primary => {
                            if let Some(handler) = self.onload.as_mut() {
                                handler(&event);
                            }
                        }
                        LoadSlot::Listener(_, handler) => handler(&event),
                    }
                }
            }
            EventKind::Error => {
                for (_, handler) in self.error_listeners.iter_mut() {
                    handler(&event);
                }
            }
        }
    }
}

impl ImageSource for Image {
    fn image_pixels(&self) -> Option<&PixelBuffer> {
        self.data.as_ref()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/canvas/image.rs"]
mod tests;
