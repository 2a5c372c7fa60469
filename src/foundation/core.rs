/// Bytes per RGBA8 pixel.
pub const BYTES_PER_PIXEL: usize = 4;

/// Straight (non-premultiplied) RGBA8 color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel, independent of the color channels.
    pub a: u8,
}

impl Rgba8 {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    /// Opaque black, the default fill color.
    pub const BLACK: Self = Self::new(0, 0, 0, 255);

    /// Build a color from its four channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Channels in storage order.
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Read a color from the first four bytes of `px`.
    pub fn from_slice(px: &[u8]) -> Option<Self> {
        match px {
            [r, g, b, a, ..] => Some(Self::new(*r, *g, *b, *a)),
            _ => None,
        }
    }

    /// Return `true` when alpha is 255.
    pub fn is_opaque(self) -> bool {
        self.a == 255
    }
}

impl From<[u8; 4]> for Rgba8 {
    fn from(v: [u8; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

impl From<Rgba8> for [u8; 4] {
    fn from(c: Rgba8) -> Self {
        c.to_array()
    }
}

/// A rectangle as the caller wrote it: origin plus signed extent.
///
/// Negative `w` / `h` are legal and describe the same area as the flipped rectangle; see
/// [`PixelRect::normalized`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PixelRect {
    /// Origin x.
    pub x: i32,
    /// Origin y.
    pub y: i32,
    /// Signed width.
    pub w: i32,
    /// Signed height.
    pub h: i32,
}

impl PixelRect {
    /// Build a rectangle from origin and signed extent.
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Resolve into half-open bounds with `left <= right` and `top <= bottom`.
    pub fn normalized(self) -> Bounds {
        let (x0, y0) = (i64::from(self.x), i64::from(self.y));
        let (x1, y1) = (x0 + i64::from(self.w), y0 + i64::from(self.h));
        Bounds {
            left: x0.min(x1),
            top: y0.min(y1),
            right: x0.max(x1),
            bottom: y0.max(y1),
        }
    }
}

/// Half-open integer bounds `[left, right) x [top, bottom)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bounds {
    /// Inclusive left edge.
    pub left: i64,
    /// Inclusive top edge.
    pub top: i64,
    /// Exclusive right edge.
    pub right: i64,
    /// Exclusive bottom edge.
    pub bottom: i64,
}

impl Bounds {
    /// Horizontal extent.
    pub fn width(self) -> i64 {
        self.right - self.left
    }

    /// Vertical extent.
    pub fn height(self) -> i64 {
        self.bottom - self.top
    }

    /// Intersect with `[0, width) x [0, height)`. The result may be empty.
    pub fn clip_to(self, width: u32, height: u32) -> Self {
        let left = self.left.max(0);
        let top = self.top.max(0);
        Self {
            left,
            top,
            right: self.right.min(i64::from(width)).max(left),
            bottom: self.bottom.min(i64::from(height)).max(top),
        }
    }

    /// Return `true` when the bounds cover no pixel.
    pub fn is_empty(self) -> bool {
        self.left >= self.right || self.top >= self.bottom
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
