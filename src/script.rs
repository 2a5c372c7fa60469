//! JSON draw scripts: a surface size, export settings and an ordered list of context calls.
//!
//! ```json
//! {
//!   "width": 100, "height": 100,
//!   "ops": [
//!     { "op": "fill_style", "value": "red" },
//!     { "op": "fill_rect", "rect": [0, 0, 100, 100] },
//!     { "op": "draw_image", "src": "checkmark.png", "args": [25, 25] }
//!   ]
//! }
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::assets::data_uri::png_data_uri;
use crate::assets::png::ExportOpts;
use crate::canvas::context::DrawImageArgs;
use crate::canvas::image::Image;
use crate::canvas::surface::{DEFAULT_HEIGHT, DEFAULT_WIDTH, Surface};
use crate::foundation::error::{CanvasError, CanvasResult};

/// A parsed draw script.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Script {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default)]
    pub export: ExportOpts,
    #[serde(default)]
    pub ops: Vec<DrawOp>,
}

/// One context call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawOp {
    FillStyle {
        value: String,
    },
    FillRect {
        rect: [i32; 4],
    },
    ClearRect {
        rect: [i32; 4],
    },
    Save,
    Restore,
    /// `src` is a PNG data URI, or a PNG path relative to the script.
    DrawImage {
        src: String,
        args: Vec<i32>,
    },
    /// Snapshot `from` and put it back with its corner at `to`.
    PutImageData {
        from: [i32; 4],
        to: [i32; 2],
    },
    Resize {
        #[serde(default)]
        width: Option<f64>,
        #[serde(default)]
        height: Option<f64>,
    },
}

fn default_width() -> u32 {
    DEFAULT_WIDTH
}

fn default_height() -> u32 {
    DEFAULT_HEIGHT
}

impl Script {
    /// Parse a script from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> CanvasResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| CanvasError::invalid_argument(format!("parse draw script JSON: {e}")))
    }

    /// Parse a script from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> CanvasResult<Self> {
        let path = path.as_ref();
        let f = File::open(path)
            .with_context(|| format!("open draw script '{}'", path.display()))?;
        Self::from_reader(BufReader::new(f))
    }

    /// Execute every op on a fresh surface. Relative image paths resolve against `base_dir`.
    #[tracing::instrument(skip(self, base_dir), fields(ops = self.ops.len()))]
    pub fn run(&self, base_dir: &Path) -> CanvasResult<Surface> {
        let mut surface = Surface::with_opts(self.width, self.height, self.export);
        for (index, op) in self.ops.iter().enumerate() {
            let _span = tracing::debug_span!("op", index).entered();
            apply(&mut surface, op, base_dir)?;
        }
        Ok(surface)
    }
}

fn apply(surface: &mut Surface, op: &DrawOp, base_dir: &Path) -> CanvasResult<()> {
    if let DrawOp::Resize { width, height } = op {
        if let Some(w) = width {
            surface.set_width(*w);
        }
        if let Some(h) = height {
            surface.set_height(*h);
        }
        return Ok(());
    }

    let mut ctx = surface.get_context("2d")?;
    match op {
        DrawOp::FillStyle { value } => ctx.set_fill_style(value.as_str())?,
        DrawOp::FillRect { rect: [x, y, w, h] } => ctx.fill_rect(*x, *y, *w, *h),
        DrawOp::ClearRect { rect: [x, y, w, h] } => ctx.clear_rect(*x, *y, *w, *h),
        DrawOp::Save => ctx.save(),
        DrawOp::Restore => ctx.restore(),
        DrawOp::DrawImage { src, args } => {
            let args = DrawImageArgs::from_slice(args)?;
            let image = load_image(src, base_dir)?;
            ctx.draw_image(&image, args)?;
        }
        DrawOp::PutImageData {
            from: [x, y, w, h],
            to: [dx, dy],
        } => {
            let snapshot = ctx.get_image_data(*x, *y, *w, *h)?;
            ctx.put_image_data(&snapshot, *dx, *dy)?;
        }
        DrawOp::Resize { .. } => {}
    }
    Ok(())
}

fn load_image(src: &str, base_dir: &Path) -> CanvasResult<Image> {
    let uri = if src.starts_with("data:") {
        src.to_owned()
    } else {
        let path = base_dir.join(src);
        let bytes =
            std::fs::read(&path).with_context(|| format!("read image '{}'", path.display()))?;
        png_data_uri(&bytes)
    };

    let mut image = Image::new();
    image.set_src(&uri)?;
    if image.data().is_none() {
        return Err(CanvasError::codec(format!("image '{src}' failed to decode")));
    }
    Ok(image)
}

#[cfg(test)]
#[path = "../tests/unit/script.rs"]
mod tests;
