use crate::foundation::core::Rgba8;
use crate::foundation::error::{CanvasError, CanvasResult};

/// Parse a CSS color string (`transparent`, named colors, `#rgb[a]`, `#rrggbb[aa]`,
/// `rgb()` / `rgba()` and friends) into straight RGBA8.
pub fn parse_color(s: &str) -> CanvasResult<Rgba8> {
    let parsed = csscolorparser::parse(s)
        .map_err(|e| CanvasError::invalid_argument(format!("color \"{s}\": {e}")))?;
    Ok(Rgba8::from(parsed.to_rgba8()))
}

/// Serialize a color the way a 2d context reports `fillStyle`: `#rrggbb` when opaque,
/// `rgba(r, g, b, a)` otherwise.
pub fn format_color(c: Rgba8) -> String {
    if c.is_opaque() {
        return format!("#{:02x}{:02x}{:02x}", c.r, c.g, c.b);
    }
    format!("rgba({}, {}, {}, {})", c.r, c.g, c.b, alpha_string(c.a))
}

// Shortest of 2 or 3 decimals that maps back to the same byte.
fn alpha_string(a: u8) -> String {
    let unit = f64::from(a) / 255.0;
    let two = (unit * 100.0).round() / 100.0;
    let v = if (two * 255.0).round() as u8 == a {
        two
    } else {
        (unit * 1000.0).round() / 1000.0
    };
    format!("{v}")
}

#[cfg(test)]
#[path = "../../tests/unit/assets/color.rs"]
mod tests;
