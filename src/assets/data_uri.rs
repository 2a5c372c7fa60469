use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::foundation::error::{CanvasError, CanvasResult};

/// Prefix of every PNG data URI this crate reads or writes.
pub const PNG_DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// What a zero-area surface exports.
pub const EMPTY_DATA_URI: &str = "data:,";

/// Wrap PNG bytes as `data:image/png;base64,...`.
pub fn png_data_uri(png: &[u8]) -> String {
    let mut out = String::with_capacity(PNG_DATA_URI_PREFIX.len() + png.len().div_ceil(3) * 4);
    out.push_str(PNG_DATA_URI_PREFIX);
    STANDARD.encode_string(png, &mut out);
    out
}

/// Base64 payload of a PNG data URI, or `None` for any other URI.
pub fn png_payload(uri: &str) -> Option<&str> {
    uri.strip_prefix(PNG_DATA_URI_PREFIX)
}

/// Decode standard padded base64.
pub fn decode_base64(payload: &str) -> CanvasResult<Vec<u8>> {
    STANDARD
        .decode(payload.trim())
        .map_err(|e| CanvasError::codec(format!("decode base64: {e}")))
}

/// Decode a PNG data URI into the PNG bytes it carries.
pub fn decode_png_data_uri(uri: &str) -> CanvasResult<Vec<u8>> {
    let payload = png_payload(uri)
        .ok_or_else(|| CanvasError::unsupported("only data:image/png;base64 URIs are supported"))?;
    decode_base64(payload)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/data_uri.rs"]
mod tests;
