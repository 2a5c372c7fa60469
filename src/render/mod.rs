/// Straight-alpha RGBA8 pixel storage.
pub mod buffer;
pub mod composite;
