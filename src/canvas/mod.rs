pub(crate) mod context;
pub(crate) mod image;
pub(crate) mod style;
pub(crate) mod surface;
mod unsupported;
