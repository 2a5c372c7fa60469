pub(crate) mod color;
pub(crate) mod data_uri;
pub(crate) mod png;
