/// Declare browser API members that exist only to fail with [`crate::CanvasError::Unsupported`].
///
/// Expands, inside an `impl` block, to one method per member and an `UNSUPPORTED` list of the
/// browser-side member names, so callers can detect the gap deterministically instead of getting a
/// silent no-op.
macro_rules! unsupported_members {
    ($( $(#[$meta:meta])* $js:literal => fn $name:ident($($ty:ty),*) -> $ret:ty; )*) => {
        $(
            $(#[$meta])*
            pub fn $name(&mut self, $(_: $ty),*) -> $crate::CanvasResult<$ret> {
                Err($crate::CanvasError::unsupported($js))
            }
        )*

        /// Browser member names that are stubs returning `CanvasError::Unsupported`.
        pub const UNSUPPORTED: &'static [&'static str] = &[$($js),*];
    };
}

pub(crate) use unsupported_members;
